//! Row-at-a-time transfer between a host image store and a raster
//!
//! Host applications usually expose their pixels one row at a time in the
//! same interleaved 8-bit layout `RasterImage` uses. These traits are the
//! seam for such adapters; closures implement them directly.

use super::RasterImage;
use crate::error::Result;

/// Supplies rows of `width * channels` samples.
pub trait RowSource {
    /// Fill `row` with the samples of row `y`.
    fn read_row(&mut self, y: u32, row: &mut [u8]) -> Result<()>;
}

/// Consumes rows of `width * channels` samples.
pub trait RowSink {
    /// Store `row` as row `y`.
    fn write_row(&mut self, y: u32, row: &[u8]) -> Result<()>;
}

impl<F> RowSource for F
where
    F: FnMut(u32, &mut [u8]) -> Result<()>,
{
    fn read_row(&mut self, y: u32, row: &mut [u8]) -> Result<()> {
        self(y, row)
    }
}

impl<F> RowSink for F
where
    F: FnMut(u32, &[u8]) -> Result<()>,
{
    fn write_row(&mut self, y: u32, row: &[u8]) -> Result<()> {
        self(y, row)
    }
}

impl RasterImage {
    /// Build an image by pulling every row from `source`, top to bottom.
    ///
    /// # Errors
    ///
    /// Geometry and allocation errors from [`RasterImage::new`], or the
    /// first error returned by the source.
    pub fn read_rows<S: RowSource + ?Sized>(
        width: u32,
        height: u32,
        channels: u32,
        source: &mut S,
    ) -> Result<RasterImage> {
        let mut img = RasterImage::new(width, height, channels)?;
        for y in 0..height {
            source.read_row(y, img.row_mut(y))?;
        }
        Ok(img)
    }

    /// Push every row to `sink`, top to bottom.
    pub fn write_rows<S: RowSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        for y in 0..self.height() {
            sink.write_row(y, self.row(y))?;
        }
        Ok(())
    }
}
