//! Integral histograms (per-bin summed area tables)
//!
//! Cell `(x, y)` of a [`HistogramGrid`] holds, for every bin, the number of
//! source pixels in the rectangle `[0, x] x [0, y]` whose value falls in
//! that bin. Any rectangle's histogram then costs four cell reads per bin,
//! independent of the rectangle's area.
//!
//! The recursion is:
//! `a(x,y) = v(x,y) + a(x-1,y) + a(x,y-1) - a(x-1,y-1)`
//! with `v` the one-hot bin indicator of pixel `(x, y)` and out-of-range
//! predecessors treated as zero.

use crate::FilterResult;
use crate::params::BinLayout;
use bilateral_core::layout::{cell_index, cell_index_unchecked, grid_len, try_zeroed_vec};
use bilateral_core::{Error, RasterImage};

/// Integral histogram of one channel over one rectangle of a raster.
#[derive(Debug, Clone)]
pub struct HistogramGrid {
    width: u32,
    height: u32,
    bins: BinLayout,
    counts: Vec<u32>,
}

impl HistogramGrid {
    /// Build the integral histogram of `channel` over the `width x height`
    /// rectangle of `image` whose top-left corner is `(x0, y0)`.
    ///
    /// # Errors
    ///
    /// Returns a core error if the rectangle is empty or leaves the image,
    /// if `channel` does not exist, or if the grid cannot be allocated.
    pub fn build(
        bins: BinLayout,
        image: &RasterImage,
        x0: u32,
        y0: u32,
        width: u32,
        height: u32,
        channel: u32,
    ) -> FilterResult<Self> {
        image.check_channel(channel)?;
        let fits = |start: u32, len: u32, limit: u32| {
            len > 0 && start.checked_add(len).is_some_and(|end| end <= limit)
        };
        if !fits(x0, width, image.width()) || !fits(y0, height, image.height()) {
            return Err(Error::RegionOutOfBounds {
                x: x0,
                y: y0,
                width,
                height,
                image_width: image.width(),
                image_height: image.height(),
            }
            .into());
        }

        let nb = bins.num_bins();
        let stride = nb as usize;
        let shift = bins.shift();
        let mut counts: Vec<u32> = try_zeroed_vec(grid_len(width, height, nb)?)?;

        for y in 0..height {
            let src_row = image.row(y0 + y);
            for x in 0..width {
                let cur = cell_index_unchecked(width, nb, x, y);
                let sample = src_row[((x0 + x) * image.channels() + channel) as usize];
                counts[cur + (u32::from(sample) >> shift) as usize] = 1;

                if x > 0 {
                    let left = cur - stride;
                    for b in 0..stride {
                        let v = counts[left + b];
                        counts[cur + b] += v;
                    }
                }
                if y > 0 {
                    let up = cell_index_unchecked(width, nb, x, y - 1);
                    for b in 0..stride {
                        let v = counts[up + b];
                        counts[cur + b] += v;
                    }
                }
                if x > 0 && y > 0 {
                    let diag = cell_index_unchecked(width, nb, x - 1, y - 1);
                    for b in 0..stride {
                        let v = counts[diag + b];
                        counts[cur + b] -= v;
                    }
                }
            }
        }

        Ok(HistogramGrid {
            width,
            height,
            bins,
            counts,
        })
    }

    /// Build the integral histogram of `channel` over the whole image.
    pub fn from_image(bins: BinLayout, image: &RasterImage, channel: u32) -> FilterResult<Self> {
        Self::build(bins, image, 0, 0, image.width(), image.height(), channel)
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bins per cell.
    pub fn num_bins(&self) -> u32 {
        self.bins.num_bins()
    }

    /// Cumulative counts of cell `(x, y)`, or `None` outside the grid.
    pub fn cell(&self, x: u32, y: u32) -> Option<&[u32]> {
        let nb = self.bins.num_bins();
        let i = cell_index(self.width, self.height, nb, x, y)?;
        Some(&self.counts[i..i + nb as usize])
    }

    /// Per-bin pixel counts of the closed rectangle spanned by the two
    /// corners, written into `out`.
    ///
    /// Inverted corners are swapped and the far corner is clamped to the
    /// grid. A near corner outside the grid yields all zeros.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than the number of bins.
    pub fn query_into(&self, x1: u32, y1: u32, x2: u32, y2: u32, out: &mut [u32]) {
        let nb = self.bins.num_bins();
        let out = &mut out[..nb as usize];
        out.fill(0);

        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        let (y1, y2) = if y1 > y2 { (y2, y1) } else { (y1, y2) };
        if x1 >= self.width || y1 >= self.height {
            return;
        }
        let x2 = x2.min(self.width - 1);
        let y2 = y2.min(self.height - 1);

        //  a-----b
        //  |     |
        //  d-----c
        // a, b and d sit one cell outside the rectangle and vanish on the
        // grid's top or left edge.
        let at = |x: u32, y: u32| cell_index_unchecked(self.width, nb, x, y);
        let c = at(x2, y2);
        let b = (y1 > 0).then(|| at(x2, y1 - 1));
        let d = (x1 > 0).then(|| at(x1 - 1, y2));
        let a = (x1 > 0 && y1 > 0).then(|| at(x1 - 1, y1 - 1));

        for (bin, slot) in out.iter_mut().enumerate() {
            let mut v = self.counts[c + bin];
            if let Some(a) = a {
                v = v.wrapping_add(self.counts[a + bin]);
            }
            if let Some(b) = b {
                v = v.wrapping_sub(self.counts[b + bin]);
            }
            if let Some(d) = d {
                v = v.wrapping_sub(self.counts[d + bin]);
            }
            *slot = v;
        }
    }

    /// Allocating form of [`HistogramGrid::query_into`].
    pub fn query(&self, x1: u32, y1: u32, x2: u32, y2: u32) -> Vec<u32> {
        let mut out = vec![0; self.bins.num_bins() as usize];
        self.query_into(x1, y1, x2, y2, &mut out);
        out
    }
}
