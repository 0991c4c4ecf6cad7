//! RasterImage - 8-bit multi-channel image buffer
//!
//! The `RasterImage` structure owns a `width * height * channels` byte
//! buffer, row-major with interleaved channels. It is the input and output
//! type of every filter in this workspace.
//!
//! # Pixel layout
//!
//! - Sample `c` of pixel `(x, y)` lives at `(y * width + x) * channels + c`
//! - There is no row padding
//!
//! # Ownership model
//!
//! A `RasterImage` exclusively owns its buffer. Operations that change the
//! geometry ([`RasterImage::expand`], [`RasterImage::contract`]) allocate
//! and return a new, independently owned image.

mod border;
mod rows;

pub use border::BorderMode;
pub use rows::{RowSink, RowSource};

use crate::error::{Error, Result};
use crate::layout::{cell_index, cell_index_unchecked, grid_len, try_clone_slice, try_zeroed_vec};

/// Multi-channel 8-bit raster image
///
/// # Examples
///
/// ```
/// use bilateral_core::RasterImage;
///
/// let img = RasterImage::new(640, 480, 3).unwrap();
/// assert_eq!(img.width(), 640);
/// assert_eq!(img.data().len(), 640 * 480 * 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    channels: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Create a zero-filled image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0,
    /// [`Error::InvalidChannelCount`] if `channels` is 0 and
    /// [`Error::AllocationFailed`] if the buffer cannot be allocated.
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        check_geometry(width, height, channels)?;
        let data = try_zeroed_vec(grid_len(width, height, channels)?)?;
        Ok(RasterImage {
            width,
            height,
            channels,
            data,
        })
    }

    /// Wrap an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data.len()` is not
    /// `width * height * channels`, plus the geometry errors of
    /// [`RasterImage::new`].
    pub fn from_vec(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        check_geometry(width, height, channels)?;
        let expected = grid_len(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(RasterImage {
            width,
            height,
            channels,
            data,
        })
    }

    /// Deep copy with allocation failure reported as an error.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(RasterImage {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: try_clone_slice(&self.data)?,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of interleaved channels.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Bytes per row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Check whether `other` has the same width, height and channel count.
    pub fn sizes_equal(&self, other: &RasterImage) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    /// Raw sample buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw sample buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.row_stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Mutable samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.row_stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Buffer offset of pixel `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        cell_index(self.width, self.height, self.channels, x, y)
    }

    /// All channels of pixel `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let i = self.index(x, y)?;
        Some(&self.data[i..i + self.channels as usize])
    }

    /// Overwrite all channels of pixel `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfBounds`] outside the image and
    /// [`Error::BufferSizeMismatch`] if `pixel` does not hold exactly
    /// `channels` samples.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: &[u8]) -> Result<()> {
        let i = self.index(x, y).ok_or(Error::PixelOutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        if pixel.len() != self.channels as usize {
            return Err(Error::BufferSizeMismatch {
                expected: self.channels as usize,
                actual: pixel.len(),
            });
        }
        self.data[i..i + pixel.len()].copy_from_slice(pixel);
        Ok(())
    }

    /// One sample, or `None` if the pixel or channel is out of range.
    #[inline]
    pub fn sample(&self, x: u32, y: u32, channel: u32) -> Option<u8> {
        if channel >= self.channels {
            return None;
        }
        self.index(x, y).map(|i| self.data[i + channel as usize])
    }

    /// One sample without bounds checking on the coordinate.
    ///
    /// # Panics
    ///
    /// Panics (slice index) if the computed offset lies past the buffer.
    #[inline]
    pub fn sample_unchecked(&self, x: u32, y: u32, channel: u32) -> u8 {
        self.data[cell_index_unchecked(self.width, self.channels, x, y) + channel as usize]
    }

    /// Pixel at a signed coordinate, folded into range with the given
    /// per-axis border policy. Every coordinate resolves to a real pixel.
    pub fn constrained_pixel(
        &self,
        x: i64,
        y: i64,
        x_mode: BorderMode,
        y_mode: BorderMode,
    ) -> &[u8] {
        let cx = x_mode.constrain(x, self.width);
        let cy = y_mode.constrain(y, self.height);
        let i = cell_index_unchecked(self.width, self.channels, cx, cy);
        &self.data[i..i + self.channels as usize]
    }

    /// Check that `channel` names one of this image's channels.
    pub fn check_channel(&self, channel: u32) -> Result<()> {
        if channel < self.channels {
            Ok(())
        } else {
            Err(Error::ChannelOutOfRange {
                channel,
                channels: self.channels,
            })
        }
    }
}

fn check_geometry(width: u32, height: u32, channels: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    if channels == 0 {
        return Err(Error::InvalidChannelCount(channels));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: u32, h: u32, c: u32) -> RasterImage {
        let data = (0..w * h * c).map(|i| (i % 256) as u8).collect();
        RasterImage::from_vec(w, h, c, data).unwrap()
    }

    #[test]
    fn test_new_zeroed() {
        let img = RasterImage::new(5, 4, 3).unwrap();
        assert_eq!(img.data().len(), 60);
        assert!(img.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            RasterImage::new(0, 4, 1),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            RasterImage::new(4, 0, 1),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            RasterImage::new(4, 4, 0),
            Err(Error::InvalidChannelCount(0))
        ));
    }

    #[test]
    fn test_from_vec_length_checked() {
        let r = RasterImage::from_vec(2, 2, 3, vec![0; 11]);
        assert!(matches!(
            r,
            Err(Error::BufferSizeMismatch {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn test_pixel_access() {
        let mut img = ramp(3, 2, 2);
        assert_eq!(img.pixel(1, 1), Some(&[8u8, 9][..]));
        assert_eq!(img.sample(2, 0, 1), Some(5));
        assert_eq!(img.sample(2, 0, 2), None);
        assert_eq!(img.pixel(3, 0), None);

        img.set_pixel(0, 1, &[100, 101]).unwrap();
        assert_eq!(img.row(1)[..2], [100, 101]);
        assert!(img.set_pixel(0, 2, &[1, 2]).is_err());
        assert!(img.set_pixel(0, 0, &[1]).is_err());
    }

    #[test]
    fn test_sample_unchecked_matches_sample() {
        let img = ramp(4, 3, 3);
        for y in 0..3 {
            for x in 0..4 {
                for c in 0..3 {
                    assert_eq!(Some(img.sample_unchecked(x, y, c)), img.sample(x, y, c));
                }
            }
        }
    }

    #[test]
    fn test_constrained_pixel() {
        let img = ramp(4, 1, 1);
        let r = BorderMode::Reflect;
        let w = BorderMode::Wrap;
        assert_eq!(img.constrained_pixel(-1, 0, r, r), &[1]);
        assert_eq!(img.constrained_pixel(4, 0, r, r), &[2]);
        assert_eq!(img.constrained_pixel(-1, 0, w, r), &[3]);
        assert_eq!(img.constrained_pixel(5, -3, w, r), &[1]);
    }

    #[test]
    fn test_check_channel() {
        let img = ramp(2, 2, 3);
        assert!(img.check_channel(2).is_ok());
        assert!(matches!(
            img.check_channel(3),
            Err(Error::ChannelOutOfRange {
                channel: 3,
                channels: 3
            })
        ));
    }
}
