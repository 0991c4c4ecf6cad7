//! Border operations for raster images
//!
//! This module provides functions for adding and removing synthesized
//! borders around images:
//!
//! - [`RasterImage::expand`] grows the image, filling the new border from
//!   the interior with a mirror or periodic policy per axis
//! - [`RasterImage::contract`] crops a border off again

use super::RasterImage;
use crate::error::{Error, Result};
use crate::layout::{cell_index_unchecked, try_zeroed_vec};

/// Policy for resolving coordinates that fall outside an image axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Mirror at each boundary without repeating the edge sample
    /// (`-1 -> 1`, `n -> n - 2`), folding repeatedly until in range.
    #[default]
    Reflect,
    /// Periodic continuation (`-1 -> n - 1`, `n -> 0`).
    Wrap,
}

impl BorderMode {
    /// Map a signed coordinate onto `[0, extent)`.
    ///
    /// An extent of 0 or 1 always resolves to 0.
    pub fn constrain(self, coord: i64, extent: u32) -> u32 {
        if extent <= 1 {
            return 0;
        }
        let n = i64::from(extent);
        let folded = match self {
            BorderMode::Wrap => coord.rem_euclid(n),
            BorderMode::Reflect => {
                // One period of the mirrored sequence is 0..=n-1 then back.
                let period = 2 * (n - 1);
                let c = coord.rem_euclid(period);
                if c > n - 1 { period - c } else { c }
            }
        };
        folded as u32
    }
}

impl RasterImage {
    /// Add a synthesized border around the image.
    ///
    /// The result is `(width + 2*x_border) x (height + 2*y_border)`; every
    /// new pixel is copied from the interior via [`BorderMode::constrain`],
    /// so borders wider than the image are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the new size overflows and
    /// [`Error::AllocationFailed`] if the buffer cannot be allocated.
    pub fn expand(
        &self,
        x_border: u32,
        y_border: u32,
        x_mode: BorderMode,
        y_mode: BorderMode,
    ) -> Result<RasterImage> {
        let new_width = x_border
            .checked_mul(2)
            .and_then(|b| b.checked_add(self.width))
            .ok_or(Error::InvalidDimension {
                width: u32::MAX,
                height: self.height,
            })?;
        let new_height = y_border
            .checked_mul(2)
            .and_then(|b| b.checked_add(self.height))
            .ok_or(Error::InvalidDimension {
                width: self.width,
                height: u32::MAX,
            })?;

        let mut out = RasterImage::new(new_width, new_height, self.channels)?;
        let ch = self.channels as usize;

        // Resolve the column mapping once; it is the same for every row.
        let mut x_map: Vec<u32> = try_zeroed_vec(new_width as usize)?;
        for (x, sx) in (0..new_width).zip(x_map.iter_mut()) {
            *sx = x_mode.constrain(i64::from(x) - i64::from(x_border), self.width);
        }

        for y in 0..new_height {
            let sy = y_mode.constrain(i64::from(y) - i64::from(y_border), self.height);
            let src_row = self.row(sy);
            let dst_row = out.row_mut(y);
            for (dst, &sx) in dst_row.chunks_exact_mut(ch).zip(&x_map) {
                let s = sx as usize * ch;
                dst.copy_from_slice(&src_row[s..s + ch]);
            }
        }

        Ok(out)
    }

    /// Remove a border, the inverse of [`RasterImage::expand`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::BorderTooLarge`] unless `width > 2*x_border` and
    /// `height > 2*y_border`.
    pub fn contract(&self, x_border: u32, y_border: u32) -> Result<RasterImage> {
        let too_large = || Error::BorderTooLarge {
            x_border,
            y_border,
            width: self.width,
            height: self.height,
        };
        let new_width = x_border
            .checked_mul(2)
            .and_then(|b| self.width.checked_sub(b))
            .filter(|&w| w > 0)
            .ok_or_else(too_large)?;
        let new_height = y_border
            .checked_mul(2)
            .and_then(|b| self.height.checked_sub(b))
            .filter(|&h| h > 0)
            .ok_or_else(too_large)?;

        let mut out = RasterImage::new(new_width, new_height, self.channels)?;
        let stride = out.row_stride();
        for y in 0..new_height {
            let start = cell_index_unchecked(self.width, self.channels, x_border, y + y_border);
            out.row_mut(y).copy_from_slice(&self.data()[start..start + stride]);
        }

        Ok(out)
    }
}
