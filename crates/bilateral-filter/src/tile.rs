//! Tiled evaluation of one channel
//!
//! A histogram grid over the whole expanded image would need
//! `width * height * num_bins` counters, so the image is cut into square
//! blocks of `tile_size - 2 * radius` output pixels. Each block builds its
//! own grid over the `tile_size` expanded-source pixels its windows reach
//! and filters the block from it. Blocks overlap only in their sources,
//! so results do not depend on the tile size.
//!
//! Rows of blocks are processed in parallel; blocks within a row run in
//! order on one worker.

use crate::histogram::HistogramGrid;
use crate::pixel::filter_pixel;
use crate::progress::{FilterHooks, ProgressReporter};
use crate::weights::WeightTable;
use crate::{FilterError, FilterResult};
use bilateral_core::RasterImage;
use log::trace;
use rayon::prelude::*;

/// Block partition of an output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlan {
    width: u32,
    height: u32,
    radius: u32,
    tile_size: u32,
    effective: u32,
}

impl TilePlan {
    /// Plan for a `width x height` output with the given filter radius.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `tile_size` leaves no
    /// room for output pixels once the `2 * radius` overlap is removed.
    pub fn new(width: u32, height: u32, radius: u32, tile_size: u32) -> FilterResult<Self> {
        let effective = radius
            .checked_mul(2)
            .and_then(|overlap| tile_size.checked_sub(overlap))
            .filter(|&e| e > 0)
            .ok_or_else(|| {
                FilterError::InvalidParameters(format!(
                    "tile_size ({tile_size}) must exceed 2 * radius (radius {radius})"
                ))
            })?;
        Ok(Self {
            width,
            height,
            radius,
            tile_size,
            effective,
        })
    }

    /// Output pixels per block edge.
    pub fn effective(&self) -> u32 {
        self.effective
    }

    /// Blocks per row.
    pub fn columns(&self) -> u32 {
        self.width.div_ceil(self.effective)
    }

    /// Rows of blocks.
    pub fn rows(&self) -> u32 {
        self.height.div_ceil(self.effective)
    }

    /// Total number of blocks.
    pub fn count(&self) -> u64 {
        u64::from(self.columns()) * u64::from(self.rows())
    }

    /// Output rectangle `(x, y, w, h)` of block `(col, row)`.
    pub fn block(&self, col: u32, row: u32) -> (u32, u32, u32, u32) {
        let x = col * self.effective;
        let y = row * self.effective;
        (
            x,
            y,
            self.effective.min(self.width - x),
            self.effective.min(self.height - y),
        )
    }

    /// Expanded-source rectangle `(x, y, w, h)` feeding block `(col, row)`.
    ///
    /// The expanded image is the output padded by `radius` on every side.
    pub fn source(&self, col: u32, row: u32) -> (u32, u32, u32, u32) {
        let (x, y, _, _) = self.block(col, row);
        let ew = self.width + 2 * self.radius;
        let eh = self.height + 2 * self.radius;
        (
            x,
            y,
            self.tile_size.min(ew - x),
            self.tile_size.min(eh - y),
        )
    }
}

/// Filter `channel` of `expanded` into the same channel of `out`.
///
/// `expanded` is `out`'s geometry padded by `plan`'s radius on every side.
/// Other channels of `out` are left untouched.
pub(crate) fn filter_channel(
    expanded: &RasterImage,
    out: &mut RasterImage,
    channel: u32,
    plan: &TilePlan,
    table: &WeightTable,
    hooks: &FilterHooks<'_>,
    reporter: &ProgressReporter<'_>,
) -> FilterResult<()> {
    let channels = out.channels() as usize;
    let stride = out.row_stride();
    let band_len = plan.effective() as usize * stride;
    let radius = plan.radius;
    let bins = table.bins();

    out.data_mut()
        .par_chunks_mut(band_len)
        .enumerate()
        .try_for_each(|(row, band)| -> FilterResult<()> {
            let row = row as u32;
            let mut scratch = vec![0u32; bins.num_bins() as usize];
            for col in 0..plan.columns() {
                hooks.check_cancelled()?;

                let (bx, by, bw, bh) = plan.block(col, row);
                let (sx, sy, sw, sh) = plan.source(col, row);
                trace!("channel {channel}: tile ({col}, {row}) at ({bx}, {by}) {bw}x{bh}");
                let hist = HistogramGrid::build(bins, expanded, sx, sy, sw, sh, channel)?;

                for ly in 0..bh {
                    let line = &mut band[ly as usize * stride..(ly as usize + 1) * stride];
                    for lx in 0..bw {
                        let x = bx + lx;
                        let center =
                            expanded.sample_unchecked(x + radius, by + ly + radius, channel);
                        line[x as usize * channels + channel as usize] =
                            filter_pixel(&hist, table, lx, ly, radius, center, &mut scratch);
                    }
                }
                reporter.advance(1);
            }
            Ok(())
        })
}
