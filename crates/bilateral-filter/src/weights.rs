//! Pre-integrated range kernel weights
//!
//! A bilateral filter weighs every neighbour by a range kernel of its
//! intensity distance to the centre pixel. Here neighbours are only known
//! as per-bin counts, so the table stores, for each bin distance and each
//! sub-bin starting offset, the definite integral of the kernel over that
//! bin's span of distances. One multiply by the bin count then yields the
//! bin's total weight, whatever the intensity range.
//!
//! # Layout
//!
//! Row `k` holds bin distance `k`; column `j` in `[0, bin_size]` is the
//! start offset within the span. Column `bin_size` duplicates
//! `weight[k + 1][0]` so an upward walk starting at offset 0 stays in the
//! row. Spans that start beyond the threshold are marked as outside the
//! kernel support and stop a walk.

use crate::params::{BinLayout, FilterParams, KernelShape};
use bilateral_core::INTENSITY_LEVELS;

/// Marker stored for spans starting beyond the kernel support.
const OUTSIDE_SUPPORT: f64 = -1.0;

/// Bin means and integrated kernel weights for one filter invocation.
///
/// Immutable once built and shared by every tile and channel.
#[derive(Debug, Clone)]
pub struct WeightTable {
    bins: BinLayout,
    bin_mean: Vec<f64>,
    /// `num_bins` rows of `bin_size + 1` columns
    weights: Vec<f64>,
}

impl WeightTable {
    /// Build the table for `threshold` (in intensity units) and `shape`.
    ///
    /// `threshold` is expected to be in `[1, 254]`; see
    /// [`FilterParams::validate`].
    pub fn new(threshold: u32, shape: KernelShape, bins: BinLayout) -> Self {
        let num_bins = bins.num_bins();
        let bin_size = bins.bin_size();
        let levels = f64::from(INTENSITY_LEVELS);
        let t = f64::from(threshold) / levels;

        let bin_mean = (0..num_bins)
            .map(|i| f64::from((i * bin_size) + ((i + 1) * bin_size)) / 2.0)
            .collect();

        let cols = bin_size + 1;
        let mut weights = Vec::with_capacity((num_bins * cols) as usize);
        for i in 0..num_bins {
            for j in 0..cols {
                let near = j + i * bin_size;
                let far = near + bin_size;
                let w = if far <= threshold {
                    shape.integral(t, f64::from(far) / levels)
                        - shape.integral(t, f64::from(near) / levels)
                } else if near <= threshold {
                    // Span straddles the edge of the support.
                    shape.integral(t, f64::from(threshold) / levels)
                        - shape.integral(t, f64::from(near) / levels)
                } else {
                    OUTSIDE_SUPPORT
                };
                weights.push(w);
            }
        }

        WeightTable {
            bins,
            bin_mean,
            weights,
        }
    }

    /// Build the table described by validated filter parameters.
    pub fn from_params(params: &FilterParams) -> Self {
        Self::new(params.threshold, params.shape, params.bins)
    }

    /// Bin layout the table was built for.
    #[inline]
    pub fn bins(&self) -> BinLayout {
        self.bins
    }

    /// Midpoint of bin `bin`'s intensity span.
    ///
    /// # Panics
    ///
    /// Panics if `bin >= num_bins`.
    #[inline]
    pub fn bin_mean(&self, bin: u32) -> f64 {
        self.bin_mean[bin as usize]
    }

    /// Integrated weight for bin distance `distance` and start offset
    /// `offset`, or `None` when the span lies beyond the kernel support
    /// (including any distance past the last bin).
    ///
    /// # Panics
    ///
    /// Panics if `offset > bin_size`.
    #[inline]
    pub fn weight(&self, distance: u32, offset: u32) -> Option<f64> {
        let cols = self.bins.bin_size() + 1;
        assert!(offset < cols, "offset {offset} exceeds bin size");
        if distance >= self.bins.num_bins() {
            return None;
        }
        let w = self.weights[(distance * cols + offset) as usize];
        (w >= 0.0).then_some(w)
    }
}
