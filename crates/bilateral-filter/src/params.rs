//! Filter configuration
//!
//! Option structures for the bilateral filter and the detail enhancer,
//! with their defaults and validation. Validation runs at entry, before
//! any buffer is allocated.

use crate::{FilterError, FilterResult};
use bilateral_core::INTENSITY_LEVELS;

// ============================================================================
// Default parameters
// ============================================================================

/// Default spatial radius in pixels
pub const DEFAULT_RADIUS: u32 = 5;

/// Default range threshold in intensity units
pub const DEFAULT_THRESHOLD: u32 = 50;

/// Smallest accepted range threshold
pub const MIN_THRESHOLD: u32 = 1;

/// Largest accepted range threshold
pub const MAX_THRESHOLD: u32 = 254;

/// Default tile edge in expanded-source pixels
pub const DEFAULT_TILE_SIZE: u32 = 512;

/// Default contrast gain for detail enhancement
pub const DEFAULT_CONTRAST: f32 = 1.0;

// ============================================================================
// Kernel shape
// ============================================================================

/// Fall-off of the range kernel between distance 0 and the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelShape {
    /// Weight `1 - d/t`
    #[default]
    Linear,
    /// Weight `1 - (d/t)^2`
    Quadratic,
}

impl KernelShape {
    /// Antiderivative of the kernel weight, with `t` and `x` in the
    /// normalized `[0, 1]` intensity domain.
    #[inline]
    pub fn integral(self, t: f64, x: f64) -> f64 {
        match self {
            KernelShape::Linear => x - (x * x) / (2.0 * t),
            KernelShape::Quadratic => x - (x * x * x) / (3.0 * t * t),
        }
    }
}

// ============================================================================
// Bin layout
// ============================================================================

/// Partition of the 256 intensity levels into equal-width bins.
///
/// More bins give a more faithful approximation at the cost of histogram
/// memory (`tile_size^2 * num_bins * 4` bytes per tile). 64 bins is the
/// smallest count without visible banding; 32 and below band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinLayout {
    num_bins: u32,
    shift: u32,
}

/// 8 bins of 32 levels
pub const BINS_8: BinLayout = BinLayout {
    num_bins: 8,
    shift: 5,
};

/// 32 bins of 8 levels
pub const BINS_32: BinLayout = BinLayout {
    num_bins: 32,
    shift: 3,
};

/// 64 bins of 4 levels
pub const BINS_64: BinLayout = BinLayout {
    num_bins: 64,
    shift: 2,
};

/// 128 bins of 2 levels
pub const BINS_128: BinLayout = BinLayout {
    num_bins: 128,
    shift: 1,
};

/// One bin per intensity level
pub const BINS_256: BinLayout = BinLayout {
    num_bins: 256,
    shift: 0,
};

impl BinLayout {
    /// Layout with `num_bins` bins.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] unless `num_bins` is a
    /// power of two in `[1, 256]`.
    pub fn new(num_bins: u32) -> FilterResult<Self> {
        if num_bins == 0 || num_bins > INTENSITY_LEVELS || !num_bins.is_power_of_two() {
            return Err(FilterError::InvalidParameters(format!(
                "bin count must be a power of two in [1, 256], got {num_bins}"
            )));
        }
        let shift = (INTENSITY_LEVELS / num_bins).trailing_zeros();
        let layout = BinLayout { num_bins, shift };
        debug_assert_eq!(layout.num_bins() * layout.bin_size(), INTENSITY_LEVELS);
        Ok(layout)
    }

    /// Number of bins.
    #[inline]
    pub fn num_bins(self) -> u32 {
        self.num_bins
    }

    /// Intensity levels per bin.
    #[inline]
    pub fn bin_size(self) -> u32 {
        1 << self.shift
    }

    /// Right shift mapping an intensity to its bin.
    #[inline]
    pub fn shift(self) -> u32 {
        self.shift
    }

    /// Bin containing `value`.
    #[inline]
    pub fn bin_of(self, value: u8) -> u32 {
        u32::from(value) >> self.shift
    }

    /// Position of `value` inside its bin.
    #[inline]
    pub fn offset_of(self, value: u8) -> u32 {
        u32::from(value) - (self.bin_of(value) << self.shift)
    }
}

impl Default for BinLayout {
    fn default() -> Self {
        BINS_64
    }
}

// ============================================================================
// Option structures
// ============================================================================

/// Options for the bilateral filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Spatial radius; each output pixel sees a `(2r+1)^2` window
    pub radius: u32,
    /// Range kernel support in intensity units, `[1, 254]`
    pub threshold: u32,
    /// Histogram tile edge, must exceed `2 * radius`
    pub tile_size: u32,
    /// Range kernel fall-off
    pub shape: KernelShape,
    /// Histogram bin resolution
    pub bins: BinLayout,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            threshold: DEFAULT_THRESHOLD,
            tile_size: DEFAULT_TILE_SIZE,
            shape: KernelShape::default(),
            bins: BinLayout::default(),
        }
    }
}

impl FilterParams {
    /// Parameters with the given radius and threshold, defaults elsewhere.
    pub fn new(radius: u32, threshold: u32) -> Self {
        Self {
            radius,
            threshold,
            ..Self::default()
        }
    }

    /// Replace the tile size.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Replace the kernel shape.
    pub fn with_shape(mut self, shape: KernelShape) -> Self {
        self.shape = shape;
        self
    }

    /// Replace the bin layout.
    pub fn with_bins(mut self, bins: BinLayout) -> Self {
        self.bins = bins;
        self
    }

    /// Check every constraint.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] describing the first
    /// violated constraint.
    pub fn validate(&self) -> FilterResult<()> {
        if self.radius == 0 {
            return Err(FilterError::InvalidParameters("radius must be >= 1".to_string()));
        }
        if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&self.threshold) {
            return Err(FilterError::InvalidParameters(format!(
                "threshold must be in [{MIN_THRESHOLD}, {MAX_THRESHOLD}], got {}",
                self.threshold
            )));
        }
        let overlap = self.radius.checked_mul(2).ok_or_else(|| {
            FilterError::InvalidParameters(format!("radius {} too large", self.radius))
        })?;
        if self.tile_size <= overlap {
            return Err(FilterError::InvalidParameters(format!(
                "tile_size ({}) must exceed 2 * radius ({overlap})",
                self.tile_size
            )));
        }
        Ok(())
    }
}

/// Options for detail enhancement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhanceParams {
    /// Smoothing pass configuration
    pub filter: FilterParams,
    /// Gain applied to the detail layer (`original - filtered`)
    pub contrast: f32,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            filter: FilterParams::default(),
            contrast: DEFAULT_CONTRAST,
        }
    }
}

impl EnhanceParams {
    /// Enhancement on top of `filter` with the given gain.
    pub fn new(filter: FilterParams, contrast: f32) -> Self {
        Self { filter, contrast }
    }

    /// Check every constraint.
    pub fn validate(&self) -> FilterResult<()> {
        self.filter.validate()?;
        if !self.contrast.is_finite() {
            return Err(FilterError::InvalidParameters(format!(
                "contrast must be finite, got {}",
                self.contrast
            )));
        }
        Ok(())
    }
}
