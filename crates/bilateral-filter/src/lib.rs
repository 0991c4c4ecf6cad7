//! bilateral-filter - Integral-histogram bilateral filtering
//!
//! This crate provides an approximate bilateral filter whose per-pixel
//! cost does not depend on the radius, and detail enhancement built on it:
//!
//! - Bilateral filtering (edge-preserving smoothing) of any channel count
//! - Detail enhancement (amplifying `original - filtered`)
//! - Integral histograms with constant-time rectangle queries
//! - Pre-integrated linear and quadratic range kernels
//! - Tiled, parallel evaluation with progress and cancellation hooks

pub mod bilateral;
pub mod enhance;
mod error;
pub mod histogram;
pub mod params;
pub mod pixel;
pub mod progress;
pub mod tile;
pub mod weights;

pub use error::{FilterError, FilterResult};
pub use histogram::HistogramGrid;
pub use params::{
    BINS_8, BINS_32, BINS_64, BINS_128, BINS_256, BinLayout, DEFAULT_CONTRAST, DEFAULT_RADIUS,
    DEFAULT_THRESHOLD, DEFAULT_TILE_SIZE, EnhanceParams, FilterParams, KernelShape, MAX_THRESHOLD,
    MIN_THRESHOLD,
};
pub use progress::{FilterHooks, ProgressSink};
pub use tile::TilePlan;
pub use weights::WeightTable;

// Re-export commonly used functions
pub use bilateral::{bilateral_filter, bilateral_filter_with};
pub use enhance::{enhance_details, enhance_details_with};
pub use pixel::filter_pixel;
