//! bilateral - Fast approximate bilateral filtering for Rust
//!
//! Edge-preserving smoothing and detail enhancement of 8-bit rasters with
//! any number of interleaved channels. The range kernel is evaluated over
//! integral histograms, so the cost per pixel does not grow with the
//! filter radius.
//!
//! # Example
//!
//! ```
//! use bilateral::RasterImage;
//! use bilateral::filter::{FilterParams, bilateral_filter};
//!
//! let image = RasterImage::from_vec(4, 4, 1, (0..16).collect()).unwrap();
//! let params = FilterParams::new(1, 50).with_tile_size(8);
//! let smoothed = bilateral_filter(&image, &params).unwrap();
//! assert_eq!(smoothed.width(), 4);
//! assert_eq!(smoothed.row(0), &[2, 3, 3, 4]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use bilateral_core::*;

// Re-export the filter crate as a module to avoid name conflicts
pub use bilateral_filter as filter;
