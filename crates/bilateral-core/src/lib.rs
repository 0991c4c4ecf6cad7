//! bilateral-core - Basic data structures for the bilateral filter crates
//!
//! This crate provides the fundamental data structures used throughout
//! the workspace:
//!
//! - [`RasterImage`] - Owned multi-channel 8-bit image buffer
//! - [`BorderMode`] - Reflect / wrap policies for out-of-range coordinates
//! - [`RowSource`] / [`RowSink`] - Row-at-a-time host adapters
//! - [`layout`] - Grid indexing and fallible allocation helpers

pub mod error;
pub mod layout;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{BorderMode, RasterImage, RowSink, RowSource};

/// Number of distinct values of an 8-bit sample.
pub const INTENSITY_LEVELS: u32 = 256;
