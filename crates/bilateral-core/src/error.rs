//! Error types for bilateral-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Images need at least one channel
    #[error("invalid channel count: {0}")]
    InvalidChannelCount(u32),

    /// Supplied buffer does not match `width * height * channels`
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Channel index outside the image
    #[error("channel {channel} out of range for {channels}-channel image")]
    ChannelOutOfRange { channel: u32, channels: u32 },

    /// Pixel coordinate outside the image
    #[error("pixel ({x}, {y}) outside {width}x{height} image")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Rectangle not contained in the image
    #[error("region {width}x{height}+{x}+{y} outside {image_width}x{image_height} image")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// Border removal would leave nothing of the image
    #[error("border {x_border}x{y_border} too large for {width}x{height} image")]
    BorderTooLarge {
        x_border: u32,
        y_border: u32,
        width: u32,
        height: u32,
    },

    /// Memory allocation failed
    #[error("memory allocation failed ({bytes} bytes requested)")]
    AllocationFailed { bytes: usize },

    /// Host row adapter reported a failure
    #[error("row adapter error: {0}")]
    Adapter(String),
}

impl Error {
    /// Wrap a host adapter failure.
    pub fn adapter(msg: impl Into<String>) -> Self {
        Error::Adapter(msg.into())
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
