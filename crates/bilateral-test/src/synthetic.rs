//! Synthetic test images
//!
//! Small deterministic rasters for regression tests. Random images are
//! seeded so a failing case reproduces.

use crate::error::{TestError, TestResult};
use bilateral_core::RasterImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Image with every sample equal to `value`.
pub fn constant(width: u32, height: u32, channels: u32, value: u8) -> TestResult<RasterImage> {
    let mut image = RasterImage::new(width, height, channels)?;
    image.data_mut().fill(value);
    Ok(image)
}

/// Single-channel image whose samples count up row-major from `start`,
/// wrapping at 256.
pub fn ramp(width: u32, height: u32, start: u8) -> TestResult<RasterImage> {
    let mut image = RasterImage::new(width, height, 1)?;
    for (i, v) in image.data_mut().iter_mut().enumerate() {
        *v = start.wrapping_add(i as u8);
    }
    Ok(image)
}

/// Image split at column `split` into `left` and `right` halves, in every
/// channel.
pub fn vertical_edge(
    width: u32,
    height: u32,
    channels: u32,
    split: u32,
    left: u8,
    right: u8,
) -> TestResult<RasterImage> {
    if split > width {
        return Err(TestError::InvalidArguments(format!(
            "split {split} beyond width {width}"
        )));
    }
    let mut image = RasterImage::new(width, height, channels)?;
    let ch = channels as usize;
    for y in 0..height {
        for (x, px) in image.row_mut(y).chunks_exact_mut(ch).enumerate() {
            px.fill(if (x as u32) < split { left } else { right });
        }
    }
    Ok(image)
}

/// Image of uniformly distributed samples from a seeded generator.
pub fn random(width: u32, height: u32, channels: u32, seed: u64) -> TestResult<RasterImage> {
    let mut image = RasterImage::new(width, height, channels)?;
    let mut rng = StdRng::seed_from_u64(seed);
    rng.fill(image.data_mut());
    Ok(image)
}

/// Image of samples scattered around `base` by at most `amplitude`.
///
/// Useful where a filter with a large enough threshold should see every
/// neighbour.
pub fn noisy(
    width: u32,
    height: u32,
    channels: u32,
    base: u8,
    amplitude: u8,
    seed: u64,
) -> TestResult<RasterImage> {
    let mut image = RasterImage::new(width, height, channels)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let lo = base.saturating_sub(amplitude);
    let hi = base.saturating_add(amplitude);
    for v in image.data_mut() {
        *v = rng.random_range(lo..=hi);
    }
    Ok(image)
}
