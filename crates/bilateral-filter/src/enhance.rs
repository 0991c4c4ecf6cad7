//! Detail enhancement
//!
//! The bilateral filter separates an image into a smooth base (the
//! filtered output) and a detail layer (`original - filtered`).
//! Enhancement adds the detail layer back with a gain:
//!
//! `enhanced = filtered + contrast * (original - filtered)`
//!
//! A gain of 1 reproduces the original, 0 the filtered image, and larger
//! gains exaggerate local contrast. When amplification pushes samples
//! past 255 the whole image is scaled down by `peak / 255` before
//! clamping, so bright details keep their shape instead of saturating.

use crate::bilateral::filter_range;
use crate::progress::{FilterHooks, ProgressReporter};
use crate::{EnhanceParams, FilterResult};
use bilateral_core::RasterImage;
use bilateral_core::layout::try_zeroed_vec;
use log::{debug, info};
use rayon::prelude::*;

/// End of the filtering share of the progress range.
const FILTER_SHARE: f64 = 0.75;

/// End of the boost pass share; the rescale pass takes the rest.
const BOOST_SHARE: f64 = 0.875;

/// Enhance the details of `image`.
///
/// # Arguments
/// * `image` - Input raster, any channel count
/// * `params` - Filter configuration and detail gain
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`](crate::FilterError) for an
/// invalid configuration and a core error if a buffer cannot be
/// allocated.
pub fn enhance_details(image: &RasterImage, params: &EnhanceParams) -> FilterResult<RasterImage> {
    enhance_details_with(image, params, &FilterHooks::new())
}

/// Enhance the details of `image`, reporting progress and honouring
/// cancellation through `hooks`.
///
/// Filtering reports into `[0, 0.75]`, the boost pass into
/// `[0.75, 0.875]` and the rescale pass into `[0.875, 1]`.
pub fn enhance_details_with(
    image: &RasterImage,
    params: &EnhanceParams,
    hooks: &FilterHooks<'_>,
) -> FilterResult<RasterImage> {
    params.validate()?;
    let filtered = filter_range(image, &params.filter, hooks, 0.0, FILTER_SHARE)?;
    hooks.check_cancelled().inspect_err(|_| info!("detail enhancement cancelled"))?;

    let stride = image.row_stride();
    let rows = u64::from(image.height());
    let contrast = params.contrast;

    // Boost pass
    let reporter = ProgressReporter::new(hooks, FILTER_SHARE, BOOST_SHARE, rows);
    let mut enhanced: Vec<f32> = try_zeroed_vec(image.data().len())?;
    enhanced
        .par_chunks_mut(stride)
        .zip(image.data().par_chunks(stride))
        .zip(filtered.data().par_chunks(stride))
        .for_each(|((dst, orig), filt)| {
            for ((e, &o), &f) in dst.iter_mut().zip(orig).zip(filt) {
                let f = f32::from(f);
                *e = f + contrast * (f32::from(o) - f);
            }
            reporter.advance(1);
        });
    reporter.finish();
    hooks.check_cancelled().inspect_err(|_| info!("detail enhancement cancelled"))?;

    let peak = enhanced
        .par_iter()
        .copied()
        .reduce(|| f32::NEG_INFINITY, f32::max);
    let scale = if peak > 255.0 {
        debug!("detail enhancement: peak {peak}, rescaling by {}", peak / 255.0);
        peak / 255.0
    } else {
        1.0
    };

    // Rescale pass, reusing the filtered buffer as output.
    let mut out = filtered;
    let reporter = ProgressReporter::new(hooks, BOOST_SHARE, 1.0, rows);
    out.data_mut()
        .par_chunks_mut(stride)
        .zip(enhanced.par_chunks(stride))
        .for_each(|(dst, src)| {
            for (d, &e) in dst.iter_mut().zip(src) {
                *d = (e / scale).trunc().clamp(0.0, 255.0) as u8;
            }
            reporter.advance(1);
        });
    reporter.finish();

    Ok(out)
}
