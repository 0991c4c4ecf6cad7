//! Approximate bilateral filtering (edge-preserving smoothing)
//!
//! Each output sample is a range-weighted mean over its `(2r+1)^2`
//! neighbourhood, with every neighbour contributing equally in space and
//! by intensity distance through a linear or quadratic kernel that falls
//! to zero at `threshold`.
//!
//! Neighbourhoods are gathered from integral histograms instead of being
//! visited pixel by pixel, so the cost per pixel is proportional to the
//! number of bins and independent of the radius.
//!
//! # Algorithm
//!
//! 1. Build one [`WeightTable`] for the threshold and kernel shape
//! 2. Pad the input by `radius` on every side with mirrored pixels
//! 3. For every channel, cover the image with tiles; each tile builds a
//!    [`HistogramGrid`](crate::HistogramGrid) over its padded source and
//!    filters its pixels from window queries on it
//!
//! # Example
//!
//! ```ignore
//! use bilateral_filter::{FilterParams, bilateral_filter};
//!
//! let smoothed = bilateral_filter(&image, &FilterParams::new(3, 40))?;
//! ```

use crate::progress::{FilterHooks, ProgressReporter};
use crate::tile::{TilePlan, filter_channel};
use crate::weights::WeightTable;
use crate::{FilterError, FilterParams, FilterResult};
use bilateral_core::{BorderMode, RasterImage};
use log::{debug, info};

/// Apply the approximate bilateral filter to every channel of `image`.
///
/// # Arguments
/// * `image` - Input raster, any channel count
/// * `params` - Radius, threshold, tile size, kernel shape and bins
///
/// # Returns
/// A new raster with the same dimensions as `image`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] for an invalid configuration,
/// before anything is allocated, and a core error if a buffer cannot be
/// allocated.
///
/// # See also
///
/// [`bilateral_filter_with`] for progress reporting and cancellation.
pub fn bilateral_filter(image: &RasterImage, params: &FilterParams) -> FilterResult<RasterImage> {
    bilateral_filter_with(image, params, &FilterHooks::new())
}

/// Apply the approximate bilateral filter, reporting progress and
/// honouring cancellation through `hooks`.
///
/// Progress reaches `1.0` when the last tile of the last channel is done.
///
/// # Errors
///
/// As [`bilateral_filter`], plus [`FilterError::Cancelled`] once the
/// cancellation flag is raised; no partial output is returned.
pub fn bilateral_filter_with(
    image: &RasterImage,
    params: &FilterParams,
    hooks: &FilterHooks<'_>,
) -> FilterResult<RasterImage> {
    filter_range(image, params, hooks, 0.0, 1.0)
}

/// Filter `image` with progress mapped onto `[start, end]`.
pub(crate) fn filter_range(
    image: &RasterImage,
    params: &FilterParams,
    hooks: &FilterHooks<'_>,
    start: f64,
    end: f64,
) -> FilterResult<RasterImage> {
    params.validate()?;
    let plan = TilePlan::new(image.width(), image.height(), params.radius, params.tile_size)?;
    let channels = image.channels();

    debug!(
        "bilateral filter: {}x{}x{}, radius {}, threshold {}, {:?} kernel, {} bins, \
         tile {} ({} blocks of {} per channel)",
        image.width(),
        image.height(),
        channels,
        params.radius,
        params.threshold,
        params.shape,
        params.bins.num_bins(),
        params.tile_size,
        plan.count(),
        plan.effective(),
    );

    hooks.check_cancelled().inspect_err(|_| info!("bilateral filter cancelled"))?;

    let table = WeightTable::from_params(params);
    let expanded = image.expand(
        params.radius,
        params.radius,
        BorderMode::Reflect,
        BorderMode::Reflect,
    )?;
    let mut out = image.try_clone()?;

    // Channel c reports into [at(c), at(c + 1)].
    let at = |c: u32| start + (end - start) * (f64::from(c) / f64::from(channels));
    for c in 0..channels {
        debug!("bilateral filter: channel {c} of {channels}");
        let reporter = ProgressReporter::new(hooks, at(c), at(c + 1), plan.count());
        filter_channel(&expanded, &mut out, c, &plan, &table, hooks, &reporter).inspect_err(
            |e| {
                if matches!(e, FilterError::Cancelled) {
                    info!("bilateral filter cancelled in channel {c}");
                }
            },
        )?;
        reporter.finish();
    }

    Ok(out)
}
