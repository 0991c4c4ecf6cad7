//! Per-pixel range filtering from a window histogram

use crate::histogram::HistogramGrid;
use crate::weights::WeightTable;
use bilateral_core::INTENSITY_LEVELS;

/// Filter one sample.
///
/// `(lx, ly)` is the top-left corner of the `(2r+1)^2` window in the
/// grid's local coordinates and `center` the unfiltered sample at the
/// window's centre. `scratch` receives the window histogram and must hold
/// at least `num_bins` entries.
///
/// The result is the centre value shifted by the weighted mean deviation
/// of its neighbours' bins. Bins are visited outwards from the centre bin
/// in both directions and each walk stops at the first span lying beyond
/// the kernel support. The centre bin itself is valued at `center`, which
/// keeps uniform regions unchanged.
pub fn filter_pixel(
    hist: &HistogramGrid,
    table: &WeightTable,
    lx: u32,
    ly: u32,
    radius: u32,
    center: u8,
    scratch: &mut [u32],
) -> u8 {
    let diameter = radius.saturating_mul(2);
    hist.query_into(
        lx,
        ly,
        lx.saturating_add(diameter),
        ly.saturating_add(diameter),
        scratch,
    );

    let bins = table.bins();
    let num_bins = bins.num_bins();
    let bin_size = bins.bin_size();
    let center_bin = bins.bin_of(center);
    let offset = bins.offset_of(center);
    let value = f64::from(center);

    let mut total_weight = f64::from(bin_size) / f64::from(INTENSITY_LEVELS);
    let mut deviation = 0.0f64;

    // Upward: distances measured from the top of the centre's span.
    let mut bin = center_bin;
    let mut k = 0;
    while bin < num_bins {
        let Some(w) = table.weight(k, bin_size - offset) else {
            break;
        };
        let w = w * f64::from(scratch[bin as usize]);
        total_weight += w;
        if k > 0 {
            deviation += w * (table.bin_mean(bin) - value);
        }
        bin += 1;
        k += 1;
    }

    // Downward: distances measured from the bottom of the span.
    let mut k = 0;
    for bin in (0..=center_bin).rev() {
        let Some(w) = table.weight(k, offset) else {
            break;
        };
        let w = w * f64::from(scratch[bin as usize]);
        total_weight += w;
        if k > 0 {
            deviation += w * (table.bin_mean(bin) - value);
        }
        k += 1;
    }

    if total_weight > 0.0 {
        (value + deviation / total_weight).floor().clamp(0.0, 255.0) as u8
    } else {
        0
    }
}
