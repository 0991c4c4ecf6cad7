//! Integral histogram regression test
//!
//! Checks rectangle queries against brute-force bin counts on random
//! images, for every bin layout and for inverted and overhanging
//! rectangles.

use bilateral_core::RasterImage;
use bilateral_filter::{BINS_8, BINS_32, BINS_64, BINS_128, BINS_256, BinLayout, HistogramGrid};
use bilateral_test::{RegParams, synthetic};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Per-bin counts of the closed rectangle, the slow way.
fn brute_force(
    img: &RasterImage,
    bins: BinLayout,
    channel: u32,
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
) -> Vec<u32> {
    let mut counts = vec![0u32; bins.num_bins() as usize];
    for y in y1..=y2.min(img.height() - 1) {
        for x in x1..=x2.min(img.width() - 1) {
            let v = img.sample(x, y, channel).unwrap();
            counts[bins.bin_of(v) as usize] += 1;
        }
    }
    counts
}

#[test]
fn histogram_reg_random_rectangles() {
    let mut rp = RegParams::new("histogram_random");
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for (i, bins) in [BINS_8, BINS_32, BINS_64, BINS_128, BINS_256]
        .into_iter()
        .enumerate()
    {
        let (w, h) = (rng.random_range(1..40u32), rng.random_range(1..40u32));
        let img = synthetic::random(w, h, 2, i as u64).unwrap();
        for channel in 0..2 {
            let hist = HistogramGrid::from_image(bins, &img, channel).unwrap();
            for _ in 0..200 {
                let (xa, xb) = (rng.random_range(0..w), rng.random_range(0..w + 5));
                let (ya, yb) = (rng.random_range(0..h), rng.random_range(0..h + 5));
                let (x1, x2) = (xa.min(xb), xa.max(xb));
                let (y1, y2) = (ya.min(yb), ya.max(yb));
                let expected = brute_force(&img, bins, channel, x1, y1, x2, y2);
                // Pass the corners in the caller's order; queries normalize.
                let actual = hist.query(xa, ya, xb, yb);
                rp.compare_strings(
                    &expected.iter().flat_map(|c| c.to_le_bytes()).collect::<Vec<_>>(),
                    &actual.iter().flat_map(|c| c.to_le_bytes()).collect::<Vec<_>>(),
                );
            }
        }
    }

    assert!(rp.cleanup(), "histogram_random regression test failed");
}

#[test]
fn histogram_reg_sub_region_matches_whole() {
    let mut rp = RegParams::new("histogram_region");

    let img = synthetic::random(30, 20, 1, 99).unwrap();
    let whole = HistogramGrid::from_image(BINS_64, &img, 0).unwrap();
    let (x0, y0) = (7, 4);
    let region = HistogramGrid::build(BINS_64, &img, x0, y0, 16, 12, 0).unwrap();

    for (x1, y1, x2, y2) in [(0, 0, 15, 11), (3, 2, 9, 9), (5, 5, 5, 5), (0, 6, 15, 11)] {
        let a = region.query(x1, y1, x2, y2);
        let b = whole.query(x0 + x1, y0 + y1, x0 + x2, y0 + y2);
        for (ca, cb) in a.iter().zip(&b) {
            rp.compare_values(f64::from(*cb), f64::from(*ca), 0.0);
        }
    }

    assert!(rp.cleanup(), "histogram_region regression test failed");
}

#[test]
fn histogram_reg_totals() {
    let img = synthetic::random(17, 11, 1, 3).unwrap();
    let hist = HistogramGrid::from_image(BINS_32, &img, 0).unwrap();
    let last = hist.cell(16, 10).unwrap();
    assert_eq!(last.iter().sum::<u32>(), 17 * 11);
    for y in 0..11 {
        for x in 0..17 {
            let total: u32 = hist.cell(x, y).unwrap().iter().sum();
            assert_eq!(total, (x + 1) * (y + 1));
        }
    }
}
