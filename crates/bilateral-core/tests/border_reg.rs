//! Border regression test
//!
//! Tests adding and removing synthesized borders:
//!   (1) expand followed by contract restores the image, for both policies
//!   (2) the border pixels of expand agree with constrained_pixel
//!   (3) contract refuses borders that consume a whole dimension
//!   (4) coordinates at the ends of the i64 range resolve in constant time

use bilateral_core::{BorderMode, Error, RasterImage};
use bilateral_test::{RegParams, synthetic};

const MODES: [BorderMode; 2] = [BorderMode::Reflect, BorderMode::Wrap];

#[test]
fn border_reg_expand_contract_inverse() {
    let mut rp = RegParams::new("border_inverse");

    for (w, h, c) in [(7u32, 5u32, 1u32), (12, 9, 3), (4, 16, 4)] {
        let img = synthetic::random(w, h, c, u64::from(w * h * c)).unwrap();
        let max_b = (w.min(h) - 1) / 2;
        for b in 0..=max_b {
            for mode in MODES {
                let expanded = img.expand(b, b, mode, mode).unwrap();
                rp.compare_values(f64::from(w + 2 * b), f64::from(expanded.width()), 0.0);
                rp.compare_values(f64::from(h + 2 * b), f64::from(expanded.height()), 0.0);
                let restored = expanded.contract(b, b).unwrap();
                rp.compare_rasters(&img, &restored);
            }
        }
    }

    assert!(rp.cleanup(), "border_inverse regression test failed");
}

#[test]
fn border_reg_matches_constrained_lookup() {
    let mut rp = RegParams::new("border_lookup");

    let img = synthetic::random(5, 4, 2, 11).unwrap();
    // Borders wider than the image fold more than once.
    let (xb, yb) = (7i64, 6i64);
    for (x_mode, y_mode) in [
        (BorderMode::Reflect, BorderMode::Reflect),
        (BorderMode::Wrap, BorderMode::Wrap),
        (BorderMode::Reflect, BorderMode::Wrap),
    ] {
        let expanded = img.expand(xb as u32, yb as u32, x_mode, y_mode).unwrap();
        for y in 0..expanded.height() {
            for x in 0..expanded.width() {
                let expected =
                    img.constrained_pixel(i64::from(x) - xb, i64::from(y) - yb, x_mode, y_mode);
                let actual = expanded.pixel(x, y).unwrap();
                rp.compare_strings(expected, actual);
            }
        }
    }

    assert!(rp.cleanup(), "border_lookup regression test failed");
}

#[test]
fn border_reg_reflect_sequence() {
    // 0 1 2 3 | 2 1 0 1 2 3 2 ...
    let seq: Vec<u32> = (-6..10)
        .map(|x| BorderMode::Reflect.constrain(x, 4))
        .collect();
    assert_eq!(seq, vec![0, 1, 2, 3, 2, 1, 0, 1, 2, 3, 2, 1, 0, 1, 2, 3]);

    let seq: Vec<u32> = (-3..6).map(|x| BorderMode::Wrap.constrain(x, 4)).collect();
    assert_eq!(seq, vec![1, 2, 3, 0, 1, 2, 3, 0, 1]);

    for x in [-100, -1, 0, 1, 100] {
        assert_eq!(BorderMode::Reflect.constrain(x, 1), 0);
        assert_eq!(BorderMode::Wrap.constrain(x, 1), 0);
    }
}

#[test]
fn border_reg_single_pixel_image() {
    let img = RasterImage::from_vec(1, 1, 3, vec![10, 20, 30]).unwrap();
    let expanded = img
        .expand(3, 2, BorderMode::Reflect, BorderMode::Reflect)
        .unwrap();
    assert_eq!((expanded.width(), expanded.height()), (7, 5));
    assert!(expanded.data().chunks(3).all(|px| px == [10, 20, 30]));
}

#[test]
fn border_reg_extreme_coordinates() {
    let mut rp = RegParams::new("border_extreme");

    let pair = RasterImage::from_vec(2, 1, 1, vec![10, 20]).unwrap();
    let r = BorderMode::Reflect;
    rp.compare_values(10.0, f64::from(pair.constrained_pixel(1 << 40, 0, r, r)[0]), 0.0);
    rp.compare_values(20.0, f64::from(pair.constrained_pixel(i64::MAX, 0, r, r)[0]), 0.0);
    rp.compare_values(10.0, f64::from(pair.constrained_pixel(i64::MIN, 0, r, r)[0]), 0.0);

    // 2^40 and i64::MIN are multiples of 8, so coordinates offset from
    // them fold like the offsets alone when the period divides 8: a
    // reflect period of 2 * (5 - 1) and a wrap period of 4.
    for (mode, side) in [(BorderMode::Reflect, 5u32), (BorderMode::Wrap, 4)] {
        let img = synthetic::random(side, side, 3, u64::from(side)).unwrap();
        for k in 0..16i64 {
            let near = img.constrained_pixel(k, k, mode, mode);
            for base in [1i64 << 40, i64::MIN] {
                let far = img.constrained_pixel(base + k, base + k, mode, mode);
                rp.compare_strings(near, far);
            }
        }
    }

    assert!(rp.cleanup(), "border_extreme regression test failed");
}

#[test]
fn border_reg_contract_too_large() {
    let img = synthetic::constant(6, 4, 1, 0).unwrap();
    assert!(img.contract(2, 1).is_ok());
    assert!(matches!(
        img.contract(3, 0),
        Err(Error::BorderTooLarge { .. })
    ));
    assert!(matches!(
        img.contract(0, 2),
        Err(Error::BorderTooLarge { .. })
    ));
    assert!(img.contract(u32::MAX, 0).is_err());
}
