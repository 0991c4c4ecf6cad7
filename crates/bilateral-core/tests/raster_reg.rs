//! Raster regression test
//!
//! Tests raster construction and the row adapters against a host-style
//! store with padded rows.

use bilateral_core::{Error, RasterImage, Result};
use bilateral_test::{RegParams, synthetic};

/// Host store whose rows are padded to a 16-byte pitch.
struct PaddedStore {
    pitch: usize,
    row_len: usize,
    bytes: Vec<u8>,
}

impl PaddedStore {
    fn new(width: u32, height: u32, channels: u32) -> Self {
        let row_len = (width * channels) as usize;
        let pitch = row_len.div_ceil(16) * 16;
        Self {
            pitch,
            row_len,
            bytes: vec![0xAA; pitch * height as usize],
        }
    }
}

#[test]
fn raster_reg_row_adapters() {
    let mut rp = RegParams::new("raster_rows");

    let img = synthetic::random(13, 7, 3, 5).unwrap();
    let mut store = PaddedStore::new(13, 7, 3);

    let mut sink = |y: u32, row: &[u8]| -> Result<()> {
        let start = y as usize * store.pitch;
        store.bytes[start..start + store.row_len].copy_from_slice(row);
        Ok(())
    };
    img.write_rows(&mut sink).unwrap();

    // Padding is untouched.
    rp.compare_values(
        f64::from(0xAAu8),
        f64::from(store.bytes[store.row_len]),
        0.0,
    );

    let mut source = |y: u32, row: &mut [u8]| -> Result<()> {
        let start = y as usize * store.pitch;
        row.copy_from_slice(&store.bytes[start..start + store.row_len]);
        Ok(())
    };
    let back = RasterImage::read_rows(13, 7, 3, &mut source).unwrap();
    rp.compare_rasters(&img, &back);

    assert!(rp.cleanup(), "raster_rows regression test failed");
}

#[test]
fn raster_reg_adapter_failure_stops_transfer() {
    let mut rows_seen = 0;
    let mut source = |y: u32, _row: &mut [u8]| -> Result<()> {
        rows_seen += 1;
        if y == 2 {
            Err(Error::adapter("region read failed"))
        } else {
            Ok(())
        }
    };
    let r = RasterImage::read_rows(4, 6, 1, &mut source);
    assert!(matches!(r, Err(Error::Adapter(_))));
    assert_eq!(rows_seen, 3);
}

#[test]
fn raster_reg_geometry_checks() {
    assert!(matches!(
        RasterImage::new(0, 4, 1),
        Err(Error::InvalidDimension { .. })
    ));
    assert!(matches!(
        RasterImage::new(4, 4, 0),
        Err(Error::InvalidChannelCount(0))
    ));
    assert!(matches!(
        RasterImage::from_vec(2, 2, 3, vec![0; 11]),
        Err(Error::BufferSizeMismatch {
            expected: 12,
            actual: 11
        })
    ));

    let mut img = synthetic::constant(3, 2, 2, 0).unwrap();
    img.set_pixel(2, 1, &[7, 8]).unwrap();
    assert_eq!(img.pixel(2, 1), Some(&[7u8, 8][..]));
    assert_eq!(img.sample(2, 1, 1), Some(8));
    assert!(img.set_pixel(3, 0, &[1, 1]).is_err());
    assert!(img.pixel(0, 2).is_none());
    assert!(img.check_channel(2).is_err());
}
