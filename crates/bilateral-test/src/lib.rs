//! bilateral-test - Regression test framework for the bilateral filter crates
//!
//! This crate provides the comparison bookkeeping shared by the `*_reg`
//! tests of the other crates, and generators for small synthetic images.
//!
//! # Usage
//!
//! ```ignore
//! use bilateral_test::{RegParams, synthetic};
//!
//! let mut rp = RegParams::new("fixpoint");
//! let img = synthetic::constant(16, 16, 3, 128)?;
//! rp.compare_rasters(&img, &filtered);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::RegParams;
