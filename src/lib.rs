//! # gabor-cwt — frequency-domain Continuous Wavelet Transform
//!
//! Computes the CWT of a real or complex signal by evaluating Gabor wavelet
//! kernels directly in the frequency domain, multiplying them against the
//! signal's spectrum, folding the product down to the output resolution, and
//! inverse-transforming each frequency row back to the time domain, in
//! parallel across a fixed worker-thread pool.
//!
//! The low-level entry point is [`calculate`], which streams rows to a
//! callback; [`cwt`] aggregates all rows into a matrix for callers that want
//! the whole transform at once.

pub mod bands;
pub mod convolve;
pub mod core;
pub mod error;
pub mod utils;
pub mod wavelets;

#[cfg(feature = "python")]
pub mod ffi;

pub use crate::core::{calculate, cwt, CwtConfig, CwtOutput};
pub use crate::error::CwtError;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn _gabor_cwt(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::cwt_py, m)?)?;
    Ok(())
}
