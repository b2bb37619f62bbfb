//! Python FFI bindings
//!
//! Exposes the aggregated transform through PyO3. Enabled by the `python`
//! feature so the pure-Rust library keeps building without a Python
//! toolchain.

use num_complex::Complex64;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{cwt, CwtConfig};

/// Python-callable CWT.
///
/// # Arguments
/// * `signal` - Input signal (1D numpy array)
/// * `height` - Number of frequency rows
/// * `frequency_range` - Span of the frequency axis (0 defaults to height/2)
/// * `frequency_offset` - Offset added to every row frequency
/// * `frequency_basis` - Base for exponential row spacing (0 = linear)
/// * `deviation` - Kernel bandwidth control, must be positive
/// * `input_padding` - Zero samples added on each side of the input
/// * `output_width` - Output resolution (default: input length)
/// * `thread_count` - Worker threads (0 is treated as 1)
///
/// # Returns
/// Tuple of (coefs, frequencies):
/// - coefs: complex CWT coefficients, shape (height, output_sample_count)
/// - frequencies: center frequency per row (1D array)
#[pyfunction]
#[pyo3(signature = (signal, height, frequency_range=0.0, frequency_offset=0.0,
                    frequency_basis=0.0, deviation=1.0, input_padding=0,
                    output_width=None, thread_count=1))]
#[allow(clippy::too_many_arguments)]
pub fn cwt_py<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    height: usize,
    frequency_range: f64,
    frequency_offset: f64,
    frequency_basis: f64,
    deviation: f64,
    input_padding: usize,
    output_width: Option<usize>,
    thread_count: usize,
) -> PyResult<(Bound<'py, PyArray2<Complex64>>, Bound<'py, PyArray1<f64>>)> {
    let signal = signal.as_array().to_owned();
    let input_width = signal.len();
    let config = CwtConfig {
        input_width,
        input_padding,
        output_width: output_width.unwrap_or(input_width),
        height,
        frequency_range,
        frequency_offset,
        frequency_basis,
        deviation,
        thread_count,
    };
    let output = cwt(&config, signal.as_slice().ok_or_else(|| {
        PyValueError::new_err("signal must be contiguous")
    })?)
    .map_err(|err| PyValueError::new_err(err.to_string()))?;
    Ok((
        output.coefs.into_pyarray(py),
        output.frequencies.into_pyarray(py),
    ))
}
