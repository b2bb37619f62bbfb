//! Core CWT engine: configuration, input preparation and the worker pool
//! coordinator.
//!
//! A calculation prepares one immutable input spectrum, precomputes the
//! frequency band table and one shared inverse-transform plan, then statically
//! partitions the output rows across a fixed set of worker threads. Each
//! worker owns a full-length scratch buffer that serves first as the kernel
//! target and then, in place, as the convolve/downsample result handed to the
//! inverse transform and the per-row callback.

use std::ops::Range;
use std::sync::Mutex;
use std::thread;

use ndarray::{Array1, Array2, ArrayView1};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use tracing::{debug, trace};

use crate::bands::{frequency_bands, FrequencyBand};
use crate::convolve::convolve_and_downsample;
use crate::error::CwtError;
use crate::utils::{complex_from_real, pad_signal};
use crate::wavelets::gabor_kernel;

/// Transform configuration, fully populated by the caller before invocation.
#[derive(Debug, Clone)]
pub struct CwtConfig {
    /// Number of samples in the unpadded input signal.
    pub input_width: usize,
    /// Zero samples appended on each side of the input.
    pub input_padding: usize,
    /// Requested output resolution; must not exceed `input_width`.
    pub output_width: usize,
    /// Number of frequency rows to compute.
    pub height: usize,
    /// Span of the frequency axis; 0 defaults to `height / 2`.
    pub frequency_range: f64,
    /// Offset added to every row's linear frequency.
    pub frequency_offset: f64,
    /// Base of the exponential (constant-Q) row spacing; 0 selects linear.
    pub frequency_basis: f64,
    /// Kernel bandwidth control; must be positive.
    pub deviation: f64,
    /// Worker threads for the calculation; 0 is treated as 1.
    pub thread_count: usize,
}

impl CwtConfig {
    /// Length of the padded input buffer and of every kernel.
    pub fn input_sample_count(&self) -> usize {
        self.input_width + 2 * self.input_padding
    }

    /// Ratio of padded to unpadded sample count; keeps frequency scaling
    /// consistent under padding.
    pub fn padding_correction(&self) -> f64 {
        self.input_sample_count() as f64 / self.input_width as f64
    }

    /// Number of time-domain coefficients delivered per row.
    pub fn output_sample_count(&self) -> usize {
        (self.output_width as f64 * self.padding_correction()) as usize
    }

    /// Padding samples on each side of a delivered row.
    pub fn output_padding(&self) -> usize {
        (self.input_padding as f64 * self.output_width as f64 / self.input_width as f64) as usize
    }

    /// Check the configuration invariants.
    pub fn validate(&self) -> Result<(), CwtError> {
        if self.input_width == 0 {
            return Err(CwtError::Config("input_width must be positive".into()));
        }
        if self.output_width == 0 {
            return Err(CwtError::Config("output_width must be positive".into()));
        }
        if self.output_width > self.input_width {
            return Err(CwtError::Config(format!(
                "output_width {} exceeds input_width {}",
                self.output_width, self.input_width
            )));
        }
        if self.height == 0 {
            return Err(CwtError::Config("height must be positive".into()));
        }
        if self.deviation <= 0.0 {
            return Err(CwtError::Config(format!(
                "deviation must be positive, got {}",
                self.deviation
            )));
        }
        if self.frequency_basis < 0.0 {
            return Err(CwtError::Config(format!(
                "frequency_basis must be zero (linear) or positive, got {}",
                self.frequency_basis
            )));
        }
        Ok(())
    }
}

/// Aggregated CWT output.
#[derive(Debug, Clone)]
pub struct CwtOutput {
    /// Coefficient matrix, one row per frequency band
    /// (`height` x `output_sample_count`).
    pub coefs: Array2<Complex64>,
    /// Center frequency of each row.
    pub frequencies: Array1<f64>,
}

/// Shared read-only state for one calculation.
struct RowContext<'a> {
    output_sample_count: usize,
    padding_correction: f64,
    bands: &'a [FrequencyBand],
    spectrum: &'a [Complex64],
    inverse_plan: &'a dyn Fft<f64>,
}

/// Partition `[0, height)` into `thread_count` contiguous, disjoint ranges.
///
/// Every range but the first holds exactly `height / thread_count` rows; the
/// first absorbs the remainder, keeping the spawned workers uniform while the
/// inline thread takes the irregular share.
fn partition_rows(height: usize, thread_count: usize) -> Vec<Range<usize>> {
    let slice = height / thread_count;
    let mut ranges = Vec::with_capacity(thread_count);
    let first_end = height - slice * (thread_count - 1);
    ranges.push(0..first_end);
    let mut start = first_end;
    for _ in 1..thread_count {
        ranges.push(start..start + slice);
        start += slice;
    }
    ranges
}

fn alloc_buffer(len: usize) -> Result<Vec<Complex64>, CwtError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|err| {
        CwtError::Resource(format!("failed to allocate {len}-sample buffer: {err}"))
    })?;
    buf.resize(len, Complex64::new(0.0, 0.0));
    Ok(buf)
}

/// Row loop for one worker. Rows are processed in ascending order; a non-zero
/// callback status stops this worker only.
fn process_rows<F>(
    ctx: &RowContext<'_>,
    rows: Range<usize>,
    buffer: &mut [Complex64],
    fft_scratch: &mut [Complex64],
    callback: &F,
) -> Result<(), CwtError>
where
    F: Fn(usize, &[Complex64]) -> i32 + Sync,
{
    for y in rows {
        let band = &ctx.bands[y];
        gabor_kernel(
            buffer,
            band.frequency * ctx.padding_correction,
            band.deviation * ctx.output_sample_count as f64 * ctx.padding_correction,
        )?;
        convolve_and_downsample(ctx.output_sample_count, buffer, ctx.spectrum)?;
        ctx.inverse_plan
            .process_with_scratch(&mut buffer[..ctx.output_sample_count], fft_scratch);
        let status = callback(y, &buffer[..ctx.output_sample_count]);
        if status != 0 {
            trace!(row = y, status, "callback aborted this worker's row loop");
            return Err(CwtError::Callback(status));
        }
    }
    Ok(())
}

/// Run a full CWT calculation, delivering each row through `callback`.
///
/// `signal` must hold exactly `input_width` samples; it is zero-padded,
/// forward-transformed once, and the resulting spectrum is shared read-only
/// by all workers. The callback receives `(row_index, coefficients)` with
/// `output_sample_count` complex time-domain coefficients and returns 0 to
/// continue. It is invoked concurrently from multiple threads with ascending
/// row order only within a thread, so it must correlate results by row index.
/// A non-zero return stops the signaling thread's remaining rows, surfaces as
/// [`CwtError::Callback`], and leaves sibling threads untouched; rows already
/// delivered remain valid.
///
/// Scanning thread indices in order, the first recorded failure is the
/// overall result.
pub fn calculate<F>(config: &CwtConfig, signal: &[Complex64], callback: F) -> Result<(), CwtError>
where
    F: Fn(usize, &[Complex64]) -> i32 + Sync,
{
    config.validate()?;
    if signal.len() != config.input_width {
        return Err(CwtError::Config(format!(
            "signal length {} does not match input_width {}",
            signal.len(),
            config.input_width
        )));
    }
    let thread_count = config.thread_count.max(1);
    let input_sample_count = config.input_sample_count();
    let output_sample_count = config.output_sample_count();

    let bands = frequency_bands(
        config.height,
        config.frequency_range,
        config.frequency_offset,
        config.frequency_basis,
        config.deviation,
    );

    let mut planner = FftPlanner::new();
    let forward_plan = planner.plan_fft_forward(input_sample_count);
    let inverse_plan = planner.plan_fft_inverse(output_sample_count);

    let mut spectrum = pad_signal(signal, config.input_padding);
    {
        let mut forward_scratch = alloc_buffer(forward_plan.get_inplace_scratch_len())?;
        forward_plan.process_with_scratch(&mut spectrum, &mut forward_scratch);
    }

    let ranges = partition_rows(config.height, thread_count);
    debug!(
        height = config.height,
        thread_count,
        input_sample_count,
        output_sample_count,
        "starting cwt calculation"
    );

    let inverse_scratch_len = inverse_plan.get_inplace_scratch_len();
    let mut inline_buffer = alloc_buffer(input_sample_count)?;
    let mut inline_fft_scratch = alloc_buffer(inverse_scratch_len)?;
    let mut worker_scratch = Vec::with_capacity(thread_count - 1);
    for _ in 1..thread_count {
        worker_scratch.push((
            alloc_buffer(input_sample_count)?,
            alloc_buffer(inverse_scratch_len)?,
        ));
    }

    let ctx = RowContext {
        output_sample_count,
        padding_correction: config.padding_correction(),
        bands: &bands,
        spectrum: &spectrum,
        inverse_plan: inverse_plan.as_ref(),
    };
    let ctx = &ctx;
    let callback = &callback;

    let results: Vec<Result<(), CwtError>> = thread::scope(|s| {
        let mut handles = Vec::with_capacity(thread_count - 1);
        let mut spawn_error = None;
        let spawn_iter = ranges[1..].iter().cloned().zip(worker_scratch);
        for (offset, (rows, (mut buffer, mut fft_scratch))) in spawn_iter.enumerate() {
            let builder = thread::Builder::new().name(format!("cwt-worker-{}", offset + 1));
            let spawned = builder.spawn_scoped(s, move || {
                process_rows(ctx, rows, &mut buffer, &mut fft_scratch, callback)
            });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    // already-spawned workers keep running and are joined below
                    spawn_error = Some(CwtError::Concurrency(format!(
                        "failed to spawn worker thread: {err}"
                    )));
                    break;
                }
            }
        }
        let inline_result = if spawn_error.is_none() {
            process_rows(
                ctx,
                ranges[0].clone(),
                &mut inline_buffer,
                &mut inline_fft_scratch,
                callback,
            )
        } else {
            Ok(())
        };
        let mut results = vec![inline_result];
        for handle in handles {
            results.push(handle.join().unwrap_or_else(|_| {
                Err(CwtError::Concurrency("worker thread panicked".into()))
            }));
        }
        if let Some(err) = spawn_error {
            results.push(Err(err));
        }
        results
    });
    debug!("cwt calculation finished");

    match results.into_iter().find_map(|result| result.err()) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Convenience entry point: transform a real signal and aggregate all rows
/// into a [`CwtOutput`].
pub fn cwt(config: &CwtConfig, signal: &[f64]) -> Result<CwtOutput, CwtError> {
    config.validate()?;
    let samples = complex_from_real(signal);
    let output_sample_count = config.output_sample_count();
    let rows = Mutex::new(Array2::zeros((config.height, output_sample_count)));
    calculate(config, &samples, |y, coefficients| {
        let mut rows = rows.lock().expect("row sink mutex poisoned");
        rows.row_mut(y).assign(&ArrayView1::from(coefficients));
        0
    })?;
    let coefs = rows.into_inner().expect("row sink mutex poisoned");
    let frequencies = frequency_bands(
        config.height,
        config.frequency_range,
        config.frequency_offset,
        config.frequency_basis,
        config.deviation,
    )
    .iter()
    .map(|band| band.frequency)
    .collect();
    Ok(CwtOutput { coefs, frequencies })
}
