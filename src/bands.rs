//! Frequency band planning
//!
//! Computes, for each output row, the wavelet center frequency and the
//! frequency derivative used to size that row's kernel bandwidth. Rows are
//! spaced linearly by default; a positive frequency basis switches to an
//! exponential (constant-Q) spacing.

/// One row of the frequency band table.
///
/// `deviation` is the row's frequency derivative already scaled by the
/// configured deviation; the coordinator multiplies it by the output sample
/// count and padding correction to obtain the kernel bandwidth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    /// Center frequency of the row, in spectrum bins of the unpadded input.
    pub frequency: f64,
    /// Frequency derivative times the configured deviation.
    pub deviation: f64,
}

/// Compute the frequency band table for `row_count` rows.
///
/// Row `y` (0-indexed, ascending) gets the linear frequency
/// `frequency_range * (1 - y/row_count) + frequency_offset` and derivative
/// `frequency_range / row_count`. A `frequency_range` of zero defaults to
/// `row_count / 2` (half the row count, integer halving). If
/// `frequency_basis > 0` the linear frequency is remapped exponentially:
/// `frequency = basis^frequency`, with the derivative following by the chain
/// rule (`derivative *= ln(basis) * frequency`).
pub fn frequency_bands(
    row_count: usize,
    frequency_range: f64,
    frequency_offset: f64,
    frequency_basis: f64,
    deviation: f64,
) -> Vec<FrequencyBand> {
    let frequency_range = if frequency_range == 0.0 {
        (row_count / 2) as f64
    } else {
        frequency_range
    };
    (0..row_count)
        .map(|y| {
            let mut frequency =
                frequency_range * (1.0 - y as f64 / row_count as f64) + frequency_offset;
            let mut frequency_derivative = frequency_range / row_count as f64;
            if frequency_basis > 0.0 {
                frequency = frequency_basis.powf(frequency);
                frequency_derivative *= frequency_basis.ln() * frequency;
            }
            FrequencyBand {
                frequency,
                deviation: frequency_derivative * deviation,
            }
        })
        .collect()
}
