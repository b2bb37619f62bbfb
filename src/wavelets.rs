//! Gabor wavelet kernel generation
//!
//! The kernel is synthesized directly as frequency-domain samples: an
//! unnormalized Gaussian band-pass centered on the requested bin, with the
//! frequency axis treated as circular so the bell wraps correctly across the
//! Nyquist boundary.

use num_complex::Complex64;

use crate::error::CwtError;

/// Fill `kernel` with a periodic Gaussian band-pass centered at
/// `center_frequency` (in bins, may be fractional).
///
/// `deviation` controls the effective bandwidth and must be positive.
/// For each index `i` the distance to the center is folded across the Nyquist
/// bin (`half - |f - half|`, period `kernel.len()`) so that bins just above
/// the center and bins wrapping in from the top of the spectrum are treated
/// alike. The kernel peaks at 1 on the center bin and is purely real.
pub fn gabor_kernel(
    kernel: &mut [Complex64],
    center_frequency: f64,
    deviation: f64,
) -> Result<(), CwtError> {
    if deviation <= 0.0 {
        return Err(CwtError::Config(format!(
            "kernel deviation must be positive, got {deviation}"
        )));
    }
    let eff = 1.0 / deviation.sqrt();
    let half = (kernel.len() >> 1) as f64;
    for (i, slot) in kernel.iter_mut().enumerate() {
        let mut f = (i as f64 - center_frequency).abs();
        f = half - (f - half).abs();
        f *= eff;
        *slot = Complex64::new((-f * f).exp(), 0.0);
    }
    Ok(())
}
