//! Buffer preparation and conversion helpers.

use ndarray::Array2;
use num_complex::Complex64;

/// Lift a real signal into complex samples.
pub fn complex_from_real(signal: &[f64]) -> Vec<Complex64> {
    signal.iter().map(|&x| Complex64::new(x, 0.0)).collect()
}

/// Zero-pad a complex signal with `padding` zeros on each side.
pub fn pad_signal(signal: &[Complex64], padding: usize) -> Vec<Complex64> {
    let mut padded = vec![Complex64::new(0.0, 0.0); signal.len() + 2 * padding];
    padded[padding..padding + signal.len()].copy_from_slice(signal);
    padded
}

/// Convert complex coefficients to dB scale: `20 * log10(|c| + epsilon)`.
pub fn to_db(coefs: &Array2<Complex64>, epsilon: f64) -> Array2<f64> {
    coefs.mapv(|c| 20.0 * (c.norm() + epsilon).log10())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_pad_signal() {
        let signal = complex_from_real(&[1.0, 2.0, 3.0]);
        let padded = pad_signal(&signal, 2);
        assert_eq!(padded.len(), 7);
        assert_eq!(padded[0], Complex64::new(0.0, 0.0));
        assert_eq!(padded[1], Complex64::new(0.0, 0.0));
        assert_eq!(padded[2], Complex64::new(1.0, 0.0));
        assert_eq!(padded[4], Complex64::new(3.0, 0.0));
        assert_eq!(padded[6], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_pad_signal_zero_width() {
        let signal = complex_from_real(&[1.0, 2.0]);
        assert_eq!(pad_signal(&signal, 0), signal);
    }

    #[test]
    fn test_to_db() {
        let coefs = arr2(&[
            [Complex64::new(1.0, 0.0), Complex64::new(10.0, 0.0)],
            [Complex64::new(100.0, 0.0), Complex64::new(1000.0, 0.0)],
        ]);
        let db = to_db(&coefs, 1e-12);
        assert!((db[[0, 0]] - 0.0).abs() < 1e-10);
        assert!((db[[0, 1]] - 20.0).abs() < 1e-10);
        assert!((db[[1, 0]] - 40.0).abs() < 1e-10);
        assert!((db[[1, 1]] - 60.0).abs() < 1e-10);
    }
}
