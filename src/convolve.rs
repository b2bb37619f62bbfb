//! Frequency-domain convolution with aliasing-sum downsampling
//!
//! Multiplies the kernel against the input spectrum and simultaneously
//! decimates from the input resolution to the output resolution. Decimating
//! by M in the time domain is equivalent to summing M aliased spectral
//! replicas scaled by 1/M, so the surplus bins are folded back onto the
//! first `dst_sample_count` bins instead of being discarded.

use num_complex::Complex64;

use crate::error::CwtError;

/// Filter `dst` (holding the kernel over the full spectrum length) by `src`
/// (the input spectrum) and fold the product down to `dst_sample_count` bins.
///
/// `dst` and `src` must both span the full `src.len()` bins; the kernel tail
/// beyond `dst_sample_count` participates in the fold, which is why the
/// kernel is always generated over the full input length. On return
/// `dst[..dst_sample_count]` holds the filtered, downsampled spectrum ready
/// for the inverse transform. The 1/src_sample_count factor bakes in the
/// normalization the unnormalized inverse transform omits.
pub fn convolve_and_downsample(
    dst_sample_count: usize,
    dst: &mut [Complex64],
    src: &[Complex64],
) -> Result<(), CwtError> {
    let src_sample_count = src.len();
    debug_assert_eq!(dst.len(), src_sample_count);
    if dst_sample_count > src_sample_count {
        return Err(CwtError::Config(format!(
            "output sample count {dst_sample_count} exceeds input sample count {src_sample_count}"
        )));
    }
    let scale = 1.0 / src_sample_count as f64;
    for i in 0..dst_sample_count {
        dst[i] = dst[i] * src[i] * scale;
    }
    if dst_sample_count == src_sample_count {
        return Ok(());
    }
    let rest = src_sample_count % dst_sample_count;
    let cut_index = src_sample_count - rest;
    let mut chunk_index = dst_sample_count;
    while chunk_index < cut_index {
        for i in 0..dst_sample_count {
            let aliased = dst[chunk_index + i] * src[chunk_index + i] * scale;
            dst[i] += aliased;
        }
        chunk_index += dst_sample_count;
    }
    for i in 0..rest {
        let aliased = dst[cut_index + i] * src[cut_index + i] * scale;
        dst[i] += aliased;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_no_fold_is_pointwise_product() {
        let kernel: Vec<Complex64> = (0..4).map(|i| c(1.0 + i as f64, 0.5)).collect();
        let spectrum: Vec<Complex64> = (0..4).map(|i| c(2.0, -(i as f64))).collect();
        let mut dst = kernel.clone();
        convolve_and_downsample(4, &mut dst, &spectrum).unwrap();
        for i in 0..4 {
            let expected = kernel[i] * spectrum[i] * 0.25;
            assert!((dst[i] - expected).norm() < 1e-12);
        }
    }

    #[test]
    fn test_fold_matches_direct_aliased_sum() {
        // src_n = 8, dst_n = 3: bin i must collect {i, i+3, i+6 (if < 8)} / 8
        let kernel: Vec<Complex64> = (0..8).map(|i| c(0.5 + 0.25 * i as f64, 0.1)).collect();
        let spectrum: Vec<Complex64> =
            (0..8).map(|i| c((i as f64).cos(), (i as f64).sin())).collect();
        let mut dst = kernel.clone();
        convolve_and_downsample(3, &mut dst, &spectrum).unwrap();

        let scale = 1.0 / 8.0;
        for i in 0..3 {
            let mut expected = c(0.0, 0.0);
            let mut bin = i;
            while bin < 8 {
                expected += kernel[bin] * spectrum[bin] * scale;
                bin += 3;
            }
            assert!(
                (dst[i] - expected).norm() < 1e-12,
                "mismatch at bin {i}: {:?} vs {:?}",
                dst[i],
                expected
            );
        }
    }

    #[test]
    fn test_exact_multiple_has_no_remainder_pass() {
        // src_n = 8, dst_n = 4: two whole chunks, empty remainder
        let kernel: Vec<Complex64> = (0..8).map(|i| c(i as f64, 0.0)).collect();
        let spectrum = vec![c(1.0, 0.0); 8];
        let mut dst = kernel.clone();
        convolve_and_downsample(4, &mut dst, &spectrum).unwrap();
        for i in 0..4 {
            let expected = (kernel[i] + kernel[i + 4]) * 0.125;
            assert!((dst[i] - expected).norm() < 1e-12);
        }
    }

    #[test]
    fn test_rejects_growing_output() {
        let mut dst = vec![c(1.0, 0.0); 4];
        let src = vec![c(1.0, 0.0); 4];
        assert!(matches!(
            convolve_and_downsample(5, &mut dst, &src),
            Err(CwtError::Config(_))
        ));
    }
}
