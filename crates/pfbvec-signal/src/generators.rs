//! Closed-form deterministic signal generators.
//!
//! Both generators are pure functions of their arguments. The sinusoid
//! superposes one tone per (frequency, phase) pair; the impulse writes a
//! flat unit block per (offset, width) pair. Overlapping impulses
//! overwrite rather than sum, an asymmetry with the sinusoid that
//! downstream consumers rely on.

use std::f64::consts::PI;

use num_complex::Complex;

use pfbvec_spec::Dtype;

use crate::error::SignalError;
use crate::signal::Signal;

/// Generates a superposition of complex sinusoids.
///
/// Frequencies are fractions of `n`; each is snapped to the nearest
/// integer bin before `bin_offset` is applied, so a requested tone always
/// lands on (or a fixed fraction off) a bin center. Sample `t` of tone
/// `i` is `exp(j*(2*pi*(round(n*freqs[i]) + bin_offset)/n*t + phases[i]))`.
///
/// `freqs` and `phases` must have equal length. Only complex dtypes can
/// hold the result.
pub fn complex_sinusoid(
    n: usize,
    freqs: &[f64],
    phases: &[f64],
    bin_offset: f64,
    dtype: Dtype,
) -> Result<Signal, SignalError> {
    if freqs.len() != phases.len() {
        return Err(SignalError::length_mismatch(
            "freqs",
            freqs.len(),
            "phases",
            phases.len(),
        ));
    }
    if !dtype.is_complex() {
        return Err(SignalError::DtypeMismatch {
            handler: "complex_sinusoid",
            dtype: dtype.to_string(),
        });
    }

    let mut acc = vec![Complex::new(0.0f64, 0.0f64); n];
    for (&freq, &phase) in freqs.iter().zip(phases) {
        let bin = (n as f64 * freq).round() + bin_offset;
        let step = 2.0 * PI * bin / n as f64;
        for (t, sample) in acc.iter_mut().enumerate() {
            *sample += Complex::from_polar(1.0, step * t as f64 + phase);
        }
    }

    Ok(if dtype == Dtype::Complex64 {
        Signal::Complex64(
            acc.iter()
                .map(|c| Complex::new(c.re as f32, c.im as f32))
                .collect(),
        )
    } else {
        Signal::Complex128(acc)
    })
}

/// Generates unit impulse blocks.
///
/// For each (offset, width) pair, samples in
/// `[floor(offset*n), floor(offset*n) + floor(width))` are set to one;
/// spans past the end of the signal are clamped at `n`. Later impulses
/// overwrite earlier ones where they overlap.
///
/// `offsets` and `widths` must have equal length. Works for any dtype;
/// complex outputs carry a zero imaginary component.
pub fn time_domain_impulse(
    n: usize,
    offsets: &[f64],
    widths: &[f64],
    dtype: Dtype,
) -> Result<Signal, SignalError> {
    if offsets.len() != widths.len() {
        return Err(SignalError::length_mismatch(
            "offsets",
            offsets.len(),
            "widths",
            widths.len(),
        ));
    }

    let mut hits = vec![false; n];
    for (&offset, &width) in offsets.iter().zip(widths) {
        let start = ((offset * n as f64).floor().max(0.0) as usize).min(n);
        let count = width.floor().max(0.0) as usize;
        let end = start.saturating_add(count).min(n);
        for hit in &mut hits[start..end] {
            *hit = true;
        }
    }

    Ok(match dtype {
        Dtype::Float32 => Signal::Float32(
            hits.iter()
                .map(|&h| if h { 1.0f32 } else { 0.0f32 })
                .collect(),
        ),
        Dtype::Float64 => Signal::Float64(
            hits.iter()
                .map(|&h| if h { 1.0f64 } else { 0.0f64 })
                .collect(),
        ),
        Dtype::Complex64 => Signal::Complex64(
            hits.iter()
                .map(|&h| Complex::new(if h { 1.0f32 } else { 0.0f32 }, 0.0))
                .collect(),
        ),
        Dtype::Complex128 => Signal::Complex128(
            hits.iter()
                .map(|&h| Complex::new(if h { 1.0f64 } else { 0.0f64 }, 0.0))
                .collect(),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TOL: f64 = 1e-6;

    fn assert_close(got: Complex<f64>, want: Complex<f64>) {
        assert!(
            (got - want).norm() < TOL,
            "got {} want {} (|diff| = {})",
            got,
            want,
            (got - want).norm()
        );
    }

    #[test]
    fn single_tone_on_quarter_bin() {
        let sig = complex_sinusoid(8, &[0.25], &[0.0], 0.0, Dtype::Complex128).unwrap();
        let samples = sig.as_complex128().unwrap();
        let expected = [
            Complex::new(1.0, 0.0),
            Complex::new(0.0, 1.0),
            Complex::new(-1.0, 0.0),
            Complex::new(0.0, -1.0),
        ];
        for (t, &got) in samples.iter().enumerate() {
            assert_close(got, expected[t % 4]);
        }
    }

    #[test]
    fn frequency_snaps_to_nearest_bin() {
        // 10 * 0.26 = 2.6 snaps up to bin 3, not down to 2.
        let snapped = complex_sinusoid(10, &[0.26], &[0.0], 0.0, Dtype::Complex128).unwrap();
        let exact = complex_sinusoid(10, &[0.3], &[0.0], 0.0, Dtype::Complex128).unwrap();
        assert_eq!(snapped, exact);
    }

    #[test]
    fn bin_offset_shifts_the_tone() {
        let offset = complex_sinusoid(8, &[0.25], &[0.0], 1.0, Dtype::Complex128).unwrap();
        let direct = complex_sinusoid(8, &[0.375], &[0.0], 0.0, Dtype::Complex128).unwrap();
        assert_eq!(offset, direct);
    }

    #[test]
    fn phase_rotates_every_sample() {
        let sig = complex_sinusoid(8, &[0.25], &[PI / 2.0], 0.0, Dtype::Complex128).unwrap();
        let samples = sig.as_complex128().unwrap();
        assert_close(samples[0], Complex::new(0.0, 1.0));
        assert_close(samples[1], Complex::new(-1.0, 0.0));
    }

    #[test]
    fn tones_superpose() {
        let both =
            complex_sinusoid(16, &[0.125, 0.25], &[0.0, 0.5], 0.0, Dtype::Complex128).unwrap();
        let a = complex_sinusoid(16, &[0.125], &[0.0], 0.0, Dtype::Complex128).unwrap();
        let b = complex_sinusoid(16, &[0.25], &[0.5], 0.0, Dtype::Complex128).unwrap();
        let (both, a, b) = (
            both.as_complex128().unwrap(),
            a.as_complex128().unwrap(),
            b.as_complex128().unwrap(),
        );
        for t in 0..16 {
            assert_close(both[t], a[t] + b[t]);
        }
    }

    #[test]
    fn sinusoid_is_deterministic() {
        let a = complex_sinusoid(64, &[0.1, 0.2], &[0.3, 0.4], 0.5, Dtype::Complex64).unwrap();
        let b = complex_sinusoid(64, &[0.1, 0.2], &[0.3, 0.4], 0.5, Dtype::Complex64).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sinusoid_rejects_mismatched_args() {
        let err = complex_sinusoid(8, &[0.1, 0.2], &[0.0], 0.0, Dtype::Complex64).unwrap_err();
        assert!(matches!(err, SignalError::ArgumentLengthMismatch { .. }));
    }

    #[test]
    fn sinusoid_rejects_real_dtypes() {
        let err = complex_sinusoid(8, &[0.1], &[0.0], 0.0, Dtype::Float32).unwrap_err();
        assert!(matches!(err, SignalError::DtypeMismatch { .. }));
    }

    #[test]
    fn impulse_lands_at_floor_of_scaled_offset() {
        let sig = time_domain_impulse(10, &[0.2], &[3.0], Dtype::Float64).unwrap();
        let samples = sig.as_float64().unwrap();
        for (t, &s) in samples.iter().enumerate() {
            let expected = if (2..5).contains(&t) { 1.0 } else { 0.0 };
            assert_eq!(s, expected, "sample {}", t);
        }
    }

    #[test]
    fn impulse_span_clamps_at_signal_end() {
        let sig = time_domain_impulse(10, &[0.9], &[5.0], Dtype::Float32).unwrap();
        let samples = sig.as_float32().unwrap();
        assert_eq!(&samples[..9], &[0.0f32; 9]);
        assert_eq!(samples[9], 1.0);
    }

    #[test]
    fn overlapping_impulses_stay_at_unit_height() {
        let sig = time_domain_impulse(10, &[0.2, 0.3], &[4.0, 2.0], Dtype::Float64).unwrap();
        let samples = sig.as_float64().unwrap();
        for (t, &s) in samples.iter().enumerate() {
            let expected = if (2..6).contains(&t) { 1.0 } else { 0.0 };
            assert_eq!(s, expected, "sample {}", t);
        }
    }

    #[test]
    fn complex_impulse_has_zero_imaginary_part() {
        let sig = time_domain_impulse(4, &[0.5], &[1.0], Dtype::Complex64).unwrap();
        let samples = sig.as_complex64().unwrap();
        assert_eq!(samples[2], Complex::new(1.0f32, 0.0));
        assert_eq!(samples[0], Complex::new(0.0f32, 0.0));
    }

    #[test]
    fn impulse_rejects_mismatched_args() {
        let err = time_domain_impulse(8, &[0.1], &[1.0, 2.0], Dtype::Float32).unwrap_err();
        assert!(matches!(err, SignalError::ArgumentLengthMismatch { .. }));
    }
}
