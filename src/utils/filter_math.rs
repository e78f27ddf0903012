//! Decibel conversions used when turning ripple and attenuation figures into
//! design quantities.
//!
//! # Examples
//!
//! ```rust
//! use filter_synthesis::utils::filter_math::{db_to_stopband_deviation, ripple_factor};
//!
//! let eps = ripple_factor(3.0103); // ≈ 1.0
//! let delta = db_to_stopband_deviation(60.0); // 0.001
//! assert!((eps - 1.0).abs() < 1e-4);
//! assert!((delta - 1e-3).abs() < 1e-12);
//! ```

/// Converts a level in dB to a linear amplitude ratio.
pub fn db_to_amplitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Converts a linear amplitude ratio to dB.
///
/// Non-positive amplitudes are clamped to the smallest positive `f64`, so the
/// result is always finite.
pub fn amplitude_to_db(amplitude: f64) -> f64 {
    20.0 * amplitude.max(f64::MIN_POSITIVE).log10()
}

/// Ripple factor ε for a ripple or attenuation figure in dB.
///
/// `ε = sqrt(10^(db/10) - 1)`, the quantity that appears in the squared
/// magnitude response `1 / (1 + ε² F²(ω))` of Chebyshev and elliptic filters.
pub fn ripple_factor(db: f64) -> f64 {
    (10.0_f64.powf(db / 10.0) - 1.0).sqrt()
}

/// Peak passband deviation δp for a peak-to-peak passband ripple in dB.
///
/// The passband swings between `1 - δp` and `1 + δp`, so
/// `δp = (10^(db/20) - 1) / (10^(db/20) + 1)`.
pub fn db_to_passband_deviation(db: f64) -> f64 {
    let ratio = db_to_amplitude(db);
    (ratio - 1.0) / (ratio + 1.0)
}

/// Peak stopband deviation δs for a stopband attenuation in dB.
pub fn db_to_stopband_deviation(db: f64) -> f64 {
    db_to_amplitude(-db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_db_amplitude_inverse() {
        assert_approx_eq!(db_to_amplitude(amplitude_to_db(0.5)), 0.5, 1e-12);
        assert_approx_eq!(db_to_amplitude(0.0), 1.0, 1e-12);
    }

    #[test]
    fn test_amplitude_to_db_is_finite_for_zero() {
        assert!(amplitude_to_db(0.0).is_finite());
        assert!(amplitude_to_db(-1.0) < -300.0);
    }

    #[test]
    fn test_ripple_factor_of_three_db() {
        // 10^(0.30103) = 2
        assert!((ripple_factor(10.0 * 2.0_f64.log10()) - 1.0).abs() < 1e-12);
        assert_eq!(ripple_factor(0.0), 0.0);
    }

    #[test]
    fn test_passband_deviation() {
        // 1 dB peak-to-peak ripple gives roughly 5.75% deviation
        let dp = db_to_passband_deviation(1.0);
        assert!((dp - 0.057501).abs() < 1e-5);
        assert_eq!(db_to_passband_deviation(0.0), 0.0);
    }

    #[test]
    fn test_stopband_deviation() {
        assert!((db_to_stopband_deviation(40.0) - 0.01).abs() < 1e-15);
        assert!((db_to_stopband_deviation(60.0) - 0.001).abs() < 1e-15);
    }
}
