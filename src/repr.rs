//! Filter representations produced by the designers.
//!
//! Two forms are used throughout the crate:
//!
//! - [`Zpk`] - zeros, poles and a scalar gain. Every stage of the IIR pipeline
//!   consumes and produces this form, because root-wise substitutions keep
//!   conjugate pairs intact and stay numerically well conditioned.
//! - [`TransferFunction`] - numerator and denominator polynomial coefficients,
//!   the final output of an IIR design.
//!
//! # Coefficient ordering
//!
//! Transfer function coefficients are stored in descending powers of `z`,
//! which is the same as ascending powers of `z⁻¹`:
//!
//! ```text
//!         b[0] + b[1] z⁻¹ + ... + b[N] z⁻ᴺ
//! H(z) = ----------------------------------
//!         a[0] + a[1] z⁻¹ + ... + a[N] z⁻ᴺ
//! ```
//!
//! so `a[0]` is the normalization reference and equals 1 for every design
//! returned by the pipeline.
//!
//! # Examples
//!
//! ```rust
//! use filter_synthesis::TransferFunction;
//!
//! // Two-tap moving average
//! let tf = TransferFunction::new(vec![0.5, 0.5], vec![1.0]);
//! assert!((tf.magnitude_at(0.0, 1000.0) - 1.0).abs() < 1e-12);
//! assert!(tf.magnitude_at(500.0, 1000.0) < 1e-12);
//! ```

use crate::{FilterDesignError, FilterDesignResult};
use num_complex::Complex64;
use num_traits::{One, Zero};
use std::f64::consts::PI;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Zero-pole-gain representation of a filter.
///
/// Every complex zero and pole is either real or accompanied by its complex
/// conjugate, which guarantees the expanded polynomials have real coefficients.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Zpk {
    /// Transfer function zeros
    pub zeros: Vec<Complex64>,
    /// Transfer function poles
    pub poles: Vec<Complex64>,
    /// Scalar gain applied to the numerator
    pub gain: f64,
}

impl Zpk {
    /// Create a new ZPK representation.
    pub const fn new(zeros: Vec<Complex64>, poles: Vec<Complex64>, gain: f64) -> Self {
        Self { zeros, poles, gain }
    }

    /// Filter order (number of poles).
    pub fn order(&self) -> usize {
        self.poles.len()
    }

    /// Number of zeros at infinity (poles minus finite zeros).
    pub fn degree_deficit(&self) -> usize {
        self.poles.len().saturating_sub(self.zeros.len())
    }

    /// Evaluates `k · ∏(x − zᵢ) / ∏(x − pᵢ)` at an arbitrary complex point.
    ///
    /// For an analog filter pass `x = jω`; for a digital filter pass
    /// `x = e^{jω}`.
    pub fn evaluate(&self, x: Complex64) -> Complex64 {
        root_product(&self.zeros, x) / root_product(&self.poles, x) * self.gain
    }

    /// Whether every pole lies strictly in the left half of the s-plane.
    pub fn is_stable_analog(&self) -> bool {
        self.poles.iter().all(|p| p.re < 0.0)
    }

    /// Whether every pole lies strictly inside the unit circle.
    pub fn is_stable_digital(&self) -> bool {
        self.poles.iter().all(|p| p.norm() < 1.0)
    }

    /// Whether zeros and poles are each closed under complex conjugation,
    /// with a relative tolerance of `tolerance`.
    pub fn is_conjugate_symmetric(&self, tolerance: f64) -> bool {
        is_closed_under_conjugation(&self.zeros, tolerance)
            && is_closed_under_conjugation(&self.poles, tolerance)
    }
}

/// `∏(at − rᵢ)` over a set of roots; `1` for an empty set.
pub(crate) fn root_product(roots: &[Complex64], at: Complex64) -> Complex64 {
    roots
        .iter()
        .fold(Complex64::one(), |acc, &root| acc * (at - root))
}

fn is_closed_under_conjugation(roots: &[Complex64], tolerance: f64) -> bool {
    roots.iter().all(|root| {
        let scale = root.norm().max(1.0);
        root.im.abs() <= tolerance * scale
            || roots
                .iter()
                .any(|other| (other - root.conj()).norm() <= tolerance * scale)
    })
}

/// Rational transfer function `B(z) / A(z)` with real coefficients.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct TransferFunction {
    /// Feed-forward coefficients (b coefficients)
    pub numerator: Vec<f64>,
    /// Feed-back coefficients (a coefficients, a[0] is the reference)
    pub denominator: Vec<f64>,
}

impl TransferFunction {
    /// Create a new transfer function from b and a coefficients.
    pub const fn new(numerator: Vec<f64>, denominator: Vec<f64>) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Filter order (degree of the denominator).
    pub fn order(&self) -> usize {
        self.denominator.len().saturating_sub(1)
    }

    /// Returns a copy scaled so that `a[0] == 1`.
    ///
    /// # Errors
    /// Returns [`FilterDesignError::InvalidParameter`] if the denominator is
    /// empty or its leading coefficient is zero.
    pub fn normalized(&self) -> FilterDesignResult<Self> {
        let reference = match self.denominator.first() {
            Some(&a0) if a0 != 0.0 && a0.is_finite() => a0,
            _ => {
                return Err(FilterDesignError::invalid_parameter(
                    "Denominator leading coefficient must be finite and non-zero",
                ));
            }
        };

        Ok(Self {
            numerator: self.numerator.iter().map(|b| b / reference).collect(),
            denominator: self.denominator.iter().map(|a| a / reference).collect(),
        })
    }

    /// Evaluates `H(z)` at a point of the z-plane.
    pub fn evaluate(&self, z: Complex64) -> Complex64 {
        let z_inv = z.inv();
        let horner = |coeffs: &[f64]| {
            coeffs
                .iter()
                .rev()
                .fold(Complex64::zero(), |acc, &c| acc * z_inv + c)
        };
        horner(&self.numerator) / horner(&self.denominator)
    }

    /// Get the frequency response at specified frequencies.
    ///
    /// Returns (magnitude, phase) response vectors.
    pub fn frequency_response(
        &self,
        frequencies: &[f64],
        sample_rate: f64,
    ) -> (Vec<f64>, Vec<f64>) {
        frequencies
            .iter()
            .map(|&freq| {
                let omega = 2.0 * PI * freq / sample_rate;
                let h = self.evaluate(Complex64::new(0.0, omega).exp());
                (h.norm(), h.arg())
            })
            .unzip()
    }

    /// Magnitude response at a single frequency in Hz.
    pub fn magnitude_at(&self, frequency: f64, sample_rate: f64) -> f64 {
        let omega = 2.0 * PI * frequency / sample_rate;
        self.evaluate(Complex64::new(0.0, omega).exp()).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zpk_evaluate() {
        // H(s) = 2 / (s + 1)
        let zpk = Zpk::new(vec![], vec![Complex64::new(-1.0, 0.0)], 2.0);
        assert!((zpk.evaluate(Complex64::zero()).re - 2.0).abs() < 1e-12);
        assert!((zpk.evaluate(Complex64::new(0.0, 1.0)).norm() - 2.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(zpk.order(), 1);
        assert_eq!(zpk.degree_deficit(), 1);
    }

    #[test]
    fn test_zpk_stability_checks() {
        let stable = Zpk::new(
            vec![],
            vec![Complex64::new(-0.5, 0.5), Complex64::new(-0.5, -0.5)],
            1.0,
        );
        assert!(stable.is_stable_analog());
        assert!(stable.is_stable_digital());

        let unstable = Zpk::new(vec![], vec![Complex64::new(1.5, 0.0)], 1.0);
        assert!(!unstable.is_stable_analog());
        assert!(!unstable.is_stable_digital());
    }

    #[test]
    fn test_conjugate_symmetry_check() {
        let symmetric = Zpk::new(
            vec![Complex64::new(0.0, 2.0), Complex64::new(0.0, -2.0)],
            vec![Complex64::new(-1.0, 0.0)],
            1.0,
        );
        assert!(symmetric.is_conjugate_symmetric(1e-12));

        let lopsided = Zpk::new(vec![Complex64::new(0.0, 2.0)], vec![], 1.0);
        assert!(!lopsided.is_conjugate_symmetric(1e-12));
    }

    #[test]
    fn test_transfer_function_normalized() {
        let tf = TransferFunction::new(vec![2.0, 4.0], vec![2.0, 1.0]);
        let normalized = tf.normalized().unwrap();
        assert_eq!(normalized.numerator, vec![1.0, 2.0]);
        assert_eq!(normalized.denominator, vec![1.0, 0.5]);
        assert_eq!(normalized.order(), 1);

        let degenerate = TransferFunction::new(vec![1.0], vec![0.0, 1.0]);
        assert!(degenerate.normalized().is_err());
    }

    #[test]
    fn test_frequency_response_of_first_order_section() {
        // y[n] = x[n] + 0.5 y[n-1]: DC gain 2, Nyquist gain 2/3
        let tf = TransferFunction::new(vec![1.0], vec![1.0, -0.5]);
        let (magnitudes, phases) = tf.frequency_response(&[0.0, 500.0], 1000.0);
        assert!((magnitudes[0] - 2.0).abs() < 1e-12);
        assert!((magnitudes[1] - 2.0 / 3.0).abs() < 1e-12);
        assert!(phases[0].abs() < 1e-12);
    }
}
