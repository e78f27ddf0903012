//! Conversion between zero-pole-gain and polynomial transfer function form.

use crate::repr::{TransferFunction, Zpk};
use crate::utils::roots::roots;
use crate::{FilterDesignError, FilterDesignResult};

use num_complex::Complex64;
use num_traits::{One, Zero};

/// Expands `∏(x − rᵢ)` into monic coefficients, highest power first.
///
/// The roots are expected to be closed under conjugation; the imaginary
/// parts of the expanded coefficients are then rounding noise and are
/// discarded.
pub fn expand_roots(roots: &[Complex64]) -> Vec<f64> {
    let mut coeffs = vec![Complex64::one()];
    for &root in roots {
        let mut next = vec![Complex64::zero(); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= root * c;
        }
        coeffs = next;
    }
    coeffs.into_iter().map(|c| c.re).collect()
}

/// Expands a digital ZPK into `(b, a)` with `a[0] == 1`.
///
/// The numerator is padded with leading zeros when it has fewer roots than
/// the denominator, so both coefficient vectors have `order + 1` entries.
pub fn zpk_to_tf(zpk: &Zpk) -> TransferFunction {
    let denominator = expand_roots(&zpk.poles);
    let mut numerator: Vec<f64> = expand_roots(&zpk.zeros)
        .into_iter()
        .map(|c| c * zpk.gain)
        .collect();

    if numerator.len() < denominator.len() {
        let padding = denominator.len() - numerator.len();
        numerator.splice(0..0, std::iter::repeat_n(0.0, padding));
    }

    TransferFunction::new(numerator, denominator)
}

/// Recovers zeros, poles and gain from a transfer function.
///
/// The gain is the ratio of the leading non-zero numerator coefficient to
/// `a[0]`.
///
/// # Errors
/// Returns [`FilterDesignError::InvalidParameter`] if either polynomial is
/// identically zero or contains non-finite coefficients.
pub fn tf_to_zpk(tf: &TransferFunction) -> FilterDesignResult<Zpk> {
    let lead_b = tf
        .numerator
        .iter()
        .copied()
        .find(|&c| c != 0.0)
        .ok_or_else(|| FilterDesignError::invalid_parameter("Numerator is identically zero"))?;
    let lead_a = tf
        .denominator
        .iter()
        .copied()
        .find(|&c| c != 0.0)
        .ok_or_else(|| FilterDesignError::invalid_parameter("Denominator is identically zero"))?;

    Ok(Zpk::new(
        roots(&tf.numerator)?,
        roots(&tf.denominator)?,
        lead_b / lead_a,
    ))
}
