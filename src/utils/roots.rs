//! Polynomial evaluation and root finding.
//!
//! Roots are found with the Aberth–Ehrlich simultaneous iteration, which
//! refines every root estimate at once and converges reliably for the
//! reversed Bessel polynomials and the denominators produced by the IIR
//! pipeline (orders up to 40 after a band transform).
//!
//! Coefficient slices are always ordered highest power first.

use crate::{FilterDesignError, FilterDesignResult};
use num_complex::Complex64;
use num_traits::{One, Zero};
use std::f64::consts::PI;
use tracing::warn;

/// Upper bound on Aberth sweeps before the current estimates are returned.
pub const MAX_ROOT_ITERATIONS: usize = 500;

/// Relative step size below which the iteration is considered converged.
pub const ROOT_TOLERANCE: f64 = 1e-12;

/// Relative imaginary magnitude below which a root is snapped to the real axis.
pub const REAL_ROOT_TOLERANCE: f64 = 1e-8;

/// Evaluates a complex polynomial at `x` using Horner's scheme.
pub fn polyval(coeffs: &[Complex64], x: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::zero(), |acc, &c| acc * x + c)
}

/// Evaluates a real polynomial at a complex point using Horner's scheme.
pub fn polyval_real(coeffs: &[f64], x: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::zero(), |acc, &c| acc * x + c)
}

/// Finds all roots of a real polynomial.
///
/// Leading zero coefficients are ignored and trailing zero coefficients are
/// returned as roots at the origin. The result is cleaned up with
/// [`pair_conjugates`], so complex roots come back as exact conjugate pairs
/// sorted by ascending real part.
///
/// # Errors
/// Returns [`FilterDesignError::InvalidParameter`] if every coefficient is zero
/// or any coefficient is not finite.
pub fn roots(coeffs: &[f64]) -> FilterDesignResult<Vec<Complex64>> {
    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(FilterDesignError::invalid_parameter(
            "Polynomial coefficients must be finite",
        ));
    }

    let first = coeffs.iter().position(|&c| c != 0.0).ok_or_else(|| {
        FilterDesignError::invalid_parameter("Polynomial has no non-zero coefficients")
    })?;
    let last = coeffs.iter().rposition(|&c| c != 0.0).unwrap_or(first);

    let trimmed = &coeffs[first..=last];
    let zeros_at_origin = coeffs.len() - 1 - last;
    let degree = trimmed.len() - 1;

    let mut found = match degree {
        0 => Vec::new(),
        1 => vec![Complex64::new(-trimmed[1] / trimmed[0], 0.0)],
        _ => {
            let lead = trimmed[0];
            let monic: Vec<Complex64> = trimmed
                .iter()
                .map(|&c| Complex64::new(c / lead, 0.0))
                .collect();
            aberth(&monic)
        }
    };
    found.extend(std::iter::repeat_n(Complex64::zero(), zeros_at_origin));

    Ok(pair_conjugates(&found))
}

/// Aberth–Ehrlich iteration on a monic polynomial of degree >= 2 with a
/// non-zero constant term.
fn aberth(monic: &[Complex64]) -> Vec<Complex64> {
    let n = monic.len() - 1;
    let derivative: Vec<Complex64> = monic[..n]
        .iter()
        .enumerate()
        .map(|(i, &c)| c * (n - i) as f64)
        .collect();

    // Start on a circle whose radius is the geometric mean of the root magnitudes,
    // rotated off the real axis so no estimate starts on a symmetry line.
    let radius = monic[n].norm().powf(1.0 / n as f64);
    let mut estimates: Vec<Complex64> = (0..n)
        .map(|k| Complex64::from_polar(radius, 2.0 * PI * k as f64 / n as f64 + 0.4))
        .collect();

    for _ in 0..MAX_ROOT_ITERATIONS {
        let mut max_step = 0.0_f64;

        for i in 0..n {
            let value = polyval(monic, estimates[i]);
            if value.is_zero() {
                continue;
            }
            let slope = polyval(&derivative, estimates[i]);
            if slope.is_zero() {
                continue;
            }

            let ratio = value / slope;
            let repulsion: Complex64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| (estimates[i] - estimates[j]).inv())
                .sum();
            let step = ratio / (Complex64::one() - ratio * repulsion);

            estimates[i] -= step;
            max_step = max_step.max(step.norm() / estimates[i].norm().max(1.0));
        }

        if max_step < ROOT_TOLERANCE {
            return estimates;
        }
    }

    warn!(
        degree = n,
        "root finder reached {MAX_ROOT_ITERATIONS} iterations without meeting tolerance"
    );
    estimates
}

/// Restores exact conjugate symmetry to a set of roots of a real polynomial.
///
/// Roots whose imaginary part is negligible relative to their magnitude become
/// purely real. Every remaining root in the upper half plane is matched with
/// the closest unmatched root in the lower half plane and the pair is replaced
/// by the average conjugate pair. The output is sorted by ascending real part,
/// then by imaginary part.
pub fn pair_conjugates(roots: &[Complex64]) -> Vec<Complex64> {
    let mut real = Vec::new();
    let mut upper = Vec::new();
    let mut lower = Vec::new();

    for &root in roots {
        let scale = root.norm().max(1.0);
        if root.im.abs() <= REAL_ROOT_TOLERANCE * scale {
            real.push(Complex64::new(root.re, 0.0));
        } else if root.im > 0.0 {
            upper.push(root);
        } else {
            lower.push(root);
        }
    }

    let mut paired = real;
    for root in upper {
        let nearest = lower
            .iter()
            .enumerate()
            .map(|(idx, other)| (idx, (other.conj() - root).norm()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(idx, _)| idx);

        match nearest {
            Some(idx) => {
                let partner = lower.swap_remove(idx);
                let averaged =
                    Complex64::new((root.re + partner.re) / 2.0, (root.im - partner.im) / 2.0);
                paired.push(averaged);
                paired.push(averaged.conj());
            }
            None => paired.push(root),
        }
    }
    paired.extend(lower);

    paired.sort_by(|a, b| a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im)));
    paired
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains_root(found: &[Complex64], expected: Complex64, tol: f64) -> bool {
        found.iter().any(|r| (r - expected).norm() < tol)
    }

    #[test]
    fn test_polyval_horner() {
        // x^2 - 3x + 2 at x = 4
        let value = polyval_real(&[1.0, -3.0, 2.0], Complex64::new(4.0, 0.0));
        assert!((value.re - 6.0).abs() < 1e-12);
        assert!(value.im.abs() < 1e-12);
    }

    #[test]
    fn test_roots_of_quadratic() {
        let found = roots(&[1.0, -3.0, 2.0]).unwrap();
        assert_eq!(found.len(), 2);
        assert!((found[0].re - 1.0).abs() < 1e-10);
        assert!((found[1].re - 2.0).abs() < 1e-10);
        assert_eq!(found[0].im, 0.0);
    }

    #[test]
    fn test_complex_roots_are_exact_conjugates() {
        // (x^2 + 2x + 5)(x - 3): roots -1 +/- 2j and 3
        let found = roots(&[1.0, -1.0, -1.0, -15.0]).unwrap();
        assert_eq!(found.len(), 3);
        assert!(contains_root(&found, Complex64::new(-1.0, 2.0), 1e-9));
        assert!(contains_root(&found, Complex64::new(-1.0, -2.0), 1e-9));
        assert!(contains_root(&found, Complex64::new(3.0, 0.0), 1e-9));
        assert_eq!(found[0], found[1].conj());
    }

    #[test]
    fn test_trailing_zeros_become_origin_roots() {
        // x^3 - x^2 = x^2 (x - 1)
        let found = roots(&[1.0, -1.0, 0.0, 0.0]).unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found.iter().filter(|r| r.is_zero()).count(), 2);
        assert!(contains_root(&found, Complex64::new(1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_leading_zeros_are_ignored() {
        let found = roots(&[0.0, 2.0, -4.0]).unwrap();
        assert_eq!(found, vec![Complex64::new(2.0, 0.0)]);
    }

    #[test]
    fn test_constant_polynomial_has_no_roots() {
        assert!(roots(&[3.0]).unwrap().is_empty());
    }

    #[test]
    fn test_zero_polynomial_is_rejected() {
        assert!(matches!(
            roots(&[0.0, 0.0]),
            Err(FilterDesignError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_high_degree_unit_circle_roots() {
        // x^8 - 1 has the eighth roots of unity
        let mut coeffs = vec![0.0; 9];
        coeffs[0] = 1.0;
        coeffs[8] = -1.0;
        let found = roots(&coeffs).unwrap();
        assert_eq!(found.len(), 8);
        for k in 0..8 {
            let expected = Complex64::from_polar(1.0, PI * k as f64 / 4.0);
            assert!(contains_root(&found, expected, 1e-9));
        }
    }

    #[test]
    fn test_pair_conjugates_snaps_near_real_roots() {
        let cleaned = pair_conjugates(&[
            Complex64::new(0.5, 1e-14),
            Complex64::new(-1.0, 0.5 + 1e-12),
            Complex64::new(-1.0 + 1e-12, -0.5),
        ]);
        assert_eq!(cleaned.len(), 3);
        assert_eq!(cleaned[2], Complex64::new(0.5, 0.0));
        assert_eq!(cleaned[0], cleaned[1].conj());
        assert!(cleaned[0].im < 0.0);
    }
}
