//! Analog lowpass prototypes.
//!
//! Every prototype is normalized to a band edge of 1 rad/s:
//!
//! - Butterworth: -3 dB at ω = 1
//! - Chebyshev Type I and elliptic: passband edge (−ripple dB) at ω = 1
//! - Chebyshev Type II: stopband edge (−attenuation dB) at ω = 1
//! - Bessel: phase or unit-delay normalization, see [`BesselNormalization`]
//!
//! The gain is chosen so that the DC gain is 1, except for even-order
//! Chebyshev Type I and elliptic designs whose DC gain sits at the bottom of
//! the passband ripple, `1/√(1 + ε²)`.

use crate::design::elliptic_math::{inverse_sn, selectivity};
use crate::design::types::{BesselNormalization, FilterFamily};
use crate::repr::{Zpk, root_product};
use crate::utils::filter_math::ripple_factor;
use crate::utils::roots::{pair_conjugates, roots};
use crate::{FilterDesignError, FilterDesignResult};

use num_complex::Complex64;
use num_traits::Zero;
use std::f64::consts::PI;
use tracing::debug;

/// Lowest tabulated Bessel order.
pub const BESSEL_MIN_ORDER: usize = 2;

/// Highest tabulated Bessel order.
pub const BESSEL_MAX_ORDER: usize = 10;

/// Highest prototype order accepted for the other families.
pub const MAX_PROTOTYPE_ORDER: usize = 32;

/// Smallest `|Re p| / |p|` accepted for an elliptic pole. Closer to the
/// imaginary axis the passband edge is no longer resolvable in `f64`.
pub const MIN_POLE_DAMPING: f64 = 1e-11;

/// Unit-delay Bessel poles for orders 2 through 5 (upper half plane only).
const BESSEL_POLES: [&[(f64, f64)]; 4] = [
    &[(-1.5, 0.866_025_403_784_439)],
    &[
        (-2.322_185_354_626_085, 0.0),
        (-1.838_907_322_686_957, 1.754_380_959_783_721),
    ],
    &[
        (-2.896_210_602_820_372, 0.867_234_128_934_505),
        (-2.103_789_397_179_629, 2.657_418_041_856_753),
    ],
    &[
        (-3.646_738_595_329_635, 0.0),
        (-3.351_956_399_153_539, 1.742_661_416_183_201),
        (-2.324_674_303_181_645, 3.571_022_920_337_976),
    ],
];

/// Reversed Bessel polynomial coefficients for orders 2 through 10,
/// highest power first. `a_k = (2n − k)! / (2^(n−k) k! (n − k)!)`.
const BESSEL_COEFFICIENTS: [&[f64]; 9] = [
    &[1.0, 3.0, 3.0],
    &[1.0, 6.0, 15.0, 15.0],
    &[1.0, 10.0, 45.0, 105.0, 105.0],
    &[1.0, 15.0, 105.0, 420.0, 945.0, 945.0],
    &[1.0, 21.0, 210.0, 1260.0, 4725.0, 10395.0, 10395.0],
    &[1.0, 28.0, 378.0, 3150.0, 17325.0, 62370.0, 135135.0, 135135.0],
    &[
        1.0, 36.0, 630.0, 6930.0, 51975.0, 270270.0, 945945.0, 2027025.0, 2027025.0,
    ],
    &[
        1.0, 45.0, 990.0, 13860.0, 135135.0, 945945.0, 4729725.0, 16216200.0, 34459425.0,
        34459425.0,
    ],
    &[
        1.0, 55.0, 1485.0, 25740.0, 315315.0, 2837835.0, 18918900.0, 91891800.0,
        310134825.0, 654729075.0, 654729075.0,
    ],
];

/// Generate the analog lowpass prototype of `family` at the given order.
///
/// # Errors
/// - [`FilterDesignError::UnsupportedOrder`] for order 0, Bessel orders outside
///   2..=10 and orders above [`MAX_PROTOTYPE_ORDER`].
/// - [`FilterDesignError::InvalidParameter`] for non-positive or non-finite
///   ripple/attenuation figures, or an elliptic attenuation not exceeding the ripple.
pub fn analog_prototype(family: &FilterFamily, order: usize) -> FilterDesignResult<Zpk> {
    debug!(family = family.name(), order, "generating analog prototype");

    match *family {
        FilterFamily::Butterworth => butterworth(order),
        FilterFamily::ChebyshevI { passband_ripple_db } => chebyshev_i(order, passband_ripple_db),
        FilterFamily::ChebyshevII {
            stopband_attenuation_db,
        } => chebyshev_ii(order, stopband_attenuation_db),
        FilterFamily::Bessel { normalization } => bessel(order, normalization),
        FilterFamily::Elliptic {
            passband_ripple_db,
            stopband_attenuation_db,
        } => elliptic(order, passband_ripple_db, stopband_attenuation_db),
    }
}

fn check_order(family: &'static str, order: usize, min: usize, max: usize) -> FilterDesignResult<()> {
    if order < min || order > max {
        return Err(FilterDesignError::UnsupportedOrder {
            family,
            order,
            min,
            max,
        });
    }
    Ok(())
}

fn check_db(name: &str, db: f64) -> FilterDesignResult<()> {
    if !db.is_finite() || db <= 0.0 {
        return Err(FilterDesignError::invalid_parameter(format!(
            "{name} must be a positive number of dB, got {db}"
        )));
    }
    Ok(())
}

/// Angle `θₖ = (2k − 1)π / 2N` shared by the Butterworth and Chebyshev pole placements.
fn pole_angle(k: usize, order: usize) -> f64 {
    (2 * k - 1) as f64 * PI / (2 * order) as f64
}

/// Gain that makes `|H(0)| = dc_gain`.
fn dc_normalized_gain(zeros: &[Complex64], poles: &[Complex64], dc_gain: f64) -> f64 {
    (root_product(poles, Complex64::zero()) / root_product(zeros, Complex64::zero())).re * dc_gain
}

/// Butterworth prototype: poles evenly spaced on the left half of the unit circle.
pub fn butterworth(order: usize) -> FilterDesignResult<Zpk> {
    check_order("Butterworth", order, 1, MAX_PROTOTYPE_ORDER)?;

    let poles: Vec<Complex64> = (1..=order)
        .map(|k| {
            let theta = pole_angle(k, order);
            Complex64::new(-theta.sin(), theta.cos())
        })
        .collect();
    let poles = pair_conjugates(&poles);
    let gain = dc_normalized_gain(&[], &poles, 1.0);
    Ok(Zpk::new(Vec::new(), poles, gain))
}

/// Chebyshev Type I prototype with `ripple_db` of passband ripple.
pub fn chebyshev_i(order: usize, ripple_db: f64) -> FilterDesignResult<Zpk> {
    check_order("Chebyshev I", order, 1, MAX_PROTOTYPE_ORDER)?;
    check_db("Passband ripple", ripple_db)?;

    let eps = ripple_factor(ripple_db);
    let mu = (1.0 / eps).asinh() / order as f64;
    let poles: Vec<Complex64> = (1..=order)
        .map(|k| {
            let theta = pole_angle(k, order);
            Complex64::new(-mu.sinh() * theta.sin(), mu.cosh() * theta.cos())
        })
        .collect();
    let poles = pair_conjugates(&poles);

    let dc_gain = if order % 2 == 0 {
        1.0 / (1.0 + eps * eps).sqrt()
    } else {
        1.0
    };
    let gain = dc_normalized_gain(&[], &poles, dc_gain);
    Ok(Zpk::new(Vec::new(), poles, gain))
}

/// Chebyshev Type II prototype with `attenuation_db` of stopband attenuation.
///
/// The poles are the reciprocals of a Chebyshev Type I pole set built from
/// the stopband ripple factor, which places the stopband edge at 1 rad/s.
/// Transmission zeros sit on the imaginary axis at `±j / cos θₖ`.
pub fn chebyshev_ii(order: usize, attenuation_db: f64) -> FilterDesignResult<Zpk> {
    check_order("Chebyshev II", order, 1, MAX_PROTOTYPE_ORDER)?;
    check_db("Stopband attenuation", attenuation_db)?;

    let eps = ripple_factor(attenuation_db);
    let beta = eps.asinh() / order as f64;
    let (sh, ch) = (beta.sinh(), beta.cosh());

    let mut zeros = Vec::with_capacity(order);
    let mut poles = Vec::with_capacity(order);

    if order % 2 == 1 {
        poles.push(Complex64::new(-1.0 / sh, 0.0));
    }
    for k in 1..=order / 2 {
        let theta = pole_angle(k, order);
        let pole = Complex64::new(-sh * theta.sin(), ch * theta.cos()).inv();
        poles.push(pole);
        poles.push(pole.conj());

        let zero = Complex64::new(0.0, 1.0 / theta.cos());
        zeros.push(zero);
        zeros.push(zero.conj());
    }

    let zeros = pair_conjugates(&zeros);
    let poles = pair_conjugates(&poles);
    let gain = dc_normalized_gain(&zeros, &poles, 1.0);
    Ok(Zpk::new(zeros, poles, gain))
}

/// Bessel-Thomson prototype, orders 2 through 10.
///
/// Orders 2–5 use tabulated roots of the reversed Bessel polynomial; higher
/// orders solve the polynomial numerically. Both branches return poles with
/// exact conjugate symmetry, sorted by ascending real part.
pub fn bessel(order: usize, normalization: BesselNormalization) -> FilterDesignResult<Zpk> {
    check_order("Bessel", order, BESSEL_MIN_ORDER, BESSEL_MAX_ORDER)?;

    let index = order - BESSEL_MIN_ORDER;
    let delay_poles = match BESSEL_POLES.get(index) {
        Some(table) => {
            let mut poles = Vec::with_capacity(order);
            for &(re, im) in table.iter() {
                poles.push(Complex64::new(re, im));
                if im != 0.0 {
                    poles.push(Complex64::new(re, -im));
                }
            }
            pair_conjugates(&poles)
        }
        None => roots(BESSEL_COEFFICIENTS[index])?,
    };

    let poles = match normalization {
        BesselNormalization::Delay => delay_poles,
        BesselNormalization::Phase => {
            let constant = BESSEL_COEFFICIENTS[index][order];
            let scale = constant.powf(-1.0 / order as f64);
            delay_poles.into_iter().map(|p| p * scale).collect()
        }
    };

    let gain = dc_normalized_gain(&[], &poles, 1.0);
    Ok(Zpk::new(Vec::new(), poles, gain))
}

/// Elliptic (Cauer) prototype.
///
/// Uses the exact design equations: the selectivity modulus comes from the
/// degree equation, zeros from `cd` at the real quarter-period fractions and
/// poles from `cd` shifted by the imaginary offset `v₀ = sn⁻¹(j/εp, k₁)/N`.
pub fn elliptic(order: usize, ripple_db: f64, attenuation_db: f64) -> FilterDesignResult<Zpk> {
    check_order("Elliptic", order, 1, MAX_PROTOTYPE_ORDER)?;
    check_db("Passband ripple", ripple_db)?;
    check_db("Stopband attenuation", attenuation_db)?;
    if attenuation_db <= ripple_db {
        return Err(FilterDesignError::invalid_parameter(format!(
            "Stopband attenuation ({attenuation_db} dB) must exceed passband ripple ({ripple_db} dB)"
        )));
    }

    let eps_pass = ripple_factor(ripple_db);
    let eps_stop = ripple_factor(attenuation_db);
    let discrimination = eps_pass / eps_stop;
    let jacobi = selectivity(order, discrimination);
    let modulus = jacobi.modulus();
    let quarter = jacobi.quarter_period();
    if !(modulus.is_finite() && modulus > 0.0 && modulus < 1.0 && quarter.is_finite()) {
        return Err(FilterDesignError::invalid_parameter(format!(
            "Elliptic order {order} with {ripple_db} dB ripple and {attenuation_db} dB attenuation \
             leaves no transition band (selectivity modulus {modulus})"
        )));
    }
    let j = Complex64::i();

    let v0 = (-j * inverse_sn(j / eps_pass, discrimination) / order as f64).re;
    debug!(modulus, v0, "elliptic design parameters");

    let mut zeros = Vec::with_capacity(2 * (order / 2));
    let mut poles = Vec::with_capacity(order);

    for i in 1..=order / 2 {
        let u = (2 * i - 1) as f64 / order as f64;

        let zeta = jacobi.cd(Complex64::new(u * quarter, 0.0));
        let zero = j / (zeta * modulus);
        zeros.push(zero);
        zeros.push(zero.conj());

        let pole = j * jacobi.cd(Complex64::new(u, -v0) * quarter);
        poles.push(pole);
        poles.push(pole.conj());
    }
    if order % 2 == 1 {
        let pole = j * jacobi.sn(Complex64::new(0.0, v0 * quarter));
        poles.push(Complex64::new(pole.re, 0.0));
    }

    let zeros = pair_conjugates(&zeros);
    let poles = pair_conjugates(&poles);
    let dc_gain = if order % 2 == 0 {
        1.0 / (1.0 + eps_pass * eps_pass).sqrt()
    } else {
        1.0
    };
    let gain = dc_normalized_gain(&zeros, &poles, dc_gain);

    if !gain.is_finite() || zeros.iter().chain(&poles).any(|root| !root.is_finite()) {
        return Err(FilterDesignError::invalid_parameter(format!(
            "Elliptic order {order} with {ripple_db} dB ripple and {attenuation_db} dB attenuation \
             produced non-finite roots"
        )));
    }
    let damping = poles
        .iter()
        .map(|p| -p.re / p.norm())
        .fold(f64::INFINITY, f64::min);
    if damping < MIN_POLE_DAMPING {
        return Err(FilterDesignError::invalid_parameter(format!(
            "Elliptic order {order} with {ripple_db} dB ripple and {attenuation_db} dB attenuation \
             places poles on the imaginary axis (damping {damping:e}); lower the order or tighten the ripple"
        )));
    }
    Ok(Zpk::new(zeros, poles, gain))
}
