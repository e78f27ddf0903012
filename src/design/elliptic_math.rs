//! Jacobi elliptic functions and related quantities for elliptic filter design.
//!
//! Everything here works with the modulus `k` (not the parameter `m = k²`).
//!
//! - [`complete_elliptic_integral`] - K(k) by the arithmetic-geometric mean
//! - [`log_nome`] and [`nome`] - q = exp(−π K(k′)/K(k))
//! - [`JacobiElliptic`] - sn, cn, dn and cd for complex arguments, evaluated
//!   through rapidly converging theta series
//! - [`inverse_sn`] - inverse of sn by descending Landen transformation
//! - [`elliptic_degree`] - selectivity modulus from the degree equation
//!
//! # Examples
//!
//! ```rust
//! use filter_synthesis::design::elliptic_math::{JacobiElliptic, complete_elliptic_integral};
//! use num_complex::Complex64;
//!
//! let jacobi = JacobiElliptic::new(0.6);
//! let quarter_period = complete_elliptic_integral(0.6);
//! // sn reaches 1 at the quarter period
//! let sn = jacobi.sn(Complex64::new(quarter_period, 0.0));
//! assert!((sn.re - 1.0).abs() < 1e-12);
//! ```

use num_complex::Complex64;
use num_traits::{One, Zero};
use std::f64::consts::PI;

/// Number of terms in every theta series.
pub const SERIES_TERMS: usize = 10;

/// Iteration cap of the arithmetic-geometric mean.
pub const AGM_ITERATIONS: usize = 10;

/// Maximum number of descending Landen steps.
pub const LANDEN_STEPS: usize = 10;

/// Largest log-nome evaluated directly. Above it the theta series run on the
/// complementary nome, which is then at most `e^(−π)`.
const DIRECT_LOG_NOME_LIMIT: f64 = -PI;

/// Complete elliptic integral of the first kind, K(k).
///
/// Computed as `π / (2·AGM(1, √(1 − k²)))`. The mean converges
/// quadratically, so ten iterations reach full `f64` precision for any
/// modulus not pathologically close to 1.
pub fn complete_elliptic_integral(k: f64) -> f64 {
    let mut a = 1.0_f64;
    let mut b = (1.0 - k * k).sqrt();
    for _ in 0..AGM_ITERATIONS {
        if (a - b).abs() <= 1e-15 * a {
            break;
        }
        let next_a = (a + b) / 2.0;
        b = (a * b).sqrt();
        a = next_a;
    }
    PI / (2.0 * a)
}

/// Complementary modulus `k′ = √(1 − k²)`.
pub fn complementary_modulus(k: f64) -> f64 {
    (1.0 - k * k).sqrt()
}

/// Natural logarithm of the nome, `ln q = −π K(k′) / K(k)`.
pub fn log_nome(k: f64) -> f64 {
    -PI * complete_elliptic_integral(complementary_modulus(k)) / complete_elliptic_integral(k)
}

/// Nome `q = exp(−π K(k′) / K(k))`.
pub fn nome(k: f64) -> f64 {
    log_nome(k).exp()
}

/// The four Jacobi theta functions at one argument.
#[derive(Debug, Clone, Copy)]
struct Theta {
    t1: Complex64,
    t2: Complex64,
    t3: Complex64,
    t4: Complex64,
}

/// `(w·e^{jθ}, w·e^{−jθ})` with `ln w = log_weight` folded into a single exponent,
/// so a tiny weight against a large imaginary angle never overflows.
fn exponential_pair(log_weight: f64, angle: Complex64) -> (Complex64, Complex64) {
    let j_angle = Complex64::i() * angle;
    (
        (j_angle + log_weight).exp(),
        (-j_angle + log_weight).exp(),
    )
}

fn theta(z: Complex64, log_q: f64) -> Theta {
    let mut t1 = Complex64::zero();
    let mut t2 = Complex64::zero();
    let mut t3 = Complex64::one();
    let mut t4 = Complex64::one();

    for n in 0..SERIES_TERMS {
        let half = n as f64 + 0.5;
        let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
        let (up, down) = exponential_pair(half * half * log_q, z * (2 * n + 1) as f64);
        // 2·sin = (up − down)/j
        t1 += (up - down) * Complex64::new(0.0, -sign);
        t2 += up + down;
    }
    for n in 1..SERIES_TERMS {
        let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
        let (up, down) = exponential_pair((n * n) as f64 * log_q, z * (2 * n) as f64);
        let cosine = up + down;
        t3 += cosine;
        t4 += cosine * sign;
    }

    Theta { t1, t2, t3, t4 }
}

/// Theta constants for one nome with `ln q <= −π`.
#[derive(Debug, Clone, Copy)]
struct ThetaFrame {
    log_nome: f64,
    quarter_period: f64,
    theta2_zero: f64,
    theta3_zero: f64,
    theta4_zero: f64,
}

impl ThetaFrame {
    fn new(log_nome: f64) -> Self {
        let zero = theta(Complex64::zero(), log_nome);
        let theta3_zero = zero.t3.re;
        Self {
            log_nome,
            // K = (π/2)·θ3(0)²
            quarter_period: PI / 2.0 * theta3_zero * theta3_zero,
            theta2_zero: zero.t2.re,
            theta3_zero,
            theta4_zero: zero.t4.re,
        }
    }

    fn modulus(&self) -> f64 {
        (self.theta2_zero / self.theta3_zero).powi(2)
    }

    fn complementary_modulus(&self) -> f64 {
        (self.theta4_zero / self.theta3_zero).powi(2)
    }

    fn evaluate(&self, u: Complex64) -> JacobiValues {
        let z = u * (PI / (2.0 * self.quarter_period));
        let th = theta(z, self.log_nome);
        JacobiValues {
            sn: th.t1 / th.t4 * (self.theta3_zero / self.theta2_zero),
            cn: th.t2 / th.t4 * (self.theta4_zero / self.theta2_zero),
            dn: th.t3 / th.t4 * (self.theta4_zero / self.theta3_zero),
        }
    }
}

/// Values of sn, cn and dn at one argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JacobiValues {
    /// sn(u, k)
    pub sn: Complex64,
    /// cn(u, k)
    pub cn: Complex64,
    /// dn(u, k)
    pub dn: Complex64,
}

impl JacobiValues {
    /// cd(u, k) = cn / dn
    pub fn cd(&self) -> Complex64 {
        self.cn / self.dn
    }
}

/// Jacobi elliptic functions for a fixed modulus.
///
/// The modulus, quarter period and theta constants all follow from the nome
/// and are computed once. A nome above `e^(−π)` (modulus above `1/√2`) is
/// handled through Jacobi's imaginary transformation on the complementary
/// nome, so both `k` and `k′` stay accurate when `k` is within rounding of 1.
#[derive(Debug, Clone, Copy)]
pub struct JacobiElliptic {
    log_nome: f64,
    quarter_period: f64,
    modulus: f64,
    complementary_modulus: f64,
    frame: ThetaFrame,
    transformed: bool,
}

impl JacobiElliptic {
    /// Precompute the constants for modulus `k`, `0 < k < 1`.
    pub fn new(k: f64) -> Self {
        Self::from_log_nome(log_nome(k))
    }

    /// Precompute the constants for the nome `q = exp(log_nome)`, `log_nome < 0`.
    pub fn from_log_nome(log_nome: f64) -> Self {
        if log_nome <= DIRECT_LOG_NOME_LIMIT {
            let frame = ThetaFrame::new(log_nome);
            Self {
                log_nome,
                quarter_period: frame.quarter_period,
                modulus: frame.modulus(),
                complementary_modulus: frame.complementary_modulus(),
                frame,
                transformed: false,
            }
        } else {
            // ln q · ln q′ = π²
            let frame = ThetaFrame::new(PI * PI / log_nome);
            Self {
                log_nome,
                // ln q = −π K′/K
                quarter_period: -PI * frame.quarter_period / log_nome,
                modulus: frame.complementary_modulus(),
                complementary_modulus: frame.modulus(),
                frame,
                transformed: true,
            }
        }
    }

    /// Modulus k.
    pub const fn modulus(&self) -> f64 {
        self.modulus
    }

    /// Complementary modulus k′, accurate even when `k` rounds to 1.
    pub const fn complementary_modulus(&self) -> f64 {
        self.complementary_modulus
    }

    /// Quarter period K(k).
    pub const fn quarter_period(&self) -> f64 {
        self.quarter_period
    }

    /// Nome q.
    pub fn nome(&self) -> f64 {
        self.log_nome.exp()
    }

    /// Natural logarithm of the nome.
    pub const fn log_nome(&self) -> f64 {
        self.log_nome
    }

    /// sn, cn and dn at `u` (not normalized by K).
    pub fn evaluate(&self, u: Complex64) -> JacobiValues {
        if !self.transformed {
            return self.frame.evaluate(u);
        }
        // sn(u, k) = −j·sc(ju, k′), cn(u, k) = nc(ju, k′), dn(u, k) = dc(ju, k′)
        let complementary = self.frame.evaluate(Complex64::i() * u);
        JacobiValues {
            sn: -Complex64::i() * complementary.sn / complementary.cn,
            cn: complementary.cn.inv(),
            dn: complementary.dn / complementary.cn,
        }
    }

    /// sn(u, k)
    pub fn sn(&self, u: Complex64) -> Complex64 {
        self.evaluate(u).sn
    }

    /// cd(u, k)
    pub fn cd(&self, u: Complex64) -> Complex64 {
        self.evaluate(u).cd()
    }
}

/// Descending Landen sequence of moduli, starting from the first transform of `k`.
///
/// Stops after [`LANDEN_STEPS`] steps or once the modulus drops below 1e-16.
pub fn landen_sequence(k: f64) -> Vec<f64> {
    let mut moduli = Vec::with_capacity(LANDEN_STEPS);
    let mut current = k;
    for _ in 0..LANDEN_STEPS {
        let kp = complementary_modulus(current);
        current = (current / (1.0 + kp)).powi(2);
        moduli.push(current);
        if current < 1e-16 {
            break;
        }
    }
    moduli
}

/// Inverse of sn, normalized by the quarter period.
///
/// Returns `u` such that `sn(u·K(k), k) = w`. The argument is carried down the
/// descending Landen sequence until the modulus is negligible, where sn
/// reduces to sin and the inverse is an arccosine.
pub fn inverse_sn(w: Complex64, k: f64) -> Complex64 {
    let mut w = w;
    let mut previous = k;
    for modulus in landen_sequence(k) {
        let root = (Complex64::one() - w * w * (previous * previous)).sqrt();
        w = w / (root + 1.0) * (2.0 / (1.0 + modulus));
        previous = modulus;
    }
    Complex64::one() - w.acos() * (2.0 / PI)
}

/// Selectivity functions from the degree equation.
///
/// Given the filter order and the discrimination modulus `k₁ = εp/εs`, the
/// nome of the selectivity modulus is `q = q(k₁)^(1/N)`. The nome is carried
/// through in log form and the returned functions are built from it directly.
pub fn selectivity(order: usize, k1: f64) -> JacobiElliptic {
    JacobiElliptic::from_log_nome(log_nome(k1) / order as f64)
}

/// Solves the degree equation for the selectivity modulus `k`.
pub fn elliptic_degree(order: usize, k1: f64) -> f64 {
    selectivity(order, k1).modulus()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_integral_known_values() {
        assert!((complete_elliptic_integral(0.0) - PI / 2.0).abs() < 1e-15);
        assert!(
            (complete_elliptic_integral(1.0 / 2.0_f64.sqrt()) - 1.854_074_677_301_372).abs()
                < 1e-12
        );
    }

    #[test]
    fn test_nome_small_modulus() {
        // q ≈ k²/16 for small k
        assert!((nome(0.5) - 0.017_972_387_008_967).abs() < 1e-12);
        assert!((nome(1e-3) - 1e-6 / 16.0).abs() < 1e-10);
    }

    #[test]
    fn test_jacobi_identities() {
        let jacobi = JacobiElliptic::new(0.6);
        let values = jacobi.evaluate(Complex64::new(0.3 * jacobi.quarter_period(), 0.0));
        let k2 = 0.36;
        let pythagorean = values.sn * values.sn + values.cn * values.cn;
        let modular = values.dn * values.dn + values.sn * values.sn * k2;
        assert!((pythagorean.re - 1.0).abs() < 1e-12);
        assert!((modular.re - 1.0).abs() < 1e-12);
        assert!((values.sn.re - 0.494_301_940_954_908).abs() < 1e-12);
    }

    #[test]
    fn test_quarter_period_values() {
        let jacobi = JacobiElliptic::new(0.6);
        let at_k = jacobi.evaluate(Complex64::new(jacobi.quarter_period(), 0.0));
        assert!((at_k.sn.re - 1.0).abs() < 1e-12);
        assert!(at_k.cn.norm() < 1e-12);
        assert!((at_k.dn.re - 0.8).abs() < 1e-12);
        assert!((jacobi.cd(Complex64::zero()).re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_sn_round_trip() {
        let k = 0.6;
        let jacobi = JacobiElliptic::new(k);
        let w = jacobi.sn(Complex64::new(0.3 * jacobi.quarter_period(), 0.0));
        let u = inverse_sn(w, k);
        assert!((u.re - 0.3).abs() < 1e-12);
        assert!(u.im.abs() < 1e-12);
    }

    #[test]
    fn test_inverse_sn_imaginary_argument() {
        let u = inverse_sn(Complex64::new(0.0, 2.0), 0.01);
        assert!(u.re.abs() < 1e-12);
        assert!((u.im - 0.918_975_719_785_918).abs() < 1e-10);
    }

    #[test]
    fn test_landen_sequence_terminates() {
        let moduli = landen_sequence(0.99);
        assert!(moduli.len() <= LANDEN_STEPS);
        assert!(moduli.windows(2).all(|pair| pair[1] < pair[0]));
        assert!(*moduli.last().unwrap() < 1e-10);
    }

    #[test]
    fn test_degree_equation() {
        assert!((elliptic_degree(4, 0.01) - 0.742_882_811_710_546).abs() < 1e-10);
        // A higher order buys a selectivity closer to 1
        assert!(elliptic_degree(8, 0.01) > elliptic_degree(4, 0.01));
    }

    #[test]
    fn test_complementary_nome_identities() {
        let jacobi = JacobiElliptic::from_log_nome(-0.5);
        let k = jacobi.modulus();
        assert!((k - 0.999_999_978_597_696).abs() < 1e-12);
        assert!((jacobi.complementary_modulus() - 2.068_927_426_012_587e-4).abs() < 1e-15);

        let values = jacobi.evaluate(Complex64::new(0.7, 0.4) * jacobi.quarter_period());
        let pythagorean = values.sn * values.sn + values.cn * values.cn;
        let modular = values.dn * values.dn + values.sn * values.sn * (k * k);
        assert!((pythagorean - 1.0).norm() < 1e-12);
        assert!((modular - 1.0).norm() < 1e-12);
    }

    #[test]
    fn test_log_nome_round_trip() {
        let jacobi = JacobiElliptic::from_log_nome(-1.0);
        assert!((log_nome(jacobi.modulus()) + 1.0).abs() < 1e-10);
        assert!((jacobi.nome() - (-1.0_f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_continuous_across_frame_switch() {
        let direct = JacobiElliptic::from_log_nome(-PI);
        let transformed = JacobiElliptic::from_log_nome(-PI + 1e-12);
        let half = 1.0 / 2.0_f64.sqrt();
        assert!((direct.modulus() - half).abs() < 1e-12);
        assert!((transformed.modulus() - half).abs() < 1e-9);
        assert!((direct.quarter_period() - 1.854_074_677_301_372).abs() < 1e-12);
        assert!((transformed.quarter_period() - 1.854_074_677_301_372).abs() < 1e-9);

        let u = Complex64::new(0.3, 0.2);
        let a = direct.evaluate(u * direct.quarter_period());
        let b = transformed.evaluate(u * transformed.quarter_period());
        assert!((a.sn - b.sn).norm() < 1e-9);
        assert!((a.cn - b.cn).norm() < 1e-9);
        assert!((a.dn - b.dn).norm() < 1e-9);
        assert!((a.sn - Complex64::new(0.562_317_749_359_027, 0.300_226_612_572_249)).norm() < 1e-10);
    }

    #[test]
    fn test_selectivity_near_unity() {
        // Order 32, 10 dB ripple, 12 dB attenuation: k rounds to 1 in f64
        let eps_pass = (10.0_f64.powf(1.0) - 1.0).sqrt();
        let eps_stop = (10.0_f64.powf(1.2) - 1.0).sqrt();
        let jacobi = selectivity(32, eps_pass / eps_stop);
        assert!(jacobi.modulus() <= 1.0);
        assert!(jacobi.complementary_modulus() > 0.0);
        assert!((jacobi.complementary_modulus() / 3.314_184_209_904_082e-24 - 1.0).abs() < 1e-6);
        assert!((jacobi.quarter_period() - 55.450_125_090_151_08).abs() < 1e-8);
        assert!(jacobi.cd(Complex64::new(0.5, 0.0) * jacobi.quarter_period()).is_finite());
    }
}
