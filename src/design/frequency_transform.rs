//! s-plane frequency transformations of a normalized lowpass prototype.
//!
//! Each transform substitutes a rational function of `s` for the prototype
//! variable and maps every zero and pole individually:
//!
//! | Target    | Substitution                | Root count |
//! |-----------|-----------------------------|------------|
//! | low-pass  | `s → s / ω₀`                | unchanged  |
//! | high-pass | `s → ω₀ / s`                | unchanged  |
//! | band-pass | `s → (s² + ω₀²) / (B·s)`    | doubled    |
//! | band-stop | `s → B·s / (s² + ω₀²)`      | doubled    |
//!
//! Zeros at infinity of the prototype (poles minus zeros of them) land at the
//! origin for high-pass and band-pass targets and at `±jω₀` for band-stop
//! targets, and are appended explicitly. Outputs are conjugate-paired and
//! sorted with [`pair_conjugates`].

use crate::repr::{Zpk, root_product};
use crate::utils::roots::pair_conjugates;

use num_complex::Complex64;
use num_traits::Zero;

/// Scale a lowpass prototype to cutoff `omega` (rad/s).
pub fn lowpass_to_lowpass(prototype: &Zpk, omega: f64) -> Zpk {
    let deficit = prototype.degree_deficit() as i32;
    Zpk::new(
        prototype.zeros.iter().map(|&z| z * omega).collect(),
        prototype.poles.iter().map(|&p| p * omega).collect(),
        prototype.gain * omega.powi(deficit),
    )
}

/// Transform a lowpass prototype into a highpass filter with cutoff `omega` (rad/s).
pub fn lowpass_to_highpass(prototype: &Zpk, omega: f64) -> Zpk {
    let deficit = prototype.degree_deficit();
    let gain = prototype.gain * reflection_gain(prototype);

    let mut zeros: Vec<Complex64> = prototype.zeros.iter().map(|&z| z.inv() * omega).collect();
    zeros.extend(std::iter::repeat_n(Complex64::zero(), deficit));
    let poles: Vec<Complex64> = prototype.poles.iter().map(|&p| p.inv() * omega).collect();

    Zpk::new(pair_conjugates(&zeros), pair_conjugates(&poles), gain)
}

/// Transform a lowpass prototype into a bandpass filter centred on `center`
/// (rad/s, geometric centre of the band edges) with width `bandwidth` (rad/s).
pub fn lowpass_to_bandpass(prototype: &Zpk, center: f64, bandwidth: f64) -> Zpk {
    let deficit = prototype.degree_deficit();
    let split = |roots: &[Complex64]| -> Vec<Complex64> {
        roots
            .iter()
            .flat_map(|&r| {
                let half = r * (bandwidth / 2.0);
                let offset = (half * half - center * center).sqrt();
                [half + offset, half - offset]
            })
            .collect()
    };

    let mut zeros = split(&prototype.zeros);
    zeros.extend(std::iter::repeat_n(Complex64::zero(), deficit));
    let poles = split(&prototype.poles);

    Zpk::new(
        pair_conjugates(&zeros),
        pair_conjugates(&poles),
        prototype.gain * bandwidth.powi(deficit as i32),
    )
}

/// Transform a lowpass prototype into a bandstop filter centred on `center`
/// (rad/s) with stopband width `bandwidth` (rad/s).
pub fn lowpass_to_bandstop(prototype: &Zpk, center: f64, bandwidth: f64) -> Zpk {
    let deficit = prototype.degree_deficit();
    let gain = prototype.gain * reflection_gain(prototype);
    let split = |roots: &[Complex64]| -> Vec<Complex64> {
        roots
            .iter()
            .flat_map(|&r| {
                let half = r.inv() * (bandwidth / 2.0);
                let offset = (half * half - center * center).sqrt();
                [half + offset, half - offset]
            })
            .collect()
    };

    let mut zeros = split(&prototype.zeros);
    for _ in 0..deficit {
        zeros.push(Complex64::new(0.0, center));
        zeros.push(Complex64::new(0.0, -center));
    }
    let poles = split(&prototype.poles);

    Zpk::new(pair_conjugates(&zeros), pair_conjugates(&poles), gain)
}

/// `Re(∏(−z) / ∏(−p))`, the gain factor picked up when every root is inverted.
fn reflection_gain(prototype: &Zpk) -> f64 {
    (root_product(&prototype.zeros, Complex64::zero())
        / root_product(&prototype.poles, Complex64::zero()))
    .re
}
