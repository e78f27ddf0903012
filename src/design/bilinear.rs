//! Bilinear transform from the s-plane to the z-plane.
//!
//! The map `s = 2·fs·(z − 1)/(z + 1)` sends the imaginary axis onto the unit
//! circle and the left half plane into the unit disc, so a stable analog
//! filter always yields a stable digital one. The frequency axis is
//! compressed according to `ω_analog = 2·fs·tan(ω_digital / 2)`; designs
//! pre-warp their band edges with [`prewarp`] to compensate.

use crate::repr::{Zpk, root_product};
use crate::utils::roots::pair_conjugates;

use num_complex::Complex64;
use std::f64::consts::PI;

/// Analog angular frequency (rad/s) that the bilinear transform maps onto
/// the digital frequency `frequency` (Hz).
///
/// # Examples
///
/// ```rust
/// use filter_synthesis::design::bilinear::prewarp;
///
/// // Quarter of the sample rate: 2·fs·tan(π/4) = 2·fs
/// assert!((prewarp(250.0, 1000.0) - 2000.0).abs() < 1e-9);
/// ```
pub fn prewarp(frequency: f64, sample_rate: f64) -> f64 {
    2.0 * sample_rate * (PI * frequency / sample_rate).tan()
}

/// Discretize an analog filter with the bilinear transform.
///
/// Each root maps as `z = (1 + s/2fs) / (1 − s/2fs)`. Zeros at infinity map
/// to `z = −1` and are appended so numerator and denominator have equal
/// degree. The gain becomes `k · Re(∏(2fs − zᵢ) / ∏(2fs − pᵢ))`, which keeps
/// the response at DC (`s = 0`, `z = 1`) and at every other frequency
/// identical to the analog response at the warped frequency.
pub fn bilinear_zpk(analog: &Zpk, sample_rate: f64) -> Zpk {
    let fs2 = 2.0 * sample_rate;
    let map = |&s: &Complex64| (1.0 + s / fs2) / (1.0 - s / fs2);

    let mut zeros: Vec<Complex64> = analog.zeros.iter().map(map).collect();
    zeros.extend(std::iter::repeat_n(
        Complex64::new(-1.0, 0.0),
        analog.degree_deficit(),
    ));
    let poles: Vec<Complex64> = analog.poles.iter().map(map).collect();

    let at = Complex64::new(fs2, 0.0);
    let gain = analog.gain * (root_product(&analog.zeros, at) / root_product(&analog.poles, at)).re;

    Zpk::new(pair_conjugates(&zeros), pair_conjugates(&poles), gain)
}
