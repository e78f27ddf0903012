//! Digital filter design.
//!
//! IIR designs start from a normalized analog prototype, move it onto the
//! requested band and discretize it with the bilinear transform. FIR designs
//! compile a response shape into band edges and run the Remez exchange.
//!
//! ## Module Organization
//!
//! - [`types`] - Design requests, families and band shapes
//! - [`elliptic_math`] - Elliptic integrals and Jacobi functions for Cauer prototypes
//! - [`prototypes`] - Normalized analog lowpass prototypes
//! - [`frequency_transform`] - Lowpass to lowpass/highpass/bandpass/bandstop
//! - [`bilinear`] - Pre-warping and the bilinear transform
//! - [`polynomial`] - Zero-pole-gain and polynomial conversions
//! - [`iir_design`] - The IIR design pipeline
//! - [`band_spec`] - Band-edge specifications for the Remez exchange
//! - [`remez`] - Parks-McClellan equiripple design
//! - [`fir_design`] - FIR design requests and tap-count estimation
//!
//! ## Quick Start
//!
//! ```rust
//! use filter_synthesis::design::*;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let iir = IirFilterDesign::elliptic(FrequencyBandSpec::LowPass { cutoff: 100.0 }, 4, 1.0, 40.0, 1000.0);
//! let tf = design_iir_filter(&iir)?;
//! assert_eq!(tf.denominator.len(), 5);
//!
//! let fir = FirFilterDesign::lowpass(31, 100.0, 1000.0);
//! let taps = design_fir_filter(&fir)?.taps;
//! assert_eq!(taps.len(), 31);
//! # Ok(())
//! # }
//! ```

pub mod types;

pub mod band_spec;
pub mod bilinear;
pub mod elliptic_math;
pub mod fir_design;
pub mod frequency_transform;
pub mod iir_design;
pub mod polynomial;
pub mod prototypes;
pub mod remez;

#[cfg(test)]
mod tests;

pub use band_spec::{BandSpec, BandSpecCompiler};
pub use bilinear::{bilinear_zpk, prewarp};
pub use fir_design::{design_fir_filter, estimate_num_taps, estimate_num_taps_multiband};
pub use iir_design::design_iir_filter;
pub use polynomial::{tf_to_zpk, zpk_to_tf};
pub use prototypes::analog_prototype;
pub use remez::{FirDesign, RemezState, remez};

pub use types::{
    BesselNormalization, FilterFamily, FirFilterDesign, FrequencyBandSpec, IirFilterDesign,
    RemezConfig,
};
