//! IIR (Infinite Impulse Response) filter design.
//!
//! Designs run through four stages, each operating on a [`Zpk`]:
//!
//! 1. [`analog_prototype`] - normalized lowpass prototype of the family
//! 2. band transform - lowpass/highpass/bandpass/bandstop at pre-warped edges
//! 3. [`bilinear_zpk`] - discretization at the sample rate
//! 4. [`zpk_to_tf`] - expansion into `(b, a)` coefficients
//!
//! ```rust
//! use filter_synthesis::{FrequencyBandSpec, IirFilterDesign};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let design = IirFilterDesign::chebyshev_ii(
//!     FrequencyBandSpec::LowPass { cutoff: 100.0 },
//!     4,
//!     40.0,
//!     1000.0,
//! );
//! let tf = design.design()?;
//! assert_eq!(tf.numerator.len(), 5);
//! assert_eq!(tf.denominator[0], 1.0);
//! # Ok(())
//! # }
//! ```

use crate::design::bilinear::{bilinear_zpk, prewarp};
use crate::design::frequency_transform::{
    lowpass_to_bandpass, lowpass_to_bandstop, lowpass_to_highpass, lowpass_to_lowpass,
};
use crate::design::polynomial::zpk_to_tf;
use crate::design::prototypes::analog_prototype;
use crate::design::types::{FrequencyBandSpec, IirFilterDesign};
use crate::repr::{TransferFunction, Zpk};
use crate::FilterDesignResult;

use tracing::debug;

/// Design an IIR filter and return its transfer function coefficients.
pub fn design_iir_filter(design: &IirFilterDesign) -> FilterDesignResult<TransferFunction> {
    design.design()
}

impl IirFilterDesign {
    /// Check the band edges against the sample rate.
    ///
    /// Order and family parameters are checked when the prototype is built.
    pub fn validate(&self) -> FilterDesignResult<()> {
        self.band.validate(self.sample_rate)
    }

    /// Analog filter with pre-warped band edges, ready for the bilinear transform.
    pub fn design_analog(&self) -> FilterDesignResult<Zpk> {
        self.validate()?;
        let prototype = analog_prototype(&self.family, self.order)?;
        Ok(apply_band_transform(&prototype, &self.band, self.sample_rate))
    }

    /// Digital zeros, poles and gain.
    pub fn design_zpk(&self) -> FilterDesignResult<Zpk> {
        debug!(
            family = self.family.name(),
            response = self.band.response_name(),
            order = self.order,
            sample_rate = self.sample_rate,
            "designing IIR filter"
        );
        let analog = self.design_analog()?;
        Ok(bilinear_zpk(&analog, self.sample_rate))
    }

    /// Transfer function coefficients `(b, a)` with `a[0] == 1`.
    ///
    /// # Errors
    /// - [`FilterDesignError::InvalidParameter`](crate::FilterDesignError::InvalidParameter)
    ///   for band edges outside `(0, Nyquist)` or invalid family parameters.
    /// - [`FilterDesignError::UnsupportedOrder`](crate::FilterDesignError::UnsupportedOrder)
    ///   for orders the family does not support.
    pub fn design(&self) -> FilterDesignResult<TransferFunction> {
        let digital = self.design_zpk()?;
        Ok(zpk_to_tf(&digital))
    }
}

/// Map a lowpass prototype onto the requested band, pre-warping every edge.
fn apply_band_transform(prototype: &Zpk, band: &FrequencyBandSpec, sample_rate: f64) -> Zpk {
    match *band {
        FrequencyBandSpec::LowPass { cutoff } => {
            lowpass_to_lowpass(prototype, prewarp(cutoff, sample_rate))
        }
        FrequencyBandSpec::HighPass { cutoff } => {
            lowpass_to_highpass(prototype, prewarp(cutoff, sample_rate))
        }
        FrequencyBandSpec::BandPass { low, high } => {
            let (center, bandwidth) = band_geometry(low, high, sample_rate);
            lowpass_to_bandpass(prototype, center, bandwidth)
        }
        FrequencyBandSpec::BandStop { low, high } => {
            let (center, bandwidth) = band_geometry(low, high, sample_rate);
            lowpass_to_bandstop(prototype, center, bandwidth)
        }
    }
}

/// Geometric centre and width (rad/s) of a pre-warped band.
fn band_geometry(low: f64, high: f64, sample_rate: f64) -> (f64, f64) {
    let warped_low = prewarp(low, sample_rate);
    let warped_high = prewarp(high, sample_rate);
    ((warped_low * warped_high).sqrt(), warped_high - warped_low)
}
