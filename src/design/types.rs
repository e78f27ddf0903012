//! Supporting types for filter design requests.

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::{FilterDesignError, FilterDesignResult};

/// Default stopband attenuation for Chebyshev Type II designs, in dB.
pub const DEFAULT_CHEBYSHEV_II_ATTENUATION_DB: f64 = 40.0;

/// Default passband ripple for elliptic designs, in dB.
pub const DEFAULT_ELLIPTIC_RIPPLE_DB: f64 = 1.0;

/// Default stopband attenuation for elliptic designs, in dB.
pub const DEFAULT_ELLIPTIC_ATTENUATION_DB: f64 = 60.0;

/// Default passband ripple for equiripple FIR designs, in dB.
pub const DEFAULT_FIR_RIPPLE_DB: f64 = 0.5;

/// Default stopband attenuation for equiripple FIR designs, in dB.
pub const DEFAULT_FIR_ATTENUATION_DB: f64 = 60.0;

/// Frequency normalization applied to Bessel prototypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum BesselNormalization {
    /// Scale poles so the high-frequency asymptote matches a Butterworth
    /// filter of the same order (phase-matched). This is the usual choice
    /// when a Bessel filter replaces a Butterworth one.
    #[default]
    Phase,
    /// Keep the unit group delay normalization of the Bessel polynomial.
    Delay,
}

/// Analog prototype family of an IIR design.
///
/// Each variant carries exactly the parameters its prototype needs, so a
/// Chebyshev Type II request without an attenuation figure cannot be built.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serialization",
    serde(tag = "family", rename_all = "snake_case")
)]
pub enum FilterFamily {
    /// Butterworth filter - maximally flat passband response.
    Butterworth,
    /// Chebyshev Type I - equiripple passband, monotonic stopband.
    ChebyshevI {
        /// Peak-to-peak passband ripple in dB
        passband_ripple_db: f64,
    },
    /// Chebyshev Type II - monotonic passband, equiripple stopband.
    ///
    /// The cutoff of a Type II design is the stopband edge.
    #[cfg_attr(feature = "serialization", serde(rename = "chebyshev_ii"))]
    ChebyshevII {
        /// Minimum stopband attenuation in dB
        stopband_attenuation_db: f64,
    },
    /// Bessel filter - maximally flat group delay. Orders 2 through 10.
    Bessel {
        /// Pole normalization
        #[cfg_attr(feature = "serialization", serde(default))]
        normalization: BesselNormalization,
    },
    /// Elliptic (Cauer) filter - equiripple in both bands, sharpest transition.
    Elliptic {
        /// Peak-to-peak passband ripple in dB
        passband_ripple_db: f64,
        /// Minimum stopband attenuation in dB
        stopband_attenuation_db: f64,
    },
}

impl FilterFamily {
    /// Phase-normalized Bessel family.
    pub const fn bessel() -> Self {
        Self::Bessel {
            normalization: BesselNormalization::Phase,
        }
    }

    /// Chebyshev Type II family with the default 40 dB stopband.
    pub const fn chebyshev_ii() -> Self {
        Self::ChebyshevII {
            stopband_attenuation_db: DEFAULT_CHEBYSHEV_II_ATTENUATION_DB,
        }
    }

    /// Elliptic family with the default 1 dB ripple and 60 dB stopband.
    pub const fn elliptic() -> Self {
        Self::Elliptic {
            passband_ripple_db: DEFAULT_ELLIPTIC_RIPPLE_DB,
            stopband_attenuation_db: DEFAULT_ELLIPTIC_ATTENUATION_DB,
        }
    }

    /// Human-readable family name used in error messages and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Butterworth => "Butterworth",
            Self::ChebyshevI { .. } => "Chebyshev I",
            Self::ChebyshevII { .. } => "Chebyshev II",
            Self::Bessel { .. } => "Bessel",
            Self::Elliptic { .. } => "Elliptic",
        }
    }
}

/// Frequency response shape together with its band edges in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serialization",
    serde(tag = "response", rename_all = "snake_case")
)]
pub enum FrequencyBandSpec {
    /// Low-pass filter - allows frequencies below cutoff.
    LowPass {
        /// Cutoff frequency in Hz
        cutoff: f64,
    },
    /// High-pass filter - allows frequencies above cutoff.
    HighPass {
        /// Cutoff frequency in Hz
        cutoff: f64,
    },
    /// Band-pass filter - allows frequencies within a range.
    BandPass {
        /// Lower band edge in Hz
        low: f64,
        /// Upper band edge in Hz
        high: f64,
    },
    /// Band-stop filter - blocks frequencies within a range.
    BandStop {
        /// Lower band edge in Hz
        low: f64,
        /// Upper band edge in Hz
        high: f64,
    },
}

impl FrequencyBandSpec {
    /// Checks that every edge lies strictly between 0 and Nyquist and that
    /// two-edge bands are ordered.
    ///
    /// # Errors
    /// Returns [`FilterDesignError::InvalidParameter`] describing the first
    /// violated constraint.
    pub fn validate(&self, sample_rate: f64) -> FilterDesignResult<()> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(FilterDesignError::invalid_parameter(format!(
                "Sample rate must be positive and finite, got {sample_rate}"
            )));
        }
        let nyquist = sample_rate / 2.0;
        let inside = |f: f64| f.is_finite() && f > 0.0 && f < nyquist;

        match *self {
            Self::LowPass { cutoff } | Self::HighPass { cutoff } => {
                if !inside(cutoff) {
                    return Err(FilterDesignError::invalid_parameter(format!(
                        "Cutoff frequency must be between 0 and Nyquist ({nyquist} Hz), got {cutoff}"
                    )));
                }
            }
            Self::BandPass { low, high } | Self::BandStop { low, high } => {
                if !inside(low) || !inside(high) || low >= high {
                    return Err(FilterDesignError::invalid_parameter(format!(
                        "Invalid frequency range [{low}, {high}] for {} filter (Nyquist {nyquist} Hz)",
                        self.response_name()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Short name of the response shape.
    pub const fn response_name(&self) -> &'static str {
        match self {
            Self::LowPass { .. } => "low-pass",
            Self::HighPass { .. } => "high-pass",
            Self::BandPass { .. } => "band-pass",
            Self::BandStop { .. } => "band-stop",
        }
    }
}

/// IIR filter design parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct IirFilterDesign {
    /// Analog prototype family and its parameters
    pub family: FilterFamily,
    /// Response shape and band edges
    pub band: FrequencyBandSpec,
    /// Prototype order (number of poles before any band transform)
    pub order: usize,
    /// Sample rate in Hz
    pub sample_rate: f64,
}

impl IirFilterDesign {
    /// Create a design from its parts.
    pub const fn new(
        family: FilterFamily,
        band: FrequencyBandSpec,
        order: usize,
        sample_rate: f64,
    ) -> Self {
        Self {
            family,
            band,
            order,
            sample_rate,
        }
    }

    /// Create a phase-normalized Bessel low-pass design.
    pub const fn bessel_lowpass(order: usize, cutoff: f64, sample_rate: f64) -> Self {
        Self::new(
            FilterFamily::bessel(),
            FrequencyBandSpec::LowPass { cutoff },
            order,
            sample_rate,
        )
    }

    /// Create a Chebyshev Type II design with the given stopband attenuation.
    pub const fn chebyshev_ii(
        band: FrequencyBandSpec,
        order: usize,
        stopband_attenuation_db: f64,
        sample_rate: f64,
    ) -> Self {
        Self::new(
            FilterFamily::ChebyshevII {
                stopband_attenuation_db,
            },
            band,
            order,
            sample_rate,
        )
    }

    /// Create an elliptic design with the given ripple and attenuation.
    pub const fn elliptic(
        band: FrequencyBandSpec,
        order: usize,
        passband_ripple_db: f64,
        stopband_attenuation_db: f64,
        sample_rate: f64,
    ) -> Self {
        Self::new(
            FilterFamily::Elliptic {
                passband_ripple_db,
                stopband_attenuation_db,
            },
            band,
            order,
            sample_rate,
        )
    }
}

/// Parameters of the Remez exchange iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct RemezConfig {
    /// Dense grid points per extremal frequency
    pub grid_density: usize,
    /// Iteration cap; reaching it returns the best taps flagged as not converged
    pub max_iterations: usize,
    /// Relative spread of the extremal errors below which the design has converged
    pub convergence_threshold: f64,
}

impl RemezConfig {
    /// Grid density of 16, 100 iterations and a 1e-6 spread threshold.
    pub const DEFAULT: Self = Self {
        grid_density: 16,
        max_iterations: 100,
        convergence_threshold: 1e-6,
    };
}

impl Default for RemezConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Equiripple FIR filter design parameters.
///
/// The structural request (response shape, ripple and attenuation) is
/// compiled into a band-edge specification by
/// [`BandSpecCompiler`](crate::design::band_spec::BandSpecCompiler).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct FirFilterDesign {
    /// Response shape and band edges
    pub band: FrequencyBandSpec,
    /// Number of taps (must be odd)
    pub num_taps: usize,
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Peak-to-peak passband ripple in dB
    #[cfg_attr(feature = "serialization", serde(default = "default_fir_ripple"))]
    pub passband_ripple_db: f64,
    /// Minimum stopband attenuation in dB
    #[cfg_attr(feature = "serialization", serde(default = "default_fir_attenuation"))]
    pub stopband_attenuation_db: f64,
    /// Transition guard band in cycles/sample; `None` uses the compiler defaults
    #[cfg_attr(feature = "serialization", serde(default))]
    pub transition_width: Option<f64>,
    /// Remez iteration parameters
    #[cfg_attr(feature = "serialization", serde(default))]
    pub remez: RemezConfig,
}

#[cfg(feature = "serialization")]
const fn default_fir_ripple() -> f64 {
    DEFAULT_FIR_RIPPLE_DB
}

#[cfg(feature = "serialization")]
const fn default_fir_attenuation() -> f64 {
    DEFAULT_FIR_ATTENUATION_DB
}

impl FirFilterDesign {
    /// Create a design with 0.5 dB ripple, 60 dB attenuation and default guard bands.
    pub const fn new(band: FrequencyBandSpec, num_taps: usize, sample_rate: f64) -> Self {
        Self {
            band,
            num_taps,
            sample_rate,
            passband_ripple_db: DEFAULT_FIR_RIPPLE_DB,
            stopband_attenuation_db: DEFAULT_FIR_ATTENUATION_DB,
            transition_width: None,
            remez: RemezConfig::DEFAULT,
        }
    }

    /// Create an equiripple low-pass design.
    pub const fn lowpass(num_taps: usize, cutoff: f64, sample_rate: f64) -> Self {
        Self::new(FrequencyBandSpec::LowPass { cutoff }, num_taps, sample_rate)
    }

    /// Set passband ripple and stopband attenuation, both in dB.
    pub const fn with_ripple(mut self, passband_ripple_db: f64, stopband_attenuation_db: f64) -> Self {
        self.passband_ripple_db = passband_ripple_db;
        self.stopband_attenuation_db = stopband_attenuation_db;
        self
    }

    /// Override the transition guard band (cycles/sample).
    pub const fn with_transition_width(mut self, transition_width: f64) -> Self {
        self.transition_width = Some(transition_width);
        self
    }

    /// Override the Remez iteration parameters.
    pub const fn with_remez_config(mut self, remez: RemezConfig) -> Self {
        self.remez = remez;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_validation_accepts_interior_edges() {
        assert!(FrequencyBandSpec::LowPass { cutoff: 100.0 }.validate(1000.0).is_ok());
        assert!(
            FrequencyBandSpec::BandStop {
                low: 100.0,
                high: 200.0
            }
            .validate(1000.0)
            .is_ok()
        );
    }

    #[test]
    fn test_band_validation_rejects_bad_edges() {
        let cases = [
            FrequencyBandSpec::LowPass { cutoff: 0.0 },
            FrequencyBandSpec::HighPass { cutoff: 500.0 },
            FrequencyBandSpec::BandPass {
                low: 200.0,
                high: 100.0,
            },
            FrequencyBandSpec::BandStop {
                low: 100.0,
                high: f64::NAN,
            },
        ];
        for band in cases {
            assert!(
                matches!(band.validate(1000.0), Err(FilterDesignError::InvalidParameter(_))),
                "{band:?} should be rejected"
            );
        }
        assert!(FrequencyBandSpec::LowPass { cutoff: 100.0 }.validate(0.0).is_err());
    }

    #[test]
    fn test_family_defaults() {
        assert_eq!(
            FilterFamily::elliptic(),
            FilterFamily::Elliptic {
                passband_ripple_db: 1.0,
                stopband_attenuation_db: 60.0
            }
        );
        assert_eq!(FilterFamily::bessel().name(), "Bessel");
        assert_eq!(
            FilterFamily::Bessel {
                normalization: BesselNormalization::default()
            },
            FilterFamily::bessel()
        );
    }

    #[test]
    fn test_fir_design_builder() {
        let design = FirFilterDesign::lowpass(31, 100.0, 1000.0)
            .with_ripple(1.0, 40.0)
            .with_transition_width(0.03);
        assert_eq!(design.num_taps, 31);
        assert_eq!(design.passband_ripple_db, 1.0);
        assert_eq!(design.stopband_attenuation_db, 40.0);
        assert_eq!(design.transition_width, Some(0.03));
        assert_eq!(design.remez, RemezConfig::default());
    }
}
