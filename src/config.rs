//! JSON configuration of filter designs.
//!
//! A [`FilterSpecification`] is a tagged request for either an IIR or an
//! equiripple FIR design. Omitted FIR fields fall back to the crate defaults
//! (0.5 dB ripple, 60 dB attenuation, default guard bands and Remez settings).
//!
//! ```rust
//! use filter_synthesis::config::{DesignedFilter, FilterSpecification};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let json = r#"{
//!     "kind": "iir",
//!     "family": { "family": "bessel" },
//!     "band": { "response": "low_pass", "cutoff": 100.0 },
//!     "order": 4,
//!     "sample_rate": 1000.0
//! }"#;
//! let spec = FilterSpecification::from_json(json)?;
//! match spec.design()? {
//!     DesignedFilter::Iir(tf) => assert_eq!(tf.order(), 4),
//!     DesignedFilter::Fir(_) => unreachable!(),
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::design::remez::FirDesign;
use crate::design::types::{FirFilterDesign, IirFilterDesign};
use crate::repr::TransferFunction;
use crate::{FilterDesignError, FilterDesignResult};

use tracing::debug;

/// A filter design request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterSpecification {
    /// Analog prototype plus bilinear transform.
    Iir(IirFilterDesign),
    /// Parks-McClellan equiripple design.
    Fir(FirFilterDesign),
}

/// Output of [`FilterSpecification::design`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DesignedFilter {
    /// Transfer function coefficients of an IIR design.
    Iir(TransferFunction),
    /// Taps and convergence report of a FIR design.
    Fir(FirDesign),
}

impl From<IirFilterDesign> for FilterSpecification {
    fn from(design: IirFilterDesign) -> Self {
        Self::Iir(design)
    }
}

impl From<FirFilterDesign> for FilterSpecification {
    fn from(design: FirFilterDesign) -> Self {
        Self::Fir(design)
    }
}

impl FilterSpecification {
    /// Parse a specification from JSON text.
    ///
    /// # Errors
    /// Returns [`FilterDesignError::Serialization`] for malformed JSON, an
    /// unknown `kind`/`family`/`response` tag or a missing required field.
    pub fn from_json(json: &str) -> FilterDesignResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            FilterDesignError::Serialization(format!("Failed to parse filter specification: {e}"))
        })
    }

    /// Render the specification as pretty-printed JSON.
    pub fn to_json(&self) -> FilterDesignResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            FilterDesignError::Serialization(format!(
                "Failed to serialize filter specification: {e}"
            ))
        })
    }

    /// Run the requested design.
    pub fn design(&self) -> FilterDesignResult<DesignedFilter> {
        match self {
            Self::Iir(design) => {
                debug!("designing IIR filter from specification");
                design.design().map(DesignedFilter::Iir)
            }
            Self::Fir(design) => {
                debug!("designing FIR filter from specification");
                design.design().map(DesignedFilter::Fir)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::types::{FilterFamily, FrequencyBandSpec, RemezConfig};

    #[test]
    fn test_json_round_trip() {
        let specs = [
            FilterSpecification::from(IirFilterDesign::elliptic(
                FrequencyBandSpec::BandStop {
                    low: 100.0,
                    high: 200.0,
                },
                5,
                0.5,
                50.0,
                1000.0,
            )),
            FilterSpecification::from(IirFilterDesign::chebyshev_ii(
                FrequencyBandSpec::HighPass { cutoff: 50.0 },
                4,
                40.0,
                1000.0,
            )),
            FilterSpecification::from(
                FirFilterDesign::lowpass(31, 100.0, 1000.0).with_transition_width(0.04),
            ),
        ];
        for spec in specs {
            let json = spec.to_json().unwrap();
            assert_eq!(FilterSpecification::from_json(&json).unwrap(), spec);
        }
    }

    #[test]
    fn test_tag_names() {
        let spec = FilterSpecification::from(IirFilterDesign::chebyshev_ii(
            FrequencyBandSpec::LowPass { cutoff: 100.0 },
            4,
            40.0,
            1000.0,
        ));
        let json = spec.to_json().unwrap();
        assert!(json.contains("\"kind\": \"iir\""));
        assert!(json.contains("\"family\": \"chebyshev_ii\""));
        assert!(json.contains("\"response\": \"low_pass\""));
    }

    #[test]
    fn test_fir_defaults_fill_missing_fields() {
        let json = r#"{
            "kind": "fir",
            "band": { "response": "low_pass", "cutoff": 100.0 },
            "num_taps": 31,
            "sample_rate": 1000.0,
            "remez": { "max_iterations": 50 }
        }"#;
        let spec = FilterSpecification::from_json(json).unwrap();
        let FilterSpecification::Fir(design) = spec else {
            panic!("expected a FIR specification");
        };
        assert_eq!(design.passband_ripple_db, 0.5);
        assert_eq!(design.stopband_attenuation_db, 60.0);
        assert_eq!(design.transition_width, None);
        assert_eq!(design.remez.max_iterations, 50);
        assert_eq!(design.remez.grid_density, RemezConfig::DEFAULT.grid_density);
    }

    #[test]
    fn test_design_dispatch() {
        let iir = FilterSpecification::Iir(IirFilterDesign::new(
            FilterFamily::Butterworth,
            FrequencyBandSpec::LowPass { cutoff: 100.0 },
            3,
            1000.0,
        ));
        assert!(matches!(iir.design(), Ok(DesignedFilter::Iir(tf)) if tf.order() == 3));

        let fir = FilterSpecification::Fir(FirFilterDesign::lowpass(31, 100.0, 1000.0));
        assert!(matches!(fir.design(), Ok(DesignedFilter::Fir(d)) if d.taps.len() == 31));
    }

    #[test]
    fn test_parse_errors() {
        for json in [
            "not json",
            r#"{ "kind": "analog" }"#,
            r#"{ "kind": "iir", "family": { "family": "bessel" }, "order": 4, "sample_rate": 1000.0 }"#,
        ] {
            assert!(matches!(
                FilterSpecification::from_json(json),
                Err(FilterDesignError::Serialization(_))
            ));
        }
    }

    #[test]
    fn test_invalid_design_surfaces_design_error() {
        let spec = FilterSpecification::from(FirFilterDesign::lowpass(30, 100.0, 1000.0));
        assert_eq!(spec.design(), Err(FilterDesignError::EvenOrderRequested(30)));
    }
}
