//! Band-edge specifications for equiripple FIR design.
//!
//! A [`BandSpec`] is the low-level input of the Remez exchange: a list of
//! band edges in normalized frequency (cycles/sample, `0..=0.5`), a desired
//! gain per band and a weight per band. [`BandSpecCompiler`] builds one from a
//! structural request (response shape, ripple and attenuation in dB).
//!
//! ```rust
//! use filter_synthesis::design::band_spec::BandSpecCompiler;
//! use filter_synthesis::FrequencyBandSpec;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = BandSpecCompiler::default()
//!     .compile(&FrequencyBandSpec::LowPass { cutoff: 100.0 }, 1000.0)?;
//! assert_eq!(spec.num_bands(), 2);
//! assert_eq!(spec.desired(), &[1.0, 0.0]);
//! assert!((spec.edges()[2] - 0.15).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::design::types::{DEFAULT_FIR_ATTENUATION_DB, DEFAULT_FIR_RIPPLE_DB, FrequencyBandSpec};
use crate::utils::filter_math::{db_to_passband_deviation, db_to_stopband_deviation};
use crate::{FilterDesignError, FilterDesignResult};

/// Nyquist frequency in cycles/sample.
pub const NYQUIST: f64 = 0.5;

/// Band edges, desired gains and weights for the Remez exchange.
///
/// Invariants (checked by [`BandSpec::new`]):
/// - an even number (at least four) of edges in `[0, 0.5]`, non-decreasing,
///   starting at 0 and ending at 0.5
/// - every band has a positive width
/// - one finite desired gain and one positive weight per band
///
/// Gaps between one band's upper edge and the next band's lower edge are
/// transition regions where the response is unconstrained.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct BandSpec {
    edges: Vec<f64>,
    desired: Vec<f64>,
    weights: Vec<f64>,
}

impl BandSpec {
    /// Validate and build a band specification.
    ///
    /// # Errors
    /// Returns [`FilterDesignError::InvalidBandSpec`] describing the first
    /// violated invariant.
    pub fn new(edges: Vec<f64>, desired: Vec<f64>, weights: Vec<f64>) -> FilterDesignResult<Self> {
        if edges.len() < 4 || edges.len() % 2 != 0 {
            return Err(FilterDesignError::invalid_band_spec(format!(
                "expected an even number of at least 4 band edges, got {}",
                edges.len()
            )));
        }
        if edges.iter().any(|&f| !f.is_finite() || !(0.0..=NYQUIST).contains(&f)) {
            return Err(FilterDesignError::invalid_band_spec(
                "band edges must lie in [0, 0.5]",
            ));
        }
        if edges[0] != 0.0 {
            return Err(FilterDesignError::invalid_band_spec(format!(
                "first band edge must be 0, got {}",
                edges[0]
            )));
        }
        let last = edges[edges.len() - 1];
        if last != NYQUIST {
            return Err(FilterDesignError::invalid_band_spec(format!(
                "last band edge must be 0.5, got {last}"
            )));
        }
        if edges.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(FilterDesignError::invalid_band_spec(
                "band edges must be non-decreasing",
            ));
        }
        if edges.chunks_exact(2).any(|band| band[1] <= band[0]) {
            return Err(FilterDesignError::invalid_band_spec(
                "every band must have a positive width",
            ));
        }

        let num_bands = edges.len() / 2;
        if desired.len() != num_bands || weights.len() != num_bands {
            return Err(FilterDesignError::invalid_band_spec(format!(
                "{num_bands} bands need {num_bands} desired values and weights, got {} and {}",
                desired.len(),
                weights.len()
            )));
        }
        if desired.iter().any(|d| !d.is_finite()) {
            return Err(FilterDesignError::invalid_band_spec(
                "desired gains must be finite",
            ));
        }
        if weights.iter().any(|&w| !w.is_finite() || w <= 0.0) {
            return Err(FilterDesignError::invalid_band_spec(
                "weights must be positive and finite",
            ));
        }

        Ok(Self {
            edges,
            desired,
            weights,
        })
    }

    /// Band edges in cycles/sample.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Desired gain per band.
    pub fn desired(&self) -> &[f64] {
        &self.desired
    }

    /// Error weight per band.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of bands.
    pub fn num_bands(&self) -> usize {
        self.desired.len()
    }

    /// Iterate bands as `(lower edge, upper edge, desired, weight)`.
    pub fn bands(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        self.edges
            .chunks_exact(2)
            .zip(self.desired.iter().zip(self.weights.iter()))
            .map(|(band, (&desired, &weight))| (band[0], band[1], desired, weight))
    }
}

/// Builds a [`BandSpec`] from a response shape, ripple and attenuation.
///
/// Passbands get weight `1/δp` and stopbands `1/δs`, where the deviations
/// come from [`db_to_passband_deviation`] and [`db_to_stopband_deviation`],
/// so the Remez error is balanced against the requested tolerances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandSpecCompiler {
    /// Peak-to-peak passband ripple in dB
    pub passband_ripple_db: f64,
    /// Minimum stopband attenuation in dB
    pub stopband_attenuation_db: f64,
    /// Transition guard band in cycles/sample; `None` selects the defaults
    pub transition_width: Option<f64>,
}

impl Default for BandSpecCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_FIR_RIPPLE_DB, DEFAULT_FIR_ATTENUATION_DB)
    }
}

impl BandSpecCompiler {
    /// Default guard band for low-pass and high-pass responses (cycles/sample).
    pub const SINGLE_EDGE_TRANSITION: f64 = 0.05;

    /// Default guard band for band-pass and band-stop responses (cycles/sample).
    pub const DOUBLE_EDGE_TRANSITION: f64 = 0.02;

    /// Create a compiler for the given ripple and attenuation.
    pub const fn new(passband_ripple_db: f64, stopband_attenuation_db: f64) -> Self {
        Self {
            passband_ripple_db,
            stopband_attenuation_db,
            transition_width: None,
        }
    }

    /// Use the same guard band width for every response shape.
    pub const fn with_transition_width(mut self, transition_width: f64) -> Self {
        self.transition_width = Some(transition_width);
        self
    }

    /// Weight applied to passbands.
    pub fn passband_weight(&self) -> f64 {
        1.0 / db_to_passband_deviation(self.passband_ripple_db)
    }

    /// Weight applied to stopbands.
    pub fn stopband_weight(&self) -> f64 {
        1.0 / db_to_stopband_deviation(self.stopband_attenuation_db)
    }

    fn validate(&self) -> FilterDesignResult<()> {
        for (name, db) in [
            ("Passband ripple", self.passband_ripple_db),
            ("Stopband attenuation", self.stopband_attenuation_db),
        ] {
            if !db.is_finite() || db <= 0.0 {
                return Err(FilterDesignError::invalid_parameter(format!(
                    "{name} must be a positive number of dB, got {db}"
                )));
            }
        }
        if let Some(width) = self.transition_width {
            if !width.is_finite() || width <= 0.0 || width >= NYQUIST {
                return Err(FilterDesignError::invalid_parameter(format!(
                    "Transition width must lie in (0, 0.5) cycles/sample, got {width}"
                )));
            }
        }
        Ok(())
    }

    /// Compile a response shape at `sample_rate` into band edges.
    ///
    /// # Errors
    /// - [`FilterDesignError::InvalidParameter`] for edges outside `(0, Nyquist)`,
    ///   non-positive dB figures or an out-of-range transition width.
    /// - [`FilterDesignError::InvalidBandSpec`] when a guard band would push an
    ///   edge past 0 or 0.5, or close a band entirely.
    pub fn compile(&self, band: &FrequencyBandSpec, sample_rate: f64) -> FilterDesignResult<BandSpec> {
        band.validate(sample_rate)?;
        self.validate()?;

        let pass = self.passband_weight();
        let stop = self.stopband_weight();

        let (edges, desired, weights) = match *band {
            FrequencyBandSpec::LowPass { cutoff } => {
                let f = cutoff / sample_rate;
                let g = self.transition_width.unwrap_or(Self::SINGLE_EDGE_TRANSITION);
                (vec![0.0, f, f + g, NYQUIST], vec![1.0, 0.0], vec![pass, stop])
            }
            FrequencyBandSpec::HighPass { cutoff } => {
                let f = cutoff / sample_rate;
                let g = self.transition_width.unwrap_or(Self::SINGLE_EDGE_TRANSITION);
                (vec![0.0, f - g, f, NYQUIST], vec![0.0, 1.0], vec![stop, pass])
            }
            FrequencyBandSpec::BandPass { low, high } => {
                let (f1, f2) = (low / sample_rate, high / sample_rate);
                let g = self.transition_width.unwrap_or(Self::DOUBLE_EDGE_TRANSITION);
                (
                    vec![0.0, f1 - g, f1, f2, f2 + g, NYQUIST],
                    vec![0.0, 1.0, 0.0],
                    vec![stop, pass, stop],
                )
            }
            FrequencyBandSpec::BandStop { low, high } => {
                let (f1, f2) = (low / sample_rate, high / sample_rate);
                let g = self.transition_width.unwrap_or(Self::DOUBLE_EDGE_TRANSITION);
                (
                    vec![0.0, f1 - g, f1, f2, f2 + g, NYQUIST],
                    vec![1.0, 0.0, 1.0],
                    vec![pass, stop, pass],
                )
            }
        };

        BandSpec::new(edges, desired, weights).map_err(|err| match err {
            FilterDesignError::InvalidBandSpec(reason) => FilterDesignError::InvalidBandSpec(format!(
                "{} response does not leave room for its transition band: {reason}",
                band.response_name()
            )),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_spec_accepts_valid_edges() {
        let spec = BandSpec::new(vec![0.0, 0.2, 0.25, 0.5], vec![1.0, 0.0], vec![1.0, 1.0]).unwrap();
        assert_eq!(spec.num_bands(), 2);
        let bands: Vec<_> = spec.bands().collect();
        assert_eq!(bands, vec![(0.0, 0.2, 1.0, 1.0), (0.25, 0.5, 0.0, 1.0)]);
    }

    #[test]
    fn test_band_spec_rejections() {
        let cases: [(Vec<f64>, Vec<f64>, Vec<f64>); 8] = [
            (vec![0.0, 0.2, 0.25], vec![1.0, 0.0], vec![1.0, 1.0]),
            (vec![0.0, 0.5], vec![1.0], vec![1.0]),
            (vec![0.0, 0.2, 0.25, 0.4], vec![1.0, 0.0], vec![1.0, 1.0]),
            (vec![0.1, 0.2, 0.25, 0.5], vec![1.0, 0.0], vec![1.0, 1.0]),
            (vec![0.0, 0.3, 0.25, 0.5], vec![1.0, 0.0], vec![1.0, 1.0]),
            (vec![0.0, 0.2, 0.25, 0.6], vec![1.0, 0.0], vec![1.0, 1.0]),
            (vec![0.0, 0.2, 0.25, 0.5], vec![1.0], vec![1.0, 1.0]),
            (vec![0.0, 0.2, 0.25, 0.5], vec![1.0, 0.0], vec![1.0, 0.0]),
        ];
        for (edges, desired, weights) in cases {
            let label = format!("{edges:?} {desired:?} {weights:?}");
            assert!(
                matches!(
                    BandSpec::new(edges, desired, weights),
                    Err(FilterDesignError::InvalidBandSpec(_))
                ),
                "{label} should be rejected"
            );
        }
    }

    #[test]
    fn test_weights_from_db() {
        let compiler = BandSpecCompiler::new(1.0, 40.0);
        assert!((compiler.stopband_weight() - 100.0).abs() < 1e-9);
        assert!((compiler.passband_weight() - 1.0 / 0.057_501_127).abs() < 1e-4);
    }

    #[test]
    fn test_compile_lowpass_and_highpass() {
        let compiler = BandSpecCompiler::default();
        let lowpass = compiler
            .compile(&FrequencyBandSpec::LowPass { cutoff: 100.0 }, 1000.0)
            .unwrap();
        assert_eq!(lowpass.edges(), &[0.0, 0.1, 0.15000000000000002, 0.5]);
        assert_eq!(lowpass.weights()[1], compiler.stopband_weight());

        let highpass = compiler
            .compile(&FrequencyBandSpec::HighPass { cutoff: 200.0 }, 1000.0)
            .unwrap();
        assert_eq!(highpass.desired(), &[0.0, 1.0]);
        assert!((highpass.edges()[1] - 0.15).abs() < 1e-15);
    }

    #[test]
    fn test_compile_two_edge_responses() {
        let compiler = BandSpecCompiler::new(0.5, 60.0).with_transition_width(0.05);
        let bandpass = compiler
            .compile(
                &FrequencyBandSpec::BandPass {
                    low: 100.0,
                    high: 200.0,
                },
                1000.0,
            )
            .unwrap();
        assert_eq!(bandpass.num_bands(), 3);
        assert_eq!(bandpass.desired(), &[0.0, 1.0, 0.0]);
        assert!((bandpass.edges()[1] - 0.05).abs() < 1e-15);
        assert!((bandpass.edges()[4] - 0.25).abs() < 1e-15);

        let bandstop = compiler
            .compile(
                &FrequencyBandSpec::BandStop {
                    low: 100.0,
                    high: 200.0,
                },
                1000.0,
            )
            .unwrap();
        assert_eq!(bandstop.desired(), &[1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_guard_band_past_nyquist_is_rejected() {
        let result = BandSpecCompiler::default()
            .compile(&FrequencyBandSpec::LowPass { cutoff: 480.0 }, 1000.0);
        assert!(matches!(result, Err(FilterDesignError::InvalidBandSpec(_))));

        let result = BandSpecCompiler::default()
            .compile(&FrequencyBandSpec::HighPass { cutoff: 20.0 }, 1000.0);
        assert!(matches!(result, Err(FilterDesignError::InvalidBandSpec(_))));
    }

    #[test]
    fn test_invalid_db_figures_rejected() {
        let result = BandSpecCompiler::new(0.0, 60.0)
            .compile(&FrequencyBandSpec::LowPass { cutoff: 100.0 }, 1000.0);
        assert!(matches!(result, Err(FilterDesignError::InvalidParameter(_))));
    }
}
