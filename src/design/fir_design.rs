//! Equiripple FIR filter design from structural parameters, and tap-count estimation.

use crate::design::band_spec::{BandSpec, BandSpecCompiler};
use crate::design::remez::{FirDesign, remez};
use crate::design::types::FirFilterDesign;
use crate::utils::filter_math::{db_to_passband_deviation, db_to_stopband_deviation};
use crate::{FilterDesignError, FilterDesignResult};

use tracing::debug;

/// Design an equiripple FIR filter from structural parameters.
pub fn design_fir_filter(design: &FirFilterDesign) -> FilterDesignResult<FirDesign> {
    design.design()
}

impl FirFilterDesign {
    /// Compiler configured with this design's ripple, attenuation and guard band.
    pub const fn compiler(&self) -> BandSpecCompiler {
        BandSpecCompiler {
            passband_ripple_db: self.passband_ripple_db,
            stopband_attenuation_db: self.stopband_attenuation_db,
            transition_width: self.transition_width,
        }
    }

    /// Band edges, desired gains and weights for this design.
    pub fn band_spec(&self) -> FilterDesignResult<BandSpec> {
        self.compiler().compile(&self.band, self.sample_rate)
    }

    /// Run the Remez exchange for this design.
    ///
    /// # Errors
    /// See [`BandSpecCompiler::compile`] and [`remez`].
    pub fn design(&self) -> FilterDesignResult<FirDesign> {
        debug!(
            response = self.band.response_name(),
            num_taps = self.num_taps,
            sample_rate = self.sample_rate,
            "designing equiripple FIR filter"
        );
        if self.num_taps % 2 == 0 {
            return Err(FilterDesignError::EvenOrderRequested(self.num_taps));
        }
        let spec = self.band_spec()?;
        remez(self.num_taps, &spec, &self.remez)
    }

    /// Tap count the Herrmann estimate predicts for this design.
    pub fn estimated_num_taps(&self) -> FilterDesignResult<usize> {
        let spec = self.band_spec()?;
        let deviations: Vec<f64> = spec
            .desired()
            .iter()
            .map(|&gain| {
                if gain == 0.0 {
                    db_to_stopband_deviation(self.stopband_attenuation_db)
                } else {
                    db_to_passband_deviation(self.passband_ripple_db)
                }
            })
            .collect();
        estimate_num_taps_multiband(spec.edges(), &deviations)
    }
}

/// Herrmann's estimate of the tap count of an equiripple lowpass filter.
///
/// `passband_edge` and `stopband_edge` are normalized frequencies
/// (cycles/sample); the deviations are linear peak errors. The estimate is
/// symmetric in the two deviations and always odd.
///
/// # Errors
/// Returns [`FilterDesignError::InvalidParameter`] if the transition width is
/// not positive or a deviation is outside `(0, 1)`.
///
/// # Examples
///
/// ```rust
/// use filter_synthesis::design::fir_design::estimate_num_taps;
///
/// let taps = estimate_num_taps(0.2, 0.25, 0.01, 0.001).unwrap();
/// assert_eq!(taps, 51);
/// ```
pub fn estimate_num_taps(
    passband_edge: f64,
    stopband_edge: f64,
    passband_deviation: f64,
    stopband_deviation: f64,
) -> FilterDesignResult<usize> {
    let transition = (stopband_edge - passband_edge).abs();
    if !transition.is_finite() || transition == 0.0 {
        return Err(FilterDesignError::invalid_parameter(format!(
            "Transition band [{passband_edge}, {stopband_edge}] must have a positive width"
        )));
    }
    for deviation in [passband_deviation, stopband_deviation] {
        if !(deviation > 0.0 && deviation < 1.0) {
            return Err(FilterDesignError::invalid_parameter(format!(
                "Deviations must lie in (0, 1), got {deviation}"
            )));
        }
    }

    let (large, small) = if passband_deviation >= stopband_deviation {
        (passband_deviation, stopband_deviation)
    } else {
        (stopband_deviation, passband_deviation)
    };
    let lp = large.log10();
    let ls = small.log10();

    let d = (0.005309 * lp * lp + 0.07114 * lp - 0.4761) * ls
        - (0.00266 * lp * lp + 0.5941 * lp + 0.4278);
    let f = 0.51244 * (lp - ls) + 11.012;

    let estimate = ((d - f * transition * transition) / transition + 1.5).max(3.0) as usize;
    Ok(if estimate % 2 == 1 { estimate } else { estimate + 1 })
}

/// Largest [`estimate_num_taps`] over every transition band of a multi-band
/// specification.
///
/// `deviations` holds one linear deviation per band; each transition between
/// band `i` and band `i + 1` is estimated from those two deviations.
///
/// # Errors
/// Returns [`FilterDesignError::InvalidParameter`] if the edge and deviation
/// counts disagree or any single estimate fails.
pub fn estimate_num_taps_multiband(edges: &[f64], deviations: &[f64]) -> FilterDesignResult<usize> {
    if edges.len() != 2 * deviations.len() || deviations.len() < 2 {
        return Err(FilterDesignError::invalid_parameter(format!(
            "{} edges need {} deviations (at least 2 bands), got {}",
            edges.len(),
            edges.len() / 2,
            deviations.len()
        )));
    }

    let mut largest = 0;
    for (band, pair) in deviations.windows(2).enumerate() {
        let upper_edge = edges[2 * band + 1];
        let next_lower_edge = edges[2 * band + 2];
        let taps = estimate_num_taps(upper_edge, next_lower_edge, pair[0], pair[1])?;
        largest = largest.max(taps);
    }
    Ok(largest)
}
