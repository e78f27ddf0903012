//! Parks-McClellan equiripple FIR design by Remez exchange.
//!
//! The designer produces odd-length, symmetric (type I linear-phase) filters.
//! The amplitude response of such a filter is a polynomial in `cos(2πf)`, so
//! the weighted Chebyshev approximation problem over the bands of a
//! [`BandSpec`] reduces to polynomial interpolation in cos-space:
//!
//! 1. lay a dense frequency grid over the bands
//! 2. guess `K = L/2 + 2` extremal frequencies
//! 3. solve for the interpolant that alternates ±δ/W at the extremals
//!    (barycentric Lagrange form)
//! 4. move the extremals to the peaks of the weighted error
//! 5. repeat until the peak errors are equal, then sample the interpolant
//!    and recover the impulse response by an inverse cosine transform
//!
//! ```rust
//! use filter_synthesis::design::band_spec::BandSpec;
//! use filter_synthesis::design::remez::remez;
//! use filter_synthesis::RemezConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = BandSpec::new(vec![0.0, 0.2, 0.25, 0.5], vec![1.0, 0.0], vec![1.0, 1.0])?;
//! let design = remez(31, &spec, &RemezConfig::default())?;
//! assert!(design.converged);
//! assert_eq!(design.taps.len(), 31);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::design::band_spec::{BandSpec, NYQUIST};
use crate::design::types::RemezConfig;
use crate::{FilterDesignError, FilterDesignResult};

use ndarray::Array1;
use std::f64::consts::PI;
use tracing::{debug, trace, warn};

/// Threshold below which cos-space differences and Lagrange products are
/// treated as zero.
const NUMERIC_TOLERANCE: f64 = 1e-7;

/// Largest accepted [`RemezConfig::grid_density`].
pub const MAX_GRID_DENSITY: usize = 1024;

/// Result of an equiripple design.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct FirDesign {
    /// Impulse response, symmetric about the centre tap
    pub taps: Vec<f64>,
    /// Number of completed exchange iterations
    pub iterations: usize,
    /// Whether the extremal errors equalized within the configured threshold
    pub converged: bool,
    /// Magnitude of the weighted ripple δ of the final interpolant
    pub ripple: f64,
    /// Frequencies (cycles/sample) of the final extremal set
    pub extremal_frequencies: Vec<f64>,
    /// Weighted error at each final extremal frequency
    pub extremal_errors: Vec<f64>,
}

/// Extremal set and the barycentric interpolant built on it.
#[derive(Debug, Clone)]
struct Interpolant {
    extremals: Vec<usize>,
    cos_extremals: Vec<f64>,
    gammas: Vec<f64>,
    targets: Vec<f64>,
    delta: f64,
}

/// Working state of one Remez exchange run.
///
/// Created per design, mutated by every iteration and discarded once the
/// impulse response has been extracted. The interpolant always matches the
/// current extremal set, so [`RemezState::interpolate`] is usable straight
/// after [`RemezState::new`].
#[derive(Debug, Clone)]
pub struct RemezState {
    grid: Array1<f64>,
    desired: Array1<f64>,
    weight: Array1<f64>,
    error: Array1<f64>,
    interpolant: Interpolant,
}

impl RemezState {
    /// Lay out the dense grid for a `num_taps` filter, place the initial
    /// extremals uniformly over it and build their interpolant.
    ///
    /// # Errors
    /// - [`FilterDesignError::InvalidParameter`] when fewer than 3 taps are
    ///   requested or the grid size overflows.
    /// - [`FilterDesignError::InvalidBandSpec`] when the bands are too
    ///   narrow to hold `num_taps / 2 + 3` grid points, or the initial
    ///   extremals give a degenerate interpolant.
    pub fn new(num_taps: usize, spec: &BandSpec, grid_density: usize) -> FilterDesignResult<Self> {
        if num_taps < 3 || grid_density == 0 {
            return Err(FilterDesignError::invalid_parameter(format!(
                "Remez grid needs at least 3 taps and a positive density, got {num_taps} taps at density {grid_density}"
            )));
        }
        let num_extremals = num_taps / 2 + 2;
        let intervals = grid_density.checked_mul(num_extremals - 1).ok_or_else(|| {
            FilterDesignError::invalid_parameter(format!(
                "Grid density {grid_density} overflows the grid for {num_taps} taps"
            ))
        })?;
        let step = NYQUIST / intervals as f64;

        let mut grid = Vec::new();
        let mut desired = Vec::new();
        let mut weight = Vec::new();
        for (low, high, gain, band_weight) in spec.bands() {
            let points = (((high - low) / step + 0.5) as usize).max(1);
            for k in 0..points {
                grid.push(low + k as f64 * step);
                desired.push(gain);
                weight.push(band_weight);
            }
            if let Some(last) = grid.last_mut() {
                *last = high;
            }
        }

        let n = grid.len();
        if n < num_extremals + 1 {
            return Err(FilterDesignError::invalid_band_spec(format!(
                "bands hold {n} grid points, {num_taps} taps need at least {}",
                num_extremals + 1
            )));
        }

        let extremals = (0..num_extremals)
            .map(|k| (k as f64 * (n - 1) as f64 / (num_extremals - 1) as f64) as usize)
            .collect();

        let mut state = Self {
            grid: Array1::from(grid),
            desired: Array1::from(desired),
            weight: Array1::from(weight),
            error: Array1::zeros(n),
            interpolant: Interpolant {
                extremals,
                cos_extremals: vec![0.0; num_extremals],
                gammas: vec![0.0; num_extremals],
                targets: vec![0.0; num_extremals],
                delta: 0.0,
            },
        };
        if !state.update_interpolation() {
            return Err(FilterDesignError::invalid_band_spec(
                "initial extremal set gives a degenerate interpolant",
            ));
        }
        Ok(state)
    }

    /// Number of dense grid points.
    pub fn grid_len(&self) -> usize {
        self.grid.len()
    }

    /// Number of extremal frequencies, `K = num_taps / 2 + 2`.
    pub fn num_extremals(&self) -> usize {
        self.interpolant.extremals.len()
    }

    /// Current weighted ripple δ.
    pub const fn delta(&self) -> f64 {
        self.interpolant.delta
    }

    /// Recompute barycentric weights, δ and interpolation targets for the
    /// current extremal set. Returns `false` when δ is not finite.
    fn update_interpolation(&mut self) -> bool {
        let interp = &mut self.interpolant;
        let k = interp.extremals.len();

        for (cos, &index) in interp.cos_extremals.iter_mut().zip(&interp.extremals) {
            *cos = (2.0 * PI * self.grid[index]).cos();
        }

        // Interleaved product order keeps intermediate values in range for long filters.
        let stride = (k - 1) / 15 + 1;
        for i in 0..k {
            let mut product = 1.0;
            for offset in 0..stride {
                for j in (offset..k).step_by(stride) {
                    if j != i {
                        product *= 2.0 * (interp.cos_extremals[i] - interp.cos_extremals[j]);
                    }
                }
            }
            interp.gammas[i] = if product.abs() < NUMERIC_TOLERANCE {
                1.0 / NUMERIC_TOLERANCE
            } else {
                1.0 / product
            };
        }

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        let mut sign = 1.0;
        for (gamma, &index) in interp.gammas.iter().zip(&interp.extremals) {
            numerator += gamma * self.desired[index];
            denominator += sign * gamma / self.weight[index];
            sign = -sign;
        }
        interp.delta = numerator / denominator;

        let mut sign = 1.0;
        for (target, &index) in interp.targets.iter_mut().zip(&interp.extremals) {
            *target = self.desired[index] - sign * interp.delta / self.weight[index];
            sign = -sign;
        }

        interp.delta.is_finite()
    }

    /// Amplitude of the current interpolant at `frequency` (cycles/sample).
    pub fn interpolate(&self, frequency: f64) -> f64 {
        let interp = &self.interpolant;
        let x = (2.0 * PI * frequency).cos();
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for ((&cos, &gamma), &target) in interp
            .cos_extremals
            .iter()
            .zip(&interp.gammas)
            .zip(&interp.targets)
        {
            let diff = x - cos;
            if diff.abs() < NUMERIC_TOLERANCE {
                return target;
            }
            let term = gamma / diff;
            denominator += term;
            numerator += term * target;
        }
        numerator / denominator
    }

    /// Weighted error `W·(D − A)` over the whole grid.
    fn compute_error(&mut self) {
        let amplitude = self.grid.mapv(|f| self.interpolate(f));
        self.error = &self.weight * &(&self.desired - &amplitude);
    }

    /// Grid indices of local extrema of the weighted error.
    fn extremal_candidates(&self) -> Vec<usize> {
        let e = &self.error;
        let n = e.len();
        let mut candidates = Vec::new();

        if e[0].abs() > e[1].abs() {
            candidates.push(0);
        }
        for i in 1..n - 1 {
            let peak = e[i] > 0.0 && e[i] >= e[i - 1] && e[i] > e[i + 1];
            let trough = e[i] < 0.0 && e[i] <= e[i - 1] && e[i] < e[i + 1];
            if peak || trough {
                candidates.push(i);
            }
        }
        if e[n - 1].abs() > e[n - 2].abs() {
            candidates.push(n - 1);
        }
        candidates
    }

    /// Replace the extremal set with `candidates`, dropping the smallest
    /// errors until exactly K remain. Returns the relative spread of the
    /// error magnitudes at the new extremals.
    fn exchange(&mut self, mut candidates: Vec<usize>) -> f64 {
        let k = self.num_extremals();
        while candidates.len() > k {
            let mut smallest = 0;
            for idx in 1..candidates.len() {
                if self.error[candidates[idx]].abs() < self.error[candidates[smallest]].abs() {
                    smallest = idx;
                }
            }
            candidates.remove(smallest);
        }
        self.interpolant.extremals = candidates;

        let magnitudes = self.interpolant.extremals.iter().map(|&i| self.error[i].abs());
        let (min, max) = magnitudes.fold((f64::INFINITY, 0.0_f64), |(lo, hi), m| {
            (lo.min(m), hi.max(m))
        });
        if min > 0.0 {
            (max - min) / min
        } else {
            f64::INFINITY
        }
    }

    /// Impulse response of the current interpolant via the inverse cosine transform.
    pub fn impulse_response(&self, num_taps: usize) -> Vec<f64> {
        let half = num_taps / 2;
        let length = num_taps as f64;
        let amplitudes: Vec<f64> = (0..=half)
            .map(|i| self.interpolate(i as f64 / length))
            .collect();

        (0..num_taps)
            .map(|n| {
                let offset = n as f64 - half as f64;
                let sum: f64 = amplitudes
                    .iter()
                    .enumerate()
                    .skip(1)
                    .map(|(i, a)| a * (2.0 * PI * i as f64 * offset / length).cos())
                    .sum();
                (amplitudes[0] + 2.0 * sum) / length
            })
            .collect()
    }
}

fn validate(num_taps: usize, config: &RemezConfig) -> FilterDesignResult<()> {
    if num_taps % 2 == 0 {
        return Err(FilterDesignError::EvenOrderRequested(num_taps));
    }
    if num_taps < 3 {
        return Err(FilterDesignError::invalid_parameter(format!(
            "Equiripple designs need at least 3 taps, got {num_taps}"
        )));
    }
    if config.grid_density == 0 || config.max_iterations == 0 {
        return Err(FilterDesignError::invalid_parameter(
            "Grid density and iteration cap must be positive",
        ));
    }
    if config.grid_density > MAX_GRID_DENSITY {
        return Err(FilterDesignError::invalid_parameter(format!(
            "Grid density {} exceeds the maximum of {MAX_GRID_DENSITY}",
            config.grid_density
        )));
    }
    if !config.convergence_threshold.is_finite() || config.convergence_threshold <= 0.0 {
        return Err(FilterDesignError::invalid_parameter(format!(
            "Convergence threshold must be positive, got {}",
            config.convergence_threshold
        )));
    }
    Ok(())
}

/// Design an odd-length equiripple FIR filter.
///
/// A run that stalls (fewer error extrema than extremals), reaches
/// `max_iterations` or meets an exchange whose interpolant is degenerate
/// still returns the best taps found, with [`FirDesign::converged`] set to
/// `false`.
///
/// # Errors
/// - [`FilterDesignError::EvenOrderRequested`] for an even tap count.
/// - [`FilterDesignError::InvalidParameter`] for fewer than 3 taps or a
///   degenerate [`RemezConfig`] (including a grid density above
///   [`MAX_GRID_DENSITY`]).
/// - [`FilterDesignError::InvalidBandSpec`] when the grid is too coarse.
pub fn remez(num_taps: usize, spec: &BandSpec, config: &RemezConfig) -> FilterDesignResult<FirDesign> {
    validate(num_taps, config)?;

    let mut state = RemezState::new(num_taps, spec, config.grid_density)?;
    debug!(
        num_taps,
        bands = spec.num_bands(),
        grid_points = state.grid_len(),
        "starting Remez exchange"
    );

    let mut iterations = 0;
    let mut converged = false;
    while iterations < config.max_iterations {
        state.compute_error();

        let candidates = state.extremal_candidates();
        if candidates.len() < state.num_extremals() {
            warn!(
                iterations,
                found = candidates.len(),
                needed = state.num_extremals(),
                "Remez exchange stalled: too few error extrema"
            );
            break;
        }

        let previous = state.interpolant.clone();
        let spread = state.exchange(candidates);
        iterations += 1;
        if !state.update_interpolation() {
            warn!(iterations, "Remez exchange degenerate: keeping the previous extremal set");
            state.interpolant = previous;
            break;
        }
        trace!(iterations, delta = state.delta(), spread, "Remez iteration");

        if spread < config.convergence_threshold {
            converged = true;
            break;
        }
    }

    if !converged && iterations == config.max_iterations {
        warn!(
            max_iterations = config.max_iterations,
            "Remez exchange hit the iteration cap without converging"
        );
    }

    let extremals = &state.interpolant.extremals;
    let extremal_frequencies = extremals.iter().map(|&i| state.grid[i]).collect();
    let extremal_errors = extremals.iter().map(|&i| state.error[i]).collect();
    let taps = state.impulse_response(num_taps);

    debug!(iterations, converged, ripple = state.delta().abs(), "Remez exchange finished");

    Ok(FirDesign {
        taps,
        iterations,
        converged,
        ripple: state.delta().abs(),
        extremal_frequencies,
        extremal_errors,
    })
}
