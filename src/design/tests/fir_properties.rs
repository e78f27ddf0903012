use crate::design::types::{FirFilterDesign, FrequencyBandSpec};

use std::f64::consts::PI;

fn amplitude(taps: &[f64], frequency: f64) -> f64 {
    let center = (taps.len() / 2) as f64;
    taps.iter()
        .enumerate()
        .map(|(n, &h)| h * (2.0 * PI * frequency * (n as f64 - center)).cos())
        .sum()
}

fn shapes() -> [(FrequencyBandSpec, f64, f64); 4] {
    [
        (FrequencyBandSpec::LowPass { cutoff: 150.0 }, 50.0, 350.0),
        (FrequencyBandSpec::HighPass { cutoff: 300.0 }, 450.0, 100.0),
        (
            FrequencyBandSpec::BandPass {
                low: 150.0,
                high: 300.0,
            },
            225.0,
            25.0,
        ),
        (
            FrequencyBandSpec::BandStop {
                low: 150.0,
                high: 300.0,
            },
            25.0,
            225.0,
        ),
    ]
}

#[test]
fn test_structural_designs_track_their_shapes() {
    let fs = 1000.0;
    for (band, pass_hz, stop_hz) in shapes() {
        let design = FirFilterDesign::new(band, 61, fs)
            .with_ripple(1.0, 30.0)
            .with_transition_width(0.05);
        let result = design.design().unwrap();
        let pass = amplitude(&result.taps, pass_hz / fs);
        let stop = amplitude(&result.taps, stop_hz / fs);
        assert!((pass - 1.0).abs() < 0.2, "{} passband {pass}", band.response_name());
        assert!(stop.abs() < 0.1, "{} stopband {stop}", band.response_name());
    }
}

#[test]
fn test_structural_designs_are_linear_phase_and_repeatable() {
    for (band, _, _) in shapes() {
        let design = FirFilterDesign::new(band, 61, 1000.0)
            .with_ripple(1.0, 30.0)
            .with_transition_width(0.05);
        let first = design.design().unwrap();
        let second = design.design().unwrap();

        let first_bits: Vec<u64> = first.taps.iter().map(|t| t.to_bits()).collect();
        let second_bits: Vec<u64> = second.taps.iter().map(|t| t.to_bits()).collect();
        assert_eq!(first_bits, second_bits, "{}", band.response_name());

        for n in 0..61 {
            assert!((first.taps[n] - first.taps[60 - n]).abs() < 1e-12);
        }
    }
}

#[test]
fn test_estimated_taps_land_near_tolerance() {
    let fs = 1000.0;
    let bands = [
        FrequencyBandSpec::LowPass { cutoff: 150.0 },
        FrequencyBandSpec::HighPass { cutoff: 300.0 },
        FrequencyBandSpec::BandStop {
            low: 150.0,
            high: 300.0,
        },
    ];
    for band in bands {
        let sized = FirFilterDesign::new(band, 0, fs).with_ripple(1.0, 40.0);
        let num_taps = sized.estimated_num_taps().unwrap();
        assert_eq!(num_taps % 2, 1);

        let result = FirFilterDesign { num_taps, ..sized }.design().unwrap();
        assert!(result.converged, "{}", band.response_name());
        assert_eq!(result.taps.len(), num_taps);
        // Weighted ripple of 1 meets both dB targets exactly
        assert!(result.ripple < 1.25, "{} ripple {}", band.response_name(), result.ripple);
    }
}
