//! Benchmark for filter coefficient synthesis
//!
//! Times the full IIR pipeline per family and band shape, and the Remez
//! exchange across tap counts.

use filter_synthesis::{
    BandSpec, FilterFamily, FrequencyBandSpec, IirFilterDesign, RemezConfig, remez,
};
use std::time::Instant;

const SAMPLE_RATE: f64 = 48_000.0;

/// Run `f` repeatedly and print timing statistics in microseconds.
fn time_it<F: FnMut() -> bool>(label: &str, num_runs: usize, mut f: F) {
    // Warm up
    for _ in 0..3 {
        let _ = f();
    }

    let mut times = Vec::with_capacity(num_runs);
    for _ in 0..num_runs {
        let start = Instant::now();
        let ok = f();
        let elapsed = start.elapsed();

        assert!(ok, "{label}: design failed");
        times.push(elapsed.as_secs_f64() * 1e6);
    }

    times.sort_by(f64::total_cmp);
    let mean = times.iter().sum::<f64>() / times.len() as f64;
    let std_dev = (times.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / times.len() as f64).sqrt();
    let median = times[times.len() / 2];

    println!(
        "{label:<40} {mean:>10.1}us ± {std_dev:>8.1}us (median: {median:.1}us, range: {:.1}-{:.1}us)",
        times[0],
        times[times.len() - 1]
    );
}

fn benchmark_iir() {
    println!("IIR designs at {SAMPLE_RATE} Hz");
    println!("------------------------------");

    let families = [
        FilterFamily::Butterworth,
        FilterFamily::ChebyshevI {
            passband_ripple_db: 0.5,
        },
        FilterFamily::chebyshev_ii(),
        FilterFamily::bessel(),
        FilterFamily::elliptic(),
    ];
    let bands = [
        FrequencyBandSpec::LowPass { cutoff: 1_000.0 },
        FrequencyBandSpec::BandPass {
            low: 1_000.0,
            high: 4_000.0,
        },
    ];

    for family in families {
        for band in bands {
            for order in [4, 8] {
                let design = IirFilterDesign::new(family, band, order, SAMPLE_RATE);
                let label = format!("{} {} order {order}", family.name(), band.response_name());
                time_it(&label, 200, || design.design().is_ok());
            }
        }
    }
    println!();
}

fn benchmark_remez() {
    println!("Remez exchange");
    println!("--------------");

    let spec = match BandSpec::new(vec![0.0, 0.2, 0.25, 0.5], vec![1.0, 0.0], vec![1.0, 1.0]) {
        Ok(spec) => spec,
        Err(e) => panic!("benchmark band specification rejected: {e}"),
    };
    let config = RemezConfig::default();

    for num_taps in [31, 63, 127, 255] {
        let label = format!("lowpass {num_taps} taps");
        time_it(&label, 20, || remez(num_taps, &spec, &config).is_ok());
    }
    println!();
}

fn main() {
    println!("Filter Synthesis Benchmark");
    println!("==========================");
    println!();

    benchmark_iir();
    benchmark_remez();

    println!("Benchmark Complete!");
}
