use filter_synthesis::utils::amplitude_to_db;
use filter_synthesis::{
    BesselNormalization, FilterDesignResult, FilterFamily, FirFilterDesign, FrequencyBandSpec,
    IirFilterDesign,
};

pub fn main() -> FilterDesignResult<()> {
    let fs = 8_000.0;
    let frequencies: Vec<f64> = (0..8).map(|i| i as f64 * 500.0).collect();

    // Bessel low-pass, both normalizations.
    for normalization in [BesselNormalization::Phase, BesselNormalization::Delay] {
        let design = IirFilterDesign::new(
            FilterFamily::Bessel { normalization },
            FrequencyBandSpec::LowPass { cutoff: 1_000.0 },
            4,
            fs,
        );
        let tf = design.design()?;
        let (mag, _phase) = tf.frequency_response(&frequencies, fs);
        println!("Bessel {normalization:?} LP b = {:?}", tf.numerator);
        println!("Bessel {normalization:?} LP a = {:?}", tf.denominator);
        println!("  |H| @ {frequencies:?} Hz => {mag:.4?}");
    }

    // Chebyshev II band-pass: stopband floor at 40 dB.
    let cheby = IirFilterDesign::chebyshev_ii(
        FrequencyBandSpec::BandPass {
            low: 1_000.0,
            high: 2_000.0,
        },
        4,
        40.0,
        fs,
    );
    let tf = cheby.design()?;
    println!(
        "Chebyshev II BP: {} dB @ 200 Hz, {:.2} dB @ 1414 Hz",
        amplitude_to_db(tf.magnitude_at(200.0, fs)).round(),
        amplitude_to_db(tf.magnitude_at(1_414.0, fs))
    );

    // Elliptic high-pass, as poles and zeros.
    let elliptic = IirFilterDesign::elliptic(FrequencyBandSpec::HighPass { cutoff: 500.0 }, 5, 0.5, 60.0, fs);
    let zpk = elliptic.design_zpk()?;
    println!("Elliptic HP poles: {:.4?}", zpk.poles);
    println!("Elliptic HP zeros: {:.4?}", zpk.zeros);

    // Equiripple band-stop sized from the tap estimate.
    let fir = FirFilterDesign::new(
        FrequencyBandSpec::BandStop {
            low: 1_500.0,
            high: 2_500.0,
        },
        0,
        fs,
    )
    .with_ripple(1.0, 40.0)
    .with_transition_width(0.04);
    let num_taps = fir.estimated_num_taps()?;
    println!("Estimated {num_taps} taps for {:?}", fir.band_spec()?.edges());

    let result = FirFilterDesign { num_taps, ..fir }.design()?;
    println!(
        "Equiripple BS: {} taps, {} iterations, converged={}, weighted ripple={:.4}",
        result.taps.len(),
        result.iterations,
        result.converged,
        result.ripple
    );

    Ok(())
}
