// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms
// #![warn(clippy::unreachable)] // Detects unreachable code

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::box_collection)] // Warns on boxed `Vec`, `String`, etc.
#![warn(clippy::vec_box)] // Avoids using `Vec<Box<T>>` when unnecessary
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::let_unit_value)] // Avoids binding `()` to variables
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_safety_doc)] // Docs for `unsafe` functions
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![allow(clippy::too_many_arguments)]
// Allow functions with many parameters (very few and far between)
#![deny(missing_docs)] // Documentation is a must for release

//! # FilterSynthesis
//!
//! Digital filter coefficient synthesis for Rust: classic IIR designs via analog
//! prototypes and the bilinear transform, and linear-phase equiripple FIR designs
//! via the Parks-McClellan (Remez exchange) algorithm.
//!
//! ## Installation
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! filter_synthesis = "0.1.0"
//! ```
//!
//! Without the JSON configuration layer:
//!
//! ```toml
//! [dependencies]
//! filter_synthesis = { version = "*", default-features = false }
//! ```
//!
//! ## Features
//!
//! - `serialization` (default): `serde` derives on every design and result type,
//!   plus the [`config`] module for JSON specifications (using `serde_json`)
//!
//! ## Filter Families
//!
//! - Butterworth and Chebyshev Type I
//! - Chebyshev Type II, with the cutoff placed at the stopband edge
//! - Bessel, orders 2 through 10, phase- or delay-normalized
//! - Elliptic (Cauer), designed from the elliptic degree equation
//!
//! Every family supports low-pass, high-pass, band-pass and band-stop responses.
//!
//! ## Error Handling
//!
//! All design entry points return [`FilterDesignResult`]:
//!
//! ```rust
//! use filter_synthesis::{FilterDesignError, FilterDesignResult, IirFilterDesign, TransferFunction};
//!
//! let result: FilterDesignResult<TransferFunction> =
//!     IirFilterDesign::bessel_lowpass(12, 100.0, 1000.0).design();
//!
//! match result {
//!     Ok(tf) => println!("designed order {}", tf.order()),
//!     Err(FilterDesignError::UnsupportedOrder { family, min, max, .. }) => {
//!         eprintln!("{family} supports orders {min}..={max}")
//!     }
//!     Err(other_err) => eprintln!("Other error: {other_err}"),
//! }
//! ```
//!
//! ## Logging
//!
//! Design entry points emit `tracing` events (`debug!` per design, `trace!` per
//! Remez iteration, `warn!` when an iteration cap is hit). The library never
//! installs a subscriber.
//!
//! ## Quick Start
//!
//! ### IIR Design
//!
//! ```rust
//! use filter_synthesis::{FrequencyBandSpec, IirFilterDesign};
//!
//! let design = IirFilterDesign::elliptic(
//!     FrequencyBandSpec::BandPass { low: 100.0, high: 200.0 },
//!     4,
//!     1.0,  // passband ripple (dB)
//!     40.0, // stopband attenuation (dB)
//!     1000.0,
//! );
//! let tf = design.design().unwrap();
//! assert_eq!(tf.denominator.len(), 9);
//! assert_eq!(tf.denominator[0], 1.0);
//! ```
//!
//! ### Equiripple FIR Design
//!
//! ```rust
//! use filter_synthesis::{BandSpec, RemezConfig, remez};
//!
//! let spec = BandSpec::new(vec![0.0, 0.2, 0.25, 0.5], vec![1.0, 0.0], vec![1.0, 1.0]).unwrap();
//! let design = remez(31, &spec, &RemezConfig::default()).unwrap();
//! assert!(design.converged);
//! assert_eq!(design.taps.len(), 31);
//! ```
//!
//! ### From a Structural Request
//!
//! ```rust
//! use filter_synthesis::{FirFilterDesign, estimate_num_taps};
//!
//! let taps = estimate_num_taps(0.1, 0.15, 0.03, 0.001).unwrap();
//! let design = FirFilterDesign::lowpass(taps, 100.0, 1000.0).design().unwrap();
//! assert_eq!(design.taps.len(), taps);
//! ```

pub mod design;
pub mod error;
pub mod repr;
pub mod utils;

#[cfg(feature = "serialization")]
pub mod config;

pub use error::{FilterDesignError, FilterDesignResult};
pub use repr::{TransferFunction, Zpk};

pub use design::{
    BandSpec, BandSpecCompiler, BesselNormalization, FilterFamily, FirDesign, FirFilterDesign,
    FrequencyBandSpec, IirFilterDesign, RemezConfig, analog_prototype, bilinear_zpk,
    design_fir_filter, design_iir_filter, estimate_num_taps, estimate_num_taps_multiband, prewarp,
    remez, tf_to_zpk, zpk_to_tf,
};

#[cfg(feature = "serialization")]
pub use config::{DesignedFilter, FilterSpecification};
