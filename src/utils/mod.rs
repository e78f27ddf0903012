//! Numeric utilities shared by the filter designers.
//!
//! # Modules
//!
//! - [`filter_math`] - dB, ripple factor and deviation conversions
//! - [`roots`] - Polynomial evaluation and root finding

pub mod filter_math;
pub mod roots;

// Re-export common utilities
pub use filter_math::*;
pub use roots::{pair_conjugates, polyval, polyval_real, roots};
