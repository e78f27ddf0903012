//! Error types and result utilities for filter design operations.

use thiserror::Error;

/// Convenience type alias for results that may contain a FilterDesignError
pub type FilterDesignResult<T> = Result<T, FilterDesignError>;

/// Error types that can occur while synthesizing filter coefficients.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterDesignError {
    /// The requested order is outside the range a filter family supports.
    ///
    /// Bessel prototypes are tabulated for orders 2 through 10 only; every
    /// other family rejects an order of zero.
    #[error("Unsupported order error: {family} filters support orders {min}..={max}, got {order}")]
    UnsupportedOrder {
        /// Name of the filter family that rejected the order.
        family: &'static str,
        /// The order that was requested.
        order: usize,
        /// Smallest supported order.
        min: usize,
        /// Largest supported order.
        max: usize,
    },

    /// The band-edge description handed to the equiripple designer is malformed.
    ///
    /// This covers odd edge counts, edges outside `[0, 0.5]`, edges that do not
    /// start at 0 or end at 0.5, and mismatched desired/weight counts.
    #[error("Invalid band specification: {0}")]
    InvalidBandSpec(String),

    /// An even FIR tap count was requested.
    ///
    /// The equiripple designer only produces odd-length (type I) linear-phase filters.
    #[error("Even filter length requested: {0} taps (equiripple designs require an odd tap count)")]
    EvenOrderRequested(usize),

    /// Error that occurs when invalid parameters are provided to a design.
    ///
    /// This includes cutoffs outside `(0, Nyquist)`, inverted band edges,
    /// non-positive sample rates and non-finite ripple or attenuation values.
    #[error("Invalid parameter error: {0}")]
    InvalidParameter(String),

    /// A design specification could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FilterDesignError {
    /// Shorthand for an [`FilterDesignError::InvalidParameter`] error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Shorthand for an [`FilterDesignError::InvalidBandSpec`] error.
    pub fn invalid_band_spec(message: impl Into<String>) -> Self {
        Self::InvalidBandSpec(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_order_message() {
        let err = FilterDesignError::UnsupportedOrder {
            family: "Bessel",
            order: 11,
            min: 2,
            max: 10,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported order error: Bessel filters support orders 2..=10, got 11"
        );
    }

    #[test]
    fn test_shorthand_constructors() {
        assert_eq!(
            FilterDesignError::invalid_parameter("cutoff"),
            FilterDesignError::InvalidParameter("cutoff".to_string())
        );
        assert_eq!(
            FilterDesignError::invalid_band_spec("edges"),
            FilterDesignError::InvalidBandSpec("edges".to_string())
        );
    }
}
