//! # Error Hierarchy
//!
//! Structured error types for the well statistics engine, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! The engine is pure computation: every error here is deterministic given
//! its input, so none of them are retryable.

use thiserror::Error;

/// Top-level error type for the workspace.
#[derive(Error, Debug)]
pub enum WellstatError {
    /// Input failed validation before any computation started.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Validation errors for caller-supplied input.
///
/// Out-of-range coordinates are not an error (they are clamped); these
/// variants cover input that cannot be repaired.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Polygon ring has fewer than three positions before closing.
    #[error("ring too small: {points} position(s), need at least 3")]
    RingTooSmall {
        /// Number of positions supplied.
        points: usize,
    },

    /// A ring position carries fewer than two numbers.
    #[error("malformed ring position at index {index}: expected [longitude, latitude]")]
    MalformedPosition {
        /// Zero-based index of the offending position.
        index: usize,
    },

    /// A ring position contains NaN or an infinity.
    #[error("non-finite coordinate at ring index {index}")]
    NonFiniteCoordinate {
        /// Zero-based index of the offending position.
        index: usize,
    },

    /// Ring collapses to fewer than three distinct vertices after clamping.
    #[error("degenerate ring: {distinct} distinct vertex(es), need at least 3")]
    DegenerateRing {
        /// Number of distinct vertices found.
        distinct: usize,
    },

    /// Month/day pair does not name a calendar day.
    #[error("invalid month/day: {month}/{day}")]
    InvalidMonthDay {
        /// Month as supplied (1-12 expected).
        month: u32,
        /// Day as supplied.
        day: u32,
    },

    /// Engine configuration is internally inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_too_small_display() {
        let err = ValidationError::RingTooSmall { points: 2 };
        let msg = format!("{err}");
        assert!(msg.contains("ring too small"));
        assert!(msg.contains('2'));
    }

    #[test]
    fn wellstat_error_wraps_validation() {
        let err = WellstatError::from(ValidationError::DegenerateRing { distinct: 1 });
        let msg = format!("{err}");
        assert!(msg.starts_with("validation error"));
        assert!(msg.contains("degenerate ring"));
    }

    #[test]
    fn invalid_month_day_display() {
        let err = ValidationError::InvalidMonthDay { month: 13, day: 1 };
        assert!(format!("{err}").contains("13/1"));
    }

    #[test]
    fn config_error_display() {
        let err = WellstatError::Config("bad cap".to_string());
        assert!(format!("{err}").contains("bad cap"));
    }

}
