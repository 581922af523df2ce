//! Validation and cancellation errors of the ASA core.

use thiserror::Error;

/// Error type for ASA calculation operations.
///
/// All input validation happens before any work starts, so an error never
/// comes with partial results.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AsaError {
    /// The atom list is empty
    #[error("No atoms defined")]
    EmptyInput,

    /// An atom radius is negative or not finite
    #[error("Atom {index} has an invalid radius {radius} (must be finite and >= 0)")]
    InvalidRadius {
        /// Position of the atom in the input
        index: usize,
        /// The rejected radius
        radius: f64,
    },

    /// The probe radius is negative or not finite
    #[error("Invalid probe radius {0} (must be finite and >= 0)")]
    InvalidProbe(f64),

    /// An atom center has a NaN or infinite component
    #[error("Atom {index} has a non-finite coordinate")]
    InvalidCoordinate {
        /// Position of the atom in the input
        index: usize,
    },

    /// Zero sphere points were requested
    #[error("Invalid number of sphere points {0} (must be >= 1)")]
    InvalidSampleCount(usize),

    /// The cancellation flag was set during the run
    #[error("Calculation cancelled")]
    Cancelled,
}
