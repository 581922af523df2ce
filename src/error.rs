use crate::asa::AsaError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while turning a structure file into surface areas.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid input to the surface calculation
    #[error(transparent)]
    Asa(#[from] AsaError),

    /// The structure file could not be parsed
    #[error("Failed to read structure {path}: {message}")]
    Structure {
        /// Path that was read
        path: String,
        /// Parser errors, joined
        message: String,
    },

    /// The requested model is not in the structure
    #[error("Model {0} not found in structure")]
    ModelNotFound(usize),

    /// The selection left no atoms to measure
    #[error("No atoms with a known van der Waals radius in model {0}")]
    NoAtoms(usize),

    /// Building or writing a DataFrame failed
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),

    /// The rayon thread pool could not be created
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
