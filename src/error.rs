//! Error types shared by the solver and the benchmark harness.

use thiserror::Error;

/// Errors raised while building or running a benchmark scenario.
///
/// None of these are recovered from: the driver aborts the run on the
/// first error and reports it.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid geometry, material or field configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The field update produced non-finite values.
    #[error("numerical error: {0}")]
    Numerical(String),

    /// Runtime lifecycle misuse (double initialization, reporting after finalize).
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Failure writing the report stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
