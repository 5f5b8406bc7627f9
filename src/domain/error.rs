//! Error types for lattice construction and simulation runs.
//!
//! Every failure is detected before the first step executes, so a run
//! either returns its full snapshot sequence or one of these errors.

use thiserror::Error;

/// Errors raised while validating a lattice, its seed grid, or a run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// Lattice side length is unusable (zero, mismatched, or not square)
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// Topology/neighborhood/totalistic tag outside the recognised set
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Initial state densities that do not form a distribution
    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),

    /// Run length the loop refuses to execute
    #[error("invalid duration: {0} (must be at least 1)")]
    InvalidDuration(u64),

    /// Rule or seeding parameter outside its domain
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Step or run requested after the simulation finished
    #[error("simulation already completed at generation {0}")]
    Completed(u64),

    /// Run description could not be read or parsed
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for lattice operations.
pub type Result<T> = std::result::Result<T, LatticeError>;

impl LatticeError {
    /// Creates a new dimension error.
    #[must_use]
    pub fn dimension<S: Into<String>>(msg: S) -> Self {
        Self::InvalidDimension(msg.into())
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Creates a new distribution error.
    #[must_use]
    pub fn distribution<S: Into<String>>(msg: S) -> Self {
        Self::InvalidDistribution(msg.into())
    }

    /// Creates a new parameter error.
    #[must_use]
    pub fn parameter<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

impl From<toml::de::Error> for LatticeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
