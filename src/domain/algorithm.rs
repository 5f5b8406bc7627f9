//! Algorithm enum for selecting how a step is evaluated.
//!
//! Both strategies read the same immutable previous snapshot and write
//! disjoint cells of a fresh buffer, so they produce identical results.

use std::fmt;
use std::str::FromStr;

use super::error::{LatticeError, Result};

/// Available step evaluation strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Cell-by-cell, row-major, on the calling thread
    Serial,
    /// Rows distributed over the rayon thread pool
    #[default]
    Parallel,
}

impl Algorithm {
    /// Get all available algorithms
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Serial, Algorithm::Parallel]
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "serial",
            Algorithm::Parallel => "parallel",
        }
    }

    /// Short description
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Serial => "One cell at a time on the calling thread",
            Algorithm::Parallel => "Rows evaluated in parallel with rayon",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::all()
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| {
                LatticeError::parameter(format!("unknown algorithm '{s}' (expected serial or parallel)"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_algorithms_returns_two() {
        assert_eq!(Algorithm::all().len(), 2);
    }

    #[test]
    fn test_default_is_parallel() {
        assert_eq!(Algorithm::default(), Algorithm::Parallel);
    }

    #[test]
    fn test_parse_by_name() {
        for algorithm in Algorithm::all() {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert!("simd".parse::<Algorithm>().is_err());
    }
}
