mod algorithm;
mod cell;
mod error;
mod grid;
mod lattice;
pub mod neighborhood;
mod patterns;
mod rules;
pub mod seeding;

pub use algorithm::Algorithm;
pub use cell::{Cell, Neuron};
pub use error::{LatticeError, Result};
pub use grid::Grid;
pub use lattice::{LatticeConfig, Neighborhood, Stencil, Topology, Totalistic};
pub use neighborhood::{Resolver, neighbors};
pub use patterns::{Pattern, presets};
pub use rules::{BriansBrainRule, ConwayRule, FiringRule, LogisticRule, Rule};
