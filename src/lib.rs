// Domain layer - Lattices, neighborhoods, rules
pub mod domain;

// Application layer - Simulation loop and run coordination
pub mod application;

// Infrastructure layer - Text output
pub mod rendering;

// Re-exports for convenience
pub use application::{RunConfig, Simulation, Snapshots, execute, solve};
pub use domain::{
    Algorithm, BriansBrainRule, Cell, ConwayRule, FiringRule, Grid, LatticeConfig, LatticeError,
    LogisticRule, Neighborhood, Neuron, Pattern, Rule, Stencil, Topology, Totalistic, neighbors,
    presets,
};
