pub mod config;
mod runner;
mod simulation;

pub use config::{Automaton, RunConfig};
pub use runner::{Snapshots, execute};
pub use simulation::{Phase, Simulation, solve};
