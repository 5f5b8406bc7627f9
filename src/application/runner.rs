use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::config::{Automaton, LogisticInit, RunConfig};
use super::simulation::solve;
use crate::domain::{Cell, ConwayRule, Grid, Neuron, Result, seeding};

/// Snapshot sequence of a finished run, tagged by automaton.
#[derive(Clone, Debug, PartialEq)]
pub enum Snapshots {
    Life(Vec<Grid<Cell>>),
    Brain(Vec<Grid<Neuron>>),
    Logistic(Vec<Grid<f64>>),
}

impl Snapshots {
    /// Number of snapshots, including the initial grid
    pub fn len(&self) -> usize {
        match self {
            Snapshots::Life(s) => s.len(),
            Snapshots::Brain(s) => s.len(),
            Snapshots::Logistic(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lattice side length of the run
    pub fn size(&self) -> usize {
        match self {
            Snapshots::Life(s) => s.first().map_or(0, Grid::size),
            Snapshots::Brain(s) => s.first().map_or(0, Grid::size),
            Snapshots::Logistic(s) => s.first().map_or(0, Grid::size),
        }
    }
}

/// Seed, validate and run the automaton a run file describes.
///
/// The random source is built from `config.seed` here and only used to
/// build the initial grid.
pub fn execute(config: &RunConfig) -> Result<Snapshots> {
    config.validate()?;
    let duration = config.duration()?;
    let algorithm = config.algorithm()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    match config.automaton {
        Automaton::GameOfLife => {
            let initial = match config.life.seed_grid()? {
                Some(grid) => grid,
                None => {
                    let size = config.lattice.validate()?.size();
                    seeding::random_life(size, config.life.p, &mut rng)?
                }
            };
            let lattice = config.lattice.with_size(initial.size())?;
            solve(lattice, ConwayRule, initial, duration, algorithm).map(Snapshots::Life)
        }
        Automaton::BriansBrain => {
            let lattice = config.lattice.validate()?;
            let initial = seeding::random_brain(lattice.size(), config.brain.densities()?, &mut rng)?;
            solve(lattice, config.brain.rule()?, initial, duration, algorithm).map(Snapshots::Brain)
        }
        Automaton::Logistic => {
            let lattice = config.lattice.validate()?;
            let initial = match config.logistic.init {
                LogisticInit::Uniform => seeding::uniform(lattice.size(), &mut rng)?,
                LogisticInit::Beta => {
                    seeding::beta(lattice.size(), config.logistic.beta_shape()?, &mut rng)?
                }
            };
            solve(lattice, config.logistic.rule()?, initial, duration, algorithm)
                .map(Snapshots::Logistic)
        }
    }
}
