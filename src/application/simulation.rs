use rayon::prelude::*;

use crate::domain::{Algorithm, Grid, LatticeConfig, LatticeError, Resolver, Result, Rule};

/// Lifecycle of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Validated, seed grid stored, no step taken yet
    Initializing,
    /// At least one step taken
    Running,
    /// Run finished; no further steps
    Completed,
}

/// Simulation orchestrates synchronous whole-grid updates.
///
/// Each step reads only the previous grid and writes a fresh one, then
/// updates the per-cell memory from the newly computed states.
pub struct Simulation<R: Rule> {
    config: LatticeConfig,
    resolver: Resolver,
    rule: R,
    algorithm: Algorithm,
    grid: Grid<R::State>,
    memory: Grid<R::Memory>,
    generation: u64,
    phase: Phase,
}

impl<R: Rule> Simulation<R> {
    /// Validate the seed grid against the lattice and rule, and store it as
    /// generation 0
    pub fn new(config: LatticeConfig, rule: R, initial: Grid<R::State>) -> Result<Self> {
        if initial.size() != config.size() {
            return Err(LatticeError::dimension(format!(
                "initial grid is {0}x{0} but the lattice is configured for L={1}",
                initial.size(),
                config.size()
            )));
        }
        if let Some(required) = rule.required_stencil() {
            if required != config.stencil() {
                return Err(LatticeError::configuration(format!(
                    "{} is only defined on a {required} lattice, got {}",
                    rule.name(),
                    config.stencil()
                )));
            }
        }

        let memory = initial.map(|state| rule.initial_memory(state));
        Ok(Self {
            resolver: Resolver::new(&config),
            config,
            rule,
            algorithm: Algorithm::default(),
            grid: initial,
            memory,
            generation: 0,
            phase: Phase::Initializing,
        })
    }

    /// Set the evolution algorithm (builder pattern)
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Current grid
    pub fn grid(&self) -> &Grid<R::State> {
        &self.grid
    }

    /// Current per-cell memory
    pub fn memory(&self) -> &Grid<R::Memory> {
        &self.memory
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Next state of one cell, read from the current (previous) grid
    #[inline]
    fn evolve_cell(&self, row: usize, col: usize, scratch: &mut Vec<R::State>) -> R::State {
        self.resolver.collect_into(&self.grid, row, col, scratch);
        let aggregate = self.rule.aggregate(scratch);
        self.rule
            .evolve(self.grid.at(row, col), aggregate, &self.memory.at(row, col))
    }

    /// Serial evolution - one cell at a time, row-major
    fn evolve_serial(&self) -> Vec<R::State> {
        let size = self.config.size();
        let mut scratch = Vec::with_capacity(self.resolver.neighbor_count(0));
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(self.evolve_cell(row, col, &mut scratch));
            }
        }
        cells
    }

    /// Parallel evolution using rayon, one scratch buffer per row
    fn evolve_parallel(&self) -> Vec<R::State> {
        let size = self.config.size();
        (0..size)
            .into_par_iter()
            .flat_map_iter(|row| {
                let mut scratch = Vec::with_capacity(self.resolver.neighbor_count(row));
                (0..size).map(move |col| self.evolve_cell(row, col, &mut scratch))
            })
            .collect()
    }

    /// Advance one synchronous step
    pub fn step(&mut self) -> Result<()> {
        if self.phase == Phase::Completed {
            return Err(LatticeError::Completed(self.generation));
        }

        let size = self.config.size();
        let cells = match self.algorithm {
            Algorithm::Serial => self.evolve_serial(),
            Algorithm::Parallel => self.evolve_parallel(),
        };
        let next = Grid::from_cells(size, cells)?;

        // memory follows the newly computed states
        let memory = Grid::from_fn(size, |row, col| {
            self.rule.remember(next.at(row, col), self.memory.at(row, col))
        });

        self.grid = next;
        self.memory = memory;
        self.generation += 1;
        self.phase = Phase::Running;
        tracing::debug!(generation = self.generation, "step complete");
        Ok(())
    }

    /// Advance `duration` steps, returning the current grid followed by one
    /// snapshot per step (duration + 1 grids). Completes the simulation.
    pub fn run(&mut self, duration: u64) -> Result<Vec<Grid<R::State>>> {
        if duration == 0 {
            return Err(LatticeError::InvalidDuration(duration));
        }
        if self.phase == Phase::Completed {
            return Err(LatticeError::Completed(self.generation));
        }

        tracing::info!(
            rule = self.rule.name(),
            description = self.rule.description(),
            size = self.config.size(),
            stencil = %self.config.stencil(),
            algorithm = %self.algorithm,
            duration,
            "starting run"
        );

        let mut snapshots = Vec::with_capacity(snapshot_capacity(duration));
        snapshots.push(self.grid.clone());
        for _ in 0..duration {
            self.step()?;
            snapshots.push(self.grid.clone());
        }
        self.phase = Phase::Completed;

        tracing::info!(generation = self.generation, snapshots = snapshots.len(), "run completed");
        Ok(snapshots)
    }
}

/// Snapshots reserved up front; long runs grow the buffer as they go
const MAX_PREALLOCATED_SNAPSHOTS: usize = 1024;

fn snapshot_capacity(duration: u64) -> usize {
    usize::try_from(duration)
        .ok()
        .and_then(|steps| steps.checked_add(1))
        .map_or(MAX_PREALLOCATED_SNAPSHOTS, |n| n.min(MAX_PREALLOCATED_SNAPSHOTS))
}

/// Validate, run for `duration` steps, and hand back all snapshots
pub fn solve<R: Rule>(
    config: LatticeConfig,
    rule: R,
    initial: Grid<R::State>,
    duration: u64,
    algorithm: Algorithm,
) -> Result<Vec<Grid<R::State>>> {
    if duration == 0 {
        return Err(LatticeError::InvalidDuration(duration));
    }
    Simulation::new(config, rule, initial)?
        .with_algorithm(algorithm)
        .run(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BriansBrainRule, Cell, ConwayRule, LogisticRule, Neuron, presets};

    fn blinker() -> (LatticeConfig, Grid<Cell>) {
        let grid = presets::blinker().to_grid();
        (LatticeConfig::game_of_life(grid.size()).unwrap(), grid)
    }

    #[test]
    fn test_snapshot_count_and_order() {
        let (config, grid) = blinker();
        let snapshots = solve(config, ConwayRule, grid.clone(), 4, Algorithm::Serial).unwrap();
        assert_eq!(snapshots.len(), 5);
        assert_eq!(snapshots[0], grid);
        // blinker has period 2
        assert_ne!(snapshots[1], grid);
        assert_eq!(snapshots[2], grid);
        assert_eq!(snapshots[3], snapshots[1]);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let (config, grid) = blinker();
        let err = solve(config, ConwayRule, grid, 0, Algorithm::Serial).unwrap_err();
        assert_eq!(err, LatticeError::InvalidDuration(0));
    }

    #[test]
    fn test_grid_size_mismatch_rejected() {
        let config = LatticeConfig::game_of_life(6).unwrap();
        let err = Simulation::new(config, ConwayRule, Grid::filled(5, Cell::Dead))
            .err()
            .unwrap();
        assert!(matches!(err, LatticeError::InvalidDimension(_)));
    }

    #[test]
    fn test_conway_requires_its_lattice() {
        let config = LatticeConfig::from_tags(5, "spherical", "Moore", "outer").unwrap();
        let err = Simulation::new(config, ConwayRule, Grid::filled(5, Cell::Dead))
            .err()
            .unwrap();
        assert!(matches!(err, LatticeError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_huge_durations_do_not_preallocate() {
        assert_eq!(snapshot_capacity(1), 2);
        assert_eq!(snapshot_capacity(u64::MAX), MAX_PREALLOCATED_SNAPSHOTS);
        assert_eq!(snapshot_capacity(u64::MAX - 1), MAX_PREALLOCATED_SNAPSHOTS);

        // runs past the reserved capacity still keep every snapshot
        let (config, grid) = blinker();
        let snapshots = solve(config, ConwayRule, grid, 2000, Algorithm::Serial).unwrap();
        assert_eq!(snapshots.len(), 2001);
        assert_eq!(snapshots[2000], snapshots[0]);
    }

    #[test]
    fn test_phases() {
        let (config, grid) = blinker();
        let mut sim = Simulation::new(config, ConwayRule, grid).unwrap();
        assert_eq!(sim.phase(), Phase::Initializing);
        sim.step().unwrap();
        assert_eq!(sim.phase(), Phase::Running);
        assert_eq!(sim.generation(), 1);
        sim.run(3).unwrap();
        assert_eq!(sim.phase(), Phase::Completed);
        assert_eq!(sim.generation(), 4);
        assert_eq!(sim.step(), Err(LatticeError::Completed(4)));
        assert!(sim.run(1).is_err());
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let config = LatticeConfig::from_tags(9, "spherical", "vonNeumann", "inner").unwrap();
        let seed = Grid::from_fn(9, |row, col| ((row * 7 + col * 3) % 11) as f64 / 11.0);
        let rule = LogisticRule::new(3.7).unwrap();
        let serial = solve(config, rule, seed.clone(), 10, Algorithm::Serial).unwrap();
        let parallel = solve(config, rule, seed, 10, Algorithm::Parallel).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_brain_memory_tracks_refractory() {
        let config = LatticeConfig::from_tags(5, "toroidal", "Moore", "outer").unwrap();
        let mut seed = Grid::filled(5, Neuron::Quiescent);
        seed.set(2, 2, Neuron::Firing);
        let rule = BriansBrainRule::new(9, crate::domain::FiringRule::Equal, 2);
        let mut sim = Simulation::new(config, rule, seed).unwrap();
        assert_eq!(sim.memory().at(2, 2), 0);

        sim.step().unwrap();
        assert_eq!(sim.grid().at(2, 2), Neuron::Refractory);
        assert_eq!(sim.memory().at(2, 2), 1);

        sim.step().unwrap();
        assert_eq!(sim.grid().at(2, 2), Neuron::Refractory);
        assert_eq!(sim.memory().at(2, 2), 2);

        sim.step().unwrap();
        assert_eq!(sim.grid().at(2, 2), Neuron::Quiescent);
        assert_eq!(sim.memory().at(2, 2), 0);
    }

    #[test]
    fn test_synchronous_update() {
        // Row-major in-place writes would let (0,1) see the newborn (0,0);
        // a synchronous step must not.
        let config = LatticeConfig::game_of_life(6).unwrap();
        let mut seed = Grid::filled(6, Cell::Dead);
        for (row, col) in [(1, 0), (1, 1), (0, 5)] {
            seed.set(row, col, Cell::Alive);
        }
        let snapshots = solve(config, ConwayRule, seed.clone(), 1, Algorithm::Serial).unwrap();
        let mut expected = Grid::filled(6, Cell::Dead);
        expected.set(0, 0, Cell::Alive);
        expected.set(1, 0, Cell::Alive);
        assert_eq!(snapshots[1], expected);
    }
}
