use std::fmt;
use std::str::FromStr;

use super::error::{LatticeError, Result};
use super::lattice::Stencil;
use super::{Cell, Neuron};

/// Trait for cellular automaton transition rules.
///
/// A rule never looks at grid geometry: the simulation loop resolves the
/// neighbor values, the rule reduces them to an aggregate and maps
/// (current state, aggregate, memory) to the next state.
pub trait Rule: Send + Sync {
    /// Per-cell state stored in the grid
    type State: Copy + PartialEq + fmt::Debug + Send + Sync;

    /// Reduction of the neighbor values the transition depends on
    type Aggregate: Copy;

    /// Auxiliary per-cell state carried between steps; `()` when unused
    type Memory: Copy + Default + PartialEq + fmt::Debug + Send + Sync;

    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Short description
    fn description(&self) -> &'static str;

    /// Lattice the rule is defined on, if it only works on one
    fn required_stencil(&self) -> Option<Stencil> {
        None
    }

    /// Reduce resolved neighbor values to the rule's aggregate
    fn aggregate(&self, neighbors: &[Self::State]) -> Self::Aggregate;

    /// Apply rule to compute next cell state
    fn evolve(&self, current: Self::State, aggregate: Self::Aggregate, memory: &Self::Memory) -> Self::State;

    /// Memory a cell starts the run with
    fn initial_memory(&self, _state: Self::State) -> Self::Memory {
        Self::Memory::default()
    }

    /// Memory after a step, given the newly computed state and the previous memory
    fn remember(&self, _next: Self::State, _memory: Self::Memory) -> Self::Memory {
        Self::Memory::default()
    }
}

/// Conway's Game of Life (B3/S23)
/// The classic cellular automaton rules
#[derive(Clone, Copy, Debug, Default)]
pub struct ConwayRule;

impl Rule for ConwayRule {
    type State = Cell;
    type Aggregate = u8;
    type Memory = ();

    fn name(&self) -> &'static str {
        "Conway"
    }

    fn description(&self) -> &'static str {
        "B3/S23 - Classic"
    }

    fn required_stencil(&self) -> Option<Stencil> {
        Some(Stencil::ToroidalMooreOuter)
    }

    fn aggregate(&self, neighbors: &[Cell]) -> u8 {
        neighbors.iter().filter(|cell| cell.is_alive()).count() as u8
    }

    fn evolve(&self, current: Cell, neighbors: u8, _memory: &()) -> Cell {
        match (current, neighbors) {
            (Cell::Alive, 2 | 3) => Cell::Alive,
            (Cell::Dead, 3) => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}

/// Comparison a quiescent cell's firing-neighbor count must satisfy
/// against the threshold Lambda to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FiringRule {
    #[default]
    Equal,
    GreaterOrEqual,
    LessOrEqual,
    Greater,
    Less,
}

impl FiringRule {
    pub const fn holds(self, firing: u32, lambda: u32) -> bool {
        match self {
            FiringRule::Equal => firing == lambda,
            FiringRule::GreaterOrEqual => firing >= lambda,
            FiringRule::LessOrEqual => firing <= lambda,
            FiringRule::Greater => firing > lambda,
            FiringRule::Less => firing < lambda,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            FiringRule::Equal => "=",
            FiringRule::GreaterOrEqual => ">=",
            FiringRule::LessOrEqual => "<=",
            FiringRule::Greater => ">",
            FiringRule::Less => "<",
        }
    }
}

impl FromStr for FiringRule {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "=" => Ok(FiringRule::Equal),
            ">=" => Ok(FiringRule::GreaterOrEqual),
            "<=" => Ok(FiringRule::LessOrEqual),
            ">" => Ok(FiringRule::Greater),
            "<" => Ok(FiringRule::Less),
            other => Err(LatticeError::parameter(format!(
                "unknown firing rule '{other}' (expected one of =, >=, <=, >, <)"
            ))),
        }
    }
}

impl fmt::Display for FiringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Brian's Brain: quiescent cells fire when their firing-neighbor count
/// satisfies the firing rule, firing cells turn refractory, and refractory
/// cells rest for `refractory_period` steps before turning quiescent.
///
/// Memory is the number of consecutive steps a cell has been refractory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BriansBrainRule {
    pub lambda: u32,
    pub firing_rule: FiringRule,
    pub refractory_period: u32,
}

impl Default for BriansBrainRule {
    /// Classic Brian's Brain: fire on exactly two firing neighbors
    fn default() -> Self {
        Self {
            lambda: 2,
            firing_rule: FiringRule::Equal,
            refractory_period: 1,
        }
    }
}

impl BriansBrainRule {
    pub const fn new(lambda: u32, firing_rule: FiringRule, refractory_period: u32) -> Self {
        Self {
            lambda,
            firing_rule,
            refractory_period,
        }
    }
}

impl Rule for BriansBrainRule {
    type State = Neuron;
    type Aggregate = u32;
    type Memory = u32;

    fn name(&self) -> &'static str {
        "Brian's Brain"
    }

    fn description(&self) -> &'static str {
        "Quiescent -> Firing -> Refractory"
    }

    fn aggregate(&self, neighbors: &[Neuron]) -> u32 {
        neighbors.iter().filter(|n| n.is_firing()).count() as u32
    }

    fn evolve(&self, current: Neuron, firing: u32, refractory_steps: &u32) -> Neuron {
        match current {
            Neuron::Firing => Neuron::Refractory,
            Neuron::Refractory if *refractory_steps >= self.refractory_period => Neuron::Quiescent,
            Neuron::Refractory => Neuron::Refractory,
            Neuron::Quiescent if self.firing_rule.holds(firing, self.lambda) => Neuron::Firing,
            Neuron::Quiescent => Neuron::Quiescent,
        }
    }

    fn initial_memory(&self, state: Neuron) -> u32 {
        u32::from(state.is_refractory())
    }

    fn remember(&self, next: Neuron, refractory_steps: u32) -> u32 {
        if next.is_refractory() {
            refractory_steps.saturating_add(1)
        } else {
            0
        }
    }
}

/// Logistic cellular automaton: each cell becomes r·m·(1−m) where m is the
/// mean of its neighbor values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogisticRule {
    rate: f64,
}

impl LogisticRule {
    /// Largest growth rate keeping states inside [0, 1]
    pub const MAX_RATE: f64 = 4.0;

    pub fn new(rate: f64) -> Result<Self> {
        if !(0.0..=Self::MAX_RATE).contains(&rate) {
            return Err(LatticeError::parameter(format!(
                "logistic rate must lie in [0, 4], got {rate}"
            )));
        }
        Ok(Self { rate })
    }

    pub const fn rate(&self) -> f64 {
        self.rate
    }

    /// The logistic map x -> r·x·(1−x)
    #[inline]
    pub fn map(&self, x: f64) -> f64 {
        self.rate * x * (1.0 - x)
    }
}

impl Rule for LogisticRule {
    type State = f64;
    type Aggregate = f64;
    type Memory = ();

    fn name(&self) -> &'static str {
        "Logistic"
    }

    fn description(&self) -> &'static str {
        "x -> r*m*(1-m) over the neighbor mean"
    }

    fn aggregate(&self, neighbors: &[f64]) -> f64 {
        if neighbors.is_empty() {
            return 0.0;
        }
        neighbors.iter().sum::<f64>() / neighbors.len() as f64
    }

    fn evolve(&self, _current: f64, mean: f64, _memory: &()) -> f64 {
        self.map(mean)
    }
}
