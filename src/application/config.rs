//! Run descriptions loaded from TOML.
//!
//! A run file names the automaton, its lattice, rule parameters, how the
//! seed grid is built, and how long to run. Defaults follow the classic
//! settings of each automaton.
//!
//! ## Example
//!
//! ```toml
//! automaton = "brians-brain"
//! duration = 30
//! seed = 17
//!
//! [lattice]
//! size = 50
//! topology = "spherical"
//! neighborhood = "vonNeumann"
//! totalistic = "inner"
//!
//! [brain]
//! lambda = 2
//! firing_rule = ">="
//! refractory_period = 3
//! dq = 0.5
//! df = 0.25
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::domain::seeding::{BetaShape, BrainDensities};
use crate::domain::{
    Algorithm, BriansBrainRule, Cell, FiringRule, Grid, LatticeConfig, LatticeError, LogisticRule,
    Result, Stencil, presets,
};

/// Which automaton a run evolves.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Automaton {
    GameOfLife,
    BriansBrain,
    Logistic,
}

/// Lattice section, kept as raw tags until validation.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LatticeSection {
    pub size: i64,
    pub topology: String,
    pub neighborhood: String,
    pub totalistic: String,
    pub radius: i64,
}

impl Default for LatticeSection {
    fn default() -> Self {
        Self {
            size: 50,
            topology: "toroidal".into(),
            neighborhood: "Moore".into(),
            totalistic: "outer".into(),
            radius: 1,
        }
    }
}

impl LatticeSection {
    /// Validate into a lattice configuration
    pub fn validate(&self) -> Result<LatticeConfig> {
        let size = usize::try_from(self.size)
            .ok()
            .filter(|&size| size > 0)
            .ok_or_else(|| {
                LatticeError::dimension(format!("lattice size L must be greater than 0, got {}", self.size))
            })?;
        self.with_size(size)
    }

    /// Validate the tags for a lattice whose side length is fixed by the
    /// seed grid (a predefined system or explicit cells) instead of `size`
    pub fn with_size(&self, size: usize) -> Result<LatticeConfig> {
        // negative radii are as meaningless as any other unsupported one
        let radius = usize::try_from(self.radius).unwrap_or(0);
        LatticeConfig::with_radius(
            size,
            self.topology.parse()?,
            self.neighborhood.parse()?,
            self.totalistic.parse()?,
            radius,
        )
    }
}

/// Game of Life seeding.
///
/// At most one of `system`, `pattern` and `cells` picks a fixed seed grid;
/// with none of them the grid is random with density `p`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LifeSection {
    /// Predefined system 1..=17; 0 for none
    pub system: usize,
    /// Predefined system by name, e.g. "glider"
    pub pattern: Option<String>,
    /// Explicit seed grid: flat row-major 0/1 array of length L*L
    pub cells: Option<Vec<u8>>,
    /// Density of alive cells for random seeding
    pub p: f64,
}

impl Default for LifeSection {
    fn default() -> Self {
        Self {
            system: 0,
            pattern: None,
            cells: None,
            p: 0.5,
        }
    }
}

impl LifeSection {
    /// The fixed seed grid this section names, or `None` for random seeding
    pub fn seed_grid(&self) -> Result<Option<Grid<Cell>>> {
        let chosen = usize::from(self.system != 0)
            + usize::from(self.pattern.is_some())
            + usize::from(self.cells.is_some());
        if chosen > 1 {
            return Err(LatticeError::configuration(
                "set at most one of life.system, life.pattern and life.cells",
            ));
        }

        if let Some(cells) = &self.cells {
            let cells = cells
                .iter()
                .map(|&value| match value {
                    0 => Ok(Cell::Dead),
                    1 => Ok(Cell::Alive),
                    other => Err(LatticeError::parameter(format!(
                        "life.cells holds 0 or 1, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()?;
            return Grid::from_flat(cells).map(Some);
        }
        let preset = match (&self.pattern, self.system) {
            (Some(name), _) => Some(presets::by_name(name)?),
            (None, 0) => None,
            (None, system) => Some(presets::by_number(system)?),
        };
        if let Some(pattern) = preset {
            tracing::debug!(pattern = pattern.name, kind = pattern.description, "predefined seed");
            return Ok(Some(pattern.to_grid()));
        }

        if !(0.0..=1.0).contains(&self.p) {
            return Err(LatticeError::distribution(format!(
                "density p must lie in [0, 1], got {}",
                self.p
            )));
        }
        Ok(None)
    }
}

/// Brian's Brain rule and seeding.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BrainSection {
    pub lambda: u32,
    pub firing_rule: String,
    pub refractory_period: u32,
    pub dq: f64,
    pub df: f64,
}

impl Default for BrainSection {
    fn default() -> Self {
        Self {
            lambda: 2,
            firing_rule: "=".into(),
            refractory_period: 1,
            dq: 1.0 / 3.0,
            df: 1.0 / 3.0,
        }
    }
}

impl BrainSection {
    pub fn rule(&self) -> Result<BriansBrainRule> {
        let firing_rule: FiringRule = self.firing_rule.parse()?;
        Ok(BriansBrainRule::new(self.lambda, firing_rule, self.refractory_period))
    }

    pub fn densities(&self) -> Result<BrainDensities> {
        BrainDensities::new(self.dq, self.df)
    }
}

/// How a Logistic CA grid is seeded.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogisticInit {
    #[default]
    Uniform,
    Beta,
}

/// Logistic CA rule and seeding.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LogisticSection {
    pub rate: f64,
    pub init: LogisticInit,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub mu: Option<f64>,
    pub nu: Option<f64>,
}

impl Default for LogisticSection {
    fn default() -> Self {
        Self {
            rate: 4.0,
            init: LogisticInit::Uniform,
            a: None,
            b: None,
            mu: None,
            nu: None,
        }
    }
}

impl LogisticSection {
    pub fn rule(&self) -> Result<LogisticRule> {
        LogisticRule::new(self.rate)
    }

    /// Beta shape from either (a, b) or (mu, nu); (a, b) wins when both are given
    pub fn beta_shape(&self) -> Result<BetaShape> {
        match (self.a, self.b, self.mu, self.nu) {
            (Some(a), Some(b), _, _) => BetaShape::new(a, b),
            (_, _, Some(mu), Some(nu)) => BetaShape::from_mean_precision(mu, nu),
            _ => Err(LatticeError::parameter(
                "beta initialisation needs either a and b, or mu and nu",
            )),
        }
    }
}

/// Complete description of one run.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub automaton: Automaton,
    /// Steps to run; defaults per automaton when absent
    pub duration: Option<u64>,
    pub seed: u64,
    pub algorithm: String,
    pub lattice: LatticeSection,
    pub life: LifeSection,
    pub brain: BrainSection,
    pub logistic: LogisticSection,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            automaton: Automaton::GameOfLife,
            duration: None,
            seed: 17,
            algorithm: Algorithm::default().name().into(),
            lattice: LatticeSection::default(),
            life: LifeSection::default(),
            brain: BrainSection::default(),
            logistic: LogisticSection::default(),
        }
    }
}

impl RunConfig {
    /// Parse a run description from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a run file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LatticeError::Config(format!("reading {}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Steps to run: explicit value, or 50 for the Logistic CA and 30 otherwise
    pub fn duration(&self) -> Result<u64> {
        let duration = self.duration.unwrap_or(match self.automaton {
            Automaton::Logistic => 50,
            _ => 30,
        });
        if duration == 0 {
            return Err(LatticeError::InvalidDuration(duration));
        }
        Ok(duration)
    }

    pub fn algorithm(&self) -> Result<Algorithm> {
        self.algorithm.parse()
    }

    /// Check every section that applies to the chosen automaton
    pub fn validate(&self) -> Result<()> {
        self.duration()?;
        self.algorithm()?;
        match self.automaton {
            Automaton::GameOfLife => {
                let lattice = match self.life.seed_grid()? {
                    Some(grid) => self.lattice.with_size(grid.size())?,
                    None => self.lattice.validate()?,
                };
                if lattice.stencil() != Stencil::ToroidalMooreOuter {
                    return Err(LatticeError::configuration(format!(
                        "Game of Life runs on a toroidal Moore outer lattice, not {}",
                        lattice.stencil()
                    )));
                }
            }
            Automaton::BriansBrain => {
                self.lattice.validate()?;
                self.brain.rule()?;
                self.brain.densities()?;
            }
            Automaton::Logistic => {
                self.lattice.validate()?;
                self.logistic.rule()?;
                if self.logistic.init == LogisticInit::Beta {
                    self.logistic.beta_shape()?;
                }
            }
        }
        Ok(())
    }
}
