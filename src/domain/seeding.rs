//! Random initial grids.
//!
//! Every generator takes the random source explicitly, so a run is fully
//! reproducible from its seed and the engine itself stays deterministic.

use rand::Rng;

use super::error::{LatticeError, Result};
use super::{Cell, Grid, Neuron};

/// Slack allowed when densities are checked to sum to one
const DENSITY_TOLERANCE: f64 = 1e-9;

fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(LatticeError::dimension("lattice size L must be greater than 0"));
    }
    Ok(())
}

fn check_density(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(LatticeError::distribution(format!(
            "density {name} must lie in [0, 1], got {value}"
        )));
    }
    Ok(())
}

/// Game of Life grid where each cell is alive with probability `p`
pub fn random_life<R: Rng + ?Sized>(size: usize, p: f64, rng: &mut R) -> Result<Grid<Cell>> {
    check_size(size)?;
    check_density("p", p)?;
    Ok(Grid::from_fn(size, |_, _| Cell::from(rng.random_bool(p))))
}

/// Densities of the three Brian's Brain states.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrainDensities {
    pub quiescent: f64,
    pub firing: f64,
    pub refractory: f64,
}

impl BrainDensities {
    /// Build from the quiescent and firing densities; refractory takes the rest.
    /// Fails unless all three lie in [0, 1].
    pub fn new(dq: f64, df: f64) -> Result<Self> {
        check_density("dq", dq)?;
        check_density("df", df)?;
        let dr = 1.0 - (dq + df);
        if dr < -DENSITY_TOLERANCE {
            return Err(LatticeError::distribution(format!(
                "dq + df must not exceed 1, got {dq} + {df} = {}",
                dq + df
            )));
        }
        Ok(Self {
            quiescent: dq,
            firing: df,
            refractory: dr.max(0.0),
        })
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Neuron {
        let u: f64 = rng.random();
        if u < self.quiescent {
            Neuron::Quiescent
        } else if u < self.quiescent + self.firing {
            Neuron::Firing
        } else {
            Neuron::Refractory
        }
    }
}

impl Default for BrainDensities {
    fn default() -> Self {
        Self {
            quiescent: 1.0 / 3.0,
            firing: 1.0 / 3.0,
            refractory: 1.0 / 3.0,
        }
    }
}

/// Brian's Brain grid sampled from the given state densities
pub fn random_brain<R: Rng + ?Sized>(
    size: usize,
    densities: BrainDensities,
    rng: &mut R,
) -> Result<Grid<Neuron>> {
    check_size(size)?;
    Ok(Grid::from_fn(size, |_, _| densities.sample(rng)))
}

/// Logistic CA grid with values drawn uniformly from [0, 1)
pub fn uniform<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Grid<f64>> {
    check_size(size)?;
    Ok(Grid::from_fn(size, |_, _| rng.random::<f64>()))
}

/// Shape parameters of a Beta distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BetaShape {
    pub a: f64,
    pub b: f64,
}

impl BetaShape {
    pub fn new(a: f64, b: f64) -> Result<Self> {
        if !(a > 0.0 && b > 0.0 && a.is_finite() && b.is_finite()) {
            return Err(LatticeError::parameter(format!(
                "beta shape parameters must be positive, got a={a}, b={b}"
            )));
        }
        Ok(Self { a, b })
    }

    /// Mean/precision parameterisation: a = mu·nu, b = (1−mu)·nu
    pub fn from_mean_precision(mu: f64, nu: f64) -> Result<Self> {
        if !(mu > 0.0 && mu < 1.0) {
            return Err(LatticeError::parameter(format!("beta mean mu must lie in (0, 1), got {mu}")));
        }
        Self::new(mu * nu, (1.0 - mu) * nu)
    }

    pub fn mean(&self) -> f64 {
        self.a / (self.a + self.b)
    }

    /// Beta(a, b) as X / (X + Y) with X ~ Gamma(a), Y ~ Gamma(b)
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let x = gamma(self.a, rng);
        let y = gamma(self.b, rng);
        if x + y > 0.0 { x / (x + y) } else { self.mean() }
    }
}

/// Logistic CA grid with values drawn from Beta(a, b)
pub fn beta<R: Rng + ?Sized>(size: usize, shape: BetaShape, rng: &mut R) -> Result<Grid<f64>> {
    check_size(size)?;
    Ok(Grid::from_fn(size, |_, _| shape.sample(rng)))
}

/// Standard normal sample (Box-Muller transform)
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = rng.random::<f64>().max(f64::EPSILON);
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Gamma(shape, 1) sample (Marsaglia-Tsang; boosted for shape < 1)
fn gamma<R: Rng + ?Sized>(shape: f64, rng: &mut R) -> f64 {
    if shape < 1.0 {
        let u: f64 = rng.random::<f64>().max(f64::EPSILON);
        return gamma(shape + 1.0, rng) * u.powf(1.0 / shape);
    }

    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    loop {
        let x = standard_normal(rng);
        let v = (1.0 + c * x).powi(3);
        if v <= 0.0 {
            continue;
        }
        let u: f64 = rng.random::<f64>().max(f64::EPSILON);
        if u.ln() < 0.5 * x * x + d - d * v + d * v.ln() {
            return d * v;
        }
    }
}
