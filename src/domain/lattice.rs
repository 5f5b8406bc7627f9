//! Lattice configuration: topology, neighborhood shape, totalistic mode and size.
//!
//! A configuration is validated once and then never changes for the life
//! of a run. Validation also resolves the three independent choices into a
//! single [`Stencil`], so the resolver never re-inspects tags per cell.

use std::fmt;
use std::str::FromStr;

use super::error::{LatticeError, Result};

/// How the lattice edges connect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Both axes wrap cyclically
    Toroidal,
    /// Columns wrap, rows 0 and L-1 collapse into poles
    Spherical,
}

/// Which adjacent cells count as neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Neighborhood {
    /// 8-connected, diagonals included
    Moore,
    /// 4-connected, axis neighbors only
    VonNeumann,
}

/// Whether the cell's own previous value joins its neighbor set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Totalistic {
    /// Cell included
    Inner,
    /// Cell excluded
    Outer,
}

impl FromStr for Topology {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "toroidal" => Ok(Topology::Toroidal),
            "spherical" => Ok(Topology::Spherical),
            other => Err(LatticeError::configuration(format!(
                "unknown topology '{other}' (expected 'toroidal' or 'spherical')"
            ))),
        }
    }
}

impl FromStr for Neighborhood {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Moore" => Ok(Neighborhood::Moore),
            "vonNeumann" => Ok(Neighborhood::VonNeumann),
            other => Err(LatticeError::configuration(format!(
                "unknown neighborhood '{other}' (expected 'Moore' or 'vonNeumann')"
            ))),
        }
    }
}

impl FromStr for Totalistic {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inner" => Ok(Totalistic::Inner),
            "outer" => Ok(Totalistic::Outer),
            other => Err(LatticeError::configuration(format!(
                "unknown totalistic mode '{other}' (expected 'inner' or 'outer')"
            ))),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Topology::Toroidal => "toroidal",
            Topology::Spherical => "spherical",
        })
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Neighborhood::Moore => "Moore",
            Neighborhood::VonNeumann => "vonNeumann",
        })
    }
}

impl fmt::Display for Totalistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Totalistic::Inner => "inner",
            Totalistic::Outer => "outer",
        })
    }
}

/// The eight concrete neighbor-resolution strategies.
/// Exactly one is active per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stencil {
    ToroidalMooreInner,
    ToroidalMooreOuter,
    ToroidalVonNeumannInner,
    ToroidalVonNeumannOuter,
    SphericalMooreInner,
    SphericalMooreOuter,
    SphericalVonNeumannInner,
    SphericalVonNeumannOuter,
}

impl Stencil {
    /// Resolve the three independent choices into one strategy
    pub const fn resolve(
        topology: Topology,
        neighborhood: Neighborhood,
        totalistic: Totalistic,
    ) -> Self {
        use Neighborhood::*;
        use Topology::*;
        use Totalistic::*;

        match (topology, neighborhood, totalistic) {
            (Toroidal, Moore, Inner) => Stencil::ToroidalMooreInner,
            (Toroidal, Moore, Outer) => Stencil::ToroidalMooreOuter,
            (Toroidal, VonNeumann, Inner) => Stencil::ToroidalVonNeumannInner,
            (Toroidal, VonNeumann, Outer) => Stencil::ToroidalVonNeumannOuter,
            (Spherical, Moore, Inner) => Stencil::SphericalMooreInner,
            (Spherical, Moore, Outer) => Stencil::SphericalMooreOuter,
            (Spherical, VonNeumann, Inner) => Stencil::SphericalVonNeumannInner,
            (Spherical, VonNeumann, Outer) => Stencil::SphericalVonNeumannOuter,
        }
    }

    /// All eight strategies
    pub const fn all() -> [Stencil; 8] {
        [
            Stencil::ToroidalMooreInner,
            Stencil::ToroidalMooreOuter,
            Stencil::ToroidalVonNeumannInner,
            Stencil::ToroidalVonNeumannOuter,
            Stencil::SphericalMooreInner,
            Stencil::SphericalMooreOuter,
            Stencil::SphericalVonNeumannInner,
            Stencil::SphericalVonNeumannOuter,
        ]
    }

    pub const fn topology(self) -> Topology {
        match self {
            Stencil::ToroidalMooreInner
            | Stencil::ToroidalMooreOuter
            | Stencil::ToroidalVonNeumannInner
            | Stencil::ToroidalVonNeumannOuter => Topology::Toroidal,
            _ => Topology::Spherical,
        }
    }

    pub const fn neighborhood(self) -> Neighborhood {
        match self {
            Stencil::ToroidalMooreInner
            | Stencil::ToroidalMooreOuter
            | Stencil::SphericalMooreInner
            | Stencil::SphericalMooreOuter => Neighborhood::Moore,
            _ => Neighborhood::VonNeumann,
        }
    }

    pub const fn totalistic(self) -> Totalistic {
        match self {
            Stencil::ToroidalMooreInner
            | Stencil::ToroidalVonNeumannInner
            | Stencil::SphericalMooreInner
            | Stencil::SphericalVonNeumannInner => Totalistic::Inner,
            _ => Totalistic::Outer,
        }
    }

    /// Check whether the cell itself is part of its neighbor set
    pub const fn includes_self(self) -> bool {
        matches!(self.totalistic(), Totalistic::Inner)
    }
}

impl fmt::Display for Stencil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.topology(),
            self.neighborhood(),
            self.totalistic()
        )
    }
}

/// Validated, immutable description of the lattice a run evolves on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatticeConfig {
    size: usize,
    stencil: Stencil,
}

impl LatticeConfig {
    /// Only radius-1 neighborhoods are implemented
    pub const SUPPORTED_RADIUS: usize = 1;

    /// Validate a lattice of side `size`
    pub fn new(
        size: usize,
        topology: Topology,
        neighborhood: Neighborhood,
        totalistic: Totalistic,
    ) -> Result<Self> {
        if size == 0 {
            return Err(LatticeError::dimension("lattice size L must be greater than 0"));
        }
        if topology == Topology::Spherical && size < 2 {
            return Err(LatticeError::dimension(format!(
                "spherical lattice needs L >= 2 so each pole has an adjacent row, got {size}"
            )));
        }

        Ok(Self {
            size,
            stencil: Stencil::resolve(topology, neighborhood, totalistic),
        })
    }

    /// Same as [`LatticeConfig::new`], accepting a neighborhood radius.
    /// Any radius other than 1 is ignored.
    pub fn with_radius(
        size: usize,
        topology: Topology,
        neighborhood: Neighborhood,
        totalistic: Totalistic,
        radius: usize,
    ) -> Result<Self> {
        if radius != Self::SUPPORTED_RADIUS {
            tracing::warn!(radius, "neighborhood radius is fixed at 1, ignoring requested radius");
        }
        Self::new(size, topology, neighborhood, totalistic)
    }

    /// Build from textual tags (`toroidal`, `Moore`, `outer`, ...)
    pub fn from_tags(size: usize, topology: &str, neighborhood: &str, totalistic: &str) -> Result<Self> {
        Self::new(
            size,
            topology.parse()?,
            neighborhood.parse()?,
            totalistic.parse()?,
        )
    }

    /// Fixed lattice used by Conway's Game of Life: toroidal, Moore, outer
    pub fn game_of_life(size: usize) -> Result<Self> {
        Self::new(size, Topology::Toroidal, Neighborhood::Moore, Totalistic::Outer)
    }

    /// Lattice side length L
    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn stencil(&self) -> Stencil {
        self.stencil
    }

    pub const fn topology(&self) -> Topology {
        self.stencil.topology()
    }

    pub const fn neighborhood(&self) -> Neighborhood {
        self.stencil.neighborhood()
    }

    pub const fn totalistic(&self) -> Totalistic {
        self.stencil.totalistic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        let err = LatticeConfig::game_of_life(0).unwrap_err();
        assert!(matches!(err, LatticeError::InvalidDimension(_)));
    }

    #[test]
    fn test_single_cell_sphere_rejected() {
        let err = LatticeConfig::new(1, Topology::Spherical, Neighborhood::Moore, Totalistic::Outer)
            .unwrap_err();
        assert!(matches!(err, LatticeError::InvalidDimension(_)));

        // A single-cell torus is fine, every neighbor is the cell itself
        assert!(LatticeConfig::game_of_life(1).is_ok());
    }

    #[test]
    fn test_unknown_tags_rejected() {
        for (top, nei, tot) in [
            ("cylindrical", "Moore", "outer"),
            ("toroidal", "hexagonal", "outer"),
            ("toroidal", "Moore", "both"),
            ("Toroidal", "Moore", "outer"),
        ] {
            let err = LatticeConfig::from_tags(10, top, nei, tot).unwrap_err();
            assert!(
                matches!(err, LatticeError::InvalidConfiguration(_)),
                "{top}/{nei}/{tot} should be rejected"
            );
        }
    }

    #[test]
    fn test_tags_resolve_to_stencil() {
        let config = LatticeConfig::from_tags(10, "spherical", "vonNeumann", "inner").unwrap();
        assert_eq!(config.stencil(), Stencil::SphericalVonNeumannInner);
        assert_eq!(config.size(), 10);
        assert!(config.stencil().includes_self());
    }

    #[test]
    fn test_stencil_round_trips_components() {
        for stencil in Stencil::all() {
            let resolved = Stencil::resolve(
                stencil.topology(),
                stencil.neighborhood(),
                stencil.totalistic(),
            );
            assert_eq!(resolved, stencil);
        }
    }

    #[test]
    fn test_stencils_are_unique() {
        let names: Vec<_> = Stencil::all().iter().map(|s| s.to_string()).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_radius_is_ignored() {
        let config = LatticeConfig::with_radius(
            8,
            Topology::Toroidal,
            Neighborhood::Moore,
            Totalistic::Inner,
            3,
        )
        .unwrap();
        assert_eq!(config, LatticeConfig::from_tags(8, "toroidal", "Moore", "inner").unwrap());
    }
}
