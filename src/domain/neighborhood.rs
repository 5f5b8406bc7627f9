//! Neighborhood resolution over toroidal and spherical lattices.
//!
//! The resolver maps a cell position to the ordered values of its
//! neighbors in a grid. It only ever reads the grid it is given, which
//! during a step is the previous snapshot.
//!
//! Toroidal lattices wrap both axes. Spherical lattices wrap columns only;
//! rows 0 and L-1 are poles where the whole row degenerates into one point,
//! so every other cell of a pole row is a neighbor, plus the adjacent
//! interior row cells below (or above) it.

use super::error::{LatticeError, Result};
use super::grid::Grid;
use super::lattice::{LatticeConfig, Neighborhood, Stencil, Topology};

/// Neighbor lookup for one validated lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolver {
    stencil: Stencil,
    size: usize,
}

/// Step one position along a cyclic axis of length `len`
#[inline]
const fn wrap(idx: usize, delta: isize, len: usize) -> usize {
    match delta {
        -1 => (idx + len - 1) % len,
        1 => (idx + 1) % len,
        _ => idx,
    }
}

impl Resolver {
    pub const fn new(config: &LatticeConfig) -> Self {
        Self {
            stencil: config.stencil(),
            size: config.size(),
        }
    }

    pub const fn stencil(&self) -> Stencil {
        self.stencil
    }

    /// Check whether a row is one of the two spherical poles
    const fn is_pole(&self, row: usize) -> bool {
        matches!(self.stencil.topology(), Topology::Spherical) && (row == 0 || row + 1 == self.size)
    }

    /// Number of values [`Resolver::for_each`] yields for any cell in `row`
    pub const fn neighbor_count(&self, row: usize) -> usize {
        let own = if self.stencil.includes_self() { 1 } else { 0 };
        let adjacent = match self.stencil.neighborhood() {
            Neighborhood::Moore => 3,
            Neighborhood::VonNeumann => 1,
        };

        if self.is_pole(row) {
            // rest of the pole ring, then the adjacent interior row
            (self.size - 1) + own + adjacent
        } else {
            match self.stencil.neighborhood() {
                Neighborhood::Moore => 8 + own,
                Neighborhood::VonNeumann => 4 + own,
            }
        }
    }

    /// Visit every neighbor value of (row, col) in a fixed order.
    /// The caller guarantees the position lies inside `grid`.
    #[inline]
    pub fn for_each<T: Copy>(&self, grid: &Grid<T>, row: usize, col: usize, mut visit: impl FnMut(T)) {
        debug_assert_eq!(grid.size(), self.size);
        let l = self.size;
        let with_self = self.stencil.includes_self();

        if self.is_pole(row) {
            for c in 0..l {
                if c != col || with_self {
                    visit(grid.at(row, c));
                }
            }
            let adj = if row == 0 { 1 } else { l - 2 };
            match self.stencil.neighborhood() {
                Neighborhood::Moore => {
                    visit(grid.at(adj, wrap(col, -1, l)));
                    visit(grid.at(adj, col));
                    visit(grid.at(adj, wrap(col, 1, l)));
                }
                Neighborhood::VonNeumann => visit(grid.at(adj, col)),
            }
            return;
        }

        // Interior rows of a sphere never reach a pole through wrapping,
        // so the toroidal stencil serves both topologies here.
        match self.stencil.neighborhood() {
            Neighborhood::Moore => {
                for dr in -1..=1 {
                    let r = wrap(row, dr, l);
                    for dc in -1..=1 {
                        if dr == 0 && dc == 0 && !with_self {
                            continue;
                        }
                        visit(grid.at(r, wrap(col, dc, l)));
                    }
                }
            }
            Neighborhood::VonNeumann => {
                visit(grid.at(wrap(row, -1, l), col));
                visit(grid.at(row, wrap(col, -1, l)));
                if with_self {
                    visit(grid.at(row, col));
                }
                visit(grid.at(row, wrap(col, 1, l)));
                visit(grid.at(wrap(row, 1, l), col));
            }
        }
    }

    /// Refill `buf` with the neighbors of (row, col), reusing its allocation
    #[inline]
    pub fn collect_into<T: Copy>(&self, grid: &Grid<T>, row: usize, col: usize, buf: &mut Vec<T>) {
        buf.clear();
        self.for_each(grid, row, col, |value| buf.push(value));
    }
}

/// Ordered neighbor values of cell (row, col) under `config`.
///
/// Fails if the grid does not match the configured size or the position
/// lies outside it.
pub fn neighbors<T: Copy>(config: &LatticeConfig, grid: &Grid<T>, row: usize, col: usize) -> Result<Vec<T>> {
    if grid.size() != config.size() {
        return Err(LatticeError::dimension(format!(
            "grid is {0}x{0} but the lattice is configured for L={1}",
            grid.size(),
            config.size()
        )));
    }
    if row >= config.size() || col >= config.size() {
        return Err(LatticeError::dimension(format!(
            "cell ({row}, {col}) lies outside an L={} lattice",
            config.size()
        )));
    }

    let resolver = Resolver::new(config);
    let mut out = Vec::with_capacity(resolver.neighbor_count(row));
    resolver.collect_into(grid, row, col, &mut out);
    Ok(out)
}
