use super::error::{LatticeError, Result};
use super::{Cell, Grid};

/// A predefined Game of Life system: a set of alive cells laid out on
/// its own square board.
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    /// Side length of the board the pattern is defined on
    pub board: usize,
    /// (row, col) coordinates of alive cells
    pub cells: Vec<(usize, usize)>,
}

impl Pattern {
    /// Create a new pattern from alive cell coordinates
    pub fn new(
        name: &'static str,
        description: &'static str,
        board: usize,
        cells: Vec<(usize, usize)>,
    ) -> Self {
        debug_assert!(cells.iter().all(|&(r, c)| r < board && c < board));
        Self {
            name,
            description,
            board,
            cells,
        }
    }

    /// Pattern on its own board, ready to seed a run
    pub fn to_grid(&self) -> Grid<Cell> {
        let mut grid = Grid::filled(self.board, Cell::Dead);
        self.place_on(&mut grid, 0, 0);
        grid
    }

    /// Place pattern on a grid at the given offset, wrapping around the edges
    pub fn place_on(&self, grid: &mut Grid<Cell>, row: usize, col: usize) {
        let size = grid.size();
        for (dr, dc) in &self.cells {
            grid.set((row + dr) % size, (col + dc) % size, Cell::Alive);
        }
    }
}

/// The seventeen predefined systems, numbered 1..=17
pub mod presets {
    use super::*;

    /// Block - 2x2 still life
    pub fn block() -> Pattern {
        Pattern::new("block", "Still life", 4, vec![(1, 1), (1, 2), (2, 1), (2, 2)])
    }

    pub fn beehive() -> Pattern {
        Pattern::new(
            "beehive",
            "Still life",
            6,
            vec![(1, 2), (1, 3), (2, 1), (2, 4), (3, 2), (3, 3)],
        )
    }

    pub fn loaf() -> Pattern {
        Pattern::new(
            "loaf",
            "Still life",
            6,
            vec![(1, 2), (1, 3), (2, 1), (2, 4), (3, 2), (3, 4), (4, 3)],
        )
    }

    pub fn boat() -> Pattern {
        Pattern::new(
            "boat",
            "Still life",
            5,
            vec![(1, 1), (1, 2), (2, 1), (2, 3), (3, 2)],
        )
    }

    pub fn tub() -> Pattern {
        Pattern::new("tub", "Still life", 5, vec![(1, 2), (2, 1), (2, 3), (3, 2)])
    }

    /// Blinker - period 2 oscillator
    pub fn blinker() -> Pattern {
        Pattern::new("blinker", "Oscillator (period 2)", 5, vec![(1, 2), (2, 2), (3, 2)])
    }

    /// Toad - period 2 oscillator
    pub fn toad() -> Pattern {
        Pattern::new(
            "toad",
            "Oscillator (period 2)",
            6,
            vec![(2, 2), (2, 3), (2, 4), (3, 1), (3, 2), (3, 3)],
        )
    }

    /// Beacon - period 2 oscillator
    pub fn beacon() -> Pattern {
        Pattern::new(
            "beacon",
            "Oscillator (period 2)",
            6,
            vec![(1, 1), (1, 2), (2, 1), (2, 2), (3, 3), (3, 4), (4, 3), (4, 4)],
        )
    }

    /// Pulsar - period 3 oscillator
    pub fn pulsar() -> Pattern {
        let mut cells = Vec::with_capacity(48);
        // Four-fold symmetric: arms at rows/cols 2, 7, 9, 14 and bars at 4-6, 10-12
        for &line in &[2, 7, 9, 14] {
            for &run in &[4, 5, 6, 10, 11, 12] {
                cells.push((line, run));
            }
        }
        for &line in &[4, 5, 6, 10, 11, 12] {
            for &run in &[2, 7, 9, 14] {
                cells.push((line, run));
            }
        }
        cells.sort_unstable();
        Pattern::new("pulsar", "Oscillator (period 3)", 17, cells)
    }

    pub fn pentadecathlon() -> Pattern {
        Pattern::new(
            "pentadecathlon",
            "Oscillator (period 15)",
            18,
            vec![
                (7, 6), (7, 11),
                (8, 4), (8, 5), (8, 7), (8, 8), (8, 9), (8, 10), (8, 12), (8, 13),
                (9, 6), (9, 11),
            ],
        )
    }

    /// Glider - simplest spaceship, moves diagonally
    pub fn glider() -> Pattern {
        Pattern::new(
            "glider",
            "Moves diagonally (period 4)",
            5,
            vec![
                (1, 2),
                (2, 3),
                (3, 1), (3, 2), (3, 3),
            ],
        )
    }

    /// Lightweight Spaceship (LWSS)
    pub fn lwss() -> Pattern {
        Pattern::new(
            "lwss",
            "Lightweight spaceship (period 4)",
            8,
            vec![
                (2, 3), (2, 6),
                (3, 2),
                (4, 2), (4, 6),
                (5, 2), (5, 3), (5, 4), (5, 5),
            ],
        )
    }

    /// Middleweight Spaceship (MWSS)
    pub fn mwss() -> Pattern {
        Pattern::new(
            "mwss",
            "Middleweight spaceship (period 4)",
            8,
            vec![
                (1, 4),
                (2, 2), (2, 6),
                (3, 1),
                (4, 1), (4, 6),
                (5, 1), (5, 2), (5, 3), (5, 4), (5, 5),
            ],
        )
    }

    /// Heavyweight Spaceship (HWSS)
    pub fn hwss() -> Pattern {
        Pattern::new(
            "hwss",
            "Heavyweight spaceship (period 4)",
            11,
            vec![
                (3, 5), (3, 6),
                (4, 3), (4, 8),
                (5, 2),
                (6, 2), (6, 8),
                (7, 2), (7, 3), (7, 4), (7, 5), (7, 6), (7, 7),
            ],
        )
    }

    /// R-pentomino - classic methuselah (stabilizes after 1103 generations)
    pub fn r_pentomino() -> Pattern {
        Pattern::new(
            "r-pentomino",
            "Methuselah - stabilizes at gen 1103",
            9,
            vec![(3, 4), (3, 5), (4, 3), (4, 4), (5, 4)],
        )
    }

    /// Die hard - vanishes after 130 generations
    pub fn die_hard() -> Pattern {
        Pattern::new(
            "die-hard",
            "Methuselah - vanishes at gen 130",
            12,
            vec![(4, 8), (5, 2), (5, 3), (6, 3), (6, 7), (6, 8), (6, 9)],
        )
    }

    /// Acorn - small methuselah that stabilizes after 5206 generations
    pub fn acorn() -> Pattern {
        Pattern::new(
            "acorn",
            "Methuselah - stabilizes at gen 5206",
            11,
            vec![(4, 3), (5, 5), (6, 2), (6, 3), (6, 6), (6, 7), (6, 8)],
        )
    }

    /// Get all available patterns, in system-number order
    pub fn all_patterns() -> Vec<Pattern> {
        vec![
            block(),
            beehive(),
            loaf(),
            boat(),
            tub(),
            blinker(),
            toad(),
            beacon(),
            pulsar(),
            pentadecathlon(),
            glider(),
            lwss(),
            mwss(),
            hwss(),
            r_pentomino(),
            die_hard(),
            acorn(),
        ]
    }

    /// Look up a system by its number (1..=17)
    pub fn by_number(system: usize) -> Result<Pattern> {
        system
            .checked_sub(1)
            .and_then(|idx| all_patterns().into_iter().nth(idx))
            .ok_or_else(|| {
                LatticeError::parameter(format!("unknown pattern system {system} (expected 1..=17)"))
            })
    }

    /// Look up a system by name, case-insensitively
    pub fn by_name(name: &str) -> Result<Pattern> {
        all_patterns()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| LatticeError::parameter(format!("unknown pattern '{name}'")))
    }
}
