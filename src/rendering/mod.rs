//! Plain-text rendering of snapshots for terminal output.

use std::fmt::Write;

use crate::application::Snapshots;
use crate::domain::{Cell, Grid, Neuron};

/// Shade ramp for continuous states, darkest first
const SHADES: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Single character used to draw a cell state
pub trait Glyph: Copy {
    fn glyph(self) -> char;
}

impl Glyph for Cell {
    fn glyph(self) -> char {
        match self {
            Cell::Alive => '#',
            Cell::Dead => '.',
        }
    }
}

impl Glyph for Neuron {
    fn glyph(self) -> char {
        match self {
            Neuron::Quiescent => '.',
            Neuron::Firing => '*',
            Neuron::Refractory => 'o',
        }
    }
}

impl Glyph for f64 {
    fn glyph(self) -> char {
        let level = (self.clamp(0.0, 1.0) * SHADES.len() as f64) as usize;
        SHADES[level.min(SHADES.len() - 1)]
    }
}

/// Format large numbers with K/M/B suffixes
pub fn format_number(n: usize) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Draw a grid as one line of glyphs per row
pub fn render_frame<T: Glyph>(grid: &Grid<T>) -> String {
    let size = grid.size();
    let mut out = String::with_capacity(size * (size + 1));
    for cells in (0..size).map_while(|row| grid.row(row)) {
        out.extend(cells.iter().map(|&cell| cell.glyph()));
        out.push('\n');
    }
    out
}

/// Draw every snapshot, each preceded by its step number
pub fn render_all(snapshots: &Snapshots) -> String {
    fn frames<T: Glyph>(grids: &[Grid<T>]) -> String {
        let mut out = String::new();
        for (step, grid) in grids.iter().enumerate() {
            let _ = writeln!(out, "step {step}");
            out.push_str(&render_frame(grid));
        }
        out
    }

    match snapshots {
        Snapshots::Life(grids) => frames(grids),
        Snapshots::Brain(grids) => frames(grids),
        Snapshots::Logistic(grids) => frames(grids),
    }
}

/// One summary line per snapshot: population counts or value statistics
pub fn summarize(snapshots: &Snapshots) -> Vec<String> {
    match snapshots {
        Snapshots::Life(grids) => grids
            .iter()
            .enumerate()
            .map(|(step, grid)| {
                format!("step {step:>4}  alive {:>8}", format_number(grid.count(Cell::is_alive)))
            })
            .collect(),
        Snapshots::Brain(grids) => grids
            .iter()
            .enumerate()
            .map(|(step, grid)| {
                format!(
                    "step {step:>4}  quiescent {:>8}  firing {:>8}  refractory {:>8}",
                    format_number(grid.count(|n| n == Neuron::Quiescent)),
                    format_number(grid.count(Neuron::is_firing)),
                    format_number(grid.count(Neuron::is_refractory)),
                )
            })
            .collect(),
        Snapshots::Logistic(grids) => grids
            .iter()
            .enumerate()
            .map(|(step, grid)| {
                let cells = grid.cells();
                let mean = cells.iter().sum::<f64>() / cells.len() as f64;
                let min = cells.iter().copied().fold(f64::INFINITY, f64::min);
                let max = cells.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                format!("step {step:>4}  mean {mean:.4}  min {min:.4}  max {max:.4}")
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(2_500), "2.5K");
        assert_eq!(format_number(3_000_000), "3.0M");
    }

    #[test]
    fn test_render_frame() {
        let mut grid = Grid::filled(3, Cell::Dead);
        grid.set(1, 1, Cell::Alive);
        assert_eq!(render_frame(&grid), "...\n.#.\n...\n");
    }

    #[test]
    fn test_shade_ramp_bounds() {
        assert_eq!(0.0f64.glyph(), ' ');
        assert_eq!(1.0f64.glyph(), '@');
        assert_eq!(0.55f64.glyph(), '+');
    }

    #[test]
    fn test_summary_per_snapshot() {
        let grids = vec![Grid::filled(2, Neuron::Firing), Grid::filled(2, Neuron::Refractory)];
        let lines = summarize(&Snapshots::Brain(grids));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("firing        4"));
        assert!(lines[1].contains("refractory        4"));
    }
}
