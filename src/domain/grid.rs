use super::error::{LatticeError, Result};

/// Grid stores an L×L lattice of cell states in row-major order.
/// Generic over the automaton's state type; a step never mutates a grid
/// in place, it builds the next one from the previous snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `value`
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }

    /// Build a grid by evaluating `f(row, col)` for every cell
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let cells = (0..size)
            .flat_map(|row| (0..size).map(move |col| (row, col)))
            .map(|(row, col)| f(row, col))
            .collect();
        Self { size, cells }
    }

    /// Wrap a row-major cell vector of length `size * size`
    pub fn from_cells(size: usize, cells: Vec<T>) -> Result<Self> {
        if cells.len() != size * size {
            return Err(LatticeError::dimension(format!(
                "expected {} cells for a {size}x{size} grid, got {}",
                size * size,
                cells.len()
            )));
        }
        Ok(Self { size, cells })
    }

    /// Reshape a flat array into the square grid it describes
    pub fn from_flat(cells: Vec<T>) -> Result<Self> {
        let size = cells.len().isqrt();
        if size == 0 || size * size != cells.len() {
            return Err(LatticeError::dimension(format!(
                "flat array of length {} cannot be reshaped to LxL",
                cells.len()
            )));
        }
        Ok(Self { size, cells })
    }

    /// Lattice side length L
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Convert 2D coordinates to 1D index
    const fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        (row < self.size && col < self.size).then(|| self.cells[self.index(row, col)])
    }

    /// Read a cell the caller already knows is in range
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> T {
        self.cells[self.index(row, col)]
    }

    /// Set cell at position; out-of-range writes are ignored
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        if row < self.size && col < self.size {
            let idx = self.index(row, col);
            self.cells[idx] = value;
        }
    }

    /// One row of the lattice (with bounds checking)
    pub fn row(&self, row: usize) -> Option<&[T]> {
        (row < self.size).then(|| &self.cells[row * self.size..(row + 1) * self.size])
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (idx / self.size, idx % self.size, cell))
    }

    /// Apply `f` to every cell, keeping the shape
    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            size: self.size,
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }

    /// Count cells matching a predicate
    pub fn count(&self, mut pred: impl FnMut(T) -> bool) -> usize {
        self.cells.iter().filter(|&&cell| pred(cell)).count()
    }

    /// Cyclic shift: the cell at (r, c) moves to (r + dr, c + dc) mod L
    pub fn shifted(&self, dr: isize, dc: isize) -> Self {
        let l = self.size as isize;
        Self::from_fn(self.size, |row, col| {
            let src_row = (row as isize - dr).rem_euclid(l) as usize;
            let src_col = (col as isize - dc).rem_euclid(l) as usize;
            self.at(src_row, src_col)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_reshapes() {
        let grid = Grid::from_flat(vec![1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.get(1, 2), Some(6));
        assert_eq!(grid.row(2), Some(&[7, 8, 9][..]));
    }

    #[test]
    fn test_row_out_of_bounds() {
        let grid = Grid::filled(3, 1u8);
        assert_eq!(grid.row(2), Some(&[1, 1, 1][..]));
        assert_eq!(grid.row(3), None);
        assert_eq!(Grid::<u8>::filled(0, 0).row(0), None);
    }

    #[test]
    fn test_from_flat_rejects_non_square() {
        assert!(matches!(
            Grid::from_flat(vec![0u8; 10]),
            Err(LatticeError::InvalidDimension(_))
        ));
        assert!(Grid::<u8>::from_flat(Vec::new()).is_err());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::filled(4, 0.5f64);
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, 4), None);
        assert_eq!(grid.get(3, 3), Some(0.5));
    }

    #[test]
    fn test_set_ignores_out_of_bounds() {
        let mut grid = Grid::filled(3, false);
        grid.set(5, 5, true);
        grid.set(1, 1, true);
        assert_eq!(grid.count(|c| c), 1);
    }

    #[test]
    fn test_shift_wraps() {
        let mut grid = Grid::filled(4, 0u8);
        grid.set(3, 3, 1);
        let shifted = grid.shifted(1, 2);
        assert_eq!(shifted.get(0, 1), Some(1));
        assert_eq!(shifted.count(|c| c == 1), 1);
        assert_eq!(shifted.shifted(-1, -2), grid);
    }

    #[test]
    fn test_iter_cells_positions() {
        let grid = Grid::from_fn(3, |row, col| row * 10 + col);
        assert!(grid.iter_cells().all(|(row, col, v)| v == row * 10 + col));
        assert_eq!(grid.iter_cells().count(), 9);
    }
}
