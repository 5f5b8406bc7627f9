/// Cell represents the fundamental unit in Conway's Game of Life.
/// Each cell can be either Dead or Alive.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// Neuron is a Brian's Brain cell: resting, firing, or recovering.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum Neuron {
    #[default]
    Quiescent,
    Firing,
    Refractory,
}

impl Neuron {
    pub const fn is_firing(self) -> bool {
        matches!(self, Neuron::Firing)
    }

    pub const fn is_refractory(self) -> bool {
        matches!(self, Neuron::Refractory)
    }
}
