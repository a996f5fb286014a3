use serde::{Deserialize, Serialize};

use crate::id::CellPos;

/// An occupied voxel as reported by the world for one tick.
///
/// Cells carry no identity across ticks; the world rebuilds them from
/// scratch every time it is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub pos: CellPos,
    /// Whether the simulation currently drives a signal through this cell.
    pub powered: bool,
}

impl Cell {
    pub const fn new(pos: CellPos, powered: bool) -> Self {
        Self { pos, powered }
    }

    /// An unpowered cell at `(x, y, z)`.
    pub const fn at(x: i32, y: i32, z: i32) -> Self {
        Self::new(CellPos::new(x, y, z), false)
    }

    /// The same cell with its powered flag replaced.
    pub const fn with_power(self, powered: bool) -> Self {
        Self { powered, ..self }
    }
}
