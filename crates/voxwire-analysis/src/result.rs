//! Shapes broadcast to analysis listeners.

use serde::{Deserialize, Serialize};
use voxwire_core::fixed::{Fixed64, Ticks};
use voxwire_core::id::CellPos;

/// One feedback cycle: positions in traversal order, closing back on the
/// first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopInfo {
    pub cycle: Vec<CellPos>,
    /// Always `cycle.len()`.
    pub length: usize,
}

impl LoopInfo {
    pub fn new(cycle: Vec<CellPos>) -> Self {
        let length = cycle.len();
        Self { cycle, length }
    }
}

/// Estimated toggle rate of one cell across the history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OscillationInfo {
    pub cell: CellPos,
    /// Toggles per tick.
    pub frequency: Fixed64,
    /// Ticks per full on/off cycle, `floor(2 * window / toggles)`. This is
    /// twice the average spacing between toggles: a cell flipping every tick
    /// has period 2.
    pub period: Ticks,
    /// Transitions observed in the window.
    pub toggles: u32,
}

/// Occupied orthogonal neighbour count of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanoutInfo {
    pub cell: CellPos,
    /// 0 to 6.
    pub fanout: u8,
}

/// Largest shortest-path distance found and the cell at its far end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DepthInfo {
    pub max_depth: u32,
    /// `None` only when the world is empty.
    pub deepest_node: Option<CellPos>,
}

/// Everything derived from one tick.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Analyses performed by the producing engine, starting at 1.
    pub tick: Ticks,
    pub loops: Vec<LoopInfo>,
    pub oscillations: Vec<OscillationInfo>,
    /// Sorted by fan-out, highest first.
    pub fanout: Vec<FanoutInfo>,
    pub depth: DepthInfo,
}

impl AnalysisResult {
    /// Fan-out of `cell`, if it was indexed this tick.
    pub fn fanout_of(&self, cell: CellPos) -> Option<u8> {
        self.fanout.iter().find(|f| f.cell == cell).map(|f| f.fanout)
    }

    /// Oscillation estimate for `cell`, if it qualified.
    pub fn oscillation_of(&self, cell: CellPos) -> Option<&OscillationInfo> {
        self.oscillations.iter().find(|o| o.cell == cell)
    }
}
