//! Per-tick spatial index over occupied cells, plus orthogonal adjacency.
//!
//! [`GridIndex`] maps cell positions to the cells the world reported for one
//! tick and assigns each a dense ordinal in the order the world supplied
//! them. [`Adjacency`] resolves the occupied orthogonal neighbours of every
//! indexed cell once, so graph passes can walk ordinals instead of hashing
//! positions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::id::CellPos;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// The six axis-aligned directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NegX,
    PosX,
    NegY,
    PosY,
    NegZ,
    PosZ,
}

impl Direction {
    /// All six directions in neighbour enumeration order.
    ///
    /// Graph traversals visit neighbours in this order, which fixes the
    /// rotation in which a detected cycle is reported.
    pub const ALL: [Direction; 6] = [
        Direction::NegX,
        Direction::PosX,
        Direction::NegY,
        Direction::PosY,
        Direction::NegZ,
        Direction::PosZ,
    ];

    /// Offset for this direction.
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::NegX => (-1, 0, 0),
            Direction::PosX => (1, 0, 0),
            Direction::NegY => (0, -1, 0),
            Direction::PosY => (0, 1, 0),
            Direction::NegZ => (0, 0, -1),
            Direction::PosZ => (0, 0, 1),
        }
    }
}

// ---------------------------------------------------------------------------
// GridIndex
// ---------------------------------------------------------------------------

/// Coordinate lookup for the cells of a single tick.
///
/// Each distinct position gets one slot. If the world reports the same
/// position twice, the first report fixes the slot's ordinal and the last
/// report wins its value.
#[derive(Debug, Clone, Default)]
pub struct GridIndex {
    world_size: i32,
    cells: Vec<Cell>,
    slots: HashMap<CellPos, usize>,
}

impl GridIndex {
    /// Index `cells` for a world spanning `[0, world_size)` on each axis.
    pub fn build(cells: impl IntoIterator<Item = Cell>, world_size: i32) -> Self {
        let iter = cells.into_iter();
        let (lower, _) = iter.size_hint();
        let mut index = Self {
            world_size,
            cells: Vec::with_capacity(lower),
            slots: HashMap::with_capacity(lower),
        };

        for cell in iter {
            match index.slots.get(&cell.pos) {
                Some(&slot) => index.cells[slot] = cell,
                None => {
                    index.slots.insert(cell.pos, index.cells.len());
                    index.cells.push(cell);
                }
            }
        }

        index
    }

    /// The world bound this index checks neighbours against.
    pub fn world_size(&self) -> i32 {
        self.world_size
    }

    /// Number of distinct indexed positions.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the cell at a position, if occupied.
    pub fn get(&self, pos: CellPos) -> Option<&Cell> {
        self.slots.get(&pos).map(|&slot| &self.cells[slot])
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        self.slots.contains_key(&pos)
    }

    /// Dense ordinal of an occupied position.
    pub fn ordinal(&self, pos: CellPos) -> Option<usize> {
        self.slots.get(&pos).copied()
    }

    /// The cell holding `ordinal`.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal >= self.len()`.
    pub fn cell(&self, ordinal: usize) -> &Cell {
        &self.cells[ordinal]
    }

    /// Position of the cell holding `ordinal`.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal >= self.len()`.
    pub fn pos(&self, ordinal: usize) -> CellPos {
        self.cells[ordinal].pos
    }

    /// Iterate cells in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterate positions in ordinal order.
    pub fn positions(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.cells.iter().map(|c| c.pos)
    }

    /// Occupied in-bounds orthogonal neighbours of `pos`, in
    /// [`Direction::ALL`] order. `pos` itself need not be occupied.
    pub fn neighbors(&self, pos: CellPos) -> impl Iterator<Item = CellPos> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            let candidate = pos.offset(dir.offset())?;
            (candidate.in_bounds(self.world_size) && self.contains(candidate)).then_some(candidate)
        })
    }
}

// ---------------------------------------------------------------------------
// Adjacency
// ---------------------------------------------------------------------------

/// Resolved neighbour ordinals for every cell of a [`GridIndex`].
///
/// Stored as compressed rows: the neighbours of ordinal `i` are
/// `targets[offsets[i]..offsets[i + 1]]`, in [`Direction::ALL`] order.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl Adjacency {
    /// Resolve neighbours of every indexed cell.
    pub fn build(index: &GridIndex) -> Self {
        let mut offsets = Vec::with_capacity(index.len() + 1);
        let mut targets = Vec::with_capacity(index.len() * 2);

        offsets.push(0);
        for pos in index.positions() {
            targets.extend(index.neighbors(pos).filter_map(|n| index.ordinal(n)));
            offsets.push(targets.len());
        }

        Self { offsets, targets }
    }

    /// Number of rows (equals the index length).
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neighbour ordinals of `ordinal`. Empty for unknown ordinals.
    pub fn neighbors(&self, ordinal: usize) -> &[usize] {
        match (self.offsets.get(ordinal), self.offsets.get(ordinal + 1)) {
            (Some(&start), Some(&end)) => &self.targets[start..end],
            _ => &[],
        }
    }

    /// Number of occupied neighbours of `ordinal` (0 to 6).
    pub fn degree(&self, ordinal: usize) -> usize {
        self.neighbors(ordinal).len()
    }

    /// Number of undirected edges: neighbour pairs that list each other.
    ///
    /// A cell outside the world bound still lists its in-bounds neighbours,
    /// but they never list it back, so such one-way links are not counted.
    pub fn edge_count(&self) -> usize {
        (0..self.len())
            .map(|from| {
                self.neighbors(from)
                    .iter()
                    .filter(|&&to| from < to && self.neighbors(to).contains(&from))
                    .count()
            })
            .sum()
    }
}
