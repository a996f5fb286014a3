//! Collaborator seams: the simulated world the analysis reads, and the tick
//! notification that tells it when to read.

use std::cell::RefCell;

use crate::cell::Cell;
use crate::id::CellPos;

// ---------------------------------------------------------------------------
// VoxelWorld
// ---------------------------------------------------------------------------

/// Read-only view of the simulated voxel world.
pub trait VoxelWorld {
    /// Shared bound for all three axes: valid cells lie in `[0, world_size)`.
    fn world_size(&self) -> i32;

    /// Every occupied cell with its current powered state. Read once per tick.
    fn cells(&self) -> Vec<Cell>;
}

impl<W: VoxelWorld + ?Sized> VoxelWorld for RefCell<W> {
    fn world_size(&self) -> i32 {
        self.borrow().world_size()
    }

    fn cells(&self) -> Vec<Cell> {
        self.borrow().cells()
    }
}

impl<W: VoxelWorld + ?Sized> VoxelWorld for &W {
    fn world_size(&self) -> i32 {
        (**self).world_size()
    }

    fn cells(&self) -> Vec<Cell> {
        (**self).cells()
    }
}

/// A world held entirely in memory, for replaying captured snapshots and
/// driving the analysis without a live simulation.
///
/// Mutators take `&self` so the world can be shared behind an `Rc` with a
/// tick bridge while a driver edits it between ticks.
#[derive(Debug, Default)]
pub struct MemoryWorld {
    world_size: i32,
    cells: RefCell<Vec<Cell>>,
}

impl MemoryWorld {
    pub fn new(world_size: i32) -> Self {
        Self {
            world_size,
            cells: RefCell::new(Vec::new()),
        }
    }

    pub fn with_cells(world_size: i32, cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            world_size,
            cells: RefCell::new(cells.into_iter().collect()),
        }
    }

    /// Replace every cell.
    pub fn replace(&self, cells: impl IntoIterator<Item = Cell>) {
        *self.cells.borrow_mut() = cells.into_iter().collect();
    }

    /// Add a cell, or overwrite the cell already at its position.
    pub fn place(&self, cell: Cell) {
        let mut cells = self.cells.borrow_mut();
        match cells.iter_mut().find(|c| c.pos == cell.pos) {
            Some(existing) => *existing = cell,
            None => cells.push(cell),
        }
    }

    /// Remove the cell at `pos`. Returns it if present.
    pub fn remove(&self, pos: CellPos) -> Option<Cell> {
        let mut cells = self.cells.borrow_mut();
        let idx = cells.iter().position(|c| c.pos == pos)?;
        Some(cells.remove(idx))
    }

    /// Set the powered flag at `pos`. Returns false if the position is empty.
    pub fn set_powered(&self, pos: CellPos, powered: bool) -> bool {
        match self.cells.borrow_mut().iter_mut().find(|c| c.pos == pos) {
            Some(cell) => {
                cell.powered = powered;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.borrow().is_empty()
    }
}

impl VoxelWorld for MemoryWorld {
    fn world_size(&self) -> i32 {
        self.world_size
    }

    fn cells(&self) -> Vec<Cell> {
        self.cells.borrow().clone()
    }
}

// ---------------------------------------------------------------------------
// Tick notification
// ---------------------------------------------------------------------------

/// Callback fired after each simulation step. Carries no payload: it only
/// signals that the world should be re-read.
pub type TickCallback = Box<dyn FnMut()>;

/// Source of "simulation advanced" notifications.
pub trait TickNotifier {
    fn on_tick(&mut self, callback: TickCallback);
}

/// A synchronous [`TickNotifier`]: [`fire`](Self::fire) runs every callback
/// in registration order on the caller's thread.
#[derive(Default)]
pub struct TickDispatcher {
    callbacks: Vec<TickCallback>,
    fired: u64,
}

impl std::fmt::Debug for TickDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickDispatcher")
            .field("callbacks", &self.callbacks.len())
            .field("fired", &self.fired)
            .finish()
    }
}

impl TickDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify every callback once.
    pub fn fire(&mut self) {
        self.fired += 1;
        for callback in &mut self.callbacks {
            callback();
        }
    }

    /// Number of notifications sent so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }
}

impl TickNotifier for TickDispatcher {
    fn on_tick(&mut self, callback: TickCallback) {
        self.callbacks.push(callback);
    }
}
