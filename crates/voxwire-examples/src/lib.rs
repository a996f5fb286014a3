//! Shared setup for the runnable examples.

use tracing_subscriber::EnvFilter;
use voxwire_core::cell::Cell;
use voxwire_core::id::CellPos;
use voxwire_core::world::MemoryWorld;

/// Install a formatted `tracing` subscriber. `RUST_LOG` overrides
/// `default_filter`. Does nothing if a subscriber is already installed.
pub fn init_logging(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(true)
        .try_init();
}

/// The cell the blinker circuit toggles every tick.
pub const CLOCK: CellPos = CellPos::new(0, 0, 0);

/// A small circuit: a clock cell driving a wire that feeds a 3x3 latch
/// ring, with a branch leaving the ring upward.
pub fn blinker_circuit() -> MemoryWorld {
    let mut cells: Vec<Cell> = (0..4).map(|x| Cell::at(x, 0, 0)).collect();
    // Latch ring, entered at (4,0,0).
    for (x, y) in [(4, 0), (5, 0), (6, 0), (6, 1), (6, 2), (5, 2), (4, 2), (4, 1)] {
        cells.push(Cell::at(x, y, 0));
    }
    // Output branch.
    cells.extend((1..4).map(|z| Cell::at(5, 2, z)));
    MemoryWorld::with_cells(16, cells)
}
