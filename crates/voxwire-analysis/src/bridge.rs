//! Wiring between a [`TickNotifier`] and a shared [`CircuitAnalyzer`].
//!
//! [`attach`] registers a tick callback that re-reads the world and runs one
//! analysis pass, so results follow the simulation without the caller
//! driving the engine by hand.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use voxwire_core::world::{TickNotifier, VoxelWorld};

use crate::engine::CircuitAnalyzer;

/// An analyzer shared between the tick callback and its owner.
pub type SharedAnalyzer = Rc<RefCell<CircuitAnalyzer>>;

/// Refresh `analyzer` from `world` on every tick `notifier` reports.
///
/// If a tick arrives while the analyzer is already borrowed (for example a
/// listener that steps the simulation), that tick is skipped with a warning
/// rather than panicking.
pub fn attach<N, W>(notifier: &mut N, analyzer: SharedAnalyzer, world: Rc<W>)
where
    N: TickNotifier + ?Sized,
    W: VoxelWorld + ?Sized + 'static,
{
    notifier.on_tick(Box::new(move || {
        let Ok(mut analyzer) = analyzer.try_borrow_mut() else {
            warn!("analyzer busy; skipping re-entrant tick");
            return;
        };
        analyzer.refresh(world.as_ref());
    }));
}
