//! Voxwire Core -- shared vocabulary for analysing voxel logic circuits.
//!
//! This crate holds the pieces every analysis pass depends on: cell
//! coordinates, the per-tick grid index and adjacency resolver, the seams to
//! the external simulation (world reads and tick notifications), and the
//! synchronous publisher that broadcasts results.
//!
//! # Key Types
//!
//! - [`id::CellPos`] -- Hashable `(x, y, z)` cell coordinate.
//! - [`cell::Cell`] -- An occupied cell and its powered flag.
//! - [`grid::GridIndex`] -- Coordinate lookup built fresh each tick.
//! - [`grid::Adjacency`] -- Occupied orthogonal neighbours per indexed cell.
//! - [`world::VoxelWorld`] / [`world::TickNotifier`] -- Collaborator traits.
//! - [`event::Publisher`] -- Ordered listeners with panic isolation.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for deterministic ratios.

pub mod cell;
pub mod event;
pub mod fixed;
pub mod grid;
pub mod id;
pub mod world;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
