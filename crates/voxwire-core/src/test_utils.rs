//! Shared fixtures for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::cell::Cell;
use crate::id::CellPos;

// ===========================================================================
// Cell constructors
// ===========================================================================

pub fn pos(x: i32, y: i32, z: i32) -> CellPos {
    CellPos::new(x, y, z)
}

/// An unpowered cell.
pub fn cell(x: i32, y: i32, z: i32) -> Cell {
    Cell::at(x, y, z)
}

/// A powered cell.
pub fn powered(x: i32, y: i32, z: i32) -> Cell {
    Cell::at(x, y, z).with_power(true)
}

// ===========================================================================
// Shapes
// ===========================================================================

/// Four cells closing a square loop in the z = 0 plane:
/// (0,0,0) -> (1,0,0) -> (1,1,0) -> (0,1,0).
pub fn ring_cells() -> Vec<Cell> {
    vec![cell(0, 0, 0), cell(1, 0, 0), cell(1, 1, 0), cell(0, 1, 0)]
}

/// A straight wire of `len` cells along +x from the origin.
pub fn line_cells(len: i32) -> Vec<Cell> {
    (0..len).map(|x| cell(x, 0, 0)).collect()
}

/// A closed rectangular loop of wire in the z = 0 plane, `width` by
/// `height` cells (both at least 2).
pub fn loop_cells(width: i32, height: i32) -> Vec<Cell> {
    let mut cells = Vec::new();
    for x in 0..width {
        cells.push(cell(x, 0, 0));
    }
    for y in 1..height {
        cells.push(cell(width - 1, y, 0));
    }
    for x in (0..width - 1).rev() {
        cells.push(cell(x, height - 1, 0));
    }
    for y in (1..height - 1).rev() {
        cells.push(cell(0, y, 0));
    }
    cells
}

/// An acyclic comb: a spine along x at y = 0 with teeth rising along +y from
/// every even x. Teeth are two apart, so they never touch each other.
pub fn comb_cells(spine: i32, tooth: i32) -> Vec<Cell> {
    let mut cells = line_cells(spine);
    for x in (0..spine).step_by(2) {
        for y in 1..=tooth {
            cells.push(cell(x, y, 0));
        }
    }
    cells
}

/// Every position of an `n` x `n` x `n` cube at the origin.
pub fn solid_cube(n: i32) -> Vec<Cell> {
    let mut cells = Vec::with_capacity((n * n * n).max(0) as usize);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                cells.push(cell(x, y, z));
            }
        }
    }
    cells
}

/// A centre cell at (1,1,1) with all six orthogonal neighbours occupied.
pub fn plus_cells() -> Vec<Cell> {
    let mut cells = vec![cell(1, 1, 1)];
    cells.extend(
        [
            (0, 1, 1),
            (2, 1, 1),
            (1, 0, 1),
            (1, 2, 1),
            (1, 1, 0),
            (1, 1, 2),
        ]
        .into_iter()
        .map(|(x, y, z)| cell(x, y, z)),
    );
    cells
}

// ===========================================================================
// Powered-state sequences
// ===========================================================================

/// Whether a square-wave cell with the given half-period is powered at `tick`.
pub fn square_wave(tick: u64, half_period: u64) -> bool {
    (tick / half_period.max(1)) % 2 == 0
}
