//! Propagation depth: the largest shortest-path distance between any two
//! connected cells, and the cell at its far end.
//!
//! Distances are hop counts over the orthogonal adjacency graph, computed by
//! breadth-first search. Two strategies are offered:
//!
//! - [`DepthStrategy::Exhaustive`] runs a BFS from every cell. Exact, but
//!   O(V·(V+E)).
//! - [`DepthStrategy::DoubleSweep`] runs two BFS passes per connected
//!   component (first cell, then the farthest cell found). O(V+E), exact on
//!   acyclic wiring and a lower bound otherwise.
//!
//! With the `parallel` feature, the exhaustive sweep over larger snapshots is
//! spread across the rayon pool. The reduction picks the same cell the
//! sequential sweep would.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use voxwire_core::grid::{Adjacency, GridIndex};

use crate::result::DepthInfo;

/// How [`profile_depth`] searches for the deepest cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthStrategy {
    /// BFS from every cell.
    #[default]
    Exhaustive,
    /// Two BFS passes per connected component.
    DoubleSweep,
}

/// Snapshots smaller than this are swept on the calling thread.
#[cfg(feature = "parallel")]
const PARALLEL_MIN_CELLS: usize = 256;

const UNSEEN: u32 = u32::MAX;

/// The farthest cell one BFS reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Farthest {
    node: usize,
    distance: u32,
}

/// Reusable BFS scratch space sized to one snapshot.
struct Bfs {
    dist: Vec<u32>,
    queue: VecDeque<usize>,
}

impl Bfs {
    fn new(len: usize) -> Self {
        Self {
            dist: vec![UNSEEN; len],
            queue: VecDeque::with_capacity(len),
        }
    }

    /// Search from `source`. The farthest cell is the first one discovered
    /// at the greatest distance.
    fn run(&mut self, adjacency: &Adjacency, source: usize) -> Farthest {
        self.dist.fill(UNSEEN);
        self.queue.clear();

        self.dist[source] = 0;
        self.queue.push_back(source);
        let mut farthest = Farthest {
            node: source,
            distance: 0,
        };

        while let Some(node) = self.queue.pop_front() {
            let next = self.dist[node] + 1;
            for &neighbor in adjacency.neighbors(node) {
                if self.dist[neighbor] != UNSEEN {
                    continue;
                }
                self.dist[neighbor] = next;
                if next > farthest.distance {
                    farthest = Farthest {
                        node: neighbor,
                        distance: next,
                    };
                }
                self.queue.push_back(neighbor);
            }
        }

        farthest
    }

    /// Whether the last search reached `node`.
    fn reached(&self, node: usize) -> bool {
        self.dist[node] != UNSEEN
    }
}

/// Find the deepest cell of the snapshot.
///
/// An empty snapshot yields depth 0 and no cell. A snapshot of isolated
/// cells yields depth 0 and its first cell. Among equally deep results the
/// one found from the earliest source in index order wins.
pub fn profile_depth(index: &GridIndex, adjacency: &Adjacency, strategy: DepthStrategy) -> DepthInfo {
    let best = match strategy {
        DepthStrategy::Exhaustive => exhaustive(adjacency),
        DepthStrategy::DoubleSweep => double_sweep(adjacency),
    };

    match best {
        Some(found) => DepthInfo {
            max_depth: found.distance,
            deepest_node: Some(index.pos(found.node)),
        },
        None => DepthInfo::default(),
    }
}

fn keep_deeper(best: &mut Option<Farthest>, candidate: Farthest) {
    if best.is_none_or(|b| candidate.distance > b.distance) {
        *best = Some(candidate);
    }
}

fn exhaustive_sequential(adjacency: &Adjacency) -> Option<Farthest> {
    let mut bfs = Bfs::new(adjacency.len());
    let mut best = None;
    for source in 0..adjacency.len() {
        keep_deeper(&mut best, bfs.run(adjacency, source));
    }
    best
}

#[cfg(not(feature = "parallel"))]
fn exhaustive(adjacency: &Adjacency) -> Option<Farthest> {
    exhaustive_sequential(adjacency)
}

#[cfg(feature = "parallel")]
fn exhaustive(adjacency: &Adjacency) -> Option<Farthest> {
    use rayon::prelude::*;

    let len = adjacency.len();
    if len < PARALLEL_MIN_CELLS {
        return exhaustive_sequential(adjacency);
    }

    (0..len)
        .into_par_iter()
        .map_init(
            || Bfs::new(len),
            |bfs, source| (source, bfs.run(adjacency, source)),
        )
        .reduce_with(|a, b| {
            // Deeper wins; equal depth goes to the earlier source.
            let b_wins = b.1.distance > a.1.distance || (b.1.distance == a.1.distance && b.0 < a.0);
            if b_wins { b } else { a }
        })
        .map(|(_, found)| found)
}

fn double_sweep(adjacency: &Adjacency) -> Option<Farthest> {
    let len = adjacency.len();
    let mut bfs = Bfs::new(len);
    let mut covered = vec![false; len];
    let mut best = None;

    for start in 0..len {
        if covered[start] {
            continue;
        }

        let first = bfs.run(adjacency, start);
        for (node, done) in covered.iter_mut().enumerate() {
            if bfs.reached(node) {
                *done = true;
            }
        }

        keep_deeper(&mut best, bfs.run(adjacency, first.node));
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxwire_core::cell::Cell;
    use voxwire_core::test_utils::*;

    fn depth(cells: Vec<Cell>, world_size: i32, strategy: DepthStrategy) -> DepthInfo {
        let index = GridIndex::build(cells, world_size);
        let adjacency = Adjacency::build(&index);
        profile_depth(&index, &adjacency, strategy)
    }

    fn exact(cells: Vec<Cell>, world_size: i32) -> DepthInfo {
        depth(cells, world_size, DepthStrategy::Exhaustive)
    }

    #[test]
    fn empty_world_has_no_deepest_node() {
        for strategy in [DepthStrategy::Exhaustive, DepthStrategy::DoubleSweep] {
            assert_eq!(depth(Vec::new(), 8, strategy), DepthInfo::default());
        }
    }

    #[test]
    fn single_cell_has_depth_zero() {
        let info = exact(vec![cell(2, 2, 2)], 8);
        assert_eq!(info.max_depth, 0);
        assert_eq!(info.deepest_node, Some(pos(2, 2, 2)));
    }

    #[test]
    fn isolated_cells_report_the_first() {
        let info = exact(vec![cell(4, 0, 0), cell(0, 0, 0)], 8);
        assert_eq!(info.max_depth, 0);
        assert_eq!(info.deepest_node, Some(pos(4, 0, 0)));
    }

    #[test]
    fn straight_wire_depth_is_its_length_minus_one() {
        let info = exact(line_cells(5), 8);
        assert_eq!(info.max_depth, 4);
        assert_eq!(info.deepest_node, Some(pos(4, 0, 0)));
    }

    #[test]
    fn ring_depth_is_half_its_perimeter() {
        let info = exact(ring_cells(), 8);
        assert_eq!(info.max_depth, 2);
        assert_eq!(info.deepest_node, Some(pos(1, 1, 0)));

        assert_eq!(exact(loop_cells(4, 4), 8).max_depth, 6);
    }

    #[test]
    fn plus_shape_depth() {
        let info = exact(plus_cells(), 3);
        assert_eq!(info.max_depth, 2);
        // The centre only reaches depth 1; the first arm reaches the opposite arm.
        assert_eq!(info.deepest_node, Some(pos(2, 1, 1)));
    }

    #[test]
    fn deepest_component_wins() {
        let mut cells = line_cells(3);
        cells.extend((0..6).map(|x| cell(x, 4, 0)));
        let info = exact(cells, 8);
        assert_eq!(info.max_depth, 5);
        assert_eq!(info.deepest_node, Some(pos(5, 4, 0)));
    }

    #[test]
    fn double_sweep_exact_on_acyclic_wiring() {
        for cells in [line_cells(7), comb_cells(9, 4)] {
            let swept = depth(cells.clone(), 16, DepthStrategy::DoubleSweep);
            assert_eq!(swept.max_depth, exact(cells, 16).max_depth);
        }
    }

    #[test]
    fn double_sweep_never_exceeds_exhaustive() {
        for cells in [solid_cube(3), loop_cells(5, 3), plus_cells()] {
            let swept = depth(cells.clone(), 8, DepthStrategy::DoubleSweep);
            let full = exact(cells, 8);
            assert!(swept.max_depth <= full.max_depth);
            assert!(swept.deepest_node.is_some());
        }
    }

    #[test]
    fn double_sweep_covers_every_component() {
        let mut cells = line_cells(2);
        cells.extend((0..5).map(|x| cell(x, 0, 3)));
        let info = depth(cells, 8, DepthStrategy::DoubleSweep);
        assert_eq!(info.max_depth, 4);
    }

    #[test]
    fn max_depth_below_cell_count() {
        for cells in [solid_cube(3), comb_cells(7, 3), loop_cells(3, 5)] {
            let count = cells.len() as u32;
            assert!(exact(cells, 8).max_depth < count);
        }
    }

    #[test]
    fn strategy_serializes_snake_case() {
        let json = serde_json::to_string(&DepthStrategy::DoubleSweep).unwrap();
        assert_eq!(json, "\"double_sweep\"");
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_sweep_matches_sequential() {
        let index = GridIndex::build(solid_cube(8), 8);
        let adjacency = Adjacency::build(&index);
        assert_eq!(exhaustive(&adjacency), exhaustive_sequential(&adjacency));
    }
}
