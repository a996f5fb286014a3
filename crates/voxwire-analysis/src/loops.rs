//! Feedback loop detection over the cell adjacency graph.

use tracing::trace;
use voxwire_core::grid::{Adjacency, GridIndex};

use crate::result::LoopInfo;

/// One level of the explicit DFS stack.
struct Frame {
    node: usize,
    /// The node this one was reached from; the edge back to it is not a cycle.
    parent: Option<usize>,
    /// Next neighbour slot to examine.
    next: usize,
}

/// Find feedback loops with a depth-first search from every unvisited cell,
/// in index order.
///
/// When the walk reaches a neighbour that is already on the active path, the
/// path suffix starting at that neighbour is reported as a cycle. Each such
/// back-edge yields exactly one [`LoopInfo`]; overlapping cycles are not
/// merged and the rotation reported depends on neighbour order. The step
/// back to the immediate parent is ignored, so an acyclic snapshot reports
/// nothing.
///
/// Runs in O(V + E) plus the cost of copying reported cycles. Uses an
/// explicit stack, so deep wires cannot overflow the call stack.
pub fn detect_loops(index: &GridIndex, adjacency: &Adjacency) -> Vec<LoopInfo> {
    let n = index.len();
    let mut visited = vec![false; n];
    // Position of each node on the active path, if it is on it.
    let mut path_pos: Vec<Option<usize>> = vec![None; n];
    let mut path: Vec<usize> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut loops = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }

        visited[start] = true;
        path_pos[start] = Some(0);
        path.push(start);
        stack.push(Frame {
            node: start,
            parent: None,
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let Some(&neighbor) = adjacency.neighbors(frame.node).get(frame.next) else {
                // Every neighbour examined: leave the active path.
                let done = frame.node;
                stack.pop();
                path.pop();
                path_pos[done] = None;
                continue;
            };
            frame.next += 1;

            if Some(neighbor) == frame.parent {
                continue;
            }

            if let Some(at) = path_pos[neighbor] {
                let cycle = path[at..].iter().map(|&o| index.pos(o)).collect();
                let info = LoopInfo::new(cycle);
                trace!(length = info.length, entry = %info.cycle[0], "feedback loop");
                loops.push(info);
                continue;
            }

            if visited[neighbor] {
                continue;
            }

            let parent = frame.node;
            visited[neighbor] = true;
            path_pos[neighbor] = Some(path.len());
            path.push(neighbor);
            stack.push(Frame {
                node: neighbor,
                parent: Some(parent),
                next: 0,
            });
        }
    }

    loops
}
