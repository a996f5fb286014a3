use voxwire_core::grid::{Adjacency, GridIndex};

use crate::result::FanoutInfo;

/// Occupied orthogonal neighbour count of every indexed cell, highest first.
///
/// The sort is stable, so cells with equal fan-out keep index order.
pub fn rank_fanout(index: &GridIndex, adjacency: &Adjacency) -> Vec<FanoutInfo> {
    let mut ranked: Vec<FanoutInfo> = index
        .positions()
        .enumerate()
        .map(|(ordinal, cell)| FanoutInfo {
            cell,
            // At most six neighbours exist.
            fanout: adjacency.degree(ordinal) as u8,
        })
        .collect();
    ranked.sort_by(|a, b| b.fanout.cmp(&a.fanout));
    ranked
}
