//! Oscillation detection over the powered-state history window.

use std::collections::BTreeSet;

use voxwire_core::fixed::{Fixed64, Ticks, ratio};
use voxwire_core::id::CellPos;

use crate::history::HistoryBuffer;
use crate::result::OscillationInfo;

/// Default minimum transitions for a cell to count as oscillating.
pub const DEFAULT_MIN_TOGGLES: u32 = 4;

/// Two toggles make one full on/off cycle.
const TOGGLES_PER_CYCLE: u64 = 2;

/// Report every cell whose powered state changed at least `min_toggles`
/// times across the window.
///
/// Returns nothing until the history is full. Positions are taken from the
/// union of every snapshot, so a cell that appears or disappears mid-window
/// is still inspected; its absence counts as a state of its own. Output is
/// ordered by position.
pub fn detect_oscillations(history: &HistoryBuffer, min_toggles: u32) -> Vec<OscillationInfo> {
    if !history.is_full() {
        return Vec::new();
    }

    let window = history.len() as u64;
    let positions: BTreeSet<CellPos> = history.iter().flat_map(|s| s.positions()).collect();

    positions
        .into_iter()
        .filter_map(|cell| {
            let toggles = count_toggles(history, cell);
            if toggles == 0 || toggles < min_toggles {
                return None;
            }
            let frequency = ratio(u64::from(toggles), window).unwrap_or(Fixed64::ZERO);
            let period: Ticks = TOGGLES_PER_CYCLE * window / u64::from(toggles);
            Some(OscillationInfo {
                cell,
                frequency,
                period,
                toggles,
            })
        })
        .collect()
}

/// Transitions of `cell` between consecutive snapshots, oldest first.
fn count_toggles(history: &HistoryBuffer, cell: CellPos) -> u32 {
    let mut states = history.iter().map(|s| s.get(cell));
    let Some(mut previous) = states.next() else {
        return 0;
    };

    let mut toggles = 0;
    for state in states {
        if state != previous {
            toggles += 1;
        }
        previous = state;
    }
    toggles
}
