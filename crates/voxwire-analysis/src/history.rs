//! Sliding window of per-tick powered states.

use std::collections::{BTreeMap, VecDeque};

use voxwire_core::grid::GridIndex;
use voxwire_core::id::CellPos;

/// Default number of ticks retained.
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

// ---------------------------------------------------------------------------
// PoweredSnapshot
// ---------------------------------------------------------------------------

/// Powered flag of every occupied cell at one tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PoweredSnapshot {
    states: BTreeMap<CellPos, bool>,
}

impl PoweredSnapshot {
    pub fn from_index(index: &GridIndex) -> Self {
        Self {
            states: index.iter().map(|c| (c.pos, c.powered)).collect(),
        }
    }

    /// Powered flag at `pos`, or `None` if the position was empty that tick.
    pub fn get(&self, pos: CellPos) -> Option<bool> {
        self.states.get(&pos).copied()
    }

    /// Occupied positions, in coordinate order.
    pub fn positions(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.states.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<(CellPos, bool)> for PoweredSnapshot {
    fn from_iter<I: IntoIterator<Item = (CellPos, bool)>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// HistoryBuffer
// ---------------------------------------------------------------------------

/// A fixed-capacity FIFO of [`PoweredSnapshot`]s.
///
/// When full, pushing evicts the oldest snapshot. Iterates oldest-to-newest.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<PoweredSnapshot>,
    capacity: usize,
    /// Total snapshots ever pushed (including evicted).
    total_pushed: u64,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    /// Create a new buffer with the given capacity.
    /// A capacity of 0 is clamped to 1. Storage grows on demand past the
    /// default window.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
            total_pushed: 0,
        }
    }

    /// Append a snapshot, returning the evicted oldest one if at capacity.
    pub fn push(&mut self, snapshot: PoweredSnapshot) -> Option<PoweredSnapshot> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(snapshot);
        self.total_pushed += 1;
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of snapshots currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the window holds `capacity` snapshots.
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// The most recently pushed snapshot, if any.
    pub fn latest(&self) -> Option<&PoweredSnapshot> {
        self.entries.back()
    }

    /// Iterate snapshots from oldest to newest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PoweredSnapshot> + DoubleEndedIterator {
        self.entries.iter()
    }

    /// Total snapshots pushed since creation (including evicted).
    pub fn total_pushed(&self) -> u64 {
        self.total_pushed
    }

    /// Snapshots pushed but no longer stored.
    pub fn evicted_count(&self) -> u64 {
        self.total_pushed.saturating_sub(self.entries.len() as u64)
    }

    /// Drop every snapshot. `total_pushed` is a lifetime counter and is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
