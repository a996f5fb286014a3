//! The per-tick analysis pipeline.
//!
//! [`CircuitAnalyzer`] owns everything that outlives a tick: configuration,
//! the powered-state history, the listener registry, a tick counter and the
//! last result. Each call to [`analyze`](CircuitAnalyzer::analyze) runs:
//!
//! 1. **Index** -- build a [`GridIndex`] from the reported cells.
//! 2. **Adjacency** -- resolve occupied neighbours once.
//! 3. **Loops** -- [`detect_loops`].
//! 4. **Fan-out** -- [`rank_fanout`].
//! 5. **Depth** -- [`profile_depth`] with the configured strategy.
//! 6. **History** -- append this tick's powered snapshot.
//! 7. **Oscillations** -- [`detect_oscillations`] over the updated window.
//! 8. **Publish** -- hand the assembled [`AnalysisResult`] to every listener.
//!
//! Instances are independent; nothing is global.

use tracing::{debug, debug_span};
use voxwire_core::cell::Cell;
use voxwire_core::event::{Publisher, Subscription};
use voxwire_core::fixed::Ticks;
use voxwire_core::grid::{Adjacency, GridIndex};
use voxwire_core::world::VoxelWorld;

use crate::config::{AnalysisConfig, ConfigError};
use crate::depth::profile_depth;
use crate::fanout::rank_fanout;
use crate::history::{HistoryBuffer, PoweredSnapshot};
use crate::loops::detect_loops;
use crate::oscillation::detect_oscillations;
use crate::result::AnalysisResult;

/// Stateful analysis engine. Single-threaded.
#[derive(Debug)]
pub struct CircuitAnalyzer {
    config: AnalysisConfig,
    history: HistoryBuffer,
    publisher: Publisher<AnalysisResult>,
    tick: Ticks,
    last_result: Option<AnalysisResult>,
}

impl Default for CircuitAnalyzer {
    fn default() -> Self {
        Self::with_valid_config(AnalysisConfig::default())
    }
}

impl CircuitAnalyzer {
    /// Create an engine after validating `config`.
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: AnalysisConfig) -> Self {
        Self {
            history: HistoryBuffer::new(config.history_capacity),
            config,
            publisher: Publisher::new(),
            tick: 0,
            last_result: None,
        }
    }

    /// Register a listener for every future result.
    pub fn subscribe(
        &self,
        listener: impl FnMut(&AnalysisResult) + 'static,
    ) -> Subscription<AnalysisResult> {
        self.publisher.subscribe(listener)
    }

    /// Handle to the result publisher, for managing listeners directly.
    pub fn publisher(&self) -> &Publisher<AnalysisResult> {
        &self.publisher
    }

    /// Read the world and analyse it.
    pub fn refresh<W: VoxelWorld + ?Sized>(&mut self, world: &W) -> &AnalysisResult {
        let world_size = world.world_size();
        self.analyze(world.cells(), world_size)
    }

    /// Analyse one tick's cells and publish the result.
    pub fn analyze(
        &mut self,
        cells: impl IntoIterator<Item = Cell>,
        world_size: i32,
    ) -> &AnalysisResult {
        let tick = self.tick + 1;
        let _span = debug_span!("analyze", tick).entered();

        let index = GridIndex::build(cells, world_size);
        let adjacency = Adjacency::build(&index);

        let loops = detect_loops(&index, &adjacency);
        let fanout = rank_fanout(&index, &adjacency);
        let depth = profile_depth(&index, &adjacency, self.config.depth_strategy);

        self.history.push(PoweredSnapshot::from_index(&index));
        let oscillations = detect_oscillations(&self.history, self.config.min_toggles);

        self.tick = tick;
        let result = AnalysisResult {
            tick,
            loops,
            oscillations,
            fanout,
            depth,
        };

        let report = self.publisher.publish(&result);
        debug!(
            cells = index.len(),
            edges = adjacency.edge_count(),
            loops = result.loops.len(),
            oscillators = result.oscillations.len(),
            max_depth = result.depth.max_depth,
            delivered = report.delivered,
            failed = report.failed,
            "analysis complete"
        );

        self.last_result.insert(result)
    }

    /// Powered-state window used for oscillation detection.
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// The most recent result, if any tick has been analysed since creation
    /// or the last [`reset`](Self::reset).
    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }

    /// Number of ticks analysed.
    pub fn tick(&self) -> Ticks {
        self.tick
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Forget all per-run state. Listeners stay registered.
    pub fn reset(&mut self) {
        self.history.clear();
        self.tick = 0;
        self.last_result = None;
    }
}
