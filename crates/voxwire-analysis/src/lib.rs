//! Voxwire Analysis -- per-tick structural analysis of voxel logic circuits.
//!
//! Given the occupied cells of a voxel world, the engine derives four
//! properties every tick and broadcasts them to listeners:
//!
//! - **Feedback loops**: cycles in the orthogonal adjacency graph.
//! - **Oscillators**: cells whose powered state toggles across a sliding
//!   window of recent ticks.
//! - **Fan-out**: occupied neighbour count per cell, highest first.
//! - **Propagation depth**: the largest shortest-path distance and the cell
//!   at its far end.
//!
//! The analysis never mutates the world and persists nothing.
//!
//! # Usage
//!
//! ```ignore
//! let mut analyzer = CircuitAnalyzer::new(AnalysisConfig::default())?;
//! let _sub = analyzer.subscribe(|result| println!("{} loops", result.loops.len()));
//! // Once per simulation tick:
//! analyzer.refresh(&world);
//! ```

pub mod bridge;
pub mod config;
pub mod depth;
pub mod engine;
pub mod fanout;
pub mod history;
pub mod loops;
pub mod oscillation;
pub mod result;

pub use config::{AnalysisConfig, ConfigError, Format};
pub use depth::DepthStrategy;
pub use engine::CircuitAnalyzer;
pub use history::{HistoryBuffer, PoweredSnapshot};
pub use result::{AnalysisResult, DepthInfo, FanoutInfo, LoopInfo, OscillationInfo};
