//! Blinker analysis example: loops, oscillators, fan-out and depth over time.
//!
//! Builds a small circuit (a clock cell, a wire, a latch ring and an output
//! branch), wires a `CircuitAnalyzer` to a tick dispatcher and toggles the
//! clock every tick. Once the history window fills, the clock shows up as an
//! oscillator. Halfway through, the latch ring is broken and the loop
//! disappears from the results.
//!
//! Run with: `cargo run -p voxwire-examples --example blinker_analysis`
//! (set `RUST_LOG=debug` to see per-tick engine summaries).

use std::rc::Rc;

use tracing::info;
use voxwire_analysis::bridge::{SharedAnalyzer, attach};
use voxwire_core::fixed::fixed64_to_f64;
use voxwire_core::id::CellPos;
use voxwire_core::world::TickDispatcher;
use voxwire_examples::{CLOCK, blinker_circuit, init_logging};

fn main() {
    init_logging("info");

    let world = Rc::new(blinker_circuit());
    let analyzer = SharedAnalyzer::default();
    let mut dispatcher = TickDispatcher::new();
    attach(&mut dispatcher, analyzer.clone(), world.clone());

    let _subscription = analyzer.borrow().subscribe(|result| {
        if result.tick % 8 != 0 {
            return;
        }
        let top = result.fanout.first();
        info!(
            tick = result.tick,
            loops = result.loops.len(),
            oscillators = result.oscillations.len(),
            max_depth = result.depth.max_depth,
            busiest = ?top.map(|f| (f.cell.to_string(), f.fanout)),
            "analysis"
        );
        for osc in &result.oscillations {
            info!(
                cell = %osc.cell,
                period = osc.period,
                frequency = fixed64_to_f64(osc.frequency),
                "oscillator"
            );
        }
    });

    for tick in 0..64u64 {
        world.set_powered(CLOCK, tick % 2 == 0);
        if tick == 40 {
            info!("breaking the latch ring at (6,1,0)");
            world.remove(CellPos::new(6, 1, 0));
        }
        dispatcher.fire();
    }

    let analyzer = analyzer.borrow();
    if let Some(last) = analyzer.last_result() {
        println!("\n=== After {} ticks ===", analyzer.tick());
        println!("Loops:        {}", last.loops.len());
        println!("Oscillators:  {}", last.oscillations.len());
        match last.depth.deepest_node {
            Some(cell) => println!("Max depth:    {} (ending at {cell})", last.depth.max_depth),
            None => println!("Max depth:    0 (empty world)"),
        }
        println!("Top fan-out:");
        for f in last.fanout.iter().take(3) {
            println!("  {}: {}", f.cell, f.fanout);
        }
    }
}
