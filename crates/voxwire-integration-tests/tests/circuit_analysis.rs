//! End-to-end tests for the analysis engine driven through its collaborator
//! seams: a world read through `VoxelWorld`, ticks delivered by a
//! `TickNotifier`, and results observed by subscribed listeners.

use std::cell::RefCell;
use std::rc::Rc;

use voxwire_analysis::bridge::{SharedAnalyzer, attach};
use voxwire_analysis::{AnalysisConfig, AnalysisResult, CircuitAnalyzer, DepthStrategy};
use voxwire_core::fixed::{Fixed64, fixed64_to_f64};
use voxwire_core::id::CellPos;
use voxwire_core::test_utils::*;
use voxwire_core::world::{MemoryWorld, TickDispatcher};

// ============================================================================
// Shared helpers
// ============================================================================

/// A dispatcher wired to a fresh analyzer over `world`.
fn wired(world: &Rc<MemoryWorld>, config: AnalysisConfig) -> (TickDispatcher, SharedAnalyzer) {
    let mut dispatcher = TickDispatcher::new();
    let analyzer = Rc::new(RefCell::new(CircuitAnalyzer::new(config).unwrap()));
    attach(&mut dispatcher, analyzer.clone(), world.clone());
    (dispatcher, analyzer)
}

/// Collect every published result.
fn record(analyzer: &SharedAnalyzer) -> Rc<RefCell<Vec<AnalysisResult>>> {
    let results = Rc::new(RefCell::new(Vec::new()));
    let sink = results.clone();
    analyzer
        .borrow()
        .subscribe(move |r| sink.borrow_mut().push(r.clone()));
    results
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn ring_reports_four_cycle() {
    let world = Rc::new(MemoryWorld::with_cells(8, ring_cells()));
    let (mut dispatcher, analyzer) = wired(&world, AnalysisConfig::default());
    let results = record(&analyzer);

    dispatcher.fire();

    let results = results.borrow();
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.tick, 1);
    assert!(result.loops.iter().any(|l| l.length == 4));
    assert!(result.fanout.iter().all(|f| f.fanout == 2));
    assert_eq!(result.depth.max_depth, 2);
}

#[test]
fn breaking_the_ring_clears_loops() {
    let world = Rc::new(MemoryWorld::with_cells(8, ring_cells()));
    let (mut dispatcher, analyzer) = wired(&world, AnalysisConfig::default());

    dispatcher.fire();
    assert_eq!(analyzer.borrow().last_result().unwrap().loops.len(), 1);

    world.remove(pos(1, 1, 0));
    dispatcher.fire();
    let analyzer = analyzer.borrow();
    let result = analyzer.last_result().unwrap();
    assert!(result.loops.is_empty());
    assert_eq!(result.depth.max_depth, 2);
    assert_eq!(result.fanout_of(pos(0, 0, 0)), Some(2));
}

#[test]
fn isolated_and_surrounded_fanout() {
    let world = Rc::new(MemoryWorld::with_cells(8, plus_cells()));
    world.place(cell(6, 6, 6));
    let mut analyzer = CircuitAnalyzer::default();

    let result = analyzer.refresh(world.as_ref());
    assert_eq!(result.fanout[0].cell, pos(1, 1, 1));
    assert_eq!(result.fanout[0].fanout, 6);
    assert_eq!(result.fanout_of(pos(6, 6, 6)), Some(0));
    assert_eq!(result.fanout.last().map(|f| f.fanout), Some(0));
}

#[test]
fn single_cell_world_has_zero_depth() {
    let world = MemoryWorld::with_cells(4, vec![cell(3, 3, 3)]);
    let result = CircuitAnalyzer::default().refresh(&world).clone();
    assert_eq!(result.depth.max_depth, 0);
    assert_eq!(result.depth.deepest_node, Some(CellPos::new(3, 3, 3)));
    assert!(result.loops.is_empty());
}

#[test]
fn strategies_agree_on_a_wire() {
    let cells = line_cells(10);
    let mut exact = CircuitAnalyzer::default();
    let mut swept = CircuitAnalyzer::new(AnalysisConfig {
        depth_strategy: DepthStrategy::DoubleSweep,
        ..Default::default()
    })
    .unwrap();

    let a = exact.analyze(cells.clone(), 16).depth;
    let b = swept.analyze(cells, 16).depth;
    assert_eq!(a.max_depth, 9);
    assert_eq!(b.max_depth, 9);
}

// ============================================================================
// Oscillation over time
// ============================================================================

#[test]
fn alternating_cell_over_thirty_two_ticks() {
    let blinker = pos(2, 0, 0);
    let world = Rc::new(MemoryWorld::with_cells(8, line_cells(4)));
    let (mut dispatcher, analyzer) = wired(&world, AnalysisConfig::default());
    let results = record(&analyzer);

    for tick in 0..32u64 {
        world.set_powered(blinker, square_wave(tick, 1));
        dispatcher.fire();
    }

    let results = results.borrow();
    assert_eq!(results.len(), 32);

    // Cold start: nothing until the window holds 32 entries.
    assert!(results[..31].iter().all(|r| r.oscillations.is_empty()));

    let last = &results[31];
    assert_eq!(last.oscillations.len(), 1);
    let osc = last.oscillation_of(blinker).unwrap();
    assert_eq!(osc.period, 2);
    assert_eq!(osc.toggles, 31);
    assert_eq!(osc.frequency, Fixed64::from_num(31) / Fixed64::from_num(32));
    assert!((fixed64_to_f64(osc.frequency) - 31.0 / 32.0).abs() < 1e-9);
}

#[test]
fn oscillator_fades_after_it_stops() {
    let blinker = pos(0, 0, 0);
    let world = Rc::new(MemoryWorld::with_cells(4, vec![cell(0, 0, 0)]));
    let config = AnalysisConfig {
        history_capacity: 8,
        ..Default::default()
    };
    let (mut dispatcher, analyzer) = wired(&world, config);

    for tick in 0..8u64 {
        world.set_powered(blinker, square_wave(tick, 1));
        dispatcher.fire();
    }
    assert!(!analyzer.borrow().last_result().unwrap().oscillations.is_empty());

    // Hold steady until fewer than four transitions remain in the window.
    world.set_powered(blinker, false);
    for _ in 0..8 {
        dispatcher.fire();
    }
    assert!(analyzer.borrow().last_result().unwrap().oscillations.is_empty());
    assert_eq!(analyzer.borrow().history().len(), 8);
}

// ============================================================================
// Listener contract
// ============================================================================

#[test]
fn panicking_listener_does_not_block_later_ones() {
    let world = Rc::new(MemoryWorld::with_cells(8, ring_cells()));
    let (mut dispatcher, analyzer) = wired(&world, AnalysisConfig::default());

    analyzer.borrow().subscribe(|_| panic!("listener failure"));
    let results = record(&analyzer);

    dispatcher.fire();
    dispatcher.fire();

    assert_eq!(results.borrow().len(), 2);
    assert_eq!(analyzer.borrow().tick(), 2);
}

#[test]
fn unsubscribe_during_publish() {
    let world = Rc::new(MemoryWorld::with_cells(8, line_cells(3)));
    let (mut dispatcher, analyzer) = wired(&world, AnalysisConfig::default());
    let calls = Rc::new(RefCell::new(Vec::new()));

    // Listener 'a' removes itself on its first call.
    let publisher = analyzer.borrow().publisher().clone();
    let own_id = Rc::new(RefCell::new(None));
    let (sink, id_slot) = (calls.clone(), own_id.clone());
    let a = analyzer.borrow().subscribe(move |_| {
        sink.borrow_mut().push('a');
        if let Some(id) = *id_slot.borrow() {
            publisher.unsubscribe(id);
        }
    });
    *own_id.borrow_mut() = Some(a.id());

    for tag in ['b', 'c'] {
        let sink = calls.clone();
        analyzer.borrow().subscribe(move |_| sink.borrow_mut().push(tag));
    }

    dispatcher.fire();
    dispatcher.fire();

    assert_eq!(*calls.borrow(), vec!['a', 'b', 'c', 'b', 'c']);
    assert!(!a.is_active());
}

#[test]
fn results_serialize_for_ui_collaborators() {
    let world = MemoryWorld::with_cells(8, ring_cells());
    let mut analyzer = CircuitAnalyzer::default();
    let result = analyzer.refresh(&world);

    let json = serde_json::to_value(result).unwrap();
    assert_eq!(json["tick"], 1);
    assert_eq!(json["loops"][0]["length"], 4);
    assert_eq!(json["depth"]["max_depth"], 2);
}
