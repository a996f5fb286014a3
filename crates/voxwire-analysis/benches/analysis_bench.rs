//! Criterion benchmarks for the circuit analysis pass.
//!
//! Benchmark groups:
//! - `full_tick`: one complete `analyze` call on a 12x12x12 solid block and
//!   on a long serpentine wire.
//! - `depth`: exhaustive vs double-sweep depth profiling on the same block.
//! - `loops`: loop detection on a dense block (many back-edges).

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use voxwire_analysis::depth::{DepthStrategy, profile_depth};
use voxwire_analysis::loops::detect_loops;
use voxwire_analysis::{AnalysisConfig, CircuitAnalyzer};
use voxwire_core::cell::Cell;
use voxwire_core::grid::{Adjacency, GridIndex};
use voxwire_core::test_utils::*;

// ===========================================================================
// World builders
// ===========================================================================

/// A wire snaking back and forth across a `width` x `rows` plane, joined at
/// alternating ends so it forms one long acyclic path.
fn serpentine(width: i32, rows: i32) -> Vec<Cell> {
    let mut cells = Vec::new();
    for row in 0..rows {
        let y = row * 2;
        for x in 0..width {
            cells.push(cell(x, y, 0));
        }
        if row + 1 < rows {
            let joint_x = if row % 2 == 0 { width - 1 } else { 0 };
            cells.push(cell(joint_x, y + 1, 0));
        }
    }
    cells
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_full_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_tick");
    group.sample_size(20);

    let block = solid_cube(12);
    group.bench_function("solid_block_1728_cells", |b| {
        let mut analyzer = CircuitAnalyzer::new(AnalysisConfig {
            depth_strategy: DepthStrategy::DoubleSweep,
            ..Default::default()
        })
        .unwrap();
        b.iter(|| {
            black_box(analyzer.analyze(block.iter().copied(), 12).loops.len());
        });
    });

    let wire = serpentine(64, 16);
    group.bench_function("serpentine_wire", |b| {
        let mut analyzer = CircuitAnalyzer::default();
        b.iter(|| {
            black_box(analyzer.analyze(wire.iter().copied(), 64).depth.max_depth);
        });
    });

    group.finish();
}

fn bench_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth");
    group.sample_size(10);

    let index = GridIndex::build(solid_cube(10), 10);
    let adjacency = Adjacency::build(&index);

    group.bench_function("exhaustive_1000_cells", |b| {
        b.iter(|| black_box(profile_depth(&index, &adjacency, DepthStrategy::Exhaustive)));
    });
    group.bench_function("double_sweep_1000_cells", |b| {
        b.iter(|| black_box(profile_depth(&index, &adjacency, DepthStrategy::DoubleSweep)));
    });

    group.finish();
}

fn bench_loops(c: &mut Criterion) {
    let index = GridIndex::build(solid_cube(16), 16);
    let adjacency = Adjacency::build(&index);

    c.bench_function("loops_solid_4096_cells", |b| {
        b.iter(|| black_box(detect_loops(&index, &adjacency).len()));
    });
}

criterion_group!(benches, bench_full_tick, bench_depth, bench_loops);
criterion_main!(benches);
