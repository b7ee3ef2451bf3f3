// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — SGD Engine Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for every hot-path component:
//!   - Hyperplane dot products
//!   - Term evaluation and gradient
//!   - Aggregate objective
//!   - Serial epochs and full runs
//!   - Hogwild epochs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hlmrf_sgd::{
    Hyperplane, HingeLossTerm, ObjectiveTerm, SgdReasoner, SquaredHingeLossTerm, VariableStore,
};
use hlmrf_types::{Scheduler, SgdConfig};

const VARIABLES: usize = 1_000;
const TERMS: usize = 4_000;

// ── Helpers ───────────────────────────────────────────────────────────

fn make_values() -> Vec<f32> {
    (0..VARIABLES)
        .map(|i| ((i as f32 * 0.37).sin() * 0.5 + 0.5).clamp(0.0, 1.0))
        .collect()
}

/// Deterministic population of binary-rule hinge terms: roughly the shape
/// grounding produces for pairwise relational rules.
fn make_terms(count: usize) -> Vec<Box<dyn ObjectiveTerm>> {
    (0..count)
        .map(|t| {
            let a = (t * 7) % VARIABLES;
            let b = (t * 13 + 1) % VARIABLES;
            let (a, b) = if a == b { (a, (b + 1) % VARIABLES) } else { (a, b) };
            let constant = ((t as f32 * 0.11).sin() * 0.4).abs();
            let term: Box<dyn ObjectiveTerm> = if t % 3 == 0 {
                Box::new(
                    SquaredHingeLossTerm::new(
                        Hyperplane::new(&[(a, 1.0), (b, -1.0)], constant).unwrap(),
                        1.0,
                        1.0,
                    )
                    .unwrap(),
                )
            } else {
                Box::new(
                    HingeLossTerm::new(
                        Hyperplane::new(&[(a, 1.0), (b, -1.0)], constant).unwrap(),
                        1.0,
                        1.0,
                    )
                    .unwrap(),
                )
            };
            term
        })
        .collect()
}

fn make_store() -> VariableStore {
    VariableStore::from_values(make_values()).unwrap()
}

// ── Hyperplane benchmarks ────────────────────────────────────────────

fn bench_hyperplane_dot(c: &mut Criterion) {
    let hp = Hyperplane::new(&[(0, 1.0), (500, -1.0), (999, 0.5)], 0.25).unwrap();
    let values = make_values();
    c.bench_function("hyperplane_dot_3var", |b| {
        b.iter(|| hp.dot(black_box(&values)))
    });
}

// ── Term benchmarks ──────────────────────────────────────────────────

fn bench_term_evaluate(c: &mut Criterion) {
    let term =
        HingeLossTerm::new(Hyperplane::new(&[(0, 1.0), (1, -1.0)], 0.1).unwrap(), 1.0, 1.0)
            .unwrap();
    let store = make_store();
    c.bench_function("hinge_evaluate", |b| {
        b.iter(|| term.evaluate(black_box(&store)))
    });
}

fn bench_term_gradient(c: &mut Criterion) {
    let term =
        HingeLossTerm::new(Hyperplane::new(&[(0, 1.0), (1, -1.0)], 0.1).unwrap(), 1.0, 1.0)
            .unwrap();
    c.bench_function("hinge_gradient", |b| {
        b.iter(|| term.gradient(black_box(17), 0, black_box(0.4)))
    });
}

// ── Objective benchmarks ─────────────────────────────────────────────

fn bench_objective_4k_terms(c: &mut Criterion) {
    let reasoner = SgdReasoner::new(make_terms(TERMS), SgdConfig::default()).unwrap();
    let store = make_store();
    c.bench_function("objective_4k_terms", |b| {
        b.iter(|| reasoner.objective(black_box(&store)))
    });
}

// ── Reasoner benchmarks ──────────────────────────────────────────────

fn bench_serial_epoch(c: &mut Criterion) {
    let mut reasoner = SgdReasoner::new(make_terms(TERMS), SgdConfig::default()).unwrap();
    let mut store = make_store();
    c.bench_function("serial_epoch_4k_terms", |b| {
        b.iter(|| reasoner.run(black_box(&mut store), 1, 1e-12).unwrap())
    });
}

fn bench_serial_full_run(c: &mut Criterion) {
    let mut reasoner = SgdReasoner::new(make_terms(TERMS), SgdConfig::default()).unwrap();
    c.bench_function("serial_run_50_epochs_4k_terms", |b| {
        b.iter(|| {
            let mut store = make_store();
            // Fresh store, fresh schedule: every iteration measures the
            // same full run.
            reasoner.reset_schedule();
            reasoner.run(black_box(&mut store), 50, 1e-5).unwrap()
        })
    });
}

fn bench_hogwild_epoch(c: &mut Criterion) {
    let config = SgdConfig {
        scheduler: Scheduler::Hogwild { workers: 4 },
        ..SgdConfig::default()
    };
    let mut reasoner = SgdReasoner::new(make_terms(TERMS), config).unwrap();
    let mut store = make_store();
    c.bench_function("hogwild_epoch_4k_terms_4_workers", |b| {
        b.iter(|| reasoner.run(black_box(&mut store), 1, 1e-12).unwrap())
    });
}

// ── Groups ───────────────────────────────────────────────────────────

criterion_group!(hyperplane, bench_hyperplane_dot);

criterion_group!(terms, bench_term_evaluate, bench_term_gradient);

criterion_group!(
    reasoner,
    bench_objective_4k_terms,
    bench_serial_epoch,
    bench_serial_full_run,
    bench_hogwild_epoch,
);

criterion_main!(hyperplane, terms, reasoner);
