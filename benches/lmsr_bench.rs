//! LMSR Pricing Benchmarks — Hot-Path Performance Validation
//!
//! Benchmarks the kernel functions the trading service calls on every
//! trade request, plus the bisection solver worst case.
//!
//! Run with: cargo bench --bench lmsr_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal_macros::dec;

use lmsr_engine::domain::lmsr::LmsrModel;
use lmsr_engine::usecases::admission::AdmissionChecker;
use lmsr_engine::usecases::solver::ShareEstimator;

/// Benchmark the cost function for a binary market.
fn bench_cost_binary(c: &mut Criterion) {
    let model = LmsrModel::new(dec!(100)).unwrap();
    let q = [dec!(60), dec!(40)];

    c.bench_function("lmsr_cost_binary", |b| {
        b.iter(|| model.cost(black_box(&q)));
    });
}

/// Benchmark the bounded price vector for a five-outcome market.
fn bench_prices_five_outcomes(c: &mut Criterion) {
    let model = LmsrModel::new(dec!(100)).unwrap();
    let q = [dec!(10), dec!(20), dec!(30), dec!(40), dec!(50)];

    c.bench_function("lmsr_prices_5_outcomes", |b| {
        b.iter(|| model.prices(black_box(&q), black_box(true)));
    });
}

/// Benchmark trade cost (buy 10 shares).
fn bench_trade_cost(c: &mut Criterion) {
    let model = LmsrModel::new(dec!(100)).unwrap();
    let q = [dec!(60), dec!(40)];

    c.bench_function("lmsr_trade_cost_10_shares", |b| {
        b.iter(|| model.trade_cost(black_box(&q), black_box(0), black_box(dec!(10))));
    });
}

/// Benchmark the admission check on an allowed trade.
fn bench_admission(c: &mut Criterion) {
    let checker = AdmissionChecker::new(LmsrModel::new(dec!(100)).unwrap());
    let q = [dec!(60), dec!(40)];

    c.bench_function("admission_check_allowed", |b| {
        b.iter(|| checker.is_trade_allowed(black_box(&q), black_box(0), black_box(dec!(10))));
    });
}

/// Benchmark the inverse solver at the full 50-iteration budget.
fn bench_shares_for_cost(c: &mut Criterion) {
    let estimator = ShareEstimator::new(LmsrModel::new(dec!(100)).unwrap());
    let q = [dec!(0), dec!(0)];

    c.bench_function("solver_shares_for_cost", |b| {
        b.iter(|| estimator.shares_for_cost(black_box(&q), black_box(0), black_box(dec!(10))));
    });
}

criterion_group!(
    benches,
    bench_cost_binary,
    bench_prices_five_outcomes,
    bench_trade_cost,
    bench_admission,
    bench_shares_for_cost,
);
criterion_main!(benches);
