// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BENCHMARK SUITE - oramm-pool
//
// Curve math and full staged engine operations.
// Run: cargo bench -p oramm-pool
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use oramm_ledger::{AssetLedger, FungibleLedger, LpShareLedger};
use oramm_oracle::FixedPriceOracle;
use oramm_pool::math;
use oramm_pool::{Asset, PoolConfig, PoolEngine};
use std::sync::Arc;

const E18: u128 = 1_000_000_000_000_000_000;

// ─────────────────────────────────────────────────────────────────
// MATH
// ─────────────────────────────────────────────────────────────────

fn bench_sqrt_product(c: &mut Criterion) {
    c.bench_function("math/sqrt_product", |b| {
        b.iter(|| math::sqrt_product(black_box(1_000 * E18), black_box(2_000 * E18)))
    });
}

fn bench_curve(c: &mut Criterion) {
    c.bench_function("math/constant_product_out", |b| {
        b.iter(|| {
            let (net, _) = math::apply_fee(black_box(E18), 30).unwrap();
            math::constant_product_out(net, black_box(1_000 * E18), black_box(2_000 * E18))
        })
    });
    c.bench_function("math/constant_product_in", |b| {
        b.iter(|| math::constant_product_in(black_box(E18), 1_000 * E18, 2_000 * E18))
    });
}

// ─────────────────────────────────────────────────────────────────
// ENGINE
// ─────────────────────────────────────────────────────────────────

fn engine_with_holders(holders: usize) -> PoolEngine {
    let mut a = FungibleLedger::new("Token A", "TKA", 18, u128::MAX / 4, "alice").unwrap();
    let mut b = FungibleLedger::new("Token B", "TKB", 18, u128::MAX / 4, "alice").unwrap();
    for i in 0..holders {
        let who = format!("holder{}", i);
        a.transfer("alice", &who, E18).unwrap();
        b.transfer("alice", &who, E18).unwrap();
    }
    let (lp, auth) = LpShareLedger::new("0xlp", "oramm LP", "OLP", 18).unwrap();
    let mut config = PoolConfig::default();
    config.oracle.enabled = false;
    let engine = PoolEngine::new(config, a, b, lp, auth, Arc::new(FixedPriceOracle::new(1, 8))).unwrap();
    engine.approve("alice", Asset::A, engine.address(), u128::MAX).unwrap();
    engine.approve("alice", Asset::B, engine.address(), u128::MAX).unwrap();
    engine.add_liquidity("alice", 1_000_000 * E18, 2_000_000 * E18).unwrap();
    engine
}

fn bench_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/swap");
    // Staged execution clones the ledgers, so cost grows with holder count.
    for holders in [10usize, 1_000, 10_000] {
        let engine = engine_with_holders(holders);
        group.bench_with_input(BenchmarkId::from_parameter(holders), &holders, |b, _| {
            let mut dir = Asset::A;
            b.iter(|| {
                engine.swap("alice", dir, black_box(E18)).unwrap();
                dir = dir.other();
            })
        });
    }
    group.finish();
}

fn bench_quote(c: &mut Criterion) {
    let engine = engine_with_holders(10);
    c.bench_function("engine/quote", |b| {
        b.iter(|| engine.quote(Asset::A, black_box(E18)).unwrap())
    });
}

criterion_group!(benches, bench_sqrt_product, bench_curve, bench_swap, bench_quote);
criterion_main!(benches);
