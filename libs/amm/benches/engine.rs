//! Performance benchmarks for the pool engine
//!
//! Measures the pure math primitives and full staged transitions so that
//! regressions in the hot swap path show up independently of the host.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use minidex_amm::math;
use minidex_amm::{PoolEngine, SwapDirection};
use minidex_types::{pool_key, AssetId, AuthorityId};

fn active_engine() -> PoolEngine {
    let mut engine = PoolEngine::create(
        AuthorityId::new([0x01; 32]),
        AssetId::new([0xaa; 32]),
        AssetId::new([0xbb; 32]),
        30,
    )
    .unwrap();
    engine.add_liquidity(1_000_000_000, 4_000_000_000, 0).unwrap();
    engine
}

fn bench_math(c: &mut Criterion) {
    c.bench_function("integer_sqrt_u128", |b| {
        b.iter(|| black_box(math::integer_sqrt(black_box(u64::MAX as u128 * 12_345))))
    });

    c.bench_function("swap_output", |b| {
        b.iter(|| {
            black_box(math::swap_output(
                black_box(997_000),
                black_box(1_000_000_000),
                black_box(4_000_000_000),
            ))
        })
    });

    c.bench_function("proportional_amounts", |b| {
        b.iter(|| {
            black_box(math::proportional_amounts(
                black_box(5_000),
                black_box(30_000),
                black_box(1_000_000_000),
                black_box(4_000_000_000),
            ))
        })
    });
}

fn bench_transitions(c: &mut Criterion) {
    let engine = active_engine();

    c.bench_function("quote_swap", |b| {
        b.iter(|| black_box(engine.quote_swap(black_box(1_000_000), SwapDirection::AToB)))
    });

    c.bench_function("swap_execute", |b| {
        b.iter_batched(
            active_engine,
            |mut engine| black_box(engine.swap(1_000_000, 0, SwapDirection::AToB)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("add_liquidity_proportional", |b| {
        b.iter_batched(
            active_engine,
            |mut engine| black_box(engine.add_liquidity(10_000, 50_000, 0)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("remove_liquidity", |b| {
        b.iter_batched(
            active_engine,
            |mut engine| black_box(engine.remove_liquidity(10_000, 0, 0)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_pool_key(c: &mut Criterion) {
    let a = AssetId::new([0xaa; 32]);
    let b_asset = AssetId::new([0xbb; 32]);

    c.bench_function("pool_key_derivation", |b| {
        b.iter(|| black_box(pool_key(black_box(&a), black_box(&b_asset))))
    });
}

criterion_group!(benches, bench_math, bench_transitions, bench_pool_key);
criterion_main!(benches);
