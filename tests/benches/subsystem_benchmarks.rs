//! # Energy-Token Subsystem Benchmarks
//!
//! | Subsystem | Operation |
//! |-----------|-----------|
//! | et-01 Token Codec | encode / decode of token ids |
//! | et-02 Balance Ledger | approved transfer, batch transfer |
//! | et-05 Distribution | settlement of a fresh position |
//! | runtime | state digest over a populated ledger |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use et_01_token_codec::{decode, encode, TokenKind};
use et_tests::integration::fixtures::*;
use shared_types::U256;
use std::time::Duration;

// ============================================================================
// ET-01: Token Codec
// ============================================================================

fn bench_token_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("et-01-token-codec");

    group.bench_function("encode", |b| {
        b.iter(|| {
            black_box(encode(
                TokenKind::ConsumptionBasedForward,
                black_box(PERIOD),
                &idc(PLANT),
            ))
        })
    });

    let id = encode(TokenKind::ConsumptionBasedForward, PERIOD, &idc(PLANT));
    group.bench_function("decode", |b| b.iter(|| black_box(decode(black_box(&id)))));

    group.finish();
}

// ============================================================================
// ET-02: Balance Ledger
// ============================================================================

fn bench_transfers(c: &mut Criterion) {
    let mut group = c.benchmark_group("et-02-balance-ledger");
    group.measurement_time(Duration::from_secs(5));

    // Approvals are large enough for every iteration criterion may run
    let market = Market::new();
    let id = market.open_series(TokenKind::AbsoluteForward, PERIOD);
    market.sell(id, BUYER, 1_000_000);
    market.approve(SECOND_BUYER, BUYER, id, 1_000_000);
    group.bench_function("transfer", |b| {
        b.iter(|| {
            market
                .ledger
                .transfer(&ctx(BUYER), idc(BUYER), idc(SECOND_BUYER), id, black_box(U256::one()))
        })
    });

    for size in [8usize, 64, 256] {
        let market = Market::new();
        let ids: Vec<_> = (0..size as u64)
            .map(|offset| {
                let id = market.open_series(TokenKind::AbsoluteForward, PERIOD + offset);
                market.sell(id, BUYER, 1_000_000);
                market.approve(SECOND_BUYER, BUYER, id, 1_000_000);
                id
            })
            .collect();
        let quantities = vec![U256::one(); size];

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("batch_transfer", size), &size, |b, _| {
            b.iter(|| {
                market.ledger.batch_transfer(
                    &ctx(BUYER),
                    idc(BUYER),
                    idc(SECOND_BUYER),
                    &ids,
                    &quantities,
                )
            })
        });
    }

    group.finish();
}

// ============================================================================
// ET-05: Distribution
// ============================================================================

fn bench_distribution(c: &mut Criterion) {
    let mut group = c.benchmark_group("et-05-distribution");

    group.bench_function("distribute_fresh_position", |b| {
        b.iter_batched(
            || {
                let market = Market::new();
                market.issue_certificates(PERIOD, DISTRIBUTOR, 100);
                let id = market.open_series(TokenKind::ConsumptionBasedForward, PERIOD);
                market.document_generation(30, false);
                market.document_consumption(BUYER, 8, false);
                market.sell(id, BUYER, 17);
                (market, id)
            },
            |(market, id)| black_box(market.ledger.distribute(idc(BUYER), id)),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// Runtime: State Digest
// ============================================================================

fn bench_state_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger-runtime");

    let market = Market::new();
    for offset in 0..100u64 {
        let id = market.open_series(TokenKind::AbsoluteForward, PERIOD + offset);
        market.sell(id, BUYER, 17);
    }
    assert_eq!(market.ledger.snapshot().balances.len(), 100);

    group.bench_function("state_digest_100_series", |b| {
        b.iter(|| black_box(market.ledger.state_digest()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_token_codec,
    bench_transfers,
    bench_distribution,
    bench_state_digest
);
criterion_main!(benches);
