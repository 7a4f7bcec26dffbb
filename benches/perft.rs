//! Criterion benchmarks measure time of move generation and perft calculation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use shakmaty::{CastlingMode, Chess, Position as ShakmatyPosition};
use tabia::chess::position::{self, Position};

const SAMPLE_POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
];

fn generate_moves(positions: &[Position]) {
    for position in positions {
        std::hint::black_box(position.generate_moves());
    }
}

fn movegen_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Move generation");
    let positions: Vec<Position> = SAMPLE_POSITIONS
        .iter()
        .map(|fen| Position::try_from(*fen).unwrap())
        .collect();
    group.throughput(criterion::Throughput::Elements(positions.len() as u64));
    group.bench_with_input(
        BenchmarkId::new(
            "movegen_tabia",
            format!("{} sample positions", positions.len()),
        ),
        &positions,
        |b, positions| {
            b.iter(|| generate_moves(positions));
        },
    );
    // Reference point: shakmaty has stable, well-understood performance.
    // tabia's legality filter makes/probes/unmakes every pseudo-legal move
    // rather than tracking pins incrementally, so it is not expected to beat
    // shakmaty; this benchmark exists to catch regressions, not races.
    let shakmaty_positions: Vec<Chess> = SAMPLE_POSITIONS
        .iter()
        .map(|fen| {
            let setup: shakmaty::fen::Fen = fen.parse().unwrap();
            setup.into_position(CastlingMode::Standard).unwrap()
        })
        .collect();
    group.throughput(criterion::Throughput::Elements(
        shakmaty_positions.len() as u64
    ));
    group.bench_with_input(
        BenchmarkId::new(
            "movegen_reference_shakmaty",
            format!("{} sample positions", shakmaty_positions.len()),
        ),
        &shakmaty_positions,
        |b, positions| {
            b.iter(|| {
                for position in positions {
                    std::hint::black_box(position.legal_moves());
                }
            });
        },
    );
    group.finish();
}

criterion_group! {
    name = movegen;
    config = Criterion::default().sample_size(100);
    targets = movegen_bench
}

// This acts both as performance and correctness test.
fn perft_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    for (position, depth, nodes) in &[
        // Position 1: starting position.
        (Position::starting(), 5, 4_865_609),
        (Position::starting(), 6, 119_060_324),
        // Position 3.
        (
            Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap(),
            6,
            11_030_083,
        ),
        // Position 4, mirrored.
        (
            Position::from_fen("r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1")
                .unwrap(),
            6,
            706_045_033,
        ),
        // Position 6.
        (
            Position::from_fen(
                "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
            )
            .unwrap(),
            5,
            164_075_551,
        ),
        // Other positions.
        (
            Position::from_fen("r1bqkbnr/pppppppp/2n5/8/3P4/8/PPP1PPPP/RNBQKBNR w KQkq - 1 2")
                .unwrap(),
            6,
            336_655_487,
        ),
        (
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/N7/PPPPPPPP/R1BQKBNR b KQkq - 1 1")
                .unwrap(),
            6,
            120_142_144,
        ),
    ] {
        group.throughput(criterion::Throughput::Elements(*nodes));
        group.bench_with_input(
            BenchmarkId::new(
                "perft",
                format!("position {position}, depth {depth}, nodes {nodes}"),
            ),
            depth,
            |b, &depth| {
                b.iter(|| {
                    assert_eq!(position::perft(position, depth), *nodes);
                });
            },
        );
    }
    group.finish();
}

criterion_group! {
    name = perft;
    config = Criterion::default().sample_size(10);
    targets = perft_bench
}

criterion_main!(movegen, perft);
