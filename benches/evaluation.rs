use argent::{
    board::Board,
    defs::FEN_START_POSITION,
    evaluation::evaluate_position,
    movegen::{
        defs::{MoveList, MoveType},
        MoveGenerator,
    },
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

// Test positions with different characteristics
const TEST_POSITIONS: &[(&str, &str)] = &[
    (FEN_START_POSITION, "Starting Position"),
    ("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1", "After 1.e4"),
    ("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 4 4", "Italian Game"),
    ("r1bq1rk1/pppp1ppp/2n2n2/2b1p3/2B1P3/3P1N2/PPP2PPP/RNBQ1RK1 w - - 6 7", "Castled Position"),
    ("r2q1rk1/ppp2ppp/2np1n2/2b1p1B1/2B1P3/3P1N2/PPP2PPP/RN1Q1RK1 w - - 0 9", "Complex Middlegame"),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", "King and Pawn Endgame"),
    ("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1", "Rook Endgame"),
];

fn setup_position(fen: &str) -> (Board, Arc<MoveGenerator>) {
    let mut board = Board::new();
    board.fen_read(Some(fen)).expect("Valid FEN");
    let mg = Arc::new(MoveGenerator::new());
    (board, mg)
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");

    for (fen, name) in TEST_POSITIONS {
        let (board, mg) = setup_position(fen);
        group.bench_with_input(BenchmarkId::new("evaluate_position", name), &board, |b, board| {
            b.iter(|| evaluate_position(black_box(board), black_box(&mg)))
        });
    }

    group.finish();
}

fn bench_move_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    for (fen, name) in TEST_POSITIONS {
        let (board, mg) = setup_position(fen);
        group.bench_with_input(BenchmarkId::new("generate_moves", name), &board, |b, board| {
            b.iter(|| {
                let mut ml = MoveList::new();
                mg.generate_moves(black_box(board), &mut ml, MoveType::All);
                ml.len()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluation, bench_move_generation);
criterion_main!(benches);
