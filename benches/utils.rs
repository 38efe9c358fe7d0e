use chess_rules::{utils::perft, Board, Color, STARTING_POSITION};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - ";

fn load(fen: &str) -> (Board, Color) {
    Board::from_fen(fen).expect("benchmark positions are valid")
}

fn movegen_benchmark(c: &mut Criterion) {
    c.bench_function("all moves start", |b| {
        b.iter(|| black_box(Board::new()).get_all_possible_moves(Color::White))
    });
    let (kiwipete, color) = load(KIWIPETE);
    c.bench_function("all moves kiwipete", |b| {
        b.iter(|| black_box(&kiwipete).get_all_possible_moves(color))
    });
    c.bench_function("check detection kiwipete", |b| {
        b.iter(|| black_box(&kiwipete).is_in_check(color))
    });
    c.bench_function("single piece moves", |b| {
        b.iter(|| {
            let mut board = kiwipete.clone();
            // queen on f3
            board.legal_moves(5, 5).map(|moves| moves.len())
        })
    });
}

fn perft_benchmark(c: &mut Criterion) {
    let values: [(&str, &str, usize); 2] = [
        ("perft base", STARTING_POSITION, 3),
        ("perft kiwipete", KIWIPETE, 2),
    ];
    for (id, setup, depth) in values.into_iter() {
        let (board, color) = load(setup);
        c.bench_function(id, |b| b.iter(|| perft(black_box(&board), color, depth)));
    }
}

criterion_group!(benches, movegen_benchmark, perft_benchmark);
criterion_main!(benches);
