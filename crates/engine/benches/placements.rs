use criterion::{black_box, criterion_group, criterion_main, Criterion};
use versus_core::{Board, Cell, Piece};
use versus_engine::{generate_placements, inject_garbage};

fn ragged_board() -> Board {
    let mut board = Board::new();
    inject_garbage(&mut board, 6, |w| (w * 7 + 3) % w);
    for x in 0..Board::WIDTH {
        for y in 6..6 + (x * 3) % 5 {
            board.set_cell(x, y, Cell::Garbage);
        }
    }
    board
}

fn bench_generate_placements(c: &mut Criterion) {
    let empty = Board::default();
    let ragged = ragged_board();

    for piece in Piece::ALL {
        c.bench_function(&format!("generate_placements_empty_{}", piece), |b| {
            b.iter(|| generate_placements(black_box(&empty), black_box(piece)))
        });
        c.bench_function(&format!("generate_placements_ragged_{}", piece), |b| {
            b.iter(|| generate_placements(black_box(&ragged), black_box(piece)))
        });
    }
}

criterion_group!(benches, bench_generate_placements);
criterion_main!(benches);
