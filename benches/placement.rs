//! Benchmarks for board generation and the placement search.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use delver::connectivity::distance_from;
use delver::generator;
use delver::geometry::search_orientations;
use delver::grid::Board;
use delver::maze;
use delver::placement::{find_oriented_placement, place_shape, PlacedShape};
use delver::shapes::standard_catalog;

fn maze_board(size: usize, seed: u64) -> Board {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    maze::generate_advanced(size, None, &mut rng).expect("size is positive")
}

/// Benchmark maze generation end to end.
fn bench_maze_generation(c: &mut Criterion) {
    c.bench_function("maze_generate_16", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        b.iter(|| maze::generate_advanced(black_box(16), None, &mut rng))
    });
}

/// Benchmark the scatter generator with the default preset.
fn bench_random_generation(c: &mut Criterion) {
    c.bench_function("random_generate_16", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        b.iter(|| generator::generate(black_box(16), None, &mut rng))
    });
}

/// Benchmark the BFS distance field on a maze board.
fn bench_distance_field(c: &mut Criterion) {
    let board = maze_board(24, 7);
    let entrance = board.entrance().expect("maze boards keep their entrance");
    c.bench_function("distance_from_entrance_24", |b| {
        b.iter(|| distance_from(black_box(&board), entrance))
    });
}

/// Benchmark the 9-step orientation sequence for every catalog shape.
fn bench_orientations(c: &mut Criterion) {
    let catalog = standard_catalog();
    c.bench_function("search_orientations_catalog", |b| {
        b.iter(|| {
            for entry in &catalog {
                black_box(search_orientations(&entry.shape));
            }
        })
    });
}

/// Benchmark a full deck-round worth of placements on one board.
fn bench_placement_round(c: &mut Criterion) {
    let board = maze_board(16, 13);
    let catalog = standard_catalog();

    c.bench_function("place_catalog_round_16", |b| {
        b.iter(|| {
            let mut board = board.clone();
            let mut placed: Vec<PlacedShape> = Vec::new();
            for entry in &catalog {
                if let Some(result) = find_oriented_placement(&board, &entry.shape, &placed) {
                    place_shape(&mut board, &result.shape, result.row, result.col);
                    placed.push(PlacedShape {
                        shape: result.shape,
                        start_row: result.row,
                        start_col: result.col,
                        card_value: entry.card_values[0],
                        card_suit: delver::deck::Suit::Spades,
                    });
                }
            }
            placed.len()
        })
    });
}

criterion_group!(
    benches,
    bench_maze_generation,
    bench_random_generation,
    bench_distance_field,
    bench_orientations,
    bench_placement_round
);
criterion_main!(benches);
