//! Maze-structured board generation with distance-banded features.
//!
//! The generator floods the board with walls, grows a randomized
//! spanning structure of open cells out from the entrance (Prim-style
//! frontier growth with uniform random frontier picks), then relaxes
//! density by probabilistically opening walls next to open cells. A BFS
//! distance field from the entrance stratifies feature placement: keys
//! land near the entrance, locks mid-way, relics far out, and treasures
//! split 20/30/50 across three distance sectors. Banding by hop
//! distance (not straight-line distance) respects the maze topology, so
//! the pacing gradient survives winding corridors.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::connectivity::{distance_from, DistanceMap};
use crate::generator::{
    add_random_color_requirements, GeneratorOptions, DEFAULT_ENCOUNTER_COUNT, DEFAULT_KEY_COUNT,
    DEFAULT_LOCK_COUNT, DEFAULT_MANA_COUNT, DEFAULT_RELIC_COUNT, DEFAULT_SUPPLIES_COUNT,
    DEFAULT_TREASURE_COUNT,
};
use crate::grid::{Board, BoardError, CellType, ColorRequirement, DIRECTIONS};

/// Probability of opening an eligible wall after the spanning growth.
const RELAX_OPEN_RATIO: f64 = 0.3;

/// Band fractions of the maximum distance.
const KEY_BAND_MAX: f64 = 0.33;
const LOCK_BAND_MIN: f64 = 0.25;
const LOCK_BAND_MAX: f64 = 0.66;
const RELIC_BAND_MIN: f64 = 0.66;

/// Treasure shares for the near, middle, and far distance sectors. The
/// far sector absorbs the rounding remainder so the three counts sum to
/// the requested total.
const TREASURE_SECTOR_SHARES: [f64; 3] = [0.2, 0.3, 0.5];

/// Generates a maze-structured square board.
///
/// Feature counts come from `options` where configured, defaults
/// otherwise; color tags are scattered only when configured. All open
/// cells are reachable from the entrance by construction.
pub fn generate_advanced(
    size: usize,
    options: Option<&GeneratorOptions>,
    rng: &mut impl Rng,
) -> Result<Board, BoardError> {
    let mut board = Board::square(size)?;
    let entrance = (size - 1, size / 2);
    board.cell_mut(entrance.0, entrance.1).cell_type = CellType::Entrance;

    carve_maze(&mut board, entrance, rng);
    relax_walls(&mut board, entrance, rng);

    let dist = distance_from(&board, entrance);
    let max_distance = dist.max_finite().unwrap_or(0);

    let count = |cell_type, default| {
        options.map_or(default, |opts| opts.count_for(cell_type, default))
    };

    let key_max = (f64::from(max_distance) * KEY_BAND_MAX) as u32;
    place_banded(
        &mut board,
        &dist,
        CellType::Key,
        count(CellType::Key, DEFAULT_KEY_COUNT),
        0,
        key_max,
        rng,
    );

    let lock_min = (f64::from(max_distance) * LOCK_BAND_MIN) as u32;
    let lock_max = (f64::from(max_distance) * LOCK_BAND_MAX) as u32;
    place_banded(
        &mut board,
        &dist,
        CellType::Lock,
        count(CellType::Lock, DEFAULT_LOCK_COUNT),
        lock_min,
        lock_max,
        rng,
    );

    let relic_min = (f64::from(max_distance) * RELIC_BAND_MIN) as u32;
    place_banded(
        &mut board,
        &dist,
        CellType::Relic,
        count(CellType::Relic, DEFAULT_RELIC_COUNT),
        relic_min,
        max_distance,
        rng,
    );

    place_treasures(
        &mut board,
        &dist,
        count(CellType::Treasure, DEFAULT_TREASURE_COUNT),
        max_distance,
        rng,
    );

    for (cell_type, default) in [
        (CellType::Supplies, DEFAULT_SUPPLIES_COUNT),
        (CellType::Mana, DEFAULT_MANA_COUNT),
        (CellType::Encounter, DEFAULT_ENCOUNTER_COUNT),
    ] {
        place_banded(
            &mut board,
            &dist,
            cell_type,
            count(cell_type, default),
            0,
            max_distance,
            rng,
        );
    }

    if let Some(opts) = options {
        for &(color, color_count) in &opts.color_counts {
            if color == ColorRequirement::None {
                continue;
            }
            add_random_color_requirements(&mut board, color, color_count, rng);
        }
    }

    Ok(board)
}

/// Grows a randomized spanning structure of open cells from the
/// entrance.
///
/// Every Empty cell becomes Wall first. The frontier starts with the
/// entrance's in-bounds wall neighbors; each step removes a uniformly
/// random frontier entry (not FIFO, not LIFO), opens it if it touches
/// an already-open cell, and pushes its unvisited wall neighbors. The
/// result is a connected tree of open cells rooted at the entrance.
fn carve_maze(board: &mut Board, entrance: (usize, usize), rng: &mut impl Rng) {
    for (r, c) in board.coords() {
        if board.cell(r, c).cell_type == CellType::Empty {
            board.cell_mut(r, c).cell_type = CellType::Wall;
        }
    }

    let cols = board.cols();
    let mut visited = vec![false; board.rows() * cols];
    visited[entrance.0 * cols + entrance.1] = true;

    let mut frontier: Vec<(usize, usize)> = Vec::new();
    for (dr, dc) in DIRECTIONS {
        let (nr, nc) = (entrance.0 as isize + dr, entrance.1 as isize + dc);
        if board.in_bounds(nr, nc) && board.cell(nr as usize, nc as usize).cell_type == CellType::Wall
        {
            frontier.push((nr as usize, nc as usize));
        }
    }

    while !frontier.is_empty() {
        let index = rng.gen_range(0..frontier.len());
        let (r, c) = frontier.swap_remove(index);
        if visited[r * cols + c] {
            continue;
        }

        let touches_open = DIRECTIONS.iter().any(|&(dr, dc)| {
            let (nr, nc) = (r as isize + dr, c as isize + dc);
            board.in_bounds(nr, nc) && visited[nr as usize * cols + nc as usize]
        });
        if !touches_open {
            continue;
        }

        board.cell_mut(r, c).cell_type = CellType::Empty;
        visited[r * cols + c] = true;

        for (dr, dc) in DIRECTIONS {
            let (nr, nc) = (r as isize + dr, c as isize + dc);
            if !board.in_bounds(nr, nc) {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            if !visited[nr * cols + nc] && board.cell(nr, nc).cell_type == CellType::Wall {
                frontier.push((nr, nc));
            }
        }
    }
}

/// Opens remaining walls with probability [`RELAX_OPEN_RATIO`] when
/// they touch at least one open cell, adding loops to the spanning
/// tree. Scans row-major with the board mutating underneath, so a wall
/// opened early can qualify its neighbors later in the same pass.
fn relax_walls(board: &mut Board, entrance: (usize, usize), rng: &mut impl Rng) {
    for r in 0..board.rows() {
        for c in 0..board.cols() {
            if (r, c) == entrance {
                continue;
            }
            if board.cell(r, c).cell_type != CellType::Wall {
                continue;
            }
            if rng.gen::<f64>() >= RELAX_OPEN_RATIO {
                continue;
            }
            let touches_open = DIRECTIONS.iter().any(|&(dr, dc)| {
                let (nr, nc) = (r as isize + dr, c as isize + dc);
                board.in_bounds(nr, nc)
                    && board.cell(nr as usize, nc as usize).cell_type == CellType::Empty
            });
            if touches_open {
                board.cell_mut(r, c).cell_type = CellType::Empty;
            }
        }
    }
}

/// Converts up to `count` Empty cells whose distance lies in
/// `[min_distance, max_distance]` (inclusive) to `cell_type`, chosen by
/// a uniform shuffle of the eligible cells. Fewer eligible cells than
/// requested silently under-fills.
fn place_banded(
    board: &mut Board,
    dist: &DistanceMap,
    cell_type: CellType,
    count: usize,
    min_distance: u32,
    max_distance: u32,
    rng: &mut impl Rng,
) {
    let mut eligible: Vec<(usize, usize)> = board
        .coords()
        .filter(|&(r, c)| {
            board.cell(r, c).cell_type == CellType::Empty
                && dist.is_reachable(r, c)
                && dist.get(r, c) >= min_distance
                && dist.get(r, c) <= max_distance
        })
        .collect();

    eligible.shuffle(rng);
    for &(r, c) in eligible.iter().take(count) {
        board.cell_mut(r, c).cell_type = cell_type;
    }
}

/// Places treasures weighted toward far distances: three equal-width
/// distance sectors receive 20%, 30%, and 50% of the requested count,
/// the far sector taking the rounding remainder and including the
/// maximum distance itself.
fn place_treasures(
    board: &mut Board,
    dist: &DistanceMap,
    count: usize,
    max_distance: u32,
    rng: &mut impl Rng,
) {
    let sector_width = f64::from(max_distance) / TREASURE_SECTOR_SHARES.len() as f64;

    let mut sector_counts = [
        (count as f64 * TREASURE_SECTOR_SHARES[0]) as usize,
        (count as f64 * TREASURE_SECTOR_SHARES[1]) as usize,
        (count as f64 * TREASURE_SECTOR_SHARES[2]) as usize,
    ];
    let allocated: usize = sector_counts.iter().sum();
    sector_counts[2] += count - allocated;

    for (sector, &sector_count) in sector_counts.iter().enumerate() {
        let lo = sector as f64 * sector_width;
        let hi = (sector + 1) as f64 * sector_width;
        let last = sector == sector_counts.len() - 1;

        let mut eligible: Vec<(usize, usize)> = board
            .coords()
            .filter(|&(r, c)| {
                if board.cell(r, c).cell_type != CellType::Empty || !dist.is_reachable(r, c) {
                    return false;
                }
                let d = f64::from(dist.get(r, c));
                // the far sector is closed at the top so the maximum
                // distance itself stays eligible
                d >= lo && if last { dist.get(r, c) <= max_distance } else { d < hi }
            })
            .collect();

        eligible.shuffle(rng);
        for &(r, c) in eligible.iter().take(sector_count) {
            board.cell_mut(r, c).cell_type = CellType::Treasure;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn feature_cells(board: &Board, cell_type: CellType) -> Vec<(usize, usize)> {
        board
            .coords()
            .filter(|&(r, c)| board.cell(r, c).cell_type == cell_type)
            .collect()
    }

    #[test]
    fn test_all_open_cells_are_reachable() {
        for seed in [0u64, 7, 42, 1001] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let board = generate_advanced(16, None, &mut rng).unwrap();
            let entrance = board.entrance().expect("maze keeps its entrance");
            let dist = distance_from(&board, entrance);
            assert_eq!(
                dist.reachable_count(),
                board.open_cell_count(),
                "seed {seed}: disconnected open pocket"
            );
        }
    }

    #[test]
    fn test_entrance_survives_generation() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let board = generate_advanced(12, None, &mut rng).unwrap();
        assert_eq!(board.entrance(), Some((11, 6)));
        assert_eq!(board.count_type(CellType::Entrance), 1);
    }

    #[test]
    fn test_features_respect_distance_bands() {
        for seed in [2u64, 19, 77] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let board = generate_advanced(16, None, &mut rng).unwrap();
            let entrance = board.entrance().unwrap();
            let dist = distance_from(&board, entrance);
            let max = dist.max_finite().unwrap();

            let key_max = (f64::from(max) * KEY_BAND_MAX) as u32;
            for (r, c) in feature_cells(&board, CellType::Key) {
                assert!(dist.get(r, c) <= key_max, "seed {seed}: key outside band");
            }

            let lock_min = (f64::from(max) * LOCK_BAND_MIN) as u32;
            let lock_max = (f64::from(max) * LOCK_BAND_MAX) as u32;
            for (r, c) in feature_cells(&board, CellType::Lock) {
                let d = dist.get(r, c);
                assert!(d >= lock_min && d <= lock_max, "seed {seed}: lock outside band");
            }

            let relic_min = (f64::from(max) * RELIC_BAND_MIN) as u32;
            for (r, c) in feature_cells(&board, CellType::Relic) {
                assert!(dist.get(r, c) >= relic_min, "seed {seed}: relic outside band");
            }
        }
    }

    #[test]
    fn test_default_feature_counts_on_16() {
        for seed in [4u64, 23, 1234] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let board = generate_advanced(16, None, &mut rng).unwrap();
            assert_eq!(board.count_type(CellType::Key), DEFAULT_KEY_COUNT);
            assert_eq!(board.count_type(CellType::Lock), DEFAULT_LOCK_COUNT);
            assert_eq!(board.count_type(CellType::Supplies), DEFAULT_SUPPLIES_COUNT);
            assert_eq!(board.count_type(CellType::Mana), DEFAULT_MANA_COUNT);
            assert_eq!(board.count_type(CellType::Encounter), DEFAULT_ENCOUNTER_COUNT);
            assert_eq!(board.count_type(CellType::Treasure), DEFAULT_TREASURE_COUNT);
            assert_eq!(board.count_type(CellType::Relic), DEFAULT_RELIC_COUNT);
            // colors only appear when configured
            for color in ColorRequirement::COLORS {
                assert_eq!(board.count_color(color), 0);
            }
        }
    }

    #[test]
    fn test_configured_counts_and_colors() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let opts = GeneratorOptions {
            cell_type_counts: vec![(CellType::Key, 1), (CellType::Relic, 2)],
            color_counts: vec![(ColorRequirement::Green, 3)],
            wall_percentage: 0,
        };
        let board = generate_advanced(16, Some(&opts), &mut rng).unwrap();
        assert_eq!(board.count_type(CellType::Key), 1);
        assert_eq!(board.count_type(CellType::Relic), 2);
        // unconfigured types fall back to defaults
        assert_eq!(board.count_type(CellType::Lock), DEFAULT_LOCK_COUNT);
        assert_eq!(board.count_color(ColorRequirement::Green), 3);
    }

    #[test]
    fn test_same_seed_reproduces_board() {
        let board_a = generate_advanced(14, None, &mut ChaCha8Rng::seed_from_u64(31)).unwrap();
        let board_b = generate_advanced(14, None, &mut ChaCha8Rng::seed_from_u64(31)).unwrap();
        assert_eq!(board_a, board_b);
    }

    #[test]
    fn test_tiny_board_degenerates_gracefully() {
        // a 1x1 board is just the entrance; everything under-fills
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let board = generate_advanced(1, None, &mut rng).unwrap();
        assert_eq!(board.entrance(), Some((0, 0)));
        assert_eq!(board.count_type(CellType::Key), 0);
        assert_eq!(board.count_type(CellType::Treasure), 0);
    }
}
