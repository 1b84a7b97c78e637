//! Random board generation by uniform scatter.
//!
//! All placement uses rejection sampling: pick a uniformly random cell,
//! keep it only if still eligible, and give up after `area * 2`
//! attempts. A saturated board silently under-fills rather than looping
//! or failing; callers that need exact counts must leave headroom.

use rand::Rng;

use crate::grid::{Board, BoardError, CellType, ColorRequirement};

/// Configured feature counts for a generated board.
///
/// Counts are ordered pairs rather than a hash map so placement order
/// (and therefore which type wins on a nearly full board) is
/// deterministic for a given options value.
#[derive(Clone, Debug, Default)]
pub struct GeneratorOptions {
    pub cell_type_counts: Vec<(CellType, usize)>,
    pub color_counts: Vec<(ColorRequirement, usize)>,
    /// 0-100; share of the remaining (non-feature) cells turned to Wall.
    pub wall_percentage: u32,
}

/// Default feature counts, used when no options are supplied and as the
/// fallback for unconfigured types in the maze generator.
pub const DEFAULT_KEY_COUNT: usize = 3;
pub const DEFAULT_LOCK_COUNT: usize = 3;
pub const DEFAULT_SUPPLIES_COUNT: usize = 3;
pub const DEFAULT_MANA_COUNT: usize = 3;
pub const DEFAULT_ENCOUNTER_COUNT: usize = 4;
pub const DEFAULT_TREASURE_COUNT: usize = 4;
pub const DEFAULT_RELIC_COUNT: usize = 6;
/// Default color tags per color (six colors).
pub const DEFAULT_COLOR_COUNT: usize = 2;
/// Default wall share of the whole board.
pub const DEFAULT_WALL_RATIO: f64 = 0.15;
/// Default directional edge-wall flips as a share of the board area.
pub const DEFAULT_EDGE_WALL_RATIO: f64 = 0.2;

impl GeneratorOptions {
    /// Options equivalent to the default preset, for callers that want
    /// to tweak a single knob.
    pub fn standard() -> GeneratorOptions {
        GeneratorOptions {
            cell_type_counts: vec![
                (CellType::Key, DEFAULT_KEY_COUNT),
                (CellType::Lock, DEFAULT_LOCK_COUNT),
                (CellType::Supplies, DEFAULT_SUPPLIES_COUNT),
                (CellType::Mana, DEFAULT_MANA_COUNT),
                (CellType::Encounter, DEFAULT_ENCOUNTER_COUNT),
                (CellType::Treasure, DEFAULT_TREASURE_COUNT),
                (CellType::Relic, DEFAULT_RELIC_COUNT),
            ],
            color_counts: ColorRequirement::COLORS
                .iter()
                .map(|&c| (c, DEFAULT_COLOR_COUNT))
                .collect(),
            wall_percentage: (DEFAULT_WALL_RATIO * 100.0) as u32,
        }
    }

    /// The configured count for a type, or the given default.
    pub fn count_for(&self, cell_type: CellType, default: usize) -> usize {
        self.cell_type_counts
            .iter()
            .find(|(t, _)| *t == cell_type)
            .map_or(default, |&(_, n)| n)
    }
}

/// Generates a square board by uniform random scatter.
///
/// The entrance always sits at `[size-1][size/2]`. With options, each
/// configured feature type and color is scattered by rejection
/// sampling, then walls fill the configured share of the remaining
/// cells plus a proportional sprinkle of directional edge-wall bits.
/// Without options the fixed default preset applies.
pub fn generate(
    size: usize,
    options: Option<&GeneratorOptions>,
    rng: &mut impl Rng,
) -> Result<Board, BoardError> {
    let mut board = Board::square(size)?;
    board.cell_mut(size - 1, size / 2).cell_type = CellType::Entrance;

    match options {
        Some(opts) => {
            for &(cell_type, count) in &opts.cell_type_counts {
                if cell_type == CellType::Empty || cell_type == CellType::Entrance {
                    continue;
                }
                add_random_cells(&mut board, cell_type, count, rng);
            }
            for &(color, count) in &opts.color_counts {
                if color == ColorRequirement::None {
                    continue;
                }
                add_random_color_requirements(&mut board, color, count, rng);
            }
            if opts.wall_percentage > 0 {
                let occupied = board
                    .coords()
                    .filter(|&(r, c)| board.cell(r, c).cell_type != CellType::Empty)
                    .count();
                let remaining = size * size - occupied;
                let pct = f64::from(opts.wall_percentage) / 100.0;
                let wall_count = (remaining as f64 * pct) as usize;
                add_random_cells(&mut board, CellType::Wall, wall_count, rng);

                let edge_count = ((size * size) as f64 * pct * DEFAULT_EDGE_WALL_RATIO) as usize;
                scatter_edge_walls(&mut board, edge_count, rng);
            }
        }
        None => {
            let wall_count = ((size * size) as f64 * DEFAULT_WALL_RATIO) as usize;
            add_random_cells(&mut board, CellType::Wall, wall_count, rng);

            add_random_cells(&mut board, CellType::Key, DEFAULT_KEY_COUNT, rng);
            add_random_cells(&mut board, CellType::Lock, DEFAULT_LOCK_COUNT, rng);
            add_random_cells(&mut board, CellType::Supplies, DEFAULT_SUPPLIES_COUNT, rng);
            add_random_cells(&mut board, CellType::Mana, DEFAULT_MANA_COUNT, rng);

            for color in ColorRequirement::COLORS {
                add_random_color_requirements(&mut board, color, DEFAULT_COLOR_COUNT, rng);
            }

            add_random_cells(&mut board, CellType::Encounter, DEFAULT_ENCOUNTER_COUNT, rng);
            add_random_cells(&mut board, CellType::Treasure, DEFAULT_TREASURE_COUNT, rng);
            add_random_cells(&mut board, CellType::Relic, DEFAULT_RELIC_COUNT, rng);

            let edge_count = ((size * size) as f64 * DEFAULT_EDGE_WALL_RATIO) as usize;
            scatter_edge_walls(&mut board, edge_count, rng);
        }
    }

    Ok(board)
}

/// Converts up to `count` still-Empty cells to `cell_type`.
///
/// Attempts are capped at twice the board area; the return value is how
/// many cells were actually converted (under-fill is silent).
pub(crate) fn add_random_cells(
    board: &mut Board,
    cell_type: CellType,
    count: usize,
    rng: &mut impl Rng,
) -> usize {
    let max_attempts = board.rows() * board.cols() * 2;
    let mut added = 0;
    let mut attempts = 0;

    while added < count && attempts < max_attempts {
        attempts += 1;
        let row = rng.gen_range(0..board.rows());
        let col = rng.gen_range(0..board.cols());
        if board.cell(row, col).cell_type != CellType::Empty {
            continue;
        }
        board.cell_mut(row, col).cell_type = cell_type;
        added += 1;
    }

    added
}

/// Tags up to `count` untagged cells with `color`. Color tags coexist
/// with any cell type, including feature cells.
pub(crate) fn add_random_color_requirements(
    board: &mut Board,
    color: ColorRequirement,
    count: usize,
    rng: &mut impl Rng,
) -> usize {
    let max_attempts = board.rows() * board.cols() * 2;
    let mut added = 0;
    let mut attempts = 0;

    while added < count && attempts < max_attempts {
        attempts += 1;
        let row = rng.gen_range(0..board.rows());
        let col = rng.gen_range(0..board.cols());
        if board.cell(row, col).color_requirement != ColorRequirement::None {
            continue;
        }
        board.cell_mut(row, col).color_requirement = color;
        added += 1;
    }

    added
}

/// Flips `count` directional wall bits on independently random cells
/// and sides. Repeats may hit the same bit; feature cells are not
/// excluded.
fn scatter_edge_walls(board: &mut Board, count: usize, rng: &mut impl Rng) {
    for _ in 0..count {
        let row = rng.gen_range(0..board.rows());
        let col = rng.gen_range(0..board.cols());
        let side = rng.gen_range(0..4);
        board.cell_mut(row, col).walls.set_side(side);
    }
}
