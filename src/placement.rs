//! Legal-placement search for action shapes.
//!
//! Rules, in priority order:
//! 1. the board must have an entrance;
//! 2. the first shape must cover the entrance with one of its cells;
//! 3. later shapes anchor on cells 4-adjacent to already-covered cells
//!    and must end up touching the existing coverage;
//! 4. a candidate is legal when the shape fits in bounds, overlaps no
//!    placed shape and no Wall cell, and no two adjacent shape cells
//!    straddle a directional wall (both cells' bits are checked; the
//!    bits are independent and symmetry is never inferred).
//!
//! The search itself never mutates the board; callers commit a result
//! with [`place_shape`], which marks covered cells traversed.

use rustc_hash::FxHashSet;

use crate::deck::{CardValue, Suit};
use crate::geometry::{search_orientations, Shape};
use crate::grid::{edge_blocked, Board, CellType, DIRECTIONS};

/// A shape instance committed onto the board.
#[derive(Clone, Debug)]
pub struct PlacedShape {
    pub shape: Shape,
    pub start_row: usize,
    pub start_col: usize,
    pub card_value: CardValue,
    pub card_suit: Suit,
}

impl PlacedShape {
    /// Board cells covered by this placement, row-major.
    pub fn covered(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.shape
            .occupied_cells()
            .map(|(r, c)| (self.start_row + r, self.start_col + c))
    }
}

/// A successful oriented search result: the orientation that fit and
/// its top-left anchor.
#[derive(Clone, Debug)]
pub struct Placement {
    pub shape: Shape,
    pub row: usize,
    pub col: usize,
}

/// Why a placement search came up empty. Best-effort classification for
/// user feedback; `find_placement` itself just returns None.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementFailure {
    /// The board has no entrance cell.
    NoEntrance,
    /// No anchor candidates exist (nothing placed borders an open cell).
    NoCandidates,
    /// Every candidate anchor pushed the shape out of bounds.
    OutOfBounds,
    /// Candidates mostly collided with already-placed shapes.
    Overlap,
    /// Candidates mostly landed on Wall cells.
    WallCell,
    /// Candidates mostly left the shape touching no placed shape.
    NotAdjacent,
    /// Candidates mostly straddled a directional wall.
    WallEdge,
}

impl PlacementFailure {
    /// Short description for CLI messages.
    pub fn describe(self) -> &'static str {
        match self {
            PlacementFailure::NoEntrance => "the board has no entrance",
            PlacementFailure::NoCandidates => "no open cells border the placed shapes",
            PlacementFailure::OutOfBounds => "the shape does not fit inside the board there",
            PlacementFailure::Overlap => "blocked by already-placed shapes",
            PlacementFailure::WallCell => "blocked by wall cells",
            PlacementFailure::NotAdjacent => "no adjacency to the placed shapes",
            PlacementFailure::WallEdge => "blocked by directional walls",
        }
    }
}

/// The set of board cells covered by the given placed shapes.
pub fn covered_cells(placed: &[PlacedShape]) -> FxHashSet<(usize, usize)> {
    let mut covered = FxHashSet::default();
    for shape in placed {
        covered.extend(shape.covered());
    }
    covered
}

/// Finds a legal top-left anchor for `shape` in its current
/// orientation, or None.
///
/// With no shapes placed yet, every occupied shape cell is tried as the
/// cell that aligns with the entrance, guaranteeing the first shape
/// covers it. Afterwards, candidates are the uncovered cells 4-adjacent
/// to any covered cell, deduplicated, generated in placement order and
/// row-major within each shape; all candidates are tried before giving
/// up.
pub fn find_placement(
    board: &Board,
    shape: &Shape,
    placed: &[PlacedShape],
) -> Option<(usize, usize)> {
    let entrance = board.entrance()?;
    let covered = covered_cells(placed);

    let candidates = candidate_anchors(board, shape, entrance, placed, &covered);
    candidates
        .into_iter()
        .find(|&anchor| can_place_at(board, shape, anchor, &covered))
        .map(|(r, c)| (r as usize, c as usize))
}

/// Tries the full 9-step orientation sequence (original, three
/// rotations, horizontal flip with three rotations, vertical flip) and
/// returns the first orientation that places, with its anchor.
pub fn find_oriented_placement(
    board: &Board,
    shape: &Shape,
    placed: &[PlacedShape],
) -> Option<Placement> {
    for oriented in search_orientations(shape) {
        if let Some((row, col)) = find_placement(board, &oriented, placed) {
            return Some(Placement {
                shape: oriented,
                row,
                col,
            });
        }
    }
    None
}

/// Commits a placement by marking every covered cell traversed.
pub fn place_shape(board: &mut Board, shape: &Shape, start_row: usize, start_col: usize) {
    for (r, c) in shape.occupied_cells() {
        board.cell_mut(start_row + r, start_col + c).traversed = true;
    }
}

/// Signed anchor candidates for one orientation. Anchors may be
/// negative (a shape cell aligned above or left of the entrance); the
/// legality check rejects those via the bounds test.
fn candidate_anchors(
    board: &Board,
    shape: &Shape,
    entrance: (usize, usize),
    placed: &[PlacedShape],
    covered: &FxHashSet<(usize, usize)>,
) -> Vec<(isize, isize)> {
    if placed.is_empty() {
        return shape
            .occupied_cells()
            .map(|(r, c)| {
                (
                    entrance.0 as isize - r as isize,
                    entrance.1 as isize - c as isize,
                )
            })
            .collect();
    }

    let mut seen = FxHashSet::default();
    let mut candidates = Vec::new();
    for placed_shape in placed {
        for (r, c) in placed_shape.covered() {
            for (dr, dc) in DIRECTIONS {
                let (nr, nc) = (r as isize + dr, c as isize + dc);
                if !board.in_bounds(nr, nc) {
                    continue;
                }
                let cell = (nr as usize, nc as usize);
                if covered.contains(&cell) || !seen.insert(cell) {
                    continue;
                }
                candidates.push((nr, nc));
            }
        }
    }
    candidates
}

/// Legality test for one anchor: bounds, overlap, wall cells, and
/// directional wall edges between adjacent shape cells.
fn can_place_at(
    board: &Board,
    shape: &Shape,
    anchor: (isize, isize),
    covered: &FxHashSet<(usize, usize)>,
) -> bool {
    reject_reason(board, shape, anchor, covered).is_none()
}

/// Rejection reasons ordered by check priority.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Reject {
    OutOfBounds,
    Overlap,
    WallCell,
    NotAdjacent,
    WallEdge,
}

fn reject_reason(
    board: &Board,
    shape: &Shape,
    anchor: (isize, isize),
    covered: &FxHashSet<(usize, usize)>,
) -> Option<Reject> {
    let (ar, ac) = anchor;
    if ar < 0
        || ac < 0
        || ar as usize + shape.rows() > board.rows()
        || ac as usize + shape.cols() > board.cols()
    {
        return Some(Reject::OutOfBounds);
    }
    let (ar, ac) = (ar as usize, ac as usize);

    for (r, c) in shape.occupied_cells() {
        let cell = (ar + r, ac + c);
        if covered.contains(&cell) {
            return Some(Reject::Overlap);
        }
        if board.cell(cell.0, cell.1).cell_type == CellType::Wall {
            return Some(Reject::WallCell);
        }
    }

    // once anything is placed, the new shape must actually touch the
    // existing coverage; the anchor sitting next to it is not enough
    // when the shape's own top-left corner is empty
    if !covered.is_empty() {
        let touches = shape.occupied_cells().any(|(r, c)| {
            DIRECTIONS.iter().any(|&(dr, dc)| {
                let (nr, nc) = ((ar + r) as isize + dr, (ac + c) as isize + dc);
                nr >= 0 && nc >= 0 && covered.contains(&(nr as usize, nc as usize))
            })
        });
        if !touches {
            return Some(Reject::NotAdjacent);
        }
    }

    // adjacent occupied pairs within the shape must not straddle a
    // directional wall on the board
    for (r, c) in shape.occupied_cells() {
        if c + 1 < shape.cols() && shape.at(r, c + 1) {
            let from = (ar + r, ac + c);
            if edge_blocked(board, from, (from.0, from.1 + 1)) {
                return Some(Reject::WallEdge);
            }
        }
        if r + 1 < shape.rows() && shape.at(r + 1, c) {
            let from = (ar + r, ac + c);
            if edge_blocked(board, from, (from.0 + 1, from.1)) {
                return Some(Reject::WallEdge);
            }
        }
    }

    None
}

/// Classifies why no orientation of `shape` places on `board`.
///
/// Returns None when a placement actually exists. Otherwise tallies the
/// first rejection reason of every candidate across all nine
/// orientations and reports the dominant one (ties broken by check
/// order).
pub fn diagnose_failure(
    board: &Board,
    shape: &Shape,
    placed: &[PlacedShape],
) -> Option<PlacementFailure> {
    let Some(entrance) = board.entrance() else {
        return Some(PlacementFailure::NoEntrance);
    };
    let covered = covered_cells(placed);

    let mut tallies = [0usize; 5];
    let mut any_candidates = false;
    for oriented in search_orientations(shape) {
        for anchor in candidate_anchors(board, &oriented, entrance, placed, &covered) {
            any_candidates = true;
            match reject_reason(board, &oriented, anchor, &covered) {
                None => return None,
                Some(Reject::OutOfBounds) => tallies[0] += 1,
                Some(Reject::Overlap) => tallies[1] += 1,
                Some(Reject::WallCell) => tallies[2] += 1,
                Some(Reject::NotAdjacent) => tallies[3] += 1,
                Some(Reject::WallEdge) => tallies[4] += 1,
            }
        }
    }

    if !any_candidates {
        return Some(PlacementFailure::NoCandidates);
    }

    let reasons = [
        PlacementFailure::OutOfBounds,
        PlacementFailure::Overlap,
        PlacementFailure::WallCell,
        PlacementFailure::NotAdjacent,
        PlacementFailure::WallEdge,
    ];
    let mut best = 0;
    for i in 1..reasons.len() {
        if tallies[i] > tallies[best] {
            best = i;
        }
    }
    Some(reasons[best])
}
