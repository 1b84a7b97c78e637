//! BFS distance field from a source cell.
//!
//! Traversal is 4-directional through non-Wall cells. Directional wall
//! bits are intentionally ignored here: the generators only care about
//! cell-level topology, while the placement search applies the stricter
//! edge-aware checks itself.

use std::collections::VecDeque;

use crate::grid::{Board, CellType, DIRECTIONS};

/// Sentinel distance for cells not reachable from the source.
pub const UNREACHABLE: u32 = u32::MAX;

/// Hop distances from a source cell, same dimensions as the board.
#[derive(Clone, Debug)]
pub struct DistanceMap {
    rows: usize,
    cols: usize,
    dist: Vec<u32>,
}

impl DistanceMap {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Distance at (row, col); `UNREACHABLE` when no path exists.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.dist[row * self.cols + col]
    }

    pub fn is_reachable(&self, row: usize, col: usize) -> bool {
        self.get(row, col) != UNREACHABLE
    }

    /// Largest finite distance, or None when even the source is absent.
    pub fn max_finite(&self) -> Option<u32> {
        self.dist.iter().copied().filter(|&d| d != UNREACHABLE).max()
    }

    /// Number of cells with a finite distance.
    pub fn reachable_count(&self) -> usize {
        self.dist.iter().filter(|&&d| d != UNREACHABLE).count()
    }
}

/// Distance field from the board's entrance, or None when the board
/// has no entrance (a normal outcome for mid-edit boards, not an
/// error).
pub fn entrance_distances(board: &Board) -> Option<DistanceMap> {
    board.entrance().map(|source| distance_from(board, source))
}

/// Computes hop distances from `source` over non-Wall cells.
///
/// Standard queue-based level-order traversal; each cell is visited at
/// most once, so the result is canonical regardless of neighbor order.
pub fn distance_from(board: &Board, source: (usize, usize)) -> DistanceMap {
    let (rows, cols) = (board.rows(), board.cols());
    let mut dist = vec![UNREACHABLE; rows * cols];
    dist[source.0 * cols + source.1] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some((r, c)) = queue.pop_front() {
        let current = dist[r * cols + c];
        for (dr, dc) in DIRECTIONS {
            let (nr, nc) = (r as isize + dr, c as isize + dc);
            if !board.in_bounds(nr, nc) {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            if dist[nr * cols + nc] != UNREACHABLE {
                continue;
            }
            if board.cell(nr, nc).cell_type == CellType::Wall {
                continue;
            }
            dist[nr * cols + nc] = current + 1;
            queue.push_back((nr, nc));
        }
    }

    DistanceMap { rows, cols, dist }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_distance_is_zero() {
        let board = Board::square(5).unwrap();
        let dist = distance_from(&board, (4, 2));
        assert_eq!(dist.get(4, 2), 0);
    }

    #[test]
    fn test_entrance_distances_without_entrance() {
        let board = Board::square(5).unwrap();
        assert!(entrance_distances(&board).is_none());

        let mut board = board;
        board.cell_mut(4, 2).cell_type = CellType::Entrance;
        let dist = entrance_distances(&board).expect("entrance exists");
        assert_eq!(dist.get(4, 2), 0);
    }

    #[test]
    fn test_open_board_distances_are_manhattan() {
        let board = Board::square(4).unwrap();
        let dist = distance_from(&board, (0, 0));
        for (r, c) in board.coords() {
            assert_eq!(dist.get(r, c), (r + c) as u32);
        }
    }

    #[test]
    fn test_wall_cells_are_unreachable() {
        let mut board = Board::square(3).unwrap();
        // wall column splits the board
        for r in 0..3 {
            board.cell_mut(r, 1).cell_type = CellType::Wall;
        }
        let dist = distance_from(&board, (0, 0));
        assert!(dist.is_reachable(2, 0));
        for r in 0..3 {
            assert!(!dist.is_reachable(r, 1));
            assert!(!dist.is_reachable(r, 2));
        }
        assert_eq!(dist.reachable_count(), 3);
    }

    #[test]
    fn test_directional_walls_are_ignored() {
        let mut board = Board::square(3).unwrap();
        for (r, c) in board.coords() {
            let walls = &mut board.cell_mut(r, c).walls;
            walls.top = true;
            walls.right = true;
            walls.bottom = true;
            walls.left = true;
        }
        let dist = distance_from(&board, (1, 1));
        // edge walls do not affect cell-level connectivity
        assert_eq!(dist.reachable_count(), 9);
        assert_eq!(dist.max_finite(), Some(2));
    }

    #[test]
    fn test_path_consistency() {
        let mut board = Board::square(6).unwrap();
        board.cell_mut(1, 1).cell_type = CellType::Wall;
        board.cell_mut(1, 2).cell_type = CellType::Wall;
        board.cell_mut(3, 4).cell_type = CellType::Wall;
        let dist = distance_from(&board, (5, 3));

        for (r, c) in board.coords() {
            let d = dist.get(r, c);
            if d == 0 || d == UNREACHABLE {
                continue;
            }
            let has_closer_neighbor = DIRECTIONS.iter().any(|&(dr, dc)| {
                let (nr, nc) = (r as isize + dr, c as isize + dc);
                board.in_bounds(nr, nc) && dist.get(nr as usize, nc as usize) == d - 1
            });
            assert!(has_closer_neighbor, "cell ({r},{c}) at distance {d} has no predecessor");
        }
    }
}
