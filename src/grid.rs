//! Board and cell model for the dungeon designer.
//!
//! A board is a rectangular, row-major grid of cells; row 0 is the top
//! edge and rows grow downward. Each cell carries a type, an optional
//! color tag, four directional wall bits, and a traversal flag set when
//! a committed action shape covers the cell.
//!
//! Directional walls are deliberately asymmetric: a cell's `right` bit
//! and its right neighbor's `left` bit are independent. Consumers that
//! care about edges (the placement search) must check both bits and
//! never infer one from the other.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 4-directional neighbor offsets: up, right, down, left.
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// What occupies a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Empty,
    Wall,
    Entrance,
    Key,
    Lock,
    Supplies,
    Mana,
    Encounter,
    Treasure,
    Relic,
}

impl CellType {
    /// Single-character glyph used by the ASCII renderer.
    pub fn glyph(self) -> char {
        match self {
            CellType::Empty => '.',
            CellType::Wall => '#',
            CellType::Entrance => 'E',
            CellType::Key => 'k',
            CellType::Lock => 'l',
            CellType::Supplies => 's',
            CellType::Mana => 'm',
            CellType::Encounter => 'x',
            CellType::Treasure => 't',
            CellType::Relic => 'R',
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            CellType::Empty => "empty",
            CellType::Wall => "wall",
            CellType::Entrance => "entrance",
            CellType::Key => "key",
            CellType::Lock => "lock",
            CellType::Supplies => "supplies",
            CellType::Mana => "mana",
            CellType::Encounter => "encounter",
            CellType::Treasure => "treasure",
            CellType::Relic => "relic",
        }
    }
}

/// Color tag a cell may require; independent of the cell type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRequirement {
    #[default]
    None,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl ColorRequirement {
    /// The six non-None color tags, in catalog order.
    pub const COLORS: [ColorRequirement; 6] = [
        ColorRequirement::Red,
        ColorRequirement::Orange,
        ColorRequirement::Yellow,
        ColorRequirement::Green,
        ColorRequirement::Blue,
        ColorRequirement::Purple,
    ];
}

/// Per-side wall bits for one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walls {
    #[serde(default)]
    pub top: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub bottom: bool,
    #[serde(default)]
    pub left: bool,
}

impl Walls {
    /// Whether this cell's own wall blocks movement out of the cell in
    /// the given (row, col) direction.
    pub fn blocks(&self, dr: isize, dc: isize) -> bool {
        match (dr, dc) {
            (-1, 0) => self.top,
            (0, 1) => self.right,
            (1, 0) => self.bottom,
            (0, -1) => self.left,
            _ => false,
        }
    }

    /// Sets the wall bit for side index 0-3 (top, right, bottom, left).
    pub fn set_side(&mut self, side: usize) {
        match side {
            0 => self.top = true,
            1 => self.right = true,
            2 => self.bottom = true,
            _ => self.left = true,
        }
    }
}

/// One board cell.
///
/// The serde names match the designer front-end's board-file JSON;
/// `traversed` defaults to false so boards exported before the
/// simulator existed still load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(rename = "type")]
    pub cell_type: CellType,
    #[serde(default)]
    pub color_requirement: ColorRequirement,
    #[serde(default)]
    pub walls: Walls,
    #[serde(default)]
    pub traversed: bool,
}

impl Cell {
    /// An empty cell with no color tag, no walls, not traversed.
    pub fn empty() -> Cell {
        Cell {
            cell_type: CellType::Empty,
            color_requirement: ColorRequirement::None,
            walls: Walls::default(),
            traversed: false,
        }
    }
}

/// Errors for structurally invalid board input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must have at least one row and one column")]
    ZeroSize,
    #[error("board rows have inconsistent lengths (row {row} has {len} cells, expected {expected})")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// A rectangular grid of cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board of all-empty cells.
    pub fn new(rows: usize, cols: usize) -> Result<Board, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::ZeroSize);
        }
        Ok(Board {
            rows,
            cols,
            cells: vec![Cell::empty(); rows * cols],
        })
    }

    /// Creates a square all-empty board.
    pub fn square(size: usize) -> Result<Board, BoardError> {
        Board::new(size, size)
    }

    /// Builds a board from nested row vectors, rejecting ragged input.
    ///
    /// Unlike shapes, boards are not padded: a ragged board file is a
    /// caller bug and is reported as such.
    pub fn from_cells(rows: Vec<Vec<Cell>>) -> Result<Board, BoardError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(BoardError::ZeroSize);
        }
        let expected = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(BoardError::RaggedRows {
                    row: i,
                    len: row.len(),
                    expected,
                });
            }
        }
        Ok(Board {
            rows: rows.len(),
            cols: expected,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Converts back to nested row vectors (the wire representation).
    pub fn to_cell_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.cols)
            .map(|chunk| chunk.to_vec())
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether signed coordinates fall inside the board.
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row * self.cols + col]
    }

    /// Iterates all coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> {
        let cols = self.cols;
        (0..self.rows * self.cols).map(move |i| (i / cols, i % cols))
    }

    /// Finds the entrance cell, if any (first in row-major order).
    pub fn entrance(&self) -> Option<(usize, usize)> {
        self.coords()
            .find(|&(r, c)| self.cell(r, c).cell_type == CellType::Entrance)
    }

    /// Counts cells of the given type.
    pub fn count_type(&self, cell_type: CellType) -> usize {
        self.cells.iter().filter(|c| c.cell_type == cell_type).count()
    }

    /// Counts cells with the given color tag.
    pub fn count_color(&self, color: ColorRequirement) -> usize {
        self.cells
            .iter()
            .filter(|c| c.color_requirement == color)
            .count()
    }

    /// Number of non-Wall cells (the cells a shape could ever cover).
    pub fn open_cell_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.cell_type != CellType::Wall)
            .count()
    }

    /// Number of non-Wall cells not yet covered by a placed shape.
    pub fn uncovered_open_cells(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.cell_type != CellType::Wall && !c.traversed)
            .count()
    }

    /// Clears every cell's traversal flag (deck reset).
    pub fn reset_traversal(&mut self) {
        for cell in &mut self.cells {
            cell.traversed = false;
        }
    }
}

/// Whether the edge between two 4-adjacent cells is blocked by a
/// directional wall on either side.
///
/// Checks the departing cell's bit in the movement direction and the
/// destination cell's bit in the opposite direction; the two bits are
/// independent and both matter.
pub fn edge_blocked(board: &Board, from: (usize, usize), to: (usize, usize)) -> bool {
    let dr = to.0 as isize - from.0 as isize;
    let dc = to.1 as isize - from.1 as isize;
    board.cell(from.0, from.1).walls.blocks(dr, dc)
        || board.cell(to.0, to.1).walls.blocks(-dr, -dc)
}

/// Formats a board as ASCII, one row per line.
///
/// Cells show their type glyph; empty cells covered by a placed shape
/// show `*` so traversal is visible in the CLI.
pub fn format_board(board: &Board) -> String {
    let mut output = String::with_capacity(board.rows() * (board.cols() + 1));
    for r in 0..board.rows() {
        for c in 0..board.cols() {
            let cell = board.cell(r, c);
            let glyph = if cell.traversed && cell.cell_type == CellType::Empty {
                '*'
            } else {
                cell.cell_type.glyph()
            };
            output.push(glyph);
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_board_is_rejected() {
        assert_eq!(Board::new(0, 5), Err(BoardError::ZeroSize));
        assert_eq!(Board::new(5, 0), Err(BoardError::ZeroSize));
        assert_eq!(Board::from_cells(vec![]), Err(BoardError::ZeroSize));
    }

    #[test]
    fn test_ragged_board_is_rejected() {
        let rows = vec![
            vec![Cell::empty(), Cell::empty()],
            vec![Cell::empty()],
        ];
        assert_eq!(
            Board::from_cells(rows),
            Err(BoardError::RaggedRows {
                row: 1,
                len: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn test_cell_rows_roundtrip() {
        let mut board = Board::new(2, 3).unwrap();
        board.cell_mut(1, 2).cell_type = CellType::Key;
        let rebuilt = Board::from_cells(board.to_cell_rows()).unwrap();
        assert_eq!(rebuilt, board);
    }

    #[test]
    fn test_entrance_lookup() {
        let mut board = Board::square(4).unwrap();
        assert_eq!(board.entrance(), None);
        board.cell_mut(3, 2).cell_type = CellType::Entrance;
        assert_eq!(board.entrance(), Some((3, 2)));
    }

    #[test]
    fn test_edge_blocked_checks_both_sides() {
        let mut board = Board::new(1, 2).unwrap();
        assert!(!edge_blocked(&board, (0, 0), (0, 1)));

        // only the destination cell's left bit set
        board.cell_mut(0, 1).walls.left = true;
        assert!(edge_blocked(&board, (0, 0), (0, 1)));
        assert!(edge_blocked(&board, (0, 1), (0, 0)));

        // only the departing cell's right bit set
        let mut board = Board::new(1, 2).unwrap();
        board.cell_mut(0, 0).walls.right = true;
        assert!(edge_blocked(&board, (0, 0), (0, 1)));
    }

    #[test]
    fn test_cell_json_tolerates_missing_fields() {
        let json = r#"{
            "type": "empty",
            "colorRequirement": "none",
            "walls": { "top": false, "right": false, "bottom": false, "left": false }
        }"#;
        let cell: Cell = serde_json::from_str(json).unwrap();
        assert!(!cell.traversed);

        // extra fields are ignored, absent walls/color default
        let json = r#"{ "type": "relic", "legacyField": 3 }"#;
        let cell: Cell = serde_json::from_str(json).unwrap();
        assert_eq!(cell.cell_type, CellType::Relic);
        assert_eq!(cell.color_requirement, ColorRequirement::None);
        assert_eq!(cell.walls, Walls::default());
    }

    #[test]
    fn test_cell_json_wire_names() {
        let mut cell = Cell::empty();
        cell.cell_type = CellType::Entrance;
        cell.color_requirement = ColorRequirement::Blue;
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["type"], "entrance");
        assert_eq!(json["colorRequirement"], "blue");
        assert_eq!(json["walls"]["top"], false);
    }

    #[test]
    fn test_reset_traversal() {
        let mut board = Board::square(3).unwrap();
        board.cell_mut(0, 0).traversed = true;
        board.cell_mut(2, 2).traversed = true;
        assert_eq!(board.uncovered_open_cells(), 7);
        board.reset_traversal();
        assert_eq!(board.uncovered_open_cells(), 9);
    }

    #[test]
    fn test_format_board_glyphs() {
        let mut board = Board::square(3).unwrap();
        board.cell_mut(0, 0).cell_type = CellType::Wall;
        board.cell_mut(1, 2).cell_type = CellType::Key;
        board.cell_mut(2, 1).cell_type = CellType::Entrance;
        board.cell_mut(2, 0).traversed = true;
        insta::assert_snapshot!(format_board(&board), @r"
        #..
        ..k
        *E.
        ");
    }
}
