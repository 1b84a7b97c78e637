//! 2D shape transforms for polyomino action shapes.
//!
//! A shape is a rectangular 0/1 occupancy matrix anchored at its own
//! top-left cell. Transforms are pure: each one allocates a new `Shape`
//! and never mutates its input, so composed orientations can be compared
//! cell-for-cell.

use thiserror::Error;

/// Errors produced when ingesting a shape matrix.
///
/// These indicate a caller bug (malformed catalog data or board file),
/// not a placement dead end, so they are reported loudly instead of
/// being folded into the `Option`-based search results.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("shape matrix has no rows")]
    NoRows,
    #[error("shape matrix has no columns")]
    NoColumns,
    #[error("shape matrix contains no occupied cells")]
    NoOccupiedCells,
}

/// A polyomino occupancy matrix, stored row-major as 0/1 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Shape {
    /// Builds a shape from row vectors, normalizing ragged input.
    ///
    /// Rows shorter than the widest row are padded with empty cells on
    /// the right; any nonzero entry counts as occupied. An empty matrix
    /// or a matrix with no occupied cell at all is rejected.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Shape, ShapeError> {
        if rows.is_empty() {
            return Err(ShapeError::NoRows);
        }
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        if cols == 0 {
            return Err(ShapeError::NoColumns);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            for col in 0..cols {
                let occupied = row.get(col).is_some_and(|&v| v != 0);
                cells.push(u8::from(occupied));
            }
        }

        if cells.iter().all(|&v| v == 0) {
            return Err(ShapeError::NoOccupiedCells);
        }

        Ok(Shape {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Number of rows in the bounding box.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the bounding box.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the cell at (row, col) is occupied.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col] != 0
    }

    /// Iterates over the (row, col) positions of all occupied cells,
    /// in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(|(i, _)| (i / self.cols, i % self.cols))
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Returns the shape rotated 90 degrees clockwise.
    ///
    /// For an R x C input the output is C x R with
    /// `output[c][R-1-r] = input[r][c]`. Four applications return the
    /// original shape.
    pub fn rotate_clockwise(&self) -> Shape {
        let (r_in, c_in) = (self.rows, self.cols);
        let mut cells = vec![0u8; r_in * c_in];
        for r in 0..r_in {
            for c in 0..c_in {
                // output is c_in rows by r_in cols
                cells[c * r_in + (r_in - 1 - r)] = self.cells[r * c_in + c];
            }
        }
        Shape {
            rows: c_in,
            cols: r_in,
            cells,
        }
    }

    /// Returns the shape mirrored left-to-right (columns reversed
    /// within each row).
    pub fn flip_horizontal(&self) -> Shape {
        let mut cells = vec![0u8; self.rows * self.cols];
        for r in 0..self.rows {
            for c in 0..self.cols {
                cells[r * self.cols + (self.cols - 1 - c)] = self.cells[r * self.cols + c];
            }
        }
        Shape {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Returns the shape mirrored top-to-bottom (rows reversed).
    pub fn flip_vertical(&self) -> Shape {
        let mut cells = vec![0u8; self.rows * self.cols];
        for r in 0..self.rows {
            for c in 0..self.cols {
                cells[(self.rows - 1 - r) * self.cols + c] = self.cells[r * self.cols + c];
            }
        }
        Shape {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }
}

/// The orientation sequence tried by the placement search, in order:
/// the original shape, its three clockwise rotations, the horizontal
/// flip with its three rotations, then a single vertical flip.
///
/// This is 9 attempts, not the full 8-orientation dihedral group: the
/// vertical flip is never combined with rotation, so for chiral shapes
/// some legal orientations are unreachable. Known limitation, kept
/// because it is observable behavior of the placement contract.
pub fn search_orientations(shape: &Shape) -> Vec<Shape> {
    let mut orientations = Vec::with_capacity(9);

    let mut current = shape.clone();
    orientations.push(current.clone());
    for _ in 0..3 {
        current = current.rotate_clockwise();
        orientations.push(current.clone());
    }

    let mut flipped = shape.flip_horizontal();
    orientations.push(flipped.clone());
    for _ in 0..3 {
        flipped = flipped.rotate_clockwise();
        orientations.push(flipped.clone());
    }

    orientations.push(shape.flip_vertical());
    orientations
}
