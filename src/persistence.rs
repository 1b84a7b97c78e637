//! Board file import and export.
//!
//! The wire format is the JSON the designer front-end exchanges:
//! `{ name, board, actionShapes, size }` with camelCase field names,
//! lowercase enum strings, and card ranks as strings. Anything else a
//! producer adds is ignored; `traversed` and wall bits may be absent.
//! The board array is the source of truth; the `size` field is written
//! for readers that want it but never trusted on load.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::deck::CardValue;
use crate::geometry::{Shape, ShapeError};
use crate::grid::{Board, BoardError, Cell};
use crate::shapes::ActionShape;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read or write board file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse board file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid board layout: {0}")]
    Board(#[from] BoardError),
    #[error("invalid action shape {id}: {source}")]
    Shape { id: u32, source: ShapeError },
    #[error("action shape {id} has unknown card value {value:?}")]
    UnknownCardValue { id: u32, value: String },
}

/// A loaded board file: the board plus whatever shape catalog it
/// carried (empty means the caller should fall back to the standard
/// catalog).
#[derive(Debug)]
pub struct BoardFile {
    pub name: String,
    pub board: Board,
    pub action_shapes: Vec<ActionShape>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardFileWire {
    name: String,
    board: Vec<Vec<Cell>>,
    #[serde(default)]
    action_shapes: Vec<ActionShapeWire>,
    #[serde(default)]
    size: usize,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionShapeWire {
    id: u32,
    value: u8,
    shape: Vec<Vec<u8>>,
    card_values: Vec<String>,
}

/// Parses a board file from its JSON text.
pub fn from_json(json: &str) -> Result<BoardFile, PersistenceError> {
    let wire: BoardFileWire = serde_json::from_str(json)?;
    let board = Board::from_cells(wire.board)?;

    let mut action_shapes = Vec::with_capacity(wire.action_shapes.len());
    for entry in wire.action_shapes {
        let shape = Shape::from_rows(&entry.shape)
            .map_err(|source| PersistenceError::Shape { id: entry.id, source })?;
        let mut card_values = Vec::with_capacity(entry.card_values.len());
        for value in &entry.card_values {
            let parsed = CardValue::parse(value).ok_or_else(|| {
                PersistenceError::UnknownCardValue {
                    id: entry.id,
                    value: value.clone(),
                }
            })?;
            card_values.push(parsed);
        }
        action_shapes.push(ActionShape {
            id: entry.id,
            value: entry.value,
            shape,
            card_values,
        });
    }

    Ok(BoardFile {
        name: wire.name,
        board,
        action_shapes,
    })
}

/// Serializes a board and catalog to the wire JSON.
pub fn to_json(
    name: &str,
    board: &Board,
    action_shapes: &[ActionShape],
) -> Result<String, PersistenceError> {
    let wire = BoardFileWire {
        name: name.to_owned(),
        board: board.to_cell_rows(),
        action_shapes: action_shapes
            .iter()
            .map(|entry| ActionShapeWire {
                id: entry.id,
                value: entry.value,
                shape: (0..entry.shape.rows())
                    .map(|r| {
                        (0..entry.shape.cols())
                            .map(|c| u8::from(entry.shape.at(r, c)))
                            .collect()
                    })
                    .collect(),
                card_values: entry
                    .card_values
                    .iter()
                    .map(|v| v.as_str().to_owned())
                    .collect(),
            })
            .collect(),
        size: board.rows(),
    };
    Ok(serde_json::to_string_pretty(&wire)?)
}

/// Loads a board file from disk.
pub fn load(path: &Path) -> Result<BoardFile, PersistenceError> {
    from_json(&fs::read_to_string(path)?)
}

/// Saves a board and catalog to disk.
pub fn save(
    path: &Path,
    name: &str,
    board: &Board,
    action_shapes: &[ActionShape],
) -> Result<(), PersistenceError> {
    fs::write(path, to_json(name, board, action_shapes)?)?;
    Ok(())
}
