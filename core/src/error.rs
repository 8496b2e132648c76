use thiserror::Error;

use crate::{CellCount, Coord, MAX_SYMBOLS, Symbol};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board of {rows}x{cols} has no interior, both sides must be at least 3")]
    BoardTooSmall { rows: Coord, cols: Coord },
    #[error("At least one symbol is required")]
    NoSymbols,
    #[error("{0} symbols requested, at most {MAX_SYMBOLS} are supported")]
    TooManySymbols(Symbol),
    #[error("Interior of {0} cells cannot be split into pairs")]
    OddInteriorCount(CellCount),
    #[error("Invalid board layout on line {line}: {reason}")]
    InvalidLayout { line: usize, reason: &'static str },
    #[error("Symbol {0} appears an odd number of times")]
    UnpairedSymbol(Symbol),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("No tile to select at these coordinates")]
    NotSelectable,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
