use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of a session for renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    /// Face of every visible tile, `None` for cleared cells.
    pub tiles: Array2<Option<Symbol>>,
    pub pending: Option<Coord2>,
    pub state: EngineState,
    pub remaining: CellCount,
}

impl Snapshot {
    pub fn from_engine(engine: &PlayEngine) -> Self {
        let board = engine.board();
        let size = board.size();
        let mut tiles = Array2::from_elem(size.to_nd_index(), None);

        let (row_end, col_end) = size;
        for row in 0..row_end {
            for col in 0..col_end {
                let coords = (row, col);
                tiles[coords.to_nd_index()] = board[coords].symbol();
            }
        }

        Self {
            size,
            tiles,
            pending: engine.pending(),
            state: engine.state(),
            remaining: board.visible_count(),
        }
    }

    pub fn symbol_at(&self, coords: Coord2) -> Option<Symbol> {
        self.tiles[coords.to_nd_index()]
    }

    pub fn is_pending(&self, coords: Coord2) -> bool {
        self.pending == Some(coords)
    }
}
