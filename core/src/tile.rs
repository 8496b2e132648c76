use serde::{Deserialize, Serialize};

use crate::Symbol;

/// State of a single board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// Face-up tile that blocks paths and can be selected.
    Visible(Symbol),
    /// Matched away, or part of the border ring.
    Cleared,
}

impl Tile {
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible(_))
    }

    pub const fn is_cleared(self) -> bool {
        matches!(self, Self::Cleared)
    }

    pub const fn symbol(self) -> Option<Symbol> {
        match self {
            Self::Visible(symbol) => Some(symbol),
            Self::Cleared => None,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Cleared
    }
}
