use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use core::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of distinct symbols the text layout can spell.
pub const MAX_SYMBOLS: Symbol = 52;

/// Character used for a symbol in the text layout, `A`..`Z` then `a`..`z`.
///
/// Symbols at or past [`MAX_SYMBOLS`] have no letter and render as `#`.
pub const fn symbol_char(symbol: Symbol) -> char {
    match symbol {
        0..26 => (b'A' + symbol) as char,
        26..MAX_SYMBOLS => (b'a' + (symbol - 26)) as char,
        _ => '#',
    }
}

const fn char_symbol(c: char) -> Option<Symbol> {
    match c {
        'A'..='Z' => Some(c as u8 - b'A'),
        'a'..='z' => Some(c as u8 - b'a' + 26),
        _ => None,
    }
}

/// Grid of tiles, border ring included.
///
/// Cells on row `0`, row `rows - 1`, column `0` and column `cols - 1` are
/// always [`Tile::Cleared`]; paths may run through them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Array2<Tile>,
}

impl Board {
    /// Board of the given size with every cell cleared.
    pub fn new(size: Coord2) -> Self {
        Self {
            tiles: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.tiles.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn is_interior(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        (1..rows.saturating_sub(1)).contains(&row) && (1..cols.saturating_sub(1)).contains(&col)
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.tiles[coords.to_nd_index()]
    }

    /// Whether `coords` is an interior cell holding a face-up tile.
    pub fn is_selectable(&self, coords: Coord2) -> bool {
        self.is_interior(coords) && self.tile_at(coords).is_visible()
    }

    pub fn interior_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows.saturating_sub(2), cols.saturating_sub(2))
    }

    pub fn iter_interior(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        let last_col = cols.saturating_sub(1);
        (1..rows.saturating_sub(1)).flat_map(move |row| (1..last_col).map(move |col| (row, col)))
    }

    pub fn visible_positions(&self) -> Vec<Coord2> {
        self.iter_interior()
            .filter(|&pos| self.tile_at(pos).is_visible())
            .collect()
    }

    pub fn visible_count(&self) -> CellCount {
        self.tiles
            .iter()
            .filter(|tile| tile.is_visible())
            .count() as CellCount
    }

    pub fn cleared_interior_count(&self) -> CellCount {
        self.interior_cells() - self.visible_count()
    }

    pub fn is_empty(&self) -> bool {
        self.visible_count() == 0
    }

    /// Number of visible tiles per symbol, indexed by symbol.
    pub fn symbol_counts(&self) -> Vec<CellCount> {
        let mut counts = Vec::new();
        for symbol in self.tiles.iter().filter_map(|tile| tile.symbol()) {
            let index = usize::from(symbol);
            if index >= counts.len() {
                counts.resize(index + 1, 0);
            }
            counts[index] += 1;
        }
        counts
    }

    /// First symbol with an odd number of visible tiles, if any.
    pub fn unpaired_symbol(&self) -> Option<Symbol> {
        self.symbol_counts()
            .iter()
            .position(|count| count % 2 != 0)
            .map(|symbol| symbol as Symbol)
    }

    pub(crate) fn set(&mut self, coords: Coord2, tile: Tile) {
        debug_assert!(
            tile.is_cleared() || self.is_interior(coords),
            "border cell {coords:?} must stay cleared"
        );
        self.tiles[coords.to_nd_index()] = tile;
    }

    pub(crate) fn clear_pair(&mut self, a: Coord2, b: Coord2) {
        self.set(a, Tile::Cleared);
        self.set(b, Tile::Cleared);
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.rows() {
            for tile in row {
                let c = match tile {
                    Tile::Visible(symbol) => symbol_char(*symbol),
                    Tile::Cleared => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the text layout: one line per row, `.` for cleared cells and a
/// letter per symbol. Blank lines and surrounding whitespace are ignored.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        if rows > usize::from(Coord::MAX) || cols > usize::from(Coord::MAX) {
            return Err(GameError::InvalidLayout {
                line: 1,
                reason: "board too large",
            });
        }
        let size = (rows as Coord, cols as Coord);
        if size.0 < 3 || size.1 < 3 {
            return Err(GameError::BoardTooSmall {
                rows: size.0,
                cols: size.1,
            });
        }

        let mut board = Board::new(size);
        for (row, line) in lines.iter().enumerate() {
            let invalid = |reason| GameError::InvalidLayout {
                line: row + 1,
                reason,
            };
            if line.chars().count() != cols {
                return Err(invalid("rows differ in length"));
            }
            for (col, c) in line.chars().enumerate() {
                let coords = (row as Coord, col as Coord);
                let tile = match c {
                    '.' => Tile::Cleared,
                    c => Tile::Visible(char_symbol(c).ok_or(invalid("unknown tile character"))?),
                };
                if tile.is_visible() && !board.is_interior(coords) {
                    return Err(invalid("border ring must be cleared"));
                }
                board.set(coords, tile);
            }
        }

        if let Some(symbol) = board.unpaired_symbol() {
            return Err(GameError::UnpairedSymbol(symbol));
        }
        Ok(board)
    }
}
