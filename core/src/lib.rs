#![no_std]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use path::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod board;
mod engine;
mod error;
mod generator;
mod path;
mod tile;
mod types;

pub const DEFAULT_RESHUFFLE_LIMIT: u16 = 32;

const fn default_reshuffle_limit() -> u16 {
    DEFAULT_RESHUFFLE_LIMIT
}

/// Board dimensions and tile set for one session.
///
/// `rows` and `cols` include the border ring, so the playable interior is
/// `(rows - 2) x (cols - 2)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub symbols: Symbol,
    /// Maximum reshuffle draws spent breaking a single deadlock.
    #[serde(default = "default_reshuffle_limit")]
    pub reshuffle_limit: u16,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, symbols: Symbol) -> Self {
        Self {
            rows,
            cols,
            symbols,
            reshuffle_limit: DEFAULT_RESHUFFLE_LIMIT,
        }
    }

    pub fn new(rows: Coord, cols: Coord, symbols: Symbol) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, symbols);
        config.validate()?;
        Ok(config)
    }

    /// 10x10 board with eight tile faces.
    pub const fn classic() -> Self {
        Self::new_unchecked(10, 10, 8)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows < 3 || self.cols < 3 {
            return Err(GameError::BoardTooSmall {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.symbols == 0 {
            return Err(GameError::NoSymbols);
        }
        if self.symbols > MAX_SYMBOLS {
            return Err(GameError::TooManySymbols(self.symbols));
        }
        let interior = self.interior_cells();
        if interior % 2 != 0 {
            return Err(GameError::OddInteriorCount(interior));
        }
        if CellCount::from(self.symbols) > self.pair_count() {
            log::warn!(
                "{} symbols requested but only {} pairs fit, some symbols will not appear",
                self.symbols,
                self.pair_count()
            );
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn interior_cells(&self) -> CellCount {
        mult(self.rows.saturating_sub(2), self.cols.saturating_sub(2))
    }

    pub const fn pair_count(&self) -> CellCount {
        self.interior_cells() / 2
    }

    /// Tile count per symbol for a freshly dealt board.
    ///
    /// Pairs are split evenly across symbols with the remainder going to the
    /// last one, so every quota is even and the quotas sum to the interior.
    pub fn symbol_quotas(&self) -> Vec<CellCount> {
        let symbols = CellCount::from(self.symbols);
        if symbols == 0 {
            return Vec::new();
        }
        let pairs = self.pair_count();
        let mut quotas = vec![pairs / symbols * 2; symbols.into()];
        if let Some(last) = quotas.last_mut() {
            *last += pairs % symbols * 2;
        }
        quotas
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Result of a single `select` call.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    /// Selection rejected without touching the game.
    Ignored,
    /// First half of a pair is now pending.
    Pending,
    /// Both tiles were cleared, carrying the connector to draw.
    Matched(Path),
    /// The pair did not match; the board is unchanged.
    Mismatched,
}

impl SelectOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Matched(path) => Some(path),
            _ => None,
        }
    }

    /// Fires the feedback signal belonging to this outcome, if any.
    pub fn notify<F: Feedback + ?Sized>(&self, feedback: &mut F) {
        match self {
            Self::Matched(_) => feedback.on_match(),
            Self::Mismatched => feedback.on_mismatch(),
            Self::Ignored | Self::Pending => {}
        }
    }
}

/// Fire-and-forget signals for sound or other non-visual feedback.
///
/// Implementations must not fail back into the game: whatever happens while
/// playing a sound stays on their side.
pub trait Feedback {
    fn on_match(&mut self);
    fn on_mismatch(&mut self);
}

impl Feedback for () {
    fn on_match(&mut self) {}
    fn on_mismatch(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn classic_quotas_are_even_and_fill_interior() {
        let config = GameConfig::classic();
        let quotas = config.symbol_quotas();

        assert_eq!(config.interior_cells(), 64);
        assert_eq!(quotas, [8; 8]);
    }

    #[test]
    fn remainder_pairs_go_to_last_symbol() {
        let config = GameConfig::new(6, 7, 3).unwrap();
        let quotas = config.symbol_quotas();

        assert_eq!(config.interior_cells(), 20);
        assert_eq!(quotas, [6, 6, 8]);
        assert!(quotas.iter().all(|quota| quota % 2 == 0));
    }

    #[test]
    fn more_symbols_than_pairs_is_allowed() {
        let config = GameConfig::new(4, 4, 5).unwrap();
        let quotas = config.symbol_quotas();

        assert_eq!(quotas, [0, 0, 0, 0, 4]);
    }

    #[test]
    fn new_rejects_unplayable_configs() {
        assert_eq!(
            GameConfig::new(2, 8, 4),
            Err(GameError::BoardTooSmall { rows: 2, cols: 8 })
        );
        assert_eq!(GameConfig::new(6, 6, 0), Err(GameError::NoSymbols));
        assert_eq!(
            GameConfig::new(5, 5, 2),
            Err(GameError::OddInteriorCount(9))
        );
    }

    #[test]
    fn symbols_are_capped_by_layout_alphabet() {
        assert_eq!(
            GameConfig::new(20, 20, 100),
            Err(GameError::TooManySymbols(100))
        );
        assert_eq!(
            GameConfig::new(20, 20, MAX_SYMBOLS + 1),
            Err(GameError::TooManySymbols(MAX_SYMBOLS + 1))
        );

        let config = GameConfig::new(20, 20, MAX_SYMBOLS).unwrap();
        let board = RandomBoardGenerator::new(3).generate(config).unwrap();
        let text = board.to_string();
        assert!(!text.contains('#'));
        assert_eq!(text.parse::<Board>().unwrap(), board);
    }

    #[test]
    fn config_deserializes_with_default_reshuffle_limit() {
        let config: GameConfig =
            serde_json::from_str(r#"{"rows": 6, "cols": 8, "symbols": 4}"#).unwrap();

        assert_eq!(config.reshuffle_limit, DEFAULT_RESHUFFLE_LIMIT);
        assert_eq!(config.interior_cells(), 24);
    }

    #[derive(Default)]
    struct Counter {
        matches: u32,
        mismatches: u32,
    }

    impl Feedback for Counter {
        fn on_match(&mut self) {
            self.matches += 1;
        }

        fn on_mismatch(&mut self) {
            self.mismatches += 1;
        }
    }

    #[test]
    fn notify_fires_only_for_resolved_pairs() {
        let mut counter = Counter::default();

        SelectOutcome::Ignored.notify(&mut counter);
        SelectOutcome::Pending.notify(&mut counter);
        SelectOutcome::Mismatched.notify(&mut counter);
        SelectOutcome::Matched(Path::straight((1, 1), (1, 2))).notify(&mut counter);

        assert_eq!(counter.matches, 1);
        assert_eq!(counter.mismatches, 1);
    }
}
