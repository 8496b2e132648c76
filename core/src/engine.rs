use core::num::Saturating;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Keeps the reshuffle stream apart from the one used to deal the board.
const RESHUFFLE_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Playing,
    Won,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Playing
    }
}

/// One game session: the board, the pending selection and the win state.
///
/// Every selection runs to completion, including the deadlock scan and any
/// reshuffle, before `select` returns.
#[derive(Clone, Debug)]
pub struct PlayEngine {
    config: GameConfig,
    board: Board,
    pending: Option<Coord2>,
    cleared_count: Saturating<CellCount>,
    reshuffle_count: u32,
    state: EngineState,
    rng: SmallRng,
}

impl PlayEngine {
    /// Deals a fresh board for `config`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let board = RandomBoardGenerator::new(seed).generate(config)?;
        Ok(Self::with_board(config, board, seed))
    }

    /// Starts a session from an explicit layout.
    pub fn from_board(board: Board, seed: u64) -> Result<Self> {
        let (rows, cols) = board.size();
        if rows < 3 || cols < 3 {
            return Err(GameError::BoardTooSmall { rows, cols });
        }
        if let Some(symbol) = board.unpaired_symbol() {
            return Err(GameError::UnpairedSymbol(symbol));
        }

        let symbols = board.symbol_counts().len().max(1) as Symbol;
        let config = GameConfig::new_unchecked(rows, cols, symbols);
        Ok(Self::with_board(config, board, seed))
    }

    fn with_board(config: GameConfig, board: Board, seed: u64) -> Self {
        let cleared_count = Saturating(board.cleared_interior_count());
        let state = if board.is_empty() {
            EngineState::Won
        } else {
            EngineState::Playing
        };
        Self {
            config,
            board,
            pending: None,
            cleared_count,
            reshuffle_count: 0,
            state,
            rng: SmallRng::seed_from_u64(seed ^ RESHUFFLE_SEED_SALT),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn pending(&self) -> Option<Coord2> {
        self.pending
    }

    pub fn cleared_count(&self) -> CellCount {
        self.cleared_count.0
    }

    pub fn remaining_tiles(&self) -> CellCount {
        self.board.visible_count()
    }

    /// Total reshuffle draws made to break deadlocks so far.
    pub fn reshuffle_count(&self) -> u32 {
        self.reshuffle_count
    }

    pub fn can_select(&self, coords: Coord2) -> bool {
        self.check_selectable(coords).is_ok()
    }

    /// A pair that could be matched right now, if any.
    pub fn hint(&self) -> Option<(Coord2, Coord2)> {
        if self.state.is_finished() {
            return None;
        }
        find_legal_pair(&self.board).map(|pair| (pair.first, pair.second))
    }

    /// Handles one tap on `coords`.
    ///
    /// Taps on the border, on cleared cells, outside the board, on the
    /// pending tile itself, or after the game is won are [`SelectOutcome::Ignored`].
    pub fn select(&mut self, coords: Coord2) -> SelectOutcome {
        if let Err(reason) = self.check_selectable(coords) {
            log::debug!("Ignored selection at {:?}: {}", coords, reason);
            return SelectOutcome::Ignored;
        }
        if self.pending == Some(coords) {
            log::debug!("Ignored repeated selection at {:?}", coords);
            return SelectOutcome::Ignored;
        }

        self.ensure_legal_pair();

        match self.pending.take() {
            None => {
                log::debug!("Pending selection at {:?}", coords);
                self.pending = Some(coords);
                SelectOutcome::Pending
            }
            Some(first) => self.resolve(first, coords),
        }
    }

    fn resolve(&mut self, first: Coord2, second: Coord2) -> SelectOutcome {
        let same_symbol = self.board[first].symbol() == self.board[second].symbol();
        let path = if same_symbol {
            find_path(&self.board, first, second)
        } else {
            None
        };

        let Some(path) = path else {
            log::debug!(
                "Mismatch {:?} -> {:?} (same symbol: {})",
                first,
                second,
                same_symbol
            );
            return SelectOutcome::Mismatched;
        };

        self.board.clear_pair(first, second);
        self.cleared_count += 2;
        log::debug!(
            "Matched {:?} -> {:?} with {} bend(s), {} tiles left",
            first,
            second,
            path.bends(),
            self.remaining_tiles()
        );

        if self.cleared_count.0 >= self.board.interior_cells() {
            log::debug!("Board cleared");
            self.state = EngineState::Won;
        }
        SelectOutcome::Matched(path)
    }

    /// Reshuffles the visible tiles until at least one pair can be matched,
    /// giving up after `reshuffle_limit` draws.
    fn ensure_legal_pair(&mut self) {
        if self.board.is_empty() || has_any_legal_pair(&self.board) {
            return;
        }

        let limit = self.config.reshuffle_limit.max(1);
        for attempt in 1..=limit {
            reshuffle(&mut self.board, &mut self.rng);
            self.reshuffle_count += 1;
            if has_any_legal_pair(&self.board) {
                log::debug!("Deadlock broken after {} reshuffle(s)", attempt);
                return;
            }
        }
        log::warn!("Board still deadlocked after {} reshuffles", limit);
    }

    fn check_selectable(&self, coords: Coord2) -> Result<()> {
        if self.state.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        if !self.board.is_interior(coords) {
            return Err(GameError::InvalidCoords);
        }
        if !self.board[coords].is_visible() {
            return Err(GameError::NotSelectable);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(layout: &str) -> PlayEngine {
        PlayEngine::from_board(layout.parse().unwrap(), 0).unwrap()
    }

    #[test]
    fn single_symbol_board_plays_to_win() {
        let config = GameConfig::new(4, 4, 1).unwrap();
        let mut engine = PlayEngine::new(config, 17).unwrap();

        assert_eq!(engine.select((1, 1)), SelectOutcome::Pending);
        assert!(matches!(engine.select((1, 2)), SelectOutcome::Matched(_)));
        assert_eq!(engine.state(), EngineState::Playing);

        assert_eq!(engine.select((2, 1)), SelectOutcome::Pending);
        let outcome = engine.select((2, 2));
        assert_eq!(outcome.path().map(Path::bends), Some(0));

        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(engine.cleared_count(), 4);
        assert_eq!(engine.select((1, 1)), SelectOutcome::Ignored);
    }

    #[test]
    fn win_happens_exactly_on_last_pair() {
        let mut engine = engine(
            "
            ......
            .AB.B.
            .A....
            ......
            ",
        );

        engine.select((1, 2));
        assert!(engine.select((1, 4)).has_update());
        assert!(!engine.is_won());

        engine.select((1, 1));
        let outcome = engine.select((2, 1));
        assert_eq!(
            outcome.path().map(Path::waypoints),
            Some(&[(1, 1), (2, 1)][..])
        );
        assert!(engine.is_won());
        assert_eq!(engine.remaining_tiles(), 0);
        assert_eq!(engine.select((2, 1)), SelectOutcome::Ignored);
        assert_eq!(engine.hint(), None);
    }

    #[test]
    fn mismatch_leaves_board_untouched() {
        let mut engine = engine(
            "
            ......
            .AABB.
            ......
            ",
        );
        let before = engine.board().clone();

        assert_eq!(engine.select((1, 2)), SelectOutcome::Pending);
        assert_eq!(engine.select((1, 3)), SelectOutcome::Mismatched);

        assert_eq!(engine.board(), &before);
        assert_eq!(engine.pending(), None);
        assert_eq!(engine.cleared_count(), 0);
    }

    #[test]
    fn equal_symbols_without_path_mismatch() {
        let mut engine = engine(
            "
            ......
            .BBCC.
            .AFFA.
            .DDEE.
            ......
            ",
        );
        let before = engine.board().clone();

        engine.select((2, 1));
        assert_eq!(engine.select((2, 4)), SelectOutcome::Mismatched);
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.reshuffle_count(), 0);
    }

    #[test]
    fn repeated_tap_keeps_selection() {
        let mut engine = engine(
            "
            ....
            .AA.
            ....
            ",
        );

        assert_eq!(engine.select((1, 1)), SelectOutcome::Pending);
        assert_eq!(engine.select((1, 1)), SelectOutcome::Ignored);
        assert_eq!(engine.pending(), Some((1, 1)));
        assert!(matches!(engine.select((1, 2)), SelectOutcome::Matched(_)));
    }

    #[test]
    fn stray_taps_are_ignored() {
        let mut engine = engine(
            "
            .....
            .AA..
            .BB..
            .....
            ",
        );

        assert_eq!(engine.select((0, 0)), SelectOutcome::Ignored);
        assert_eq!(engine.select((3, 2)), SelectOutcome::Ignored);
        assert_eq!(engine.select((40, 1)), SelectOutcome::Ignored);
        assert_eq!(engine.select((1, 3)), SelectOutcome::Ignored);
        assert!(!engine.can_select((2, 3)));
        assert!(engine.can_select((2, 2)));
        assert_eq!(engine.pending(), None);
    }

    #[test]
    fn deadlock_is_reshuffled_before_tap() {
        let mut engine = engine(
            "
            ....
            .AB.
            .BA.
            ....
            ",
        );
        assert!(!has_any_legal_pair(engine.board()));
        let counts = engine.board().symbol_counts();

        assert_eq!(engine.select((1, 1)), SelectOutcome::Pending);

        assert!(engine.reshuffle_count() >= 1);
        assert!(has_any_legal_pair(engine.board()));
        assert_eq!(engine.board().symbol_counts(), counts);
        assert_eq!(engine.board().visible_count(), 4);
        assert!(engine.hint().is_some());
    }

    #[test]
    fn play_continues_when_reshuffles_run_out() {
        let layout: Board = "
            ....
            .AB.
            .BA.
            ....
        "
        .parse()
        .unwrap();
        let seed = (0..64)
            .find(|&seed| {
                let mut board = layout.clone();
                let mut rng = SmallRng::seed_from_u64(seed ^ RESHUFFLE_SEED_SALT);
                reshuffle(&mut board, &mut rng);
                !has_any_legal_pair(&board)
            })
            .unwrap();

        let mut engine = PlayEngine::from_board(layout.clone(), seed).unwrap();
        engine.config.reshuffle_limit = 1;

        assert_eq!(engine.select((1, 1)), SelectOutcome::Pending);
        assert_eq!(engine.reshuffle_count(), 1);
        assert!(!has_any_legal_pair(engine.board()));
        assert_eq!(engine.hint(), None);
        assert_eq!(engine.board().symbol_counts(), layout.symbol_counts());
        assert_eq!(engine.state(), EngineState::Playing);
    }

    #[test]
    fn hint_points_at_matchable_pair() {
        let mut engine = engine(
            "
            ......
            .ABAB.
            .CDDC.
            ......
            ",
        );

        let (first, second) = engine.hint().unwrap();
        assert_eq!((first, second), ((1, 1), (1, 3)));

        engine.select(first);
        assert!(matches!(engine.select(second), SelectOutcome::Matched(_)));
    }

    #[test]
    fn from_board_rejects_tiny_board() {
        assert_eq!(
            PlayEngine::from_board(Board::new((2, 5)), 0).err(),
            Some(GameError::BoardTooSmall { rows: 2, cols: 5 })
        );
    }

    #[test]
    fn fresh_game_is_reproducible() {
        let config = GameConfig::classic();
        let first = PlayEngine::new(config, 5).unwrap();
        let second = PlayEngine::new(config, 5).unwrap();

        assert_eq!(first.board(), second.board());
        assert_eq!(first.remaining_tiles(), 64);
        assert_eq!(first.state(), EngineState::Playing);
    }
}
