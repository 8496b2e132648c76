use std::collections::HashSet;
use std::fmt;

use tilelink_core::{Coord2, EngineState, Path, Snapshot, symbol_char};

/// Text rendering of a snapshot, optionally overlaying the connector of the
/// last match, followed by a status line with the play time.
pub(crate) struct BoardView<'a> {
    snapshot: &'a Snapshot,
    connector: HashSet<Coord2>,
    elapsed_secs: u32,
}

impl<'a> BoardView<'a> {
    pub fn new(snapshot: &'a Snapshot, path: Option<&Path>, elapsed_secs: u32) -> Self {
        Self {
            snapshot,
            connector: path.map(|path| path.cells().collect()).unwrap_or_default(),
            elapsed_secs,
        }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.snapshot.size;

        write!(f, "    ")?;
        for col in 0..cols {
            write!(f, "{col:^3}")?;
        }
        writeln!(f)?;

        for row in 0..rows {
            write!(f, "{row:>3} ")?;
            for col in 0..cols {
                let coords = (row, col);
                match self.snapshot.symbol_at(coords) {
                    Some(symbol) if self.snapshot.is_pending(coords) => {
                        write!(f, "[{}]", symbol_char(symbol))?
                    }
                    Some(symbol) => write!(f, " {} ", symbol_char(symbol))?,
                    None if self.connector.contains(&coords) => write!(f, " * ")?,
                    None => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }

        match self.snapshot.state {
            EngineState::Playing => write!(f, "{} tiles left", self.snapshot.remaining)?,
            EngineState::Won => write!(f, "You win!")?,
        }
        write!(f, "  Time: {}s", self.elapsed_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilelink_core::{Board, PlayEngine, SelectOutcome};

    #[test]
    fn renders_pending_and_connector() {
        let board: Board = "
            ......
            .ABBA.
            .CC...
            ......
        "
        .parse()
        .unwrap();
        let mut engine = PlayEngine::from_board(board, 0).unwrap();

        engine.select((1, 1));
        let pending = BoardView::new(&engine.snapshot(), None, 7).to_string();
        assert!(pending.contains("  1  . [A] B  B  A  . "));

        let SelectOutcome::Matched(path) = engine.select((1, 4)) else {
            panic!("expected a match");
        };
        let matched = BoardView::new(&engine.snapshot(), Some(&path), 12).to_string();
        assert!(matched.contains("  0  .  *  *  *  *  . "));
        assert!(matched.contains("  1  .  *  B  B  *  . "));
        assert!(pending.ends_with("6 tiles left  Time: 7s"));
        assert!(matched.ends_with("4 tiles left  Time: 12s"));
    }

    #[test]
    fn won_board_shows_final_time() {
        let board: Board = "
            ....
            .AA.
            ....
        "
        .parse()
        .unwrap();
        let mut engine = PlayEngine::from_board(board, 0).unwrap();
        engine.select((1, 1));
        engine.select((1, 2));

        let won = BoardView::new(&engine.snapshot(), None, 5).to_string();
        assert!(won.ends_with("You win!  Time: 5s"));
    }
}
