use std::str::FromStr;

use anyhow::{Context, bail};
use tilelink_core::Coord2;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Select(Coord2),
    Hint,
    NewGame,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut words = s.split_whitespace();
        let Some(first) = words.next() else {
            bail!("empty input");
        };

        let command = match first.to_ascii_lowercase().as_str() {
            "h" | "hint" => Self::Hint,
            "n" | "new" => Self::NewGame,
            "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => {
                let row = first
                    .parse()
                    .with_context(|| format!("unknown command {first:?}"))?;
                let col = words
                    .next()
                    .context("expected a column after the row")?
                    .parse()
                    .context("column must be a number")?;
                Self::Select((row, col))
            }
        };

        if words.next().is_some() {
            bail!("too many arguments");
        }
        Ok(command)
    }
}

pub(crate) const HELP: &str = "\
Commands:
  <row> <col>  select the tile at row, col
  h, hint      show a pair that can be matched
  n, new       start a new game
  ?, help      show this help
  q, quit      leave the game";
