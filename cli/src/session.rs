use chrono::{DateTime, Utc};
use tilelink_core::{Coord2, PlayEngine, SelectOutcome};

/// A game in progress together with its wall-clock bookkeeping.
pub(crate) struct GameSession {
    pub engine: PlayEngine,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    pub fn new(engine: PlayEngine, now: DateTime<Utc>) -> Self {
        let ended_at = engine.is_won().then_some(now);
        Self {
            engine,
            started_at: now,
            ended_at,
        }
    }

    /// Seconds played so far, frozen once the board is cleared.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        (self.ended_at.unwrap_or(now) - self.started_at)
            .num_seconds()
            .max(0) as u32
    }

    pub fn select(&mut self, coords: Coord2, now: DateTime<Utc>) -> SelectOutcome {
        let outcome = self.engine.select(coords);
        if self.engine.is_won() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
        outcome
    }
}
