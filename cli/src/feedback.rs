use std::io::{self, Write};

use tilelink_core::Feedback;

/// Stands in for match/mismatch sounds with the terminal bell.
///
/// Write failures are dropped so they can never reach the game.
pub(crate) struct TerminalFeedback {
    bell: bool,
}

impl TerminalFeedback {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }

    fn emit(&self, message: &str, ring: bool) {
        let mut out = io::stdout().lock();
        let bell = if ring && self.bell { "\x07" } else { "" };
        if let Err(err) = writeln!(out, "{bell}{message}").and_then(|()| out.flush()) {
            log::debug!("Feedback dropped: {}", err);
        }
    }
}

impl Feedback for TerminalFeedback {
    fn on_match(&mut self) {
        self.emit("Match!", true);
    }

    fn on_mismatch(&mut self) {
        self.emit("No match.", false);
    }
}
