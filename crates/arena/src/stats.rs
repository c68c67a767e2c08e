use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Running totals for one side.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SideStats {
    pub score: u32,
    pub lines_cleared: u32,
    pub pieces_placed: u32,
    pub garbage_sent: u32,
    pub garbage_received: u32,
    pub timeouts: u32,
    pub fallback_pieces: u32,
    /// Placements by rows cleared, index 0 = no clear.
    pub clears: [u32; 5],
    pub decision_times: Vec<Duration>,
}

impl SideStats {
    pub(crate) fn record_clear(&mut self, lines: u8, score_delta: u32) {
        self.pieces_placed += 1;
        self.lines_cleared += u32::from(lines);
        self.score += score_delta;
        if let Some(slot) = self.clears.get_mut(usize::from(lines)) {
            *slot += 1;
        }
    }

    pub fn average_decision_time(&self) -> Duration {
        match u32::try_from(self.decision_times.len()) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(n) => self.decision_times.iter().sum::<Duration>() / n,
        }
    }

    pub fn max_decision_time(&self) -> Duration {
        self.decision_times.iter().copied().max().unwrap_or_default()
    }
}
