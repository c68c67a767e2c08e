use serde::{Deserialize, Serialize};
use versus_core::{Piece, Placement};
use versus_engine::BankSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

/// Where the piece played on a turn came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PieceSource {
    /// Chosen for this side by the opponent on the previous turn.
    Queued,
    /// Drawn from the shared bank.
    Bank,
    /// Bank was empty; picked uniformly from all seven types.
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Winner(Side),
    Draw,
    /// Stopped before a result was reached.
    Undecided,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TerminationReason {
    ToppedOut,
    BothToppedOut,
    NoLegalPlacement,
    TurnLimit,
    Stopped,
}

/// One side's turn, as it happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based, counting both sides' turns.
    pub turn: u32,
    pub side: Side,
    pub piece: Piece,
    pub source: PieceSource,
    /// `None` when the piece had nowhere to go.
    pub placement: Option<Placement>,
    pub lines_cleared: u8,
    pub score_delta: u32,
    /// Mover's running score after this turn.
    pub score: u32,
    pub garbage_sent: u8,
    /// Hole column of each garbage row sent.
    pub garbage_holes: Vec<u8>,
    pub decision_micros: u64,
    pub timed_out: bool,
    /// Piece handed to the opponent for its next turn.
    pub attack_piece: Option<Piece>,
    /// Bank contents after this turn's draws.
    pub bank: BankSnapshot,
    /// Mover's board after this turn.
    pub board_hash: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub outcome: Outcome,
    pub reason: TerminationReason,
    pub turns: u32,
    /// Indexed by [`Side::index`].
    pub scores: [u32; 2],
    pub lines_cleared: [u32; 2],
    pub garbage_sent: [u32; 2],
    pub garbage_received: [u32; 2],
    pub average_decision_micros: [u64; 2],
}

impl MatchSummary {
    pub fn winner(&self) -> Option<Side> {
        match self.outcome {
            Outcome::Winner(side) => Some(side),
            _ => None,
        }
    }
}

/// Append-only history of a match.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchLog {
    records: Vec<TurnRecord>,
    summary: Option<MatchSummary>,
}

impl MatchLog {
    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&TurnRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Present once the match has finished.
    pub fn summary(&self) -> Option<&MatchSummary> {
        self.summary.as_ref()
    }

    pub(crate) fn push(&mut self, record: TurnRecord) {
        self.records.push(record);
    }

    pub(crate) fn finish(&mut self, summary: MatchSummary) {
        if self.summary.is_none() {
            self.summary = Some(summary);
        }
    }
}
