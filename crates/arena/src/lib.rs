//! versus-arena - runs a match between two greedy agents.
//!
//! The [`Arena`] owns both boards, the shared [`FigureBank`](versus_engine::FigureBank)
//! and the seeded generator, and advances the match one turn at a time.
//! Every turn leaves a [`TurnRecord`] in the [`MatchLog`].

mod arena;
mod clock;
mod config;
mod error;
mod record;
mod stats;

pub use arena::{Arena, ArenaSnapshot, Phase};
pub use clock::{Clock, FrozenClock, StopSignal, SystemClock, TickingClock};
pub use config::{
    ConfigError, MatchConfig, DEFAULT_BANK_COUNT, DEFAULT_MAX_TURNS, DEFAULT_TIME_BUDGET_MS,
    MAX_BANK_COUNT,
};
pub use error::ArenaError;
pub use record::{
    MatchLog, MatchSummary, Outcome, PieceSource, Side, TerminationReason, TurnRecord,
};
pub use stats::SideStats;
