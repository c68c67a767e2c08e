use std::cmp::Ordering;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use versus_core::{Board, Piece};
use versus_engine::{
    garbage_for_clear, inject_garbage, line_clear_score, place, BankSnapshot, FigureBank,
};
use versus_search::{GreedySearch, SearchResult, Strategy};

use crate::clock::{Clock, ClockDeadline, StopSignal, SystemClock};
use crate::config::MatchConfig;
use crate::error::ArenaError;
use crate::record::{
    MatchLog, MatchSummary, Outcome, PieceSource, Side, TerminationReason, TurnRecord,
};
use crate::stats::SideStats;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Init,
    Turn(Side),
    Terminal,
}

#[derive(Clone, Debug)]
struct Player {
    board: Board,
    strategy: Strategy,
    /// Piece the opponent picked for this side's next turn.
    queued: Option<Piece>,
    stats: SideStats,
}

impl Player {
    fn new(strategy: Strategy) -> Self {
        Self {
            board: Board::new(),
            strategy,
            queued: None,
            stats: SideStats::default(),
        }
    }
}

/// Read-only view of a match in progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub turn: u32,
    pub phase: Phase,
    pub boards: [Board; 2],
    pub scores: [u32; 2],
    pub lines_cleared: [u32; 2],
    pub garbage_sent: [u32; 2],
    pub garbage_received: [u32; 2],
    pub queued: [Option<Piece>; 2],
    pub strategies: [Strategy; 2],
    pub bank: BankSnapshot,
}

/// Two greedy agents alternating on their own boards, sharing one bank.
///
/// A owns the first turn. Each turn the mover places a piece, sends garbage
/// for multi-line clears and then picks the opponent's next piece from the
/// bank. All randomness comes from one generator seeded by
/// [`MatchConfig::seed`], so with a deterministic [`Clock`] two arenas built
/// from the same inputs produce identical logs.
#[derive(Debug)]
pub struct Arena<C: Clock = SystemClock> {
    config: MatchConfig,
    players: [Player; 2],
    bank: FigureBank,
    rng: StdRng,
    clock: C,
    stop: StopSignal,
    phase: Phase,
    turn: u32,
    log: MatchLog,
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

impl Arena<SystemClock> {
    /// Fresh match with a full bank of `bank_count_per_type` pieces per type.
    pub fn new(config: MatchConfig) -> Result<Self, ArenaError> {
        let bank = FigureBank::new(config.bank_count_per_type);
        Self::with_bank(config, bank)
    }

    /// Like [`Arena::new`] but with a caller-provided bank; the config's
    /// bank count is ignored.
    pub fn with_bank(config: MatchConfig, bank: FigureBank) -> Result<Self, ArenaError> {
        Arena::with_clock(config, bank, SystemClock::new())
    }
}

impl<C: Clock> Arena<C> {
    pub fn with_clock(config: MatchConfig, bank: FigureBank, clock: C) -> Result<Self, ArenaError> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        let players = [
            Player::new(config.strategy_a.clone()),
            Player::new(config.strategy_b.clone()),
        ];
        Ok(Self {
            config,
            players,
            bank,
            rng,
            clock,
            stop: StopSignal::new(),
            phase: Phase::Init,
            turn: 0,
            log: MatchLog::default(),
        })
    }

    /// Start from the given boards instead of empty ones, indexed by
    /// [`Side::index`].
    pub fn with_boards(mut self, boards: [Board; 2]) -> Self {
        let [a, b] = boards;
        self.players[0].board = a;
        self.players[1].board = b;
        self
    }

    /// Share an existing stop signal, e.g. one handle for a batch of matches.
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Terminal
    }

    /// Turns played so far, both sides counted.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn board(&self, side: Side) -> &Board {
        &self.players[side.index()].board
    }

    pub fn stats(&self, side: Side) -> &SideStats {
        &self.players[side.index()].stats
    }

    pub fn strategy(&self, side: Side) -> &Strategy {
        &self.players[side.index()].strategy
    }

    pub fn queued(&self, side: Side) -> Option<Piece> {
        self.players[side.index()].queued
    }

    pub fn bank(&self) -> &FigureBank {
        &self.bank
    }

    pub fn log(&self) -> &MatchLog {
        &self.log
    }

    pub fn into_log(self) -> MatchLog {
        self.log
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.log.summary().map(|s| s.outcome)
    }

    pub fn summary(&self) -> Option<&MatchSummary> {
        self.log.summary()
    }

    pub fn snapshot(&self) -> ArenaSnapshot {
        let [a, b] = &self.players;
        ArenaSnapshot {
            turn: self.turn,
            phase: self.phase,
            boards: [a.board.clone(), b.board.clone()],
            scores: self.per_side(|s| s.score),
            lines_cleared: self.per_side(|s| s.lines_cleared),
            garbage_sent: self.per_side(|s| s.garbage_sent),
            garbage_received: self.per_side(|s| s.garbage_received),
            queued: [a.queued, b.queued],
            strategies: [a.strategy.clone(), b.strategy.clone()],
            bank: self.bank.remaining(),
        }
    }

    /// Play until the match ends and return its summary.
    pub fn run(&mut self) -> Result<MatchSummary, ArenaError> {
        loop {
            if let Some(summary) = self.log.summary() {
                return Ok(summary.clone());
            }
            self.step()?;
        }
    }

    /// Advance by one turn. Returns the turn's record, or `None` once the
    /// match is over (a finished arena ignores further steps).
    pub fn step(&mut self) -> Result<Option<&TurnRecord>, ArenaError> {
        let side = match self.phase {
            Phase::Terminal => return Ok(None),
            Phase::Init => {
                info!(
                    seed = self.config.seed,
                    strategy_a = %self.players[0].strategy,
                    strategy_b = %self.players[1].strategy,
                    bank = self.bank.total_remaining(),
                    "match started"
                );
                Side::A
            }
            Phase::Turn(side) => side,
        };

        if self.stop.is_raised() {
            self.finish(Outcome::Undecided, TerminationReason::Stopped);
            return Ok(None);
        }

        self.play_turn(side)?;
        Ok(self.log.last())
    }

    fn next_piece(&mut self, side: Side) -> (Piece, PieceSource) {
        let player = &mut self.players[side.index()];
        if let Some(piece) = player.queued.take() {
            return (piece, PieceSource::Queued);
        }
        if let Some(piece) = self.bank.draw_random(&mut self.rng) {
            return (piece, PieceSource::Bank);
        }
        player.stats.fallback_pieces += 1;
        let piece = Piece::ALL[self.rng.gen_range(0..Piece::ALL.len())];
        warn!(?side, %piece, "bank empty, using fallback piece");
        (piece, PieceSource::Fallback)
    }

    fn search(&self, side: Side, piece: Piece, started: Duration) -> Option<SearchResult> {
        let player = &self.players[side.index()];
        let search = GreedySearch::for_strategy(&player.strategy);
        match self.config.time_budget() {
            Some(budget) => {
                let deadline = ClockDeadline {
                    clock: &self.clock,
                    at: started + budget,
                };
                search.find_best_within(&player.board, piece, &deadline)
            }
            None => search.find_best(&player.board, piece),
        }
    }

    fn play_turn(&mut self, side: Side) -> Result<(), ArenaError> {
        let me = side.index();
        let them = side.other().index();
        let turn = self.turn + 1;

        let (piece, source) = self.next_piece(side);

        let started = self.clock.now();
        let found = self.search(side, piece, started);
        let elapsed = self.clock.now().saturating_sub(started);
        self.players[me].stats.decision_times.push(elapsed);

        let Some(found) = found else {
            warn!(turn, ?side, %piece, "no legal placement");
            self.turn = turn;
            self.log.push(TurnRecord {
                turn,
                side,
                piece,
                source,
                placement: None,
                lines_cleared: 0,
                score_delta: 0,
                score: self.players[me].stats.score,
                garbage_sent: 0,
                garbage_holes: Vec::new(),
                decision_micros: micros(elapsed),
                timed_out: false,
                attack_piece: None,
                bank: self.bank.remaining(),
                board_hash: self.players[me].board.zobrist_hash(),
            });
            self.finish(
                Outcome::Winner(side.other()),
                TerminationReason::NoLegalPlacement,
            );
            return Ok(());
        };

        if found.timed_out {
            self.players[me].stats.timeouts += 1;
            warn!(turn, ?side, candidates = found.candidates, "search budget expired");
        }

        let chosen = found.placement;
        let placed = place(
            &mut self.players[me].board,
            piece,
            chosen.rotation,
            chosen.column,
        )?;
        let lines = placed.rows_cleared;
        let score_delta = line_clear_score(lines);
        self.players[me].stats.record_clear(lines, score_delta);

        let garbage = garbage_for_clear(lines);
        let mut garbage_holes = Vec::new();
        if garbage > 0 {
            let rng = &mut self.rng;
            let report = inject_garbage(&mut self.players[them].board, garbage, |width| {
                rng.gen_range(0..width)
            });
            self.players[me].stats.garbage_sent += u32::from(garbage);
            self.players[them].stats.garbage_received += u32::from(garbage);
            if report.overflowed {
                debug!(turn, ?side, "garbage pushed blocks off the opponent's board");
            }
            garbage_holes = report.holes;
        }

        let terminal = match (
            self.players[me].board.is_topped_out(),
            self.players[them].board.is_topped_out(),
        ) {
            (true, true) => Some((Outcome::Draw, TerminationReason::BothToppedOut)),
            (true, false) => Some((Outcome::Winner(side.other()), TerminationReason::ToppedOut)),
            (false, true) => Some((Outcome::Winner(side), TerminationReason::ToppedOut)),
            (false, false) => None,
        };

        let attack_piece = if terminal.is_none() {
            let preference = self.players[me].strategy.preferred_opponent_pieces();
            self.bank.select_for_opponent(preference, &mut self.rng)
        } else {
            None
        };
        self.players[them].queued = attack_piece;

        debug!(
            turn,
            ?side,
            %piece,
            rotation = ?chosen.rotation,
            column = chosen.column,
            lines,
            garbage,
            "turn played"
        );

        self.turn = turn;
        self.log.push(TurnRecord {
            turn,
            side,
            piece,
            source,
            placement: Some(chosen),
            lines_cleared: lines,
            score_delta,
            score: self.players[me].stats.score,
            garbage_sent: garbage,
            garbage_holes,
            decision_micros: micros(elapsed),
            timed_out: found.timed_out,
            attack_piece,
            bank: self.bank.remaining(),
            board_hash: self.players[me].board.zobrist_hash(),
        });

        if let Some((outcome, reason)) = terminal {
            self.finish(outcome, reason);
        } else if self.turn >= self.config.max_turns {
            let [a, b] = self.per_side(|s| s.score);
            let outcome = match a.cmp(&b) {
                Ordering::Greater => Outcome::Winner(Side::A),
                Ordering::Less => Outcome::Winner(Side::B),
                Ordering::Equal => Outcome::Draw,
            };
            self.finish(outcome, TerminationReason::TurnLimit);
        } else {
            self.phase = Phase::Turn(side.other());
        }
        Ok(())
    }

    fn per_side<T>(&self, f: impl Fn(&SideStats) -> T) -> [T; 2] {
        [f(&self.players[0].stats), f(&self.players[1].stats)]
    }

    fn finish(&mut self, outcome: Outcome, reason: TerminationReason) {
        let summary = MatchSummary {
            outcome,
            reason,
            turns: self.turn,
            scores: self.per_side(|s| s.score),
            lines_cleared: self.per_side(|s| s.lines_cleared),
            garbage_sent: self.per_side(|s| s.garbage_sent),
            garbage_received: self.per_side(|s| s.garbage_received),
            average_decision_micros: self.per_side(|s| micros(s.average_decision_time())),
        };
        info!(?outcome, ?reason, turns = self.turn, scores = ?summary.scores, "match finished");
        self.log.finish(summary);
        self.phase = Phase::Terminal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrozenClock;

    fn frozen(config: MatchConfig) -> Arena<FrozenClock> {
        let bank = FigureBank::new(config.bank_count_per_type);
        Arena::with_clock(config, bank, FrozenClock).expect("valid config")
    }

    #[test]
    fn test_starts_in_init_and_a_moves_first() {
        let mut arena = frozen(MatchConfig::default());
        assert_eq!(arena.phase(), Phase::Init);
        let record = arena.step().expect("step").expect("a turn").clone();
        assert_eq!(record.side, Side::A);
        assert_eq!(record.turn, 1);
        assert_eq!(record.source, PieceSource::Bank);
        assert_eq!(arena.phase(), Phase::Turn(Side::B));
    }

    #[test]
    fn test_sides_alternate_and_use_queued_piece() {
        let mut arena = frozen(MatchConfig::default());
        for _ in 0..6 {
            arena.step().expect("step");
        }
        let records = arena.log().records();
        assert_eq!(records.len(), 6);
        for pair in records.windows(2) {
            assert_eq!(pair[1].side, pair[0].side.other());
            assert_eq!(pair[1].source, PieceSource::Queued);
            assert_eq!(Some(pair[1].piece), pair[0].attack_piece);
        }
    }

    #[test]
    fn test_bank_only_shrinks() {
        let mut arena = frozen(MatchConfig {
            bank_count_per_type: 3,
            max_turns: 40,
            ..MatchConfig::default()
        });
        let mut last = arena.bank().total_remaining();
        while arena.step().expect("step").is_some() {
            let now = arena.bank().total_remaining();
            assert!(now <= last);
            last = now;
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = MatchConfig {
            max_turns: 0,
            ..MatchConfig::default()
        };
        let err = Arena::new(config).unwrap_err();
        assert!(matches!(err, ArenaError::Config(_)));
        assert!(err.to_string().contains("maxTurns"));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut arena = frozen(MatchConfig::default());
        arena.step().expect("step");
        let snap = arena.snapshot();
        assert_eq!(snap.turn, 1);
        assert_eq!(snap.phase, Phase::Turn(Side::B));
        assert_eq!(snap.boards[0].filled_cells(), 4);
        assert_eq!(snap.boards[1].filled_cells(), 0);
        assert_eq!(snap.queued[1], arena.log().records()[0].attack_piece);
        assert_eq!(snap.bank, arena.bank().remaining());
        assert_eq!(snap.strategies[1], Strategy::Aggressive);
    }
}
