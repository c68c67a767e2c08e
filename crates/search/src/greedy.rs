use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use versus_core::{Board, Piece, Placement};
use versus_engine::{apply_placement, generate_placements};
use versus_eval::{evaluate_with_clear, EvalWeights};

use crate::budget::{Budget, Unbounded};
use crate::strategy::Strategy;

/// Outcome of a one-step search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub placement: Placement,
    pub score: f32,
    /// The budget ran out before every candidate was scored; `placement` is
    /// the best among those that were.
    pub timed_out: bool,
    /// Number of candidates actually scored.
    pub candidates: usize,
}

fn score_placement(board: &Board, placement: &Placement, weights: &EvalWeights) -> f32 {
    let (next_board, lines) = apply_placement(board, placement);
    evaluate_with_clear(&next_board, lines, weights)
}

/// Score every legal placement of `piece` one board-state deep and keep the
/// highest. Ties go to the earliest candidate in (rotation, column) order.
///
/// The first legal candidate is always scored; `budget` is consulted before
/// each one after that. Returns `None` when the piece has no legal placement.
pub fn choose_placement<B: Budget + ?Sized>(
    board: &Board,
    piece: Piece,
    weights: &EvalWeights,
    budget: &B,
) -> Option<SearchResult> {
    let mut best: Option<(Placement, f32)> = None;
    let mut candidates = 0;
    let mut timed_out = false;

    for placement in generate_placements(board, piece) {
        if best.is_some() && budget.exhausted() {
            timed_out = true;
            break;
        }
        let score = score_placement(board, &placement, weights);
        candidates += 1;
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((placement, score));
        }
    }

    best.map(|(placement, score)| SearchResult {
        placement,
        score,
        timed_out,
        candidates,
    })
}

/// Greedy searcher bound to one weight vector.
#[derive(Clone, Debug, Default)]
pub struct GreedySearch {
    pub weights: EvalWeights,
}

impl GreedySearch {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn for_strategy(strategy: &Strategy) -> Self {
        Self::new(strategy.weights())
    }

    pub fn find_best(&self, board: &Board, piece: Piece) -> Option<SearchResult> {
        choose_placement(board, piece, &self.weights, &Unbounded)
    }

    pub fn find_best_within<B: Budget + ?Sized>(
        &self,
        board: &Board,
        piece: Piece,
        budget: &B,
    ) -> Option<SearchResult> {
        choose_placement(board, piece, &self.weights, budget)
    }

    /// Scores all candidates on the rayon pool. Same answer as
    /// [`GreedySearch::find_best`], including tie-breaking.
    pub fn find_best_parallel(&self, board: &Board, piece: Piece) -> Option<SearchResult> {
        let placements = generate_placements(board, piece);
        let candidates = placements.len();

        let (_, placement, score) = placements
            .par_iter()
            .enumerate()
            .map(|(index, placement)| {
                let score = score_placement(board, placement, &self.weights);
                (index, *placement, score)
            })
            .reduce_with(|a, b| match b.2.partial_cmp(&a.2) {
                Some(Ordering::Greater) => b,
                Some(Ordering::Equal) if b.0 < a.0 => b,
                _ => a,
            })?;

        Some(SearchResult {
            placement,
            score,
            timed_out: false,
            candidates,
        })
    }

    /// The `n` best placements, best first; equal scores keep enumeration order.
    pub fn top_placements(&self, board: &Board, piece: Piece, n: usize) -> Vec<(Placement, f32)> {
        if n == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(Placement, f32)> = generate_placements(board, piece)
            .into_iter()
            .map(|placement| {
                let score = score_placement(board, &placement, &self.weights);
                (placement, score)
            })
            .collect();

        scored.sort_by(|a, b| score_cmp(a.1, b.1));
        scored.truncate(n);
        scored
    }
}

fn score_cmp(a: f32, b: f32) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
