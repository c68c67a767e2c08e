//! Figure bank - the finite pool of pieces both players draw from.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use versus_core::Piece;

/// Copy of the per-type counts, indexed in [`Piece::ALL`] order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BankSnapshot {
    counts: [u32; 7],
}

impl BankSnapshot {
    pub fn count(&self, piece: Piece) -> u32 {
        self.counts[piece.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Piece, u32)> + '_ {
        Piece::ALL.into_iter().map(|p| (p, self.count(p)))
    }
}

/// Shared, depleting piece pool for one match. Counts only ever go down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FigureBank {
    counts: [u32; 7],
    initial_count: u32,
}

impl FigureBank {
    /// Bank holding `count_per_type` of every piece type.
    pub fn new(count_per_type: u32) -> Self {
        Self {
            counts: [count_per_type; 7],
            initial_count: count_per_type,
        }
    }

    /// Bank holding only the listed counts; unlisted types start at zero.
    pub fn from_counts(counts: &[(Piece, u32)]) -> Self {
        let mut bank = Self::new(0);
        for &(piece, count) in counts {
            bank.counts[piece.index()] = count;
        }
        bank
    }

    pub fn initial_count(&self) -> u32 {
        self.initial_count
    }

    pub fn count(&self, piece: Piece) -> u32 {
        self.counts[piece.index()]
    }

    pub fn is_available(&self, piece: Piece) -> bool {
        self.count(piece) > 0
    }

    pub fn available(&self) -> Vec<Piece> {
        Piece::ALL
            .into_iter()
            .filter(|&p| self.is_available(p))
            .collect()
    }

    pub fn total_remaining(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn remaining(&self) -> BankSnapshot {
        BankSnapshot {
            counts: self.counts,
        }
    }

    /// Take one `piece`. Returns false and leaves the bank unchanged when
    /// none is left.
    pub fn draw(&mut self, piece: Piece) -> bool {
        let slot = &mut self.counts[piece.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Take one piece chosen uniformly among the types still in stock.
    pub fn draw_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Piece> {
        let piece = *self.available().choose(rng)?;
        self.draw(piece).then_some(piece)
    }

    /// Pick the piece the opponent receives next.
    ///
    /// The first type in `preference` that is still in stock wins. If none
    /// of them is, the choice falls to a uniform pick among whatever is in
    /// stock, so an empty preference means "any". `None` only when the bank
    /// is empty.
    pub fn select_for_opponent<R: Rng + ?Sized>(
        &mut self,
        preference: &[Piece],
        rng: &mut R,
    ) -> Option<Piece> {
        if let Some(&piece) = preference.iter().find(|&&p| self.is_available(p)) {
            self.draw(piece);
            return Some(piece);
        }
        self.draw_random(rng)
    }
}
