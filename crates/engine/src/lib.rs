//! versus-engine - board rules and the shared figure bank.
//!
//! Collision, dropping, line clears, garbage injection, scoring and
//! placement enumeration for a single board.

pub mod apply;
pub mod attack;
pub mod bank;
pub mod collision;
pub mod error;
pub mod garbage;
pub mod movegen;

pub use apply::{apply_placement, place, PlacementResult};
pub use attack::{garbage_for_clear, line_clear_score};
pub use bank::{BankSnapshot, FigureBank};
pub use collision::{can_place, collides, hard_drop_row, landing_row};
pub use error::EngineError;
pub use garbage::{inject_garbage, GarbageReport};
pub use movegen::generate_placements;
