//! versus search crate - one-step greedy placement search and strategies.

mod budget;
mod greedy;
mod strategy;

pub use budget::{Budget, Expired, Unbounded};
pub use greedy::{choose_placement, GreedySearch, SearchResult};
pub use strategy::{Strategy, StrategyParseError};
