use thiserror::Error;
use versus_engine::EngineError;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("invalid match configuration: {0}")]
    Config(#[from] ConfigError),
    /// The board rejected a placement the search produced. Points to a
    /// disagreement between move generation and the board rules.
    #[error("board rejected the chosen placement: {0}")]
    Engine(#[from] EngineError),
}
