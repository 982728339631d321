//! Error types for the session, the preview manager and configuration.

use std::path::PathBuf;

use chess_core::ParseError;
use classical_engine::SearchError;
use thiserror::Error;

use crate::game::GameStatus;
use crate::preview::PreviewStatus;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("it is not the player's turn")]
    NotPlayersTurn,
    #[error("it is not the engine's turn")]
    NotEnginesTurn,
    #[error("game is over ({0})")]
    GameOver(GameStatus),
    #[error("cannot undo {requested} moves, only {available} played")]
    NothingToUndo { requested: usize, available: usize },
    #[error("engine reply was computed for an earlier position")]
    StaleReply,
    #[error("preview was computed for a different position")]
    StalePreview,
    #[error("engine found no move")]
    NoMove,
    #[error("background task failed: {0}")]
    TaskFailed(String),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to access game record: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid game record: {0}")]
    Record(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("cannot {op} while preview is {status}")]
    InvalidTransition {
        op: &'static str,
        status: PreviewStatus,
    },
    #[error("preview request was superseded")]
    Superseded,
    #[error("engine has no continuation from this position")]
    NoContinuation,
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("preview search task failed: {0}")]
    TaskFailed(String),
}

pub type PreviewResult<T> = Result<T, PreviewError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
