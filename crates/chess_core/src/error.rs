//! Errors raised while reading positions and moves from text.

use thiserror::Error;

use crate::types::Color;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("FEN must have 6 space-separated fields, found {0}")]
    FieldCount(usize),

    #[error("FEN placement must have 8 ranks, found {0}")]
    RankCount(usize),

    #[error("FEN rank {rank} does not describe exactly 8 files")]
    RankLength { rank: u8 },

    #[error("invalid piece character '{0}' in FEN")]
    InvalidPiece(char),

    #[error("invalid side to move '{0}'")]
    SideToMove(String),

    #[error("invalid castling field '{0}'")]
    Castling(String),

    #[error("invalid en-passant field '{0}'")]
    EnPassant(String),

    #[error("invalid {field} '{value}'")]
    Clock { field: &'static str, value: String },

    #[error("{color:?} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("invalid move text '{0}'")]
    MoveText(String),

    #[error("move '{0}' is not legal in this position")]
    IllegalMove(String),
}

pub type ParseResult<T> = Result<T, ParseError>;
