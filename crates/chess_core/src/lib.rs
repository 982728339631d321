//! Chess rules core: immutable positions, FEN and move text, strictly legal
//! move generation, attacked-square queries and game-ending predicates.
//!
//! Nothing here searches or keeps game history; engines and sessions build
//! on these values.

pub mod attacks;
pub mod board;
pub mod error;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod rules;
pub mod types;
pub mod zobrist;

pub use board::*;
pub use error::*;
pub use movegen::*;
pub use notation::*;
pub use perft::{divide, perft};
pub use rules::*;
pub use types::*;
pub use zobrist::ZOBRIST;
