//! Zobrist hashing for chess positions.
//!
//! The hash XORs together fixed random values for every piece on its
//! square, the side to move, each castling right held and the en-passant
//! file. Equal placements with equal rights hash equally regardless of the
//! clocks, which is what repetition detection needs.

use crate::board::Position;
use crate::types::{Color, Piece, Square};

const PIECE_KEYS: usize = 2 * 6 * 64;
const SIDE_KEY: usize = PIECE_KEYS;
const CASTLING_KEYS: usize = SIDE_KEY + 1;
const EP_KEYS: usize = CASTLING_KEYS + 4;
const KEY_COUNT: usize = EP_KEYS + 8;

/// Pre-computed random values, laid out as one flat table:
/// pieces (color, kind, square), black-to-move, castling (wk wq bk bq),
/// en-passant files.
pub struct ZobristKeys {
    keys: [u64; KEY_COUNT],
}

impl ZobristKeys {
    /// Fills the table from a fixed-seed xorshift64 stream.
    pub const fn new() -> Self {
        let mut keys = [0u64; KEY_COUNT];
        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        let mut i = 0;
        while i < KEY_COUNT {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            keys[i] = state;
            i += 1;
        }
        ZobristKeys { keys }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: Square) -> u64 {
        self.keys[(piece.color.idx() * 6 + piece.kind.idx()) * 64 + sq.index()]
    }

    #[inline(always)]
    pub fn side_key(&self) -> u64 {
        self.keys[SIDE_KEY]
    }

    /// Index 0=wk, 1=wq, 2=bk, 3=bq.
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.keys[CASTLING_KEYS + index]
    }

    #[inline(always)]
    pub fn ep_key(&self, file: i8) -> u64 {
        self.keys[EP_KEYS + file as usize]
    }

    /// Hash of a whole position, computed from scratch.
    pub fn hash(&self, pos: &Position) -> u64 {
        let mut h = 0u64;
        for (sq, pc) in pos.pieces() {
            h ^= self.piece_key(pc, sq);
        }
        if pos.side_to_move() == Color::Black {
            h ^= self.side_key();
        }
        let c = pos.castling();
        for (i, held) in [c.wk, c.wq, c.bk, c.bq].into_iter().enumerate() {
            if held {
                h ^= self.castling_key(i);
            }
        }
        if let Some(ep) = pos.en_passant() {
            h ^= self.ep_key(ep.file());
        }
        h
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

impl Position {
    /// Zobrist hash used for repetition detection.
    pub fn position_hash(&self) -> u64 {
        ZOBRIST.hash(self)
    }
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
