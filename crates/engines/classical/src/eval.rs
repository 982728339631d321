//! Static evaluation: material, piece-square tables, mobility and king
//! safety.
//!
//! Scores are centipawns from White's point of view: positive favors White.
//! The search converts them to the side to move.

use chess_core::{legal_moves, Color, PieceKind, Position, Square};

/// Bonus per legal move available to the side to move.
const MOBILITY_WEIGHT: i32 = 2;
/// Bonus per own pawn standing directly in front of a wing-castled king.
const PAWN_SHIELD_BONUS: i32 = 12;

/// Material values in centipawns, indexed by `PieceKind::idx()`.
const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

// Piece-square tables from White's side, rank 8 first.
#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     50,  50,  50,  50,  50,  50,  50,  50,
     10,  10,  20,  30,  30,  20,  10,  10,
      5,   5,  10,  25,  25,  10,   5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      5,  10,  10, -20, -20,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10,  10,  10,  10,  10,   5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
      0,   0,   5,   5,   5,   5,   0,  -5,
    -10,   5,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_PST: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

/// Returns the material value of a piece in centipawns.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.idx()]
}

fn pst(kind: PieceKind) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_PST,
        PieceKind::Knight => &KNIGHT_PST,
        PieceKind::Bishop => &BISHOP_PST,
        PieceKind::Rook => &ROOK_PST,
        PieceKind::Queen => &QUEEN_PST,
        PieceKind::King => &KING_PST,
    }
}

/// Table bonus for a piece of `color` on `sq`; Black reads the table mirrored.
pub fn pst_value(kind: PieceKind, color: Color, sq: Square) -> i32 {
    let row = match color {
        Color::White => 7 - sq.rank(),
        Color::Black => sq.rank(),
    };
    pst(kind)[(row as usize) * 8 + sq.file() as usize]
}

/// Evaluates the position from White's perspective.
pub fn evaluate(pos: &Position) -> i32 {
    evaluate_with_mobility(pos, legal_moves(pos).len())
}

/// Same as [`evaluate`] when the caller already knows how many legal moves
/// the side to move has.
pub fn evaluate_with_mobility(pos: &Position, mobility: usize) -> i32 {
    let mut score = 0i32;

    for (sq, pc) in pos.pieces() {
        let v = piece_value(pc.kind) + pst_value(pc.kind, pc.color, sq);
        score += sign(pc.color) * v;
    }

    score += sign(pos.side_to_move()) * MOBILITY_WEIGHT * mobility as i32;

    for color in [Color::White, Color::Black] {
        score += sign(color) * pawn_shield(pos, color);
    }

    score
}

/// Material only, White-positive.
pub fn material_balance(pos: &Position) -> i32 {
    pos.pieces()
        .map(|(_, pc)| sign(pc.color) * piece_value(pc.kind))
        .sum()
}

/// Bonus for own pawns directly in front of a king that sits on a wing of
/// its home rank.
fn pawn_shield(pos: &Position, color: Color) -> i32 {
    let Some(ksq) = pos.king_sq(color) else {
        return 0;
    };
    if ksq.rank() != color.home_rank() || (3..=4).contains(&ksq.file()) {
        return 0;
    }
    let shield = (-1..=1)
        .filter_map(|df| ksq.offset(df, color.forward()))
        .filter(|&s| {
            pos.piece_at(s)
                .is_some_and(|pc| pc.color == color && pc.kind == PieceKind::Pawn)
        })
        .count() as i32;
    shield * PAWN_SHIELD_BONUS
}

#[inline]
fn sign(c: Color) -> i32 {
    match c {
        Color::White => 1,
        Color::Black => -1,
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
