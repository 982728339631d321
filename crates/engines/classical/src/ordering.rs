//! Move ordering: promotions and captures first, quiet moves last.

use std::cmp::Reverse;

use chess_core::{Move, Position};

use crate::eval::piece_value;

const PROMOTION_BASE: i32 = 20_000;
const CAPTURE_BASE: i32 = 10_000;

/// Ordering score for a move. Captures use MVV-LVA:
/// `victim * 10 - attacker`.
pub fn move_score(pos: &Position, mv: Move) -> i32 {
    let mut score = 0;
    if let Some(promo) = mv.promo {
        score += PROMOTION_BASE + piece_value(promo);
    }
    if let Some(victim) = pos.captured_by(mv) {
        let attacker = pos
            .piece_at(mv.from)
            .map(|pc| piece_value(pc.kind))
            .unwrap_or(0);
        score += CAPTURE_BASE + piece_value(victim.kind) * 10 - attacker;
    }
    score
}

/// Sorts moves best-first. The sort is stable, so equally scored moves keep
/// generation order and the search stays deterministic.
pub fn order_moves(pos: &Position, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| Reverse(move_score(pos, mv)));
}

/// True for moves the quiescence search looks at.
#[inline]
pub fn is_tactical(pos: &Position, mv: Move) -> bool {
    mv.promo.is_some() || pos.is_capture(mv)
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
