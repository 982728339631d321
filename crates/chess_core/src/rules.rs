//! Game-ending predicates. Everything here is derived from a position on
//! demand and never stored.

use crate::{board::Position, movegen::legal_moves, types::*};

/// Why a position ends the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            Outcome::Stalemate | Outcome::InsufficientMaterial | Outcome::FiftyMoveRule => None,
        }
    }

    pub fn is_draw(self) -> bool {
        self.winner().is_none()
    }
}

/// Classifies `pos`, returning `None` while the game goes on.
///
/// The fifty-move rule is only applied when `fifty_move_rule` is set.
pub fn classify(pos: &Position, fifty_move_rule: bool) -> Option<Outcome> {
    if legal_moves(pos).is_empty() {
        return Some(if pos.is_check() {
            Outcome::Checkmate {
                winner: pos.side_to_move().other(),
            }
        } else {
            Outcome::Stalemate
        });
    }
    if pos.is_insufficient_material() {
        return Some(Outcome::InsufficientMaterial);
    }
    if fifty_move_rule && pos.is_fifty_move_draw() {
        return Some(Outcome::FiftyMoveRule);
    }
    None
}

pub fn is_checkmate(pos: &Position) -> bool {
    pos.is_check() && legal_moves(pos).is_empty()
}

pub fn is_stalemate(pos: &Position) -> bool {
    !pos.is_check() && legal_moves(pos).is_empty()
}

/// Stalemate, insufficient material, or (optionally) the fifty-move rule.
pub fn is_draw(pos: &Position, fifty_move_rule: bool) -> bool {
    classify(pos, fifty_move_rule).is_some_and(Outcome::is_draw)
}

impl Position {
    /// Neither side can possibly mate: K v K, K+minor v K, or kings with
    /// bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut bishop_colors = [false; 2];
        let mut knights = 0;
        for (sq, pc) in self.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => {
                    knights += 1;
                    minors += 1;
                }
                PieceKind::Bishop => {
                    bishop_colors[sq.is_dark() as usize] = true;
                    minors += 1;
                }
            }
        }
        match minors {
            0 | 1 => true,
            _ => knights == 0 && !(bishop_colors[0] && bishop_colors[1]),
        }
    }
}
