use crate::attacks::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS};
use crate::{board::Position, types::*};

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(pos, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_legal_moves_into(pos, out);

    let mover = pos.side_to_move();
    // Simulate each candidate and drop those leaving our own king attacked.
    out.retain(|&mv| !pos.apply(mv).in_check(mover));
}

/// Is `mv` one of the legal moves of `pos` (flags included)?
pub fn is_legal(pos: &Position, mv: Move) -> bool {
    legal_moves(pos).contains(&mv)
}

/// Moves obeying piece movement rules, not yet checked for king exposure.
pub fn pseudo_legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move();
    for (from, pc) in pos.pieces() {
        if pc.color != us {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, us, out),
            PieceKind::Knight => gen_leaper(pos, from, us, out, &KNIGHT_DELTAS),
            PieceKind::Bishop => gen_slider(pos, from, us, out, &DIAGONALS),
            PieceKind::Rook => gen_slider(pos, from, us, out, &ORTHOGONALS),
            PieceKind::Queen => {
                gen_slider(pos, from, us, out, &DIAGONALS);
                gen_slider(pos, from, us, out, &ORTHOGONALS);
            }
            PieceKind::King => {
                gen_leaper(pos, from, us, out, &KING_DELTAS);
                gen_castle(pos, from, us, out);
            }
        }
    }
}

fn push_pawn_move(from: Square, to: Square, c: Color, out: &mut Vec<Move>) {
    if to.rank() == c.other().home_rank() {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move::with_promo(from, to, pk));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let dir = c.forward();
    let start_rank = c.home_rank() + dir;

    if let Some(to) = from.offset(0, dir) {
        if pos.piece_at(to).is_none() {
            push_pawn_move(from, to, c, out);

            if from.rank() == start_rank {
                if let Some(to2) = from.offset(0, 2 * dir) {
                    if pos.piece_at(to2).is_none() {
                        out.push(Move::new(from, to2));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(tpc) if tpc.color != c => push_pawn_move(from, to, c, out),
            Some(_) => {}
            None if pos.en_passant() == Some(to) => out.push(Move::en_passant(from, to)),
            None => {}
        }
    }
}

fn gen_leaper(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    for &(df, dr) in dirs {
        let mut cur = from.offset(df, dr);
        while let Some(to) = cur {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            cur = to.offset(df, dr);
        }
    }
}

struct CastleSide {
    rook_from: Square,
    king_to: Square,
    /// Squares that must be empty between king and rook.
    empty: &'static [Square],
    /// Squares the king crosses or lands on; none may be attacked.
    transit: [Square; 2],
}

const WHITE_SIDES: [CastleSide; 2] = [
    CastleSide {
        rook_from: Square::H1,
        king_to: Square::G1,
        empty: &[Square::F1, Square::G1],
        transit: [Square::F1, Square::G1],
    },
    CastleSide {
        rook_from: Square::A1,
        king_to: Square::C1,
        empty: &[Square::D1, Square::C1, Square::B1],
        transit: [Square::D1, Square::C1],
    },
];

const BLACK_SIDES: [CastleSide; 2] = [
    CastleSide {
        rook_from: Square::H8,
        king_to: Square::G8,
        empty: &[Square::F8, Square::G8],
        transit: [Square::F8, Square::G8],
    },
    CastleSide {
        rook_from: Square::A8,
        king_to: Square::C8,
        empty: &[Square::D8, Square::C8, Square::B8],
        transit: [Square::D8, Square::C8],
    },
];

fn gen_castle(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let (king_home, sides) = match c {
        Color::White => (Square::E1, &WHITE_SIDES),
        Color::Black => (Square::E8, &BLACK_SIDES),
    };
    if from != king_home {
        return;
    }

    let rights = pos.castling();
    let held = [rights.kingside(c), rights.queenside(c)];
    if !held.iter().any(|&h| h) {
        return;
    }

    // Can't castle out of check.
    let enemy = c.other();
    if pos.is_square_attacked(king_home, enemy) {
        return;
    }

    for (side, held) in sides.iter().zip(held) {
        if !held {
            continue;
        }
        let rook_home = pos.piece_at(side.rook_from) == Some(Piece::new(c, PieceKind::Rook));
        let path_clear = side.empty.iter().all(|&s| pos.piece_at(s).is_none());
        if rook_home
            && path_clear
            && !side.transit.iter().any(|&s| pos.is_square_attacked(s, enemy))
        {
            out.push(Move::castle(from, side.king_to));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
