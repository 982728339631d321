//! Attacked-square queries over the mailbox board.
//!
//! These answer "who attacks this square" by walking outwards from the
//! target: pawn and leaper offsets are checked directly, sliders by ray.

use crate::{board::Position, types::*};

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl Position {
    /// Is `target` attacked by any piece of color `by`?
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let mut found = false;
        self.visit_attackers(target, by, |_| {
            found = true;
            true
        });
        found
    }

    /// Squares of every piece of color `by` attacking `target`.
    pub fn attackers(&self, target: Square, by: Color) -> Vec<Square> {
        let mut out = Vec::new();
        self.visit_attackers(target, by, |s| {
            out.push(s);
            false
        });
        out
    }

    /// Is the king of color `c` currently attacked?
    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    /// Is the side to move in check?
    pub fn is_check(&self) -> bool {
        self.in_check(self.side_to_move)
    }

    /// Calls `visit` for each attacker until it returns true.
    fn visit_attackers(&self, target: Square, by: Color, mut visit: impl FnMut(Square) -> bool) {
        let owns = |sq: Square, kinds: &[PieceKind]| {
            self.piece_at(sq)
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // A pawn of `by` attacks the target from one rank behind it.
        let behind = -by.forward();
        for df in [-1, 1] {
            if let Some(s) = target.offset(df, behind).filter(|&s| owns(s, &[PieceKind::Pawn])) {
                if visit(s) {
                    return;
                }
            }
        }

        for (deltas, kind) in [(&KNIGHT_DELTAS, PieceKind::Knight), (&KING_DELTAS, PieceKind::King)] {
            for &(df, dr) in deltas.iter() {
                if let Some(s) = target.offset(df, dr).filter(|&s| owns(s, &[kind])) {
                    if visit(s) {
                        return;
                    }
                }
            }
        }

        let rays = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, kinds) in rays {
            for &(df, dr) in dirs.iter() {
                let mut cur = target.offset(df, dr);
                while let Some(s) = cur {
                    if self.piece_at(s).is_some() {
                        if owns(s, &kinds) && visit(s) {
                            return;
                        }
                        break;
                    }
                    cur = s.offset(df, dr);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
