use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    pub fn kingside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wk,
            Color::Black => self.bk,
        }
    }

    pub fn queenside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wq,
            Color::Black => self.bq,
        }
    }

    pub fn any(&self) -> bool {
        self.wk || self.wq || self.bk || self.bq
    }

    fn clear_color(&mut self, c: Color) {
        match c {
            Color::White => {
                self.wk = false;
                self.wq = false;
            }
            Color::Black => {
                self.bk = false;
                self.bq = false;
            }
        }
    }

    /// Drops the right tied to a rook home square, if `sq` is one.
    fn clear_rook_square(&mut self, sq: Square) {
        match sq {
            Square::A1 => self.wq = false,
            Square::H1 => self.wk = false,
            Square::A8 => self.bq = false,
            Square::H8 => self.bk = false,
            _ => {}
        }
    }
}

/// Immutable chess position. Every move application produces a new value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) board: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>, // square behind a pawn that just advanced 2
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        let mut p = Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        };

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Occupied squares with their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Number of pieces of the given color and kind.
    pub fn count(&self, c: Color, kind: PieceKind) -> usize {
        self.pieces()
            .filter(|(_, pc)| pc.color == c && pc.kind == kind)
            .count()
    }

    /// True when the move takes something, including en passant.
    pub fn is_capture(&self, mv: Move) -> bool {
        mv.is_en_passant || self.piece_at(mv.to).is_some()
    }

    /// Piece removed by `mv`, if any.
    pub fn captured_by(&self, mv: Move) -> Option<Piece> {
        if mv.is_en_passant {
            Some(Piece::new(self.side_to_move.other(), PieceKind::Pawn))
        } else {
            self.piece_at(mv.to)
        }
    }

    /// Returns the position after `mv`. The move is trusted: legality is the
    /// move generator's job.
    pub fn apply(&self, mv: Move) -> Position {
        let mut next = self.clone();
        next.play(mv);
        next
    }

    fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.board[sq.index()] = pc;
    }

    fn play(&mut self, mv: Move) {
        let from = mv.from;
        let to = mv.to;
        let Some(moved) = self.piece_at(from) else {
            debug_assert!(false, "no piece on from-square {from}");
            return;
        };
        let mut captured = self.piece_at(to);

        self.en_passant = None;

        if mv.is_en_passant {
            // The captured pawn sits beside the mover, behind the destination.
            if let Some(cs) = to.offset(0, -moved.color.forward()) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
            }
        }

        self.set_piece(from, None);
        self.set_piece(to, Some(moved));

        if moved.kind == PieceKind::Pawn && to.rank() == moved.color.other().home_rank() {
            let promo = mv.promo.unwrap_or(PieceKind::Queen);
            self.set_piece(to, Some(Piece::new(moved.color, promo)));
        }

        if mv.is_castle && moved.kind == PieceKind::King {
            let rook_squares = match to {
                Square::G1 => Some((Square::H1, Square::F1)),
                Square::C1 => Some((Square::A1, Square::D1)),
                Square::G8 => Some((Square::H8, Square::F8)),
                Square::C8 => Some((Square::A8, Square::D8)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_squares {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
            }
        }

        match moved.kind {
            PieceKind::King => self.castling.clear_color(moved.color),
            PieceKind::Rook => self.castling.clear_rook_square(from),
            _ => {}
        }
        if captured.is_some_and(|cp| cp.kind == PieceKind::Rook) {
            self.castling.clear_rook_square(to);
        }

        if moved.kind == PieceKind::Pawn && (to.rank() - from.rank()).abs() == 2 {
            self.en_passant = Square::new(from.file(), (from.rank() + to.rank()) / 2);
        }

        self.halfmove_clock = if moved.kind == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = self.side_to_move.other();
    }

    /// True once 100 half-moves passed without a pawn move or capture.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
