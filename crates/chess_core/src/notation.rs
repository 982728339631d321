//! Text notation: FEN for positions and coordinate text for moves.

use std::fmt;
use std::str::FromStr;

use crate::board::{CastlingRights, Position};
use crate::error::{ParseError, ParseResult};
use crate::movegen::legal_moves;
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Forsyth-Edwards Notation parser. Exactly six fields separated by
    /// single spaces; clocks are plain decimal digits.
    pub fn from_fen(fen: &str) -> ParseResult<Self> {
        let parts: Vec<&str> = fen.split(' ').collect();
        if parts.len() != 6 {
            return Err(ParseError::FieldCount(parts.len()));
        }

        let board = parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ParseError::SideToMove(other.to_string())),
        };

        let castling = parse_castling(parts[2])?;

        let en_passant = match parts[3] {
            "-" => None,
            ep => {
                let sq: Square = ep.parse().map_err(|_| ParseError::EnPassant(ep.to_string()))?;
                if sq.rank() != 2 && sq.rank() != 5 {
                    return Err(ParseError::EnPassant(ep.to_string()));
                }
                Some(sq)
            }
        };

        let halfmove_clock = parse_clock("half-move clock", parts[4])?;
        let fullmove_number = parse_clock("full-move number", parts[5])?;
        if fullmove_number == 0 {
            return Err(ParseError::Clock {
                field: "full-move number",
                value: parts[5].to_string(),
            });
        }

        let pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        };

        for color in [Color::White, Color::Black] {
            let count = pos.count(color, PieceKind::King);
            if count != 1 {
                return Err(ParseError::KingCount { color, count });
            }
        }
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        self.to_string()
    }
}

fn parse_placement(placement: &str) -> ParseResult<[Option<Piece>; 64]> {
    let mut board = [None; 64];
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ParseError::RankCount(ranks.len()));
    }

    // FEN lists rank 8 first.
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as i8;
        let bad_rank = ParseError::RankLength { rank: rank as u8 + 1 };
        let mut file: i8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                if d == 0 || d > 8 {
                    return Err(bad_rank);
                }
                file += d as i8;
            } else {
                let pc = Piece::from_char(ch).ok_or(ParseError::InvalidPiece(ch))?;
                let sq = Square::new(file, rank).ok_or(bad_rank.clone())?;
                board[sq.index()] = Some(pc);
                file += 1;
            }
            if file > 8 {
                return Err(bad_rank);
            }
        }
        if file != 8 {
            return Err(bad_rank);
        }
    }
    Ok(board)
}

fn parse_castling(field: &str) -> ParseResult<CastlingRights> {
    let mut castling = CastlingRights::NONE;
    if field == "-" {
        return Ok(castling);
    }
    for c in field.chars() {
        let flag = match c {
            'K' => &mut castling.wk,
            'Q' => &mut castling.wq,
            'k' => &mut castling.bk,
            'q' => &mut castling.bq,
            _ => return Err(ParseError::Castling(field.to_string())),
        };
        if *flag {
            return Err(ParseError::Castling(field.to_string()));
        }
        *flag = true;
    }
    Ok(castling)
}

fn parse_clock(field: &'static str, value: &str) -> ParseResult<u32> {
    let bad = || ParseError::Clock {
        field,
        value: value.to_string(),
    };
    let digits_only = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || (value.len() > 1 && value.starts_with('0')) {
        return Err(bad());
    }
    value.parse().map_err(|_| bad())
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let pc = Square::new(file, rank).and_then(|sq| self.piece_at(sq));
                match pc {
                    Some(pc) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", pc.to_char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                f.write_str("/")?;
            }
        }

        let stm = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        write!(f, " {stm} ")?;

        if !self.castling.any() {
            f.write_str("-")?;
        } else {
            let letters = [
                (self.castling.wk, 'K'),
                (self.castling.wq, 'Q'),
                (self.castling.bk, 'k'),
                (self.castling.bq, 'q'),
            ];
            for (held, c) in letters {
                if held {
                    write!(f, "{c}")?;
                }
            }
        }

        match self.en_passant {
            Some(sq) => write!(f, " {sq}")?,
            None => f.write_str(" -")?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

/// Resolves coordinate text against the legal moves of `pos`, so the
/// castle/en-passant flags come out right. Promotions need their letter.
pub fn parse_move(pos: &Position, txt: &str) -> ParseResult<Move> {
    let raw: Move = txt.trim().parse()?;
    legal_moves(pos)
        .into_iter()
        .find(|m| m.same_squares(&raw))
        .ok_or_else(|| ParseError::IllegalMove(txt.trim().to_string()))
}

/// Applies a sequence of coordinate moves from `start`, failing on the first
/// one that does not parse or is not legal.
pub fn play_moves(start: &Position, moves: &[&str]) -> ParseResult<Position> {
    let mut pos = start.clone();
    for txt in moves {
        let mv = parse_move(&pos, txt)?;
        pos = pos.apply(mv);
    }
    Ok(pos)
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
