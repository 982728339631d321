//! Human-readable commentary on a position: who stands better, which pieces
//! are hanging and a few strategic hints.

use std::fmt;

use chess_core::{Color, PieceKind, Position, Square};

use crate::eval::{material_balance, piece_value};
use crate::search::MATE_BOUND;
use crate::SearchResult;

/// Most notes of each kind reported.
pub const MAX_NOTES: usize = 3;

const SLIGHT: i32 = 50;
const CLEAR: i32 = 150;
const DECISIVE: i32 = 400;

/// Coarse verdict derived from the search score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advantage {
    Equal,
    Slight(Color),
    Clear(Color),
    Decisive(Color),
    Mate(Color),
}

impl Advantage {
    /// Classifies a White-positive centipawn score.
    pub fn from_centipawns(score: i32) -> Self {
        let side = if score >= 0 { Color::White } else { Color::Black };
        match score.abs() {
            s if s >= MATE_BOUND => Advantage::Mate(side),
            s if s >= DECISIVE => Advantage::Decisive(side),
            s if s >= CLEAR => Advantage::Clear(side),
            s if s >= SLIGHT => Advantage::Slight(side),
            _ => Advantage::Equal,
        }
    }

    pub fn favored(self) -> Option<Color> {
        match self {
            Advantage::Equal => None,
            Advantage::Slight(c)
            | Advantage::Clear(c)
            | Advantage::Decisive(c)
            | Advantage::Mate(c) => Some(c),
        }
    }
}

impl fmt::Display for Advantage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advantage::Equal => write!(f, "The position is roughly equal"),
            Advantage::Slight(c) => write!(f, "{} is slightly better", c.name()),
            Advantage::Clear(c) => write!(f, "{} is clearly better", c.name()),
            Advantage::Decisive(c) => write!(f, "{} is winning", c.name()),
            Advantage::Mate(c) => write!(f, "{} has a forced mate", c.name()),
        }
    }
}

/// Commentary for one position.
#[derive(Debug, Clone, PartialEq)]
pub struct Thinking {
    pub advantage: Advantage,
    /// At most [`MAX_NOTES`] notes about attacked pieces.
    pub threats: Vec<String>,
    /// At most [`MAX_NOTES`] general hints.
    pub strategic_notes: Vec<String>,
    /// Search evaluation in pawns, positive favors White.
    pub evaluation: f32,
    pub best_move: Option<chess_core::Move>,
}

/// Builds commentary from a finished search of `pos`.
pub fn describe(pos: &Position, result: &SearchResult) -> Thinking {
    Thinking {
        advantage: Advantage::from_centipawns(result.centipawns),
        threats: threats(pos),
        strategic_notes: strategic_notes(pos, result),
        evaluation: result.evaluation,
        best_move: result.line.first().copied(),
    }
}

/// Pieces attacked and either undefended or attacked by something cheaper.
/// The side to move's pieces come first, most valuable first.
pub fn threats(pos: &Position) -> Vec<String> {
    let mover = pos.side_to_move();
    let mut found: Vec<(bool, i32, String)> = Vec::new();

    for (sq, pc) in pos.pieces() {
        if pc.kind == PieceKind::King {
            continue;
        }
        let attackers = pos.attackers(sq, pc.color.other());
        let Some(cheapest) = attackers
            .iter()
            .filter_map(|&a| pos.piece_at(a))
            .map(|a| piece_value(a.kind))
            .min()
        else {
            continue;
        };
        let defended = pos.is_square_attacked(sq, pc.color);
        let value = piece_value(pc.kind);
        if defended && cheapest >= value {
            continue;
        }
        let reason = if defended {
            "by a cheaper piece"
        } else {
            "and undefended"
        };
        found.push((
            pc.color != mover,
            -value,
            format!(
                "{} {} on {} is attacked {}",
                pc.color.name(),
                pc.kind.name(),
                sq,
                reason
            ),
        ));
    }

    found.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
    found
        .into_iter()
        .take(MAX_NOTES)
        .map(|(_, _, note)| note)
        .collect()
}

fn strategic_notes(pos: &Position, result: &SearchResult) -> Vec<String> {
    let mover = pos.side_to_move();
    let mut notes = Vec::new();

    if !result.line.is_empty() {
        let line: Vec<String> = result.line.iter().take(4).map(|m| m.to_string()).collect();
        notes.push(format!("Expected line: {}", line.join(" ")));
    }

    let rights = pos.castling();
    if rights.kingside(mover) || rights.queenside(mover) {
        notes.push(format!(
            "{} has not castled yet; king safety comes first",
            mover.name()
        ));
    }

    let undeveloped = undeveloped_minors(pos, mover);
    if undeveloped >= 2 {
        notes.push(format!(
            "{} still has {} minor pieces on the back rank",
            mover.name(),
            undeveloped
        ));
    }

    for color in [mover, mover.other()] {
        if let Some(sq) = passed_pawns(pos, color).first() {
            notes.push(format!("{} has a passed pawn on {}", color.name(), sq));
        }
    }

    let material = material_balance(pos);
    if material.abs() >= 100 {
        let side = if material > 0 { Color::White } else { Color::Black };
        notes.push(format!(
            "{} is up {:.1} pawns of material",
            side.name(),
            material.abs() as f32 / 100.0
        ));
    }

    notes.truncate(MAX_NOTES);
    notes
}

fn undeveloped_minors(pos: &Position, color: Color) -> usize {
    [
        (1, PieceKind::Knight),
        (2, PieceKind::Bishop),
        (5, PieceKind::Bishop),
        (6, PieceKind::Knight),
    ]
    .into_iter()
    .filter(|&(file, kind)| {
        Square::new(file, color.home_rank())
            .and_then(|sq| pos.piece_at(sq))
            .is_some_and(|pc| pc.color == color && pc.kind == kind)
    })
    .count()
}

/// Pawns of `color` with no enemy pawn ahead on their own or adjacent files.
pub fn passed_pawns(pos: &Position, color: Color) -> Vec<Square> {
    let enemy = color.other();
    pos.pieces()
        .filter(|(_, pc)| pc.color == color && pc.kind == PieceKind::Pawn)
        .map(|(sq, _)| sq)
        .filter(|&sq| {
            !pos.pieces().any(|(other, pc)| {
                pc.color == enemy
                    && pc.kind == PieceKind::Pawn
                    && (other.file() - sq.file()).abs() <= 1
                    && (other.rank() - sq.rank()) * color.forward() > 0
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "thinking_tests.rs"]
mod thinking_tests;
