//! Plain-text views of the game, the ghost preview and engine commentary.

use std::fmt::Write;

use chess_core::{Position, Square};
use classical_engine::Thinking;
use game_session::{GameState, GameStatus, GhostPreviewState, PreviewStatus};

/// Board diagram, rank 8 at the top. Empty squares are dots.
pub fn board(pos: &Position) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        let _ = write!(out, "{} ", rank + 1);
        let row: Vec<String> = (0..8)
            .map(|file| {
                Square::new(file, rank)
                    .and_then(|sq| pos.piece_at(sq))
                    .map_or('.', |pc| pc.to_char())
                    .to_string()
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out.push_str("  a b c d e f g h");
    out
}

pub fn status_line(state: &GameState) -> String {
    let side = state.position.side_to_move().name();
    match (state.status, state.end_reason) {
        (GameStatus::InProgress, _) => {
            let check = if state.position.is_check() { ", check" } else { "" };
            format!("{side} to move{check}")
        }
        (status, Some(reason)) => format!("Game over: {status} ({reason:?})"),
        (status, None) => format!("Game over: {status}"),
    }
}

/// The ghost line with the last shown move bracketed, e.g.
/// `playing  e2e4 [e7e5] g1f3`.
pub fn preview(state: &GhostPreviewState) -> String {
    match state.status {
        PreviewStatus::Idle => return "no preview".to_string(),
        PreviewStatus::Loading => return "preview loading...".to_string(),
        _ => {}
    }
    let moves: Vec<String> = state
        .line
        .iter()
        .enumerate()
        .map(|(i, mv)| {
            if i as i32 == state.current_index {
                format!("[{mv}]")
            } else {
                mv.to_string()
            }
        })
        .collect();
    let mut out = format!("{}  {}", state.status, moves.join(" "));
    if let Some(eval) = state.evaluation {
        let _ = write!(out, "  ({eval:+.2})");
    }
    out
}

pub fn thinking(t: &Thinking) -> String {
    let mut out = format!("{} ({:+.2})", t.advantage, t.evaluation);
    if let Some(mv) = t.best_move {
        let _ = write!(out, "\nbest move: {mv}");
    }
    for note in t.threats.iter().chain(&t.strategic_notes) {
        let _ = write!(out, "\n- {note}");
    }
    out
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
