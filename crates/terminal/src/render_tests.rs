use super::*;

use chess_core::{Color, Move};
use classical_engine::Advantage;
use game_session::{EndReason, PreviewMode};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn test_board_startpos() {
    let text = board(&Position::startpos());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "8 r n b q k b n r");
    assert_eq!(lines[4], "4 . . . . . . . .");
    assert_eq!(lines[7], "1 R N B Q K B N R");
    assert_eq!(lines[8], "  a b c d e f g h");
}

#[test]
fn test_status_line() {
    let mut state = GameState {
        position: Position::startpos(),
        status: GameStatus::InProgress,
        end_reason: None,
        moves: Vec::new(),
    };
    assert_eq!(status_line(&state), "White to move");

    state.status = GameStatus::BlackWins;
    state.end_reason = Some(EndReason::Checkmate);
    assert_eq!(status_line(&state), "Game over: black wins (Checkmate)");
}

#[test]
fn test_preview_marks_current_move() {
    let base = Position::startpos();
    let line = vec![Move::new(sq("e2"), sq("e4")), Move::new(sq("e7"), sq("e5"))];
    let state = GhostPreviewState {
        status: PreviewStatus::Paused,
        mode: PreviewMode::StepThrough,
        positions: vec![base.apply(line[0])],
        line,
        current_index: 0,
        base: Some(base),
        evaluation: Some(0.25),
        thinking: None,
    };
    assert_eq!(preview(&state), "paused  [e2e4] e7e5  (+0.25)");
}

#[test]
fn test_thinking_lists_notes() {
    let t = Thinking {
        advantage: Advantage::Clear(Color::White),
        threats: vec!["Black knight on d5 is attacked and undefended".into()],
        strategic_notes: vec!["White is up 3.0 pawns of material".into()],
        evaluation: 2.0,
        best_move: Some(Move::new(sq("e4"), sq("d5"))),
    };
    let text = thinking(&t);
    assert!(text.starts_with("White is clearly better (+2.00)"));
    assert!(text.contains("best move: e4d5"));
    assert!(text.contains("- Black knight on d5"));
    assert!(text.ends_with("- White is up 3.0 pawns of material"));
}
