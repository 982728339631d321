//! Tests for game-ending classification
//!
//! Covers checkmate, stalemate, the fifty-move rule and insufficient
//! material, plus the property that legal moves never expose the mover.

use chess_core::{
    classify, is_checkmate, is_draw, is_stalemate, legal_moves, Color, Outcome, Position,
};

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

// =============================================================================
// Checkmate and Stalemate
// =============================================================================

#[test]
fn test_checkmate_has_no_moves_and_is_check() {
    // Scholar's mate final position
    let pos = fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert!(legal_moves(&pos).is_empty());
    assert!(pos.is_check());
    assert!(is_checkmate(&pos));
    assert!(!is_stalemate(&pos));
    assert_eq!(
        classify(&pos, true),
        Some(Outcome::Checkmate {
            winner: Color::White
        })
    );
}

#[test]
fn test_stalemate_king_in_corner() {
    let pos = fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert!(legal_moves(&pos).is_empty());
    assert!(!pos.is_check(), "Stalemate means king is not in check");
    assert!(is_stalemate(&pos));
    assert_eq!(classify(&pos, false), Some(Outcome::Stalemate));
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    let pos = fen("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");
    assert!(is_stalemate(&pos));
    assert!(is_draw(&pos, false));
}

#[test]
fn test_check_is_not_checkmate() {
    let pos = fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1");
    assert!(pos.is_check());
    assert!(!legal_moves(&pos).is_empty());
    assert_eq!(classify(&pos, true), None);
}

// =============================================================================
// Fifty-Move Rule
// =============================================================================

#[test]
fn test_fifty_move_rule_is_optional() {
    let pos = fen("8/8/8/4k3/8/4K3/8/R7 w - - 100 60");
    assert!(pos.is_fifty_move_draw());
    assert_eq!(classify(&pos, true), Some(Outcome::FiftyMoveRule));
    assert_eq!(classify(&pos, false), None);
}

#[test]
fn test_fifty_move_rule_at_99_halfmoves() {
    let pos = fen("8/8/8/4k3/8/4K3/8/R7 w - - 99 60");
    assert!(!pos.is_fifty_move_draw());
}

// =============================================================================
// Insufficient Material
// =============================================================================

#[test]
fn test_insufficient_material_cases() {
    let insufficient = [
        "8/8/8/4k3/8/4K3/8/8 w - - 0 1",     // K v K
        "8/8/8/4k3/8/4KB2/8/8 w - - 0 1",    // K+B v K
        "8/8/8/4k3/8/4KN2/8/8 w - - 0 1",    // K+N v K
        "8/8/4n3/4k3/8/4K3/8/8 w - - 0 1",   // K v K+N
        "5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1", // bishops on the same color
    ];
    for f in insufficient {
        let pos = fen(f);
        assert!(pos.is_insufficient_material(), "{f}");
        assert_eq!(classify(&pos, false), Some(Outcome::InsufficientMaterial), "{f}");
    }
}

#[test]
fn test_sufficient_material_cases() {
    let sufficient = [
        "2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1", // opposite-colored bishops
        "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4R3 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1",
        "8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1",
    ];
    for f in sufficient {
        assert!(!fen(f).is_insufficient_material(), "{f}");
    }
}
