use super::*;
use chess_core::{legal_moves, parse_move};

#[test]
fn test_least_valuable_attacker_takes_first() {
    let pos = Position::from_fen("4k3/3r4/8/3n4/4P3/8/8/3QK3 w - - 0 1").unwrap();
    let mut moves = legal_moves(&pos);
    order_moves(&pos, &mut moves);
    assert_eq!(moves[0], parse_move(&pos, "e4d5").unwrap());
    assert_eq!(moves[1], parse_move(&pos, "d1d5").unwrap());
    assert!(moves[2..].iter().all(|&m| !is_tactical(&pos, m)));
}

#[test]
fn test_promotions_lead_and_prefer_queen() {
    let pos = Position::from_fen("7k/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mut moves = legal_moves(&pos);
    order_moves(&pos, &mut moves);
    assert_eq!(moves[0].promo, Some(chess_core::PieceKind::Queen));
    assert!(moves[..4].iter().all(|m| m.promo.is_some()));
}

#[test]
fn test_quiet_moves_keep_generation_order() {
    let pos = Position::startpos();
    let generated = legal_moves(&pos);
    let mut ordered = generated.clone();
    order_moves(&pos, &mut ordered);
    assert_eq!(generated, ordered);
}

#[test]
fn test_en_passant_scores_as_pawn_capture() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let ep = parse_move(&pos, "e5d6").unwrap();
    assert!(is_tactical(&pos, ep));
    assert_eq!(move_score(&pos, ep), CAPTURE_BASE + 100 * 10 - 100);
}
