use super::*;

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert_eq!(moves.iter().filter(|m| m.is_castle).count(), 2);
}

#[test]
fn test_promotion_generates_four_moves() {
    let pos = fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let to_a8: Vec<Move> = legal_moves(&pos).into_iter().filter(|m| m.to == sq("a8")).collect();
    assert_eq!(to_a8.len(), 4);
    for kind in PieceKind::PROMOTIONS {
        assert!(to_a8.iter().any(|m| m.promo == Some(kind)));
    }
}

#[test]
fn test_en_passant_generated_only_with_target() {
    let with_ep = fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
    assert!(legal_moves(&with_ep).contains(&Move::en_passant(sq("e5"), sq("d6"))));

    let without_ep = fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2");
    assert!(legal_moves(&without_ep).iter().all(|m| !m.is_en_passant));
}

#[test]
fn test_pinned_piece_cannot_move() {
    // Knight on e2 is pinned by the rook on e8
    let pos = fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
    assert!(legal_moves(&pos).iter().all(|m| m.from != sq("e2")));
}

#[test]
fn test_castling_blocked_by_attacked_transit() {
    // Black rook on f8 covers f1, so no kingside castling; queenside is fine.
    let pos = fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let castles: Vec<Move> = legal_moves(&pos).into_iter().filter(|m| m.is_castle).collect();
    assert_eq!(castles, vec![Move::castle(Square::E1, Square::C1)]);
}

#[test]
fn test_castling_requires_empty_path_and_rook() {
    let blocked = fen("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1");
    let castles: Vec<Move> = legal_moves(&blocked).into_iter().filter(|m| m.is_castle).collect();
    assert_eq!(castles, vec![Move::castle(Square::E1, Square::G1)]);

    let no_rook = fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1");
    assert!(legal_moves(&no_rook).iter().all(|m| !m.is_castle));
}

#[test]
fn test_no_castling_out_of_check() {
    let pos = fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(legal_moves(&pos).iter().all(|m| !m.is_castle));
}

#[test]
fn test_legal_moves_never_leave_king_in_check() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    ];
    for f in fens {
        let pos = fen(f);
        for mv in legal_moves(&pos) {
            let mover = pos.side_to_move();
            assert!(!pos.apply(mv).in_check(mover), "{mv} leaves king in check in {f}");
        }
    }
}

#[test]
fn test_is_legal_checks_flags() {
    let pos = Position::startpos();
    assert!(is_legal(&pos, Move::new(sq("e2"), sq("e4"))));
    assert!(!is_legal(&pos, Move::new(sq("e2"), sq("e5"))));
    assert!(!is_legal(&pos, Move::en_passant(sq("e2"), sq("e4"))));
}
