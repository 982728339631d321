use chess_core::{
    classify, legal_moves, parse_move, play_moves, Color, Outcome, Piece, PieceKind, Position,
    Square,
};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn fools_mate_is_won_by_black() {
    let pos = play_moves(&Position::startpos(), &["f2f3", "e7e5", "g2g4", "d8h4"]).unwrap();
    assert_eq!(
        classify(&pos, true),
        Some(Outcome::Checkmate {
            winner: Color::Black
        })
    );
}

#[test]
fn scholars_mate_is_won_by_white() {
    let pos = play_moves(
        &Position::startpos(),
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    )
    .unwrap();
    assert_eq!(
        classify(&pos, true),
        Some(Outcome::Checkmate {
            winner: Color::White
        })
    );
}

#[test]
fn en_passant_captures_the_passed_pawn() {
    let pos = play_moves(
        &Position::startpos(),
        &["e2e4", "a7a6", "e4e5", "d7d5"],
    )
    .unwrap();
    assert_eq!(pos.en_passant(), Some(sq("d6")));

    let mv = parse_move(&pos, "e5d6").unwrap();
    assert!(mv.is_en_passant);
    let after = pos.apply(mv);
    assert_eq!(after.piece_at(sq("d5")), None);
    assert_eq!(
        after.piece_at(sq("d6")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
}

#[test]
fn en_passant_expires_after_one_move() {
    let pos = play_moves(
        &Position::startpos(),
        &["e2e4", "a7a6", "e4e5", "d7d5", "g1f3", "a6a5"],
    )
    .unwrap();
    assert!(parse_move(&pos, "e5d6").is_err());
}

#[test]
fn unblocked_pawn_on_seventh_has_four_promotions() {
    let pos = Position::from_fen("8/P6k/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let promotions: Vec<_> = legal_moves(&pos)
        .into_iter()
        .filter(|m| m.to == sq("a8"))
        .collect();
    assert_eq!(promotions.len(), 4);
    assert!(promotions.iter().all(|m| m.from == sq("a7") && m.promo.is_some()));
}

#[test]
fn every_reachable_position_round_trips_through_fen() {
    // Walk a few plies deep, always taking the first and last legal move.
    let mut frontier = vec![Position::startpos()];
    for _ in 0..6 {
        let mut next = Vec::new();
        for pos in &frontier {
            let moves = legal_moves(pos);
            for mv in [moves.first(), moves.last()].into_iter().flatten() {
                next.push(pos.apply(*mv));
            }
        }
        for pos in &next {
            let text = pos.to_fen();
            assert_eq!(Position::from_fen(&text).unwrap().to_fen(), text);
        }
        frontier = next;
    }
}
