use super::*;

#[test]
fn test_start_fen_round_trip() {
    let pos = Position::from_fen(START_FEN).unwrap();
    assert_eq!(pos, Position::startpos());
    assert_eq!(pos.to_fen(), START_FEN);
}

#[test]
fn test_round_trip_along_a_game() {
    let mut pos = Position::startpos();
    for txt in ["e2e4", "c7c5", "g1f3", "d7d6", "f1b5", "c8d7", "e1g1", "a7a6"] {
        pos = pos.apply(parse_move(&pos, txt).unwrap());
        let text = pos.to_fen();
        let reparsed: Position = text.parse().unwrap();
        assert_eq!(reparsed, pos);
        assert_eq!(reparsed.to_fen(), text);
    }
    assert_eq!(
        pos.to_fen(),
        "rn1qkbnr/1p1bpppp/p2p4/1Bp5/4P3/5N2/PPPP1PPP/RNBQ1RK1 w kq - 0 5"
    );
}

#[test]
fn test_en_passant_field_round_trip() {
    let text = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
    assert_eq!(Position::from_fen(text).unwrap().to_fen(), text);
}

#[test]
fn test_rejects_malformed_fen() {
    let cases = [
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -", ParseError::FieldCount(4)),
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1", ParseError::RankCount(7)),
        (
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            ParseError::RankLength { rank: 6 },
        ),
        (
            "rnbqkbnr/pppxpppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            ParseError::InvalidPiece('x'),
        ),
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            ParseError::SideToMove("x".to_string()),
        ),
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KKq - 0 1",
            ParseError::Castling("KKq".to_string()),
        ),
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1",
            ParseError::EnPassant("e4".to_string()),
        ),
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
            ParseError::Clock {
                field: "half-move clock",
                value: "x".to_string(),
            },
        ),
        (
            "rnbq1bnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQ - 0 1",
            ParseError::KingCount {
                color: Color::Black,
                count: 0,
            },
        ),
    ];
    for (text, expected) in cases {
        assert_eq!(Position::from_fen(text), Err(expected), "{text}");
    }
}

#[test]
fn test_fen_fields_are_strict() {
    let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
    for bad_clock in ["+5", "01", "-1", "4294967296"] {
        let text = format!("{start} w KQkq - {bad_clock} 1");
        assert_eq!(
            Position::from_fen(&text),
            Err(ParseError::Clock {
                field: "half-move clock",
                value: bad_clock.to_string(),
            })
        );
    }
    assert!(Position::from_fen(&format!("{start}  w KQkq - 0 1")).is_err());
    assert!(Position::from_fen(&format!("{start}\tw KQkq - 0 1")).is_err());
    assert!(Position::from_fen(&format!("{start} w KQkq - 0 1 ")).is_err());
}

#[test]
fn test_move_text() {
    let mv: Move = "a7a8q".parse().unwrap();
    assert_eq!(mv.promo, Some(PieceKind::Queen));
    assert_eq!(mv.to_string(), "a7a8q");
    assert_eq!("e2e4".parse::<Move>().unwrap().to_string(), "e2e4");

    for bad in ["e2", "e2e9", "e2e4k", "i2e4", "e2e4qq", "a7a8Q", "a7a8N"] {
        assert!(bad.parse::<Move>().is_err(), "{bad}");
    }
}

#[test]
fn test_parse_move_resolves_flags() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = parse_move(&pos, "e1g1").unwrap();
    assert!(mv.is_castle);

    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
    assert!(parse_move(&pos, "e5d6").unwrap().is_en_passant);
}

#[test]
fn test_parse_move_rejects_illegal_and_bare_promotion() {
    let pos = Position::startpos();
    assert_eq!(
        parse_move(&pos, "e2e5"),
        Err(ParseError::IllegalMove("e2e5".to_string()))
    );

    let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(parse_move(&pos, "a7a8").is_err());
    assert!(parse_move(&pos, "a7a8n").is_ok());
}

#[test]
fn test_play_moves_stops_at_first_bad_move() {
    let start = Position::startpos();
    assert!(play_moves(&start, &["e2e4", "e7e5"]).is_ok());
    assert!(play_moves(&start, &["e2e4", "e2e4"]).is_err());
}
