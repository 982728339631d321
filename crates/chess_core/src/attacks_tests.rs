use super::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn test_pawn_attacks() {
    let pos = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").unwrap();
    // White pawn on e4 attacks d5 and f5, not e5
    assert!(pos.is_square_attacked(sq("d5"), Color::White));
    assert!(pos.is_square_attacked(sq("f5"), Color::White));
    assert!(!pos.is_square_attacked(sq("e5"), Color::White));
    assert!(!pos.is_square_attacked(sq("d3"), Color::White));
}

#[test]
fn test_black_pawn_attacks_downward() {
    let pos = Position::from_fen("4k3/8/8/4p3/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(pos.is_square_attacked(sq("d4"), Color::Black));
    assert!(pos.is_square_attacked(sq("f4"), Color::Black));
    assert!(!pos.is_square_attacked(sq("d6"), Color::Black));
}

#[test]
fn test_knight_attacks_from_corner() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
    assert!(pos.is_square_attacked(sq("b3"), Color::White));
    assert!(pos.is_square_attacked(sq("c2"), Color::White));
    assert!(!pos.is_square_attacked(sq("b2"), Color::White));
}

#[test]
fn test_slider_blocked() {
    // Rook on a1, blocker on a4
    let pos = Position::from_fen("4k3/8/8/8/p7/8/8/R3K3 w - - 0 1").unwrap();
    assert!(pos.is_square_attacked(sq("a2"), Color::White));
    assert!(pos.is_square_attacked(sq("a4"), Color::White)); // can capture
    assert!(!pos.is_square_attacked(sq("a5"), Color::White)); // blocked
}

#[test]
fn test_attackers_lists_every_piece() {
    // d5 is hit by the e4 pawn, the c3 knight and the d1 queen.
    let pos = Position::from_fen("4k3/8/8/3p4/4P3/2N5/8/3QK3 w - - 0 1").unwrap();
    let mut found = pos.attackers(sq("d5"), Color::White);
    found.sort();
    let mut expected = vec![sq("e4"), sq("c3"), sq("d1")];
    expected.sort();
    assert_eq!(found, expected);
    assert!(pos.attackers(sq("h5"), Color::White).is_empty());
}

#[test]
fn test_in_check() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4KR2 b - - 0 1").unwrap();
    assert!(!pos.is_check());
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").unwrap();
    assert!(pos.is_check());
    assert!(pos.in_check(Color::Black));
    assert!(!pos.in_check(Color::White));
}
