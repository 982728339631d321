use super::*;
use chess_core::legal_moves;

#[test]
fn random_mover_returns_legal_move() {
    let mut mover = RandomMover::from_entropy();
    let pos = Position::startpos();

    let mv = mover.pick(&pos);

    assert!(mv.is_some());
    assert!(legal_moves(&pos).contains(&mv.unwrap()));
}

#[test]
fn random_mover_handles_checkmate() {
    let mut mover = RandomMover::seeded(1);
    let pos = Position::from_fen(
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
    )
    .unwrap();

    assert!(mover.pick(&pos).is_none());
}

#[test]
fn random_mover_handles_stalemate() {
    let mut mover = RandomMover::seeded(1);
    let pos = Position::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap();

    assert!(mover.pick(&pos).is_none());
}

#[test]
fn same_seed_same_choices() {
    let pos = Position::startpos();
    let mut a = RandomMover::seeded(42);
    let mut b = RandomMover::seeded(42);
    for _ in 0..10 {
        assert_eq!(a.pick(&pos), b.pick(&pos));
    }
}

#[test]
fn zero_probability_never_substitutes() {
    let pos = Position::startpos();
    let chosen = legal_moves(&pos)[0];
    let mut handicap = Handicap::new(0.0, RandomMover::seeded(7));
    for _ in 0..50 {
        assert_eq!(handicap.maybe_substitute(&pos, chosen), chosen);
    }
}

#[test]
fn full_probability_always_rolls_a_legal_move() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    let chosen = moves[0];
    let mut handicap = Handicap::new(1.0, RandomMover::seeded(7));
    let picks: Vec<Move> = (0..50)
        .map(|_| handicap.maybe_substitute(&pos, chosen))
        .collect();
    assert!(picks.iter().all(|m| moves.contains(m)));
    assert!(picks.iter().any(|&m| m != chosen));
}

#[test]
fn probability_is_clamped() {
    assert_eq!(Handicap::new(3.0, RandomMover::seeded(0)).probability(), 1.0);
    assert_eq!(Handicap::new(-1.0, RandomMover::seeded(0)).probability(), 0.0);
    assert_eq!(Handicap::new(f64::NAN, RandomMover::seeded(0)).probability(), 0.0);
}
