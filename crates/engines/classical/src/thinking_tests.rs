use super::*;

fn result_with(centipawns: i32) -> SearchResult {
    SearchResult {
        line: Vec::new(),
        evaluation: centipawns as f32 / 100.0,
        centipawns,
        depth: 1,
        nodes: 0,
        stopped: false,
    }
}

#[test]
fn test_advantage_thresholds() {
    assert_eq!(Advantage::from_centipawns(0), Advantage::Equal);
    assert_eq!(Advantage::from_centipawns(49), Advantage::Equal);
    assert_eq!(Advantage::from_centipawns(60), Advantage::Slight(Color::White));
    assert_eq!(Advantage::from_centipawns(-200), Advantage::Clear(Color::Black));
    assert_eq!(Advantage::from_centipawns(900), Advantage::Decisive(Color::White));
    assert_eq!(
        Advantage::from_centipawns(-(MATE_BOUND + 5)),
        Advantage::Mate(Color::Black)
    );
    assert_eq!(Advantage::Equal.favored(), None);
}

#[test]
fn test_hanging_piece_is_reported() {
    // Black knight on d5 is attacked by the e4 pawn and defended by nothing.
    let pos = Position::from_fen("4k3/8/8/3n4/4P3/8/8/4K3 b - - 0 1").unwrap();
    let notes = threats(&pos);
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("knight on d5"), "{}", notes[0]);
}

#[test]
fn test_defended_piece_attacked_by_equal_is_quiet() {
    let pos = Position::from_fen("4k3/8/4p3/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
    // d5 pawn attacked by e4 pawn but defended by e6; e4 attacked by d5 and
    // undefended.
    let notes = threats(&pos);
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("pawn on e4"));
}

#[test]
fn test_notes_are_capped() {
    let pos = Position::startpos();
    let thinking = describe(&pos, &result_with(20));
    assert!(thinking.threats.is_empty());
    assert!(thinking.strategic_notes.len() <= MAX_NOTES);
    assert_eq!(thinking.advantage, Advantage::Equal);
}

#[test]
fn test_passed_pawns() {
    let pos = Position::from_fen("4k3/8/8/3P4/8/8/p4P2/4K3 w - - 0 1").unwrap();
    let white: Vec<String> = passed_pawns(&pos, Color::White)
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(white, vec!["f2", "d5"]);
    assert_eq!(passed_pawns(&pos, Color::Black).len(), 1);
}
