use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal move paths from `pos` down to `depth` plies.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    fn inner(pos: &Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }

        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };
        legal_moves_into(pos, buf);

        if depth == 1 {
            return buf.len() as u64;
        }

        buf.iter()
            .map(|&mv| inner(&pos.apply(mv), depth - 1, rest))
            .sum()
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Per-root-move node counts, useful when hunting a movegen bug.
pub fn divide(pos: &Position, depth: u8) -> Vec<(Move, u64)> {
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    moves
        .into_iter()
        .map(|mv| (mv, perft(&pos.apply(mv), depth.saturating_sub(1))))
        .collect()
}
