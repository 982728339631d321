//! Negamax search with alpha-beta pruning, principal variation collection
//! and a bounded capture-only quiescence search.

use std::sync::atomic::AtomicU8;

use chess_core::{legal_moves, Color, Move, Position};

use crate::eval::evaluate_with_mobility;
use crate::limits::SearchLimits;
use crate::ordering::{is_tactical, order_moves};
use crate::EngineState;

/// Score of a mate delivered at the root. A mate found `ply` half-moves
/// deep scores `MATE_SCORE - ply`, so shorter mates win.
pub const MATE_SCORE: i32 = 100_000;
const INF: i32 = 1_000_000;

/// Scores above this are mates.
pub const MATE_BOUND: i32 = MATE_SCORE - 1_000;

/// Result of one root search.
#[derive(Debug, Clone)]
pub(crate) struct RootOutcome {
    /// Principal variation, best move first. Empty when the side to move
    /// has no legal moves.
    pub pv: Vec<Move>,
    /// Score from the side to move's point of view.
    pub score: i32,
}

/// One search context: node counter, abort state and the hashes of every
/// position on the path from the game start to the node being searched.
pub(crate) struct Searcher<'a> {
    limits: &'a SearchLimits,
    lifecycle: &'a AtomicU8,
    quiescence_depth: u8,
    history: Vec<u64>,
    nodes: u64,
    stopped: bool,
}

impl<'a> Searcher<'a> {
    /// `history` holds the hashes of the positions leading to the root,
    /// root included.
    pub fn new(
        limits: &'a SearchLimits,
        lifecycle: &'a AtomicU8,
        quiescence_depth: u8,
        history: Vec<u64>,
    ) -> Self {
        Self {
            limits,
            lifecycle,
            quiescence_depth,
            history,
            nodes: 0,
            stopped: false,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn stopped(&self) -> bool {
        self.stopped
    }

    /// Records a move actually played along the line, so later searches see
    /// the repetition.
    pub fn push_played(&mut self, pos: &Position) {
        self.history.push(pos.position_hash());
    }

    /// Searches `pos` to `depth` plies (at least one). When the search is
    /// stopped early the best fully searched root move is kept; if none
    /// finished, the first ordered move stands in.
    pub fn search_root(&mut self, pos: &Position, depth: u8) -> RootOutcome {
        let mut moves = legal_moves(pos);
        if moves.is_empty() {
            let score = if pos.is_check() { -MATE_SCORE } else { 0 };
            return RootOutcome { pv: Vec::new(), score };
        }
        order_moves(pos, &mut moves);

        let depth = depth.max(1);
        let mobility = moves.len();
        let mut best_pv = vec![moves[0]];
        let mut best_score = -INF;
        let mut child_pv = Vec::with_capacity(depth as usize);

        for &mv in &moves {
            if self.should_abort() {
                break;
            }
            let child = pos.apply(mv);
            self.history.push(child.position_hash());
            let score = -self.negamax(&child, depth - 1, 1, -INF, -best_score, &mut child_pv);
            self.history.pop();

            if self.stopped {
                break;
            }
            // Strictly better only: ties keep the earlier ordered move.
            if score > best_score {
                best_score = score;
                best_pv.clear();
                best_pv.push(mv);
                best_pv.extend_from_slice(&child_pv);
            }
        }

        if best_score == -INF {
            best_score =
                side_relative(evaluate_with_mobility(pos, mobility), pos.side_to_move());
        }
        RootOutcome {
            pv: best_pv,
            score: best_score,
        }
    }

    fn negamax(
        &mut self,
        pos: &Position,
        depth: u8,
        ply: u8,
        mut alpha: i32,
        beta: i32,
        pv: &mut Vec<Move>,
    ) -> i32 {
        pv.clear();
        if self.should_abort() {
            return 0;
        }
        self.nodes += 1;

        if self.is_draw(pos) {
            return 0;
        }

        let mut moves = legal_moves(pos);
        if moves.is_empty() {
            return terminal_score(pos, ply);
        }
        if depth == 0 {
            return self.quiescence(pos, moves, ply, alpha, beta, self.quiescence_depth);
        }
        order_moves(pos, &mut moves);

        let mut best = -INF;
        let mut child_pv = Vec::with_capacity(depth as usize);
        for mv in moves {
            let child = pos.apply(mv);
            self.history.push(child.position_hash());
            let score = -self.negamax(
                &child,
                depth - 1,
                ply.saturating_add(1),
                -beta,
                -alpha,
                &mut child_pv,
            );
            self.history.pop();

            if self.stopped {
                return 0;
            }
            if score > best {
                best = score;
                if score > alpha {
                    alpha = score;
                    pv.clear();
                    pv.push(mv);
                    pv.extend_from_slice(&child_pv);
                }
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// Captures and promotions only, with stand pat. `moves` are the legal
    /// moves of `pos`, already known to be non-empty or terminal.
    fn quiescence(
        &mut self,
        pos: &Position,
        moves: Vec<Move>,
        ply: u8,
        mut alpha: i32,
        beta: i32,
        depth_left: u8,
    ) -> i32 {
        if moves.is_empty() {
            return terminal_score(pos, ply);
        }

        let stand_pat = side_relative(
            evaluate_with_mobility(pos, moves.len()),
            pos.side_to_move(),
        );
        if depth_left == 0 || stand_pat >= beta {
            return stand_pat;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut tactical: Vec<Move> = moves
            .into_iter()
            .filter(|&m| is_tactical(pos, m))
            .collect();
        order_moves(pos, &mut tactical);

        for mv in tactical {
            if self.should_abort() {
                return 0;
            }
            self.nodes += 1;
            let child = pos.apply(mv);
            let replies = legal_moves(&child);
            let score = -self.quiescence(
                &child,
                replies,
                ply.saturating_add(1),
                -beta,
                -alpha,
                depth_left - 1,
            );
            if self.stopped {
                return 0;
            }
            if score >= beta {
                return score;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }

    fn is_draw(&self, pos: &Position) -> bool {
        if pos.is_fifty_move_draw() || pos.is_insufficient_material() {
            return true;
        }
        match self.history.last() {
            Some(&key) => self.history.iter().filter(|&&k| k == key).count() >= 3,
            None => false,
        }
    }

    /// Latches `stopped` when the caller cancelled, time ran out or the
    /// engine was shut down.
    fn should_abort(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        let control = &self.limits.control;
        if control.is_stopped() {
            self.stopped = true;
        } else if control.should_check_time(self.nodes)
            && (control.check_time() || EngineState::load(self.lifecycle) != EngineState::Ready)
        {
            self.stopped = true;
        }
        self.stopped
    }
}

fn terminal_score(pos: &Position, ply: u8) -> i32 {
    if pos.is_check() {
        -MATE_SCORE + ply as i32
    } else {
        0
    }
}

/// Converts a White-positive score to the side to move's view.
#[inline]
pub(crate) fn side_relative(score: i32, side: Color) -> i32 {
    match side {
        Color::White => score,
        Color::Black => -score,
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
