//! Classical Chess Engine
//!
//! Alpha-beta search over `chess_core` positions. The engine returns whole
//! principal variations rather than single moves, so callers can preview
//! the line it expects, and it can describe a position in plain words.
//!
//! The engine uses:
//! - Negamax search with alpha-beta pruning and MVV-LVA move ordering
//! - Material, piece-square, mobility and king-shield evaluation
//! - Bounded capture-only quiescence search
//! - Fifty-move, insufficient material and threefold repetition draws
//! - Cancellation and move time through [`SearchControl`]

mod error;
pub mod eval;
mod limits;
mod ordering;
mod search;
pub mod thinking;

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use chess_core::{classify, Move, Position};
use tracing::{debug, info};

pub use error::{EngineResult, SearchError};
pub use eval::evaluate;
pub use limits::{SearchControl, SearchLimits};
pub use search::{MATE_BOUND, MATE_SCORE};
pub use thinking::{Advantage, Thinking};

use search::{side_relative, Searcher};

/// Default number of plies searched past the nominal depth by the
/// capture-only quiescence search.
pub const DEFAULT_QUIESCENCE_DEPTH: u8 = 4;

const MAX_PREALLOCATED_LINE: usize = 256;

/// Lifecycle of a [`SearchEngine`]. Shutdown is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Ready,
    ShutDown,
}

impl EngineState {
    fn as_u8(self) -> u8 {
        match self {
            EngineState::Uninitialized => 0,
            EngineState::Ready => 1,
            EngineState::ShutDown => 2,
        }
    }

    pub(crate) fn load(cell: &AtomicU8) -> Self {
        match cell.load(Ordering::Acquire) {
            0 => EngineState::Uninitialized,
            1 => EngineState::Ready,
            _ => EngineState::ShutDown,
        }
    }
}

/// Tunables that do not change between searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub quiescence_depth: u8,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            quiescence_depth: DEFAULT_QUIESCENCE_DEPTH,
        }
    }
}

/// Outcome of [`SearchEngine::best_line`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Expected continuation, first move first.
    pub line: Vec<Move>,
    /// Root score in pawns, positive favors White.
    pub evaluation: f32,
    /// Root score in centipawns, positive favors White.
    pub centipawns: i32,
    /// Depth each search along the line was run to.
    pub depth: u8,
    /// Nodes searched for the whole line.
    pub nodes: u64,
    /// True if the search was cut short and the line is best-so-far.
    pub stopped: bool,
}

impl SearchResult {
    pub fn best_move(&self) -> Option<Move> {
        self.line.first().copied()
    }
}

/// Handle to the search engine. Clones share lifecycle state, so one clone
/// can shut down searches running on another thread.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    state: Arc<AtomicU8>,
    options: EngineOptions,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            state: Arc::new(AtomicU8::new(EngineState::Uninitialized.as_u8())),
            options,
        }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Makes the engine ready. Calling it again while ready is a no-op; an
    /// engine that was shut down cannot be revived.
    pub fn initialize(&self) -> EngineResult<()> {
        let result = self.state.compare_exchange(
            EngineState::Uninitialized.as_u8(),
            EngineState::Ready.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        match result {
            Ok(_) => {
                info!(
                    quiescence_depth = self.options.quiescence_depth,
                    "search engine ready"
                );
                Ok(())
            }
            Err(current) if current == EngineState::Ready.as_u8() => Ok(()),
            Err(_) => Err(SearchError::ShutDown),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == EngineState::Ready
    }

    pub fn state(&self) -> EngineState {
        EngineState::load(&self.state)
    }

    /// Shuts the engine down. Searches in flight on any clone stop at their
    /// next check and report [`SearchError::ShutDown`].
    pub fn shutdown(&self) {
        let previous = self
            .state
            .swap(EngineState::ShutDown.as_u8(), Ordering::AcqRel);
        if previous != EngineState::ShutDown.as_u8() {
            info!("search engine shut down");
        }
    }

    fn ensure_ready(&self) -> EngineResult<()> {
        match self.state() {
            EngineState::Ready => Ok(()),
            EngineState::Uninitialized => Err(SearchError::NotInitialized),
            EngineState::ShutDown => Err(SearchError::ShutDown),
        }
    }

    /// Searches `pos` to `depth` plies and returns up to `line_length`
    /// moves of expected play.
    pub fn best_line(
        &self,
        pos: &Position,
        depth: u8,
        line_length: usize,
    ) -> EngineResult<SearchResult> {
        self.best_line_with_limits(pos, SearchLimits::depth(depth), line_length)
    }

    /// Like [`best_line`](Self::best_line) but honours a move time and an
    /// external stop flag. A stopped search still returns its best line so
    /// far, flagged with `stopped`.
    ///
    /// The principal variation of the first search is extended by further
    /// searches from its end position until `line_length` moves are
    /// collected or the game is over.
    pub fn best_line_with_limits(
        &self,
        pos: &Position,
        limits: SearchLimits,
        line_length: usize,
    ) -> EngineResult<SearchResult> {
        self.ensure_ready()?;
        limits.control.start();

        let mut searcher = Searcher::new(
            &limits,
            &self.state,
            self.options.quiescence_depth,
            vec![pos.position_hash()],
        );
        let root = searcher.search_root(pos, limits.depth);
        let centipawns = side_relative(root.score, pos.side_to_move());

        let mut line = Vec::with_capacity(line_length.min(MAX_PREALLOCATED_LINE));
        let mut current = pos.clone();
        let mut pv = root.pv;

        while line.len() < line_length && !pv.is_empty() {
            for mv in pv {
                if line.len() >= line_length {
                    break;
                }
                current = current.apply(mv);
                searcher.push_played(&current);
                line.push(mv);
            }
            let finished = line.len() >= line_length
                || searcher.stopped()
                || classify(&current, true).is_some();
            if finished {
                break;
            }
            let next = searcher.search_root(&current, limits.depth);
            if searcher.stopped() {
                break;
            }
            pv = next.pv;
        }

        if self.state() != EngineState::Ready {
            return Err(SearchError::ShutDown);
        }

        let result = SearchResult {
            line,
            evaluation: centipawns as f32 / 100.0,
            centipawns,
            depth: limits.depth,
            nodes: searcher.nodes(),
            stopped: searcher.stopped(),
        };
        debug!(
            depth = result.depth,
            nodes = result.nodes,
            eval = result.evaluation,
            stopped = result.stopped,
            elapsed_ms = limits.control.elapsed().as_millis() as u64,
            "search finished"
        );
        Ok(result)
    }

    /// Single best move, or `None` when the side to move has no legal move.
    pub fn best_move(&self, pos: &Position, depth: u8) -> EngineResult<Option<Move>> {
        Ok(self.best_line(pos, depth, 1)?.best_move())
    }

    /// Searches `pos` and describes it for commentary.
    pub fn thinking(&self, pos: &Position, depth: u8) -> EngineResult<Thinking> {
        let result = self.best_line(pos, depth, thinking::MAX_NOTES + 1)?;
        Ok(thinking::describe(pos, &result))
    }
}
