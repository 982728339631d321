//! Game session: the one canonical game, its turn order and undo history.

use std::fmt;

use chess_core::{classify, is_legal, parse_move, Color, Move, Outcome, Position};
use classical_engine::{SearchEngine, SearchLimits, Thinking};
use random_engine::Handicap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::{SessionError, SessionResult};
use crate::preview::GhostPreviewManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    WhiteWins,
    BlackWins,
    Draw,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::InProgress => "in progress",
            GameStatus::WhiteWins => "white wins",
            GameStatus::BlackWins => "black wins",
            GameStatus::Draw => "draw",
        };
        f.write_str(text)
    }
}

/// Why a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    HumanVsHuman,
    HumanVsEngine { engine_color: Color },
}

/// Canonical game snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub position: Position,
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    /// Moves played from the start position.
    pub moves: Vec<Move>,
}

/// A move the engine picked for `base`, computed off the session thread.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineReply {
    pub base: Position,
    pub ply: usize,
    pub mv: Move,
    /// Evaluation of `base` in pawns, positive favors White.
    pub evaluation: f32,
}

pub struct GameSession {
    start: Position,
    state: GameState,
    /// Position before each played move; `history[i]` precedes `moves[i]`.
    history: Vec<Position>,
    /// Hash of every position reached, start included.
    hashes: Vec<u64>,
    mode: GameMode,
    engine: SearchEngine,
    handicap: Option<Handicap>,
    preview: GhostPreviewManager,
    config: GameConfig,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("mode", &self.mode)
            .finish()
    }
}

impl GameSession {
    /// New game from the standard start position. Initializes the engine.
    pub fn new(config: &GameConfig) -> SessionResult<Self> {
        Self::from_position(config, Position::startpos())
    }

    pub fn from_position(config: &GameConfig, start: Position) -> SessionResult<Self> {
        let engine = SearchEngine::with_options(config.engine_options());
        engine.initialize()?;
        let preview = GhostPreviewManager::new(
            engine.clone(),
            config.preview_settings(),
            config.preview.mode,
        );
        let mut session = Self {
            state: GameState {
                position: start.clone(),
                status: GameStatus::InProgress,
                end_reason: None,
                moves: Vec::new(),
            },
            hashes: vec![start.position_hash()],
            start,
            history: Vec::new(),
            mode: config.game_mode(),
            engine,
            handicap: config.handicap(),
            preview,
            config: config.clone(),
        };
        session.refresh_status();
        info!(mode = ?session.mode, fen = %session.state.position, "new game");
        Ok(session)
    }

    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    pub fn start_position(&self) -> &Position {
        &self.start
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn preview(&self) -> &GhostPreviewManager {
        &self.preview
    }

    pub fn is_game_over(&self) -> bool {
        self.state.status != GameStatus::InProgress
    }

    /// True when a human is to move.
    pub fn is_player_turn(&self) -> bool {
        match self.mode {
            GameMode::HumanVsHuman => true,
            GameMode::HumanVsEngine { engine_color } => {
                self.state.position.side_to_move() != engine_color
            }
        }
    }

    /// Legal moves in the current position; none once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_game_over() {
            return Vec::new();
        }
        chess_core::legal_moves(&self.state.position)
    }

    /// Resolves move text such as `e2e4` against the current position.
    pub fn parse_move(&self, text: &str) -> SessionResult<Move> {
        Ok(parse_move(&self.state.position, text)?)
    }

    pub fn make_player_move(&mut self, mv: Move) -> SessionResult<&GameState> {
        self.ensure_in_progress()?;
        if !self.is_player_turn() {
            return Err(SessionError::NotPlayersTurn);
        }
        if !is_legal(&self.state.position, mv) {
            return Err(SessionError::IllegalMove(mv.to_string()));
        }
        self.commit(mv);
        Ok(&self.state)
    }

    /// Searches and plays the engine's move on the calling thread.
    pub fn make_engine_move(&mut self) -> SessionResult<Move> {
        self.ensure_engine_turn()?;
        let result = self.engine.best_line_with_limits(
            &self.state.position,
            self.config.move_limits(),
            1,
        )?;
        let chosen = result.best_move().ok_or(SessionError::NoMove)?;
        Ok(self.play_engine_choice(chosen))
    }

    /// Searches for the engine's move on the blocking pool without holding
    /// on to the session. Pass the reply to
    /// [`apply_engine_reply`](Self::apply_engine_reply).
    pub async fn compute_engine_move(&self) -> SessionResult<EngineReply> {
        self.ensure_engine_turn()?;
        let engine = self.engine.clone();
        let base = self.state.position.clone();
        let ply = self.state.moves.len();
        let limits = self.config.move_limits();

        tokio::task::spawn_blocking(move || {
            let result = engine.best_line_with_limits(&base, limits, 1)?;
            let mv = result.best_move().ok_or(SessionError::NoMove)?;
            Ok::<_, SessionError>(EngineReply {
                base,
                ply,
                mv,
                evaluation: result.evaluation,
            })
        })
        .await
        .map_err(|e| SessionError::TaskFailed(e.to_string()))?
    }

    /// Plays a reply from [`compute_engine_move`](Self::compute_engine_move)
    /// if the game has not moved on since it was computed.
    pub fn apply_engine_reply(&mut self, reply: EngineReply) -> SessionResult<Move> {
        if reply.ply != self.state.moves.len() || reply.base != self.state.position {
            warn!(reply_ply = reply.ply, ply = self.state.moves.len(), "stale engine reply");
            return Err(SessionError::StaleReply);
        }
        self.ensure_engine_turn()?;
        if !is_legal(&self.state.position, reply.mv) {
            return Err(SessionError::IllegalMove(reply.mv.to_string()));
        }
        Ok(self.play_engine_choice(reply.mv))
    }

    /// Describes the current position for commentary, off the session thread.
    pub async fn thinking(&self) -> SessionResult<Thinking> {
        let engine = self.engine.clone();
        let pos = self.state.position.clone();
        let depth = self.config.engine.depth;
        let thinking = tokio::task::spawn_blocking(move || engine.thinking(&pos, depth))
            .await
            .map_err(|e| SessionError::TaskFailed(e.to_string()))??;
        Ok(thinking)
    }

    pub fn undo_move(&mut self) -> SessionResult<&GameState> {
        self.undo_moves(1)
    }

    /// Takes back `count` moves at once, or none if fewer were played.
    /// Restores the stored earlier position and drops any ghost preview.
    pub fn undo_moves(&mut self, count: usize) -> SessionResult<&GameState> {
        let available = self.history.len();
        if count == 0 || count > available {
            return Err(SessionError::NothingToUndo {
                requested: count,
                available,
            });
        }
        let keep = available - count;
        self.state.position = self.history[keep].clone();
        self.history.truncate(keep);
        self.state.moves.truncate(keep);
        self.hashes.truncate(keep + 1);
        self.preview.dismiss();
        self.refresh_status();
        info!(count, ply = keep, "undo");
        Ok(&self.state)
    }

    /// Plays the moves the ghost preview has shown so far. Every move is
    /// checked on a scratch copy first; nothing is played unless all are
    /// legal.
    pub fn accept_preview(&mut self) -> SessionResult<Vec<Move>> {
        let preview = self.preview.state();
        if preview.base.as_ref() != Some(&self.state.position) {
            self.preview.dismiss();
            return Err(SessionError::StalePreview);
        }
        self.ensure_in_progress()?;
        let moves = self.preview.accept()?;

        let mut scratch = self.state.position.clone();
        for &mv in &moves {
            if classify(&scratch, self.config.rules.fifty_move_rule).is_some()
                || !is_legal(&scratch, mv)
            {
                return Err(SessionError::IllegalMove(mv.to_string()));
            }
            scratch = scratch.apply(mv);
        }
        for &mv in &moves {
            self.commit(mv);
        }
        Ok(moves)
    }

    fn play_engine_choice(&mut self, chosen: Move) -> Move {
        let mv = match self.handicap.as_mut() {
            Some(handicap) => handicap.maybe_substitute(&self.state.position, chosen),
            None => chosen,
        };
        self.commit(mv);
        mv
    }

    fn ensure_in_progress(&self) -> SessionResult<()> {
        if self.is_game_over() {
            Err(SessionError::GameOver(self.state.status))
        } else {
            Ok(())
        }
    }

    fn ensure_engine_turn(&self) -> SessionResult<()> {
        self.ensure_in_progress()?;
        if self.is_player_turn() {
            Err(SessionError::NotEnginesTurn)
        } else {
            Ok(())
        }
    }

    /// Applies a move already known to be legal.
    pub(crate) fn commit(&mut self, mv: Move) {
        let next = self.state.position.apply(mv);
        let prev = std::mem::replace(&mut self.state.position, next);
        self.history.push(prev);
        self.state.moves.push(mv);
        self.hashes.push(self.state.position.position_hash());
        self.preview.dismiss();
        self.refresh_status();
        debug!(%mv, ply = self.state.moves.len(), "move played");
    }

    fn refresh_status(&mut self) {
        let pos = &self.state.position;
        let (status, reason) = match classify(pos, self.config.rules.fifty_move_rule) {
            Some(Outcome::Checkmate { winner }) => (
                match winner {
                    Color::White => GameStatus::WhiteWins,
                    Color::Black => GameStatus::BlackWins,
                },
                Some(EndReason::Checkmate),
            ),
            Some(Outcome::Stalemate) => (GameStatus::Draw, Some(EndReason::Stalemate)),
            Some(Outcome::InsufficientMaterial) => {
                (GameStatus::Draw, Some(EndReason::InsufficientMaterial))
            }
            Some(Outcome::FiftyMoveRule) => (GameStatus::Draw, Some(EndReason::FiftyMoveRule)),
            None if self.is_threefold_repetition() => {
                (GameStatus::Draw, Some(EndReason::ThreefoldRepetition))
            }
            None => (GameStatus::InProgress, None),
        };
        if status != self.state.status {
            info!(%status, reason = ?reason, "game status changed");
        }
        self.state.status = status;
        self.state.end_reason = reason;
    }

    fn is_threefold_repetition(&self) -> bool {
        let Some(&current) = self.hashes.last() else {
            return false;
        };
        self.hashes.iter().filter(|&&h| h == current).count() >= 3
    }

    /// Limits a caller can use to search the current position the way the
    /// session does.
    pub fn move_limits(&self) -> SearchLimits {
        self.config.move_limits()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
