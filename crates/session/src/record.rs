//! Saved games as JSON: the start position, the moves played and how the
//! game stood when it was saved.

use std::path::Path;

use chess_core::Position;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::GameConfig;
use crate::error::{SessionError, SessionResult};
use crate::game::{GameSession, GameStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// FEN of the start position.
    pub start_fen: String,
    /// Moves in coordinate notation (`e2e4`, `a7a8q`).
    pub moves: Vec<String>,
    pub status: GameStatus,
}

impl GameRecord {
    /// Save the record to a JSON file.
    pub fn save(&self, path: &Path) -> SessionResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a record from a JSON file.
    pub fn load(path: &Path) -> SessionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl GameSession {
    pub fn record(&self) -> GameRecord {
        let state = self.game_state();
        GameRecord {
            start_fen: self.start_position().to_fen(),
            moves: state.moves.iter().map(|m| m.to_string()).collect(),
            status: state.status,
        }
    }

    /// Rebuilds a session by replaying a record. Every move must be legal in
    /// turn; turn order between human and engine is not enforced.
    pub fn from_record(config: &GameConfig, record: &GameRecord) -> SessionResult<Self> {
        let start = Position::from_fen(&record.start_fen)?;
        let mut session = GameSession::from_position(config, start)?;
        for text in &record.moves {
            if session.is_game_over() {
                return Err(SessionError::GameOver(session.game_state().status));
            }
            let mv = session.parse_move(text)?;
            session.commit(mv);
        }
        let status = session.game_state().status;
        if status != record.status {
            warn!(
                recorded = %record.status,
                replayed = %status,
                "record status disagrees with replay"
            );
        }
        Ok(session)
    }
}
