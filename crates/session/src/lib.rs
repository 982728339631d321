//! Game session and ghost preview.
//!
//! [`GameSession`] owns the canonical game: it enforces turn order, applies
//! player and engine moves and undoes them by restoring stored positions.
//! [`GhostPreviewManager`] shows the engine's expected continuation without
//! touching that game until the caller accepts it.

pub mod config;
pub mod error;
pub mod game;
pub mod preview;
pub mod record;

pub use config::GameConfig;
pub use error::{ConfigError, PreviewError, PreviewResult, SessionError, SessionResult};
pub use game::{EndReason, EngineReply, GameMode, GameSession, GameState, GameStatus};
pub use preview::{
    GhostPreviewManager, GhostPreviewState, PreviewMode, PreviewSettings, PreviewStatus,
};
pub use record::GameRecord;
