//! Game configuration loaded from TOML.
//!
//! ```toml
//! [engine]
//! depth = 4
//! quiescence_depth = 4
//! move_time_ms = 2000
//!
//! [preview]
//! line_length = 6
//! search_depth = 3
//! mode = "step_through"
//!
//! [rules]
//! fifty_move_rule = true
//!
//! [handicap]
//! random_move_probability = 0.1
//! seed = 7
//!
//! [session]
//! mode = "human_vs_engine"
//! engine_color = "black"
//! ```
//!
//! Every field is optional and falls back to its default.

use std::path::Path;
use std::time::Duration;

use chess_core::Color;
use classical_engine::{EngineOptions, SearchLimits, DEFAULT_QUIESCENCE_DEPTH};
use random_engine::{Handicap, RandomMover};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::GameMode;
use crate::preview::{PreviewMode, PreviewSettings};

/// Longest ghost line a config may ask for.
pub const MAX_LINE_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub engine: EngineConfig,
    pub preview: PreviewConfig,
    pub rules: RulesConfig,
    pub handicap: HandicapConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Search depth in plies for engine moves.
    pub depth: u8,
    pub quiescence_depth: u8,
    /// Optional per-move time budget.
    pub move_time_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            quiescence_depth: DEFAULT_QUIESCENCE_DEPTH,
            move_time_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Moves in a previewed line.
    pub line_length: usize,
    pub search_depth: u8,
    pub mode: PreviewMode,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            line_length: 6,
            search_depth: 3,
            mode: PreviewMode::AutoPlay,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    pub fifty_move_rule: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            fifty_move_rule: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandicapConfig {
    /// Chance in `[0, 1]` that an engine move is swapped for a random one.
    pub random_move_probability: f64,
    /// Fixed seed for reproducible games; entropy when absent.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    HumanVsHuman,
    #[default]
    HumanVsEngine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    White,
    #[default]
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub mode: SessionKind,
    pub engine_color: Side,
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.depth == 0 {
            return Err(ConfigError::Invalid("engine.depth must be >= 1".to_string()));
        }
        if self.preview.search_depth == 0 {
            return Err(ConfigError::Invalid(
                "preview.search_depth must be >= 1".to_string(),
            ));
        }
        if !(1..=MAX_LINE_LENGTH).contains(&self.preview.line_length) {
            return Err(ConfigError::Invalid(format!(
                "preview.line_length must be in 1..={MAX_LINE_LENGTH}"
            )));
        }
        let p = self.handicap.random_move_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Invalid(format!(
                "handicap.random_move_probability must be in [0, 1], got {p}"
            )));
        }
        Ok(())
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            quiescence_depth: self.engine.quiescence_depth,
        }
    }

    /// Fresh limits for one engine move.
    pub fn move_limits(&self) -> SearchLimits {
        match self.engine.move_time_ms {
            Some(ms) => {
                SearchLimits::depth_and_time(self.engine.depth, Duration::from_millis(ms))
            }
            None => SearchLimits::depth(self.engine.depth),
        }
    }

    pub fn preview_settings(&self) -> PreviewSettings {
        PreviewSettings {
            search_depth: self.preview.search_depth,
            line_length: self.preview.line_length,
            move_time: self.engine.move_time_ms.map(Duration::from_millis),
        }
    }

    pub fn game_mode(&self) -> GameMode {
        match self.session.mode {
            SessionKind::HumanVsHuman => GameMode::HumanVsHuman,
            SessionKind::HumanVsEngine => GameMode::HumanVsEngine {
                engine_color: self.session.engine_color.into(),
            },
        }
    }

    /// `None` when random substitution is off.
    pub fn handicap(&self) -> Option<Handicap> {
        let p = self.handicap.random_move_probability;
        (p > 0.0).then(|| Handicap::new(p, RandomMover::new(self.handicap.seed)))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
