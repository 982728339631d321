//! Ghost preview: the engine's expected continuation, cached so the caller
//! can play it, pause it, step through it and finally accept or discard it.
//!
//! The manager never touches the canonical game. Searching runs on tokio's
//! blocking pool; every other transition is synchronous and only replays
//! cached moves. A newer request supersedes an older one through a
//! generation counter plus the older search's stop flag.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chess_core::{Move, Position};
use classical_engine::{thinking, SearchControl, SearchEngine, SearchLimits, Thinking};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{PreviewError, PreviewResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewMode {
    /// A UI timer advances the line through [`GhostPreviewManager::tick`].
    #[default]
    AutoPlay,
    /// Only explicit steps move through the line.
    StepThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStatus {
    Idle,
    Loading,
    Playing,
    Paused,
    Complete,
}

impl fmt::Display for PreviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PreviewStatus::Idle => "idle",
            PreviewStatus::Loading => "loading",
            PreviewStatus::Playing => "playing",
            PreviewStatus::Paused => "paused",
            PreviewStatus::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Immutable snapshot of the preview.
#[derive(Debug, Clone, PartialEq)]
pub struct GhostPreviewState {
    pub status: PreviewStatus,
    pub mode: PreviewMode,
    /// Predicted line, first move first.
    pub line: Vec<Move>,
    /// Index of the last shown move; -1 before the first.
    pub current_index: i32,
    /// `positions[i]` is the position after `line[0..=i]`. Filled in as the
    /// preview is stepped forward.
    pub positions: Vec<Position>,
    /// Position the line starts from.
    pub base: Option<Position>,
    /// Engine evaluation of `base` in pawns, positive favors White.
    pub evaluation: Option<f32>,
    pub thinking: Option<Thinking>,
}

impl GhostPreviewState {
    fn idle(mode: PreviewMode) -> Self {
        Self {
            status: PreviewStatus::Idle,
            mode,
            line: Vec::new(),
            current_index: -1,
            positions: Vec::new(),
            base: None,
            evaluation: None,
            thinking: None,
        }
    }

    /// Position currently shown: the base before the first step.
    pub fn current_position(&self) -> Option<&Position> {
        if self.current_index < 0 {
            self.base.as_ref()
        } else {
            self.positions.get(self.current_index as usize)
        }
    }

    /// Moves shown so far.
    pub fn shown_moves(&self) -> &[Move] {
        &self.line[..(self.current_index + 1) as usize]
    }

    fn has_steps_left(&self) -> bool {
        ((self.current_index + 1) as usize) < self.line.len()
    }

    /// Status to fall back to when not complete.
    fn running_status(&self) -> PreviewStatus {
        match self.mode {
            PreviewMode::AutoPlay => PreviewStatus::Playing,
            PreviewMode::StepThrough => PreviewStatus::Paused,
        }
    }
}

/// How previews are searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSettings {
    pub search_depth: u8,
    pub line_length: usize,
    pub move_time: Option<Duration>,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            search_depth: 3,
            line_length: 6,
            move_time: None,
        }
    }
}

struct Inner {
    state: GhostPreviewState,
    generation: u64,
    control: Option<SearchControl>,
}

impl Inner {
    /// Drops the line and cancels any running search.
    fn clear(&mut self) {
        self.generation += 1;
        if let Some(control) = self.control.take() {
            control.stop();
        }
        self.state = GhostPreviewState::idle(self.state.mode);
    }

    fn require(&self, op: &'static str, allowed: &[PreviewStatus]) -> PreviewResult<()> {
        let status = self.state.status;
        if allowed.contains(&status) {
            Ok(())
        } else {
            Err(PreviewError::InvalidTransition { op, status })
        }
    }

    fn advance(&mut self) {
        let state = &mut self.state;
        if !state.has_steps_left() {
            return;
        }
        state.current_index += 1;
        let idx = state.current_index as usize;
        if state.positions.len() <= idx {
            let prev = if idx == 0 {
                state.base.as_ref()
            } else {
                state.positions.get(idx - 1)
            };
            if let Some(prev) = prev {
                let next = prev.apply(state.line[idx]);
                state.positions.push(next);
            }
        }
        if !state.has_steps_left() {
            state.status = PreviewStatus::Complete;
        }
    }
}

fn lock_inner(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Held across the search of one request. If the request future is dropped
/// before the search result is taken, the search is stopped and the preview
/// goes back to idle unless a newer request already owns it.
struct PendingRequest {
    inner: Arc<Mutex<Inner>>,
    generation: u64,
    control: SearchControl,
    finished: bool,
}

impl PendingRequest {
    fn finish(&mut self) {
        self.finished = true;
    }
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.control.stop();
        let mut inner = lock_inner(&self.inner);
        if inner.generation == self.generation {
            debug!(generation = self.generation, "preview request dropped");
            inner.clear();
        }
    }
}

const SHOWING: [PreviewStatus; 3] = [
    PreviewStatus::Playing,
    PreviewStatus::Paused,
    PreviewStatus::Complete,
];

/// Clonable handle; clones share one preview.
#[derive(Clone)]
pub struct GhostPreviewManager {
    inner: Arc<Mutex<Inner>>,
    engine: SearchEngine,
    settings: PreviewSettings,
}

impl fmt::Debug for GhostPreviewManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GhostPreviewManager")
            .field("status", &self.state().status)
            .field("settings", &self.settings)
            .finish()
    }
}

impl GhostPreviewManager {
    pub fn new(engine: SearchEngine, settings: PreviewSettings, mode: PreviewMode) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: GhostPreviewState::idle(mode),
                generation: 0,
                control: None,
            })),
            engine,
            settings,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock_inner(&self.inner)
    }

    pub fn settings(&self) -> PreviewSettings {
        self.settings
    }

    pub fn state(&self) -> GhostPreviewState {
        self.lock().state.clone()
    }

    /// Searches `position` and loads the expected line. Allowed from idle,
    /// complete and loading; a request made while loading supersedes the
    /// pending one, which then fails with [`PreviewError::Superseded`].
    ///
    /// Any failure leaves the manager idle, and so does dropping the
    /// returned future before it completes.
    pub async fn request_preview(
        &self,
        position: Position,
        want_thinking: bool,
    ) -> PreviewResult<GhostPreviewState> {
        let (generation, control) = {
            let mut inner = self.lock();
            inner.require(
                "request a preview",
                &[
                    PreviewStatus::Idle,
                    PreviewStatus::Loading,
                    PreviewStatus::Complete,
                ],
            )?;
            inner.clear();
            let control = SearchControl::new(self.settings.move_time);
            inner.control = Some(control.clone());
            inner.state.status = PreviewStatus::Loading;
            inner.state.base = Some(position.clone());
            debug!(generation = inner.generation, "preview loading");
            (inner.generation, control)
        };
        let mut pending = PendingRequest {
            inner: Arc::clone(&self.inner),
            generation,
            control: control.clone(),
            finished: false,
        };

        let engine = self.engine.clone();
        let settings = self.settings;
        let searched = tokio::task::spawn_blocking(move || {
            let limits = SearchLimits::with_control(settings.search_depth, control);
            let result = engine.best_line_with_limits(&position, limits, settings.line_length)?;
            let thinking = want_thinking.then(|| thinking::describe(&position, &result));
            Ok::<_, PreviewError>((result, thinking))
        })
        .await;
        pending.finish();

        let mut inner = self.lock();
        if inner.generation != generation {
            debug!(generation, current = inner.generation, "discarding stale preview");
            return Err(PreviewError::Superseded);
        }
        inner.control = None;

        let (result, thinking) = match searched {
            Ok(Ok(done)) => done,
            Ok(Err(e)) => {
                warn!(error = %e, "preview search failed");
                inner.clear();
                return Err(e);
            }
            Err(e) => {
                warn!(error = %e, "preview task failed");
                inner.clear();
                return Err(PreviewError::TaskFailed(e.to_string()));
            }
        };
        if result.line.is_empty() {
            inner.clear();
            return Err(PreviewError::NoContinuation);
        }

        let state = &mut inner.state;
        state.status = state.running_status();
        state.line = result.line;
        state.current_index = -1;
        state.positions.clear();
        state.evaluation = Some(result.evaluation);
        state.thinking = thinking;
        info!(
            moves = state.line.len(),
            eval = result.evaluation,
            stopped = result.stopped,
            "preview ready"
        );
        Ok(state.clone())
    }

    /// Shows the next move. At the last move the preview is complete;
    /// stepping past it does nothing.
    pub fn step_forward(&self) -> PreviewResult<GhostPreviewState> {
        let mut inner = self.lock();
        inner.require("step forward", &SHOWING)?;
        inner.advance();
        Ok(inner.state.clone())
    }

    /// Hides the last shown move. Stops at -1.
    pub fn step_back(&self) -> PreviewResult<GhostPreviewState> {
        let mut inner = self.lock();
        inner.require("step back", &SHOWING)?;
        let state = &mut inner.state;
        if state.current_index > -1 {
            state.current_index -= 1;
            if state.status == PreviewStatus::Complete {
                state.status = state.running_status();
            }
        }
        Ok(state.clone())
    }

    /// Back to before the first move, keeping the line.
    pub fn reset(&self) -> PreviewResult<GhostPreviewState> {
        let mut inner = self.lock();
        inner.require("reset", &SHOWING)?;
        let state = &mut inner.state;
        state.current_index = -1;
        state.status = state.running_status();
        Ok(state.clone())
    }

    pub fn pause(&self) -> PreviewResult<GhostPreviewState> {
        let mut inner = self.lock();
        inner.require("pause", &[PreviewStatus::Playing, PreviewStatus::Paused])?;
        inner.state.status = PreviewStatus::Paused;
        Ok(inner.state.clone())
    }

    pub fn resume(&self) -> PreviewResult<GhostPreviewState> {
        let mut inner = self.lock();
        inner.require("resume", &[PreviewStatus::Playing, PreviewStatus::Paused])?;
        inner.state.status = PreviewStatus::Playing;
        Ok(inner.state.clone())
    }

    /// Switching to auto play resumes a paused preview with moves left;
    /// switching to step-through pauses a playing one.
    pub fn set_mode(&self, mode: PreviewMode) -> GhostPreviewState {
        let mut inner = self.lock();
        let state = &mut inner.state;
        state.mode = mode;
        match (mode, state.status) {
            (PreviewMode::AutoPlay, PreviewStatus::Paused) if state.has_steps_left() => {
                state.status = PreviewStatus::Playing;
            }
            (PreviewMode::StepThrough, PreviewStatus::Playing) => {
                state.status = PreviewStatus::Paused;
            }
            _ => {}
        }
        state.clone()
    }

    /// One automatic step. Does nothing unless playing.
    pub fn tick(&self) -> GhostPreviewState {
        let mut inner = self.lock();
        if inner.state.status == PreviewStatus::Playing {
            inner.advance();
        }
        inner.state.clone()
    }

    /// Ends the preview and returns the moves shown so far, which the
    /// caller replays on the real game.
    pub fn accept(&self) -> PreviewResult<Vec<Move>> {
        let mut inner = self.lock();
        inner.require("accept", &SHOWING)?;
        let moves = inner.state.shown_moves().to_vec();
        inner.clear();
        debug!(moves = moves.len(), "preview accepted");
        Ok(moves)
    }

    /// Discards the preview and cancels any running search. Always allowed.
    pub fn dismiss(&self) {
        let mut inner = self.lock();
        if inner.state.status != PreviewStatus::Idle {
            debug!(status = %inner.state.status, "preview dismissed");
        }
        inner.clear();
    }
}

#[cfg(test)]
#[path = "preview_tests.rs"]
mod preview_tests;
