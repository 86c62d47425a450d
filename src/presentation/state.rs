use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::error::SlidesResult;
use crate::render::frame::Frame;
use crate::render::source::{FrameSink, SourceId};

/// Lifecycle of one slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentationState {
    /// Constructed, not started.
    NotReady,
    /// Playing animation groups.
    Animating,
    /// Holding at a subslide boundary.
    Idle,
}

impl std::fmt::Display for PresentationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NotReady => "NOT_READY",
            Self::Animating => "ANIMATING",
            Self::Idle => "IDLE",
        })
    }
}

/// Fast-forward request shared between a scene and the host presenting it.
#[derive(Clone, Debug, Default)]
pub struct SkipFlag(Rc<Cell<bool>>);

impl SkipFlag {
    /// Unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the running animation to jump to its end.
    pub fn set(&self) {
        self.0.set(true);
    }

    /// Reset at the start of an animating phase.
    pub fn clear(&self) {
        self.0.set(false);
    }

    /// Whether fast-forward was requested.
    pub fn is_set(&self) -> bool {
        self.0.get()
    }
}

/// Counters kept by a scene over its lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseStats {
    /// Advances that played at least one animation group.
    pub animating_phases: u32,
    /// Idle phases entered, including the closing one.
    pub idle_phases: u32,
    /// Animation groups played to completion.
    pub groups_played: u32,
}

/// What the host needs from a slide.
pub trait Presentable {
    /// Slide name, for logs.
    fn name(&self) -> &str;
    /// Current lifecycle state.
    fn presentation_state(&self) -> PresentationState;
    /// Leave `NotReady`.
    fn start(&mut self) -> SlidesResult<()>;
    /// Play up to the next subslide boundary; `false` once there is nothing left to show.
    fn advance_subslide(&mut self, sink: &mut dyn FrameSink) -> SlidesResult<bool>;
    /// Handle the host uses to request fast-forward.
    fn skip_flag(&self) -> SkipFlag;
    /// Identity of the frames this slide delivers.
    fn source_id(&self) -> SourceId;
    /// Whether idle frames change over time.
    fn should_update_objects(&self) -> bool;
    /// Advance updaters by `dt` seconds and render one idle frame.
    fn render_idle_frame(&mut self, dt: f64) -> SlidesResult<Frame>;
    /// Lifetime counters.
    fn stats(&self) -> PhaseStats;
}
