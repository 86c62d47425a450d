//! liveslides turns scripted animations into a live, presenter-paced slideshow.
//!
//! A slide is a set of drawable objects plus a script of animation groups separated by
//! subslide boundaries. The crate is organised around three pieces:
//!
//! - [`SlideScene`], the per-slide NOT_READY / ANIMATING / IDLE state machine
//! - two [`FrameSource`] strategies: [`HeadlessSource`] for the [`prerender_slideshow`] pass
//!   and [`InteractiveSource`] for live playback
//! - [`SlideshowHost`], which paces and blits frames and turns key presses into advances
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod host;
pub(crate) mod presentation;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod script;
pub(crate) mod slideshow;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Affine, BezPath, Canvas, Fps, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{SlidesError, SlidesResult};

pub use crate::animation::ease::Ease;
pub use crate::config::{ConfigOverrides, PresenterConfig};
pub use crate::host::clock::{Clock, FramePacer, ManualClock, SystemClock};
pub use crate::host::display::{DisplaySurface, WindowHandle};
pub use crate::host::event::{Key, RawEvent, SlideshowEvent, sieve};
pub use crate::host::memory::MemoryDisplay;
pub use crate::host::terminal::TerminalDisplay;
pub use crate::host::{ExitReason, SessionReport, SlideshowHost};
pub use crate::presentation::prerender::{
    PrerenderOutcome, PrerenderReport, PrerenderedSlide, Thumbnails, prerender_slide,
    prerender_slideshow,
};
pub use crate::presentation::scene::SlideScene;
pub use crate::presentation::state::{PhaseStats, Presentable, PresentationState, SkipFlag};
pub use crate::render::frame::Frame;
pub use crate::render::raster::{Rasterizer, ShapeCache};
pub use crate::render::source::{
    DiscardSink, FrameSink, FrameSource, HeadlessSource, InteractiveSource, RenderRequest,
    SourceId,
};
pub use crate::scene::animation::{
    Animation, AnimationGroup, AnimationKind, AnimationSpec, StopCondition,
};
pub use crate::scene::object::{SceneObject, Shape, Updater};
pub use crate::scene::stage::{GroupSpec, ObjectSplit, Stage};
pub use crate::script::builder::ScriptBuilder;
pub use crate::script::driver::{DriverYield, ScriptDriver, ScriptHost};
pub use crate::script::step::{Script, ScriptStep, SubslideSignal};
pub use crate::slideshow::manifest::{SlideDef, Slideshow};
