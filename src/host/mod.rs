//! Presentation host: owns the display, the input sieve and the frame pacer, and drives the
//! active slide.
//!
//! While a slide animates, its frames arrive through [`FrameSink::deliver`] on the host's
//! presenter; while it is idle the host pulls frames itself at the configured rate.

pub(crate) mod clock;
pub(crate) mod display;
pub(crate) mod event;
pub(crate) mod memory;
pub(crate) mod terminal;

use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::PresenterConfig;
use crate::foundation::error::{SlidesError, SlidesResult};
use crate::presentation::scene::SlideScene;
use crate::presentation::state::{PhaseStats, Presentable, PresentationState, SkipFlag};
use crate::render::frame::Frame;
use crate::render::raster::{Rasterizer, ShapeCache};
use crate::render::source::{FrameSink, InteractiveSource, SourceId};
use crate::slideshow::manifest::Slideshow;

use self::clock::{Clock, FramePacer};
use self::display::{DisplaySurface, WindowHandle};
use self::event::{AnimatingAction, IdleAction, SlideshowEvent, animating_action, idle_action, sieve};

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// The presenter quit.
    UserExit,
    /// The active slide had nothing left to show.
    PresentationOver,
}

/// Summary of one [`SlideshowHost::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct SessionReport {
    /// How the session ended.
    pub exit: ExitReason,
    /// Name of the slide that was presented.
    pub slide: String,
    /// Phase counters of that slide.
    pub stats: PhaseStats,
    /// Frames handed to the display.
    pub frames_blitted: u64,
    /// Deliveries rejected because they came from an inactive source.
    pub stale_frames_dropped: u64,
    /// Smoothed frame rate at the end of the session.
    pub average_fps: f64,
}

/// Owns the display and clock across a presentation.
#[derive(Debug)]
pub struct SlideshowHost<D: DisplaySurface, C: Clock> {
    display: D,
    clock: C,
    cache: ShapeCache,
}

impl<D: DisplaySurface, C: Clock> SlideshowHost<D, C> {
    /// Host with a fresh shape cache.
    pub fn new(display: D, clock: C) -> Self {
        Self::with_cache(display, clock, ShapeCache::new())
    }

    /// Host reusing `cache`, typically the one the prerender pass warmed.
    pub fn with_cache(display: D, clock: C, cache: ShapeCache) -> Self {
        Self {
            display,
            clock,
            cache,
        }
    }

    /// The display surface.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable display surface, for scripting input between runs.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Give the display back.
    pub fn into_display(self) -> D {
        self.display
    }

    /// Present `show` interactively until the user quits or the first slide is over.
    pub fn run(&mut self, show: &Slideshow) -> SlidesResult<SessionReport> {
        let config = show.config();
        let scenes = show
            .slides()
            .iter()
            .map(|def| {
                let raster = Rasterizer::new(config.canvas, config.background, self.cache.clone())?;
                SlideScene::new(def, InteractiveSource::new(raster), config.frame_rate)
            })
            .collect::<SlidesResult<Vec<_>>>()?;
        self.run_scenes(config, scenes)
    }

    /// Present already built scenes; only the first one is ever activated.
    pub fn run_scenes<P: Presentable>(
        &mut self,
        config: &PresenterConfig,
        mut scenes: Vec<P>,
    ) -> SlidesResult<SessionReport> {
        config.validate()?;
        if scenes.is_empty() {
            return Err(SlidesError::authoring("nothing to present"));
        }
        let window = self.display.create_window(config.canvas, config.fullscreen)?;
        self.display.show(window)?;

        let mut presenter = Presenter::new(&mut self.display, &self.clock, window, config);
        let scene = &mut scenes[0];
        presenter.activate(&*scene);

        scene.start()?;
        if !scene.advance_subslide(&mut presenter)? {
            return Ok(presenter.report(ExitReason::PresentationOver, &*scene));
        }
        // A segment may change the stage without delivering a single frame.
        presenter.invalidate();

        loop {
            let state = scene.presentation_state();
            if state != PresentationState::Idle {
                error!(slide = scene.name(), %state, "idle loop reached a slide that is not idle");
                return Err(SlidesError::invalid_state(format!(
                    "slide '{}' is {state} inside the idle loop",
                    scene.name()
                )));
            }

            let cached = presenter
                .last_frame
                .clone()
                .filter(|_| !scene.should_update_objects());
            let frame = match cached {
                Some(frame) => frame,
                None => {
                    let dt = presenter.idle_dt();
                    let frame = scene.render_idle_frame(dt)?;
                    presenter.last_frame = Some(frame.clone());
                    frame
                }
            };
            presenter.pace();
            presenter.blit(&frame)?;

            for event in presenter.drain_events()? {
                match idle_action(event) {
                    IdleAction::Exit => {
                        info!(slide = scene.name(), "presenter quit");
                        return Ok(presenter.report(ExitReason::UserExit, &*scene));
                    }
                    IdleAction::Advance => {
                        if !scene.advance_subslide(&mut presenter)? {
                            info!(
                                slide = scene.name(),
                                "no more subslides; advancing past the first slide is not supported"
                            );
                            return Ok(presenter.report(ExitReason::PresentationOver, &*scene));
                        }
                        presenter.invalidate();
                    }
                    IdleAction::Unsupported(msg) => warn!(slide = scene.name(), "{msg}"),
                }
            }
        }
    }
}

/// Frame sink the active slide delivers to while it animates.
struct Presenter<'h, D: DisplaySurface, C: Clock> {
    display: &'h mut D,
    clock: &'h C,
    window: WindowHandle,
    pacer: FramePacer,
    active: Option<(SourceId, SkipFlag)>,
    last_frame: Option<Frame>,
    last_idle_update: Option<Duration>,
    frames_blitted: u64,
    stale_frames_dropped: u64,
}

impl<'h, D: DisplaySurface, C: Clock> Presenter<'h, D, C> {
    fn new(display: &'h mut D, clock: &'h C, window: WindowHandle, config: &PresenterConfig) -> Self {
        Self {
            display,
            clock,
            window,
            pacer: FramePacer::new(config.frame_rate),
            active: None,
            last_frame: None,
            last_idle_update: None,
            frames_blitted: 0,
            stale_frames_dropped: 0,
        }
    }

    fn activate(&mut self, scene: &dyn Presentable) {
        info!(slide = scene.name(), source = %scene.source_id(), "activating slide");
        self.active = Some((scene.source_id(), scene.skip_flag()));
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.last_frame = None;
        self.last_idle_update = None;
    }

    /// Seconds since the previous idle frame was rendered; zero for the first one.
    fn idle_dt(&mut self) -> f64 {
        let now = self.clock.now();
        let dt = self
            .last_idle_update
            .map_or(0.0, |t| now.saturating_sub(t).as_secs_f64());
        self.last_idle_update = Some(now);
        dt
    }

    fn pace(&mut self) {
        self.pacer.pace(self.clock);
    }

    fn blit(&mut self, frame: &Frame) -> SlidesResult<()> {
        self.display.blit(self.window, frame)?;
        self.frames_blitted += 1;
        Ok(())
    }

    fn drain_events(&mut self) -> SlidesResult<Vec<SlideshowEvent>> {
        let raw = self.display.poll_events()?;
        Ok(raw.iter().filter_map(|e| sieve(e, self.window)).collect())
    }

    fn report(&self, exit: ExitReason, scene: &dyn Presentable) -> SessionReport {
        SessionReport {
            exit,
            slide: scene.name().to_owned(),
            stats: scene.stats(),
            frames_blitted: self.frames_blitted,
            stale_frames_dropped: self.stale_frames_dropped,
            average_fps: self.pacer.average_fps(),
        }
    }
}

impl<D: DisplaySurface, C: Clock> FrameSink for Presenter<'_, D, C> {
    fn deliver(&mut self, source: SourceId, frame: &Frame) -> SlidesResult<()> {
        let skip = match &self.active {
            Some((id, skip)) if *id == source => skip.clone(),
            _ => {
                warn!(%source, "dropping frame from inactive source");
                self.stale_frames_dropped += 1;
                return Ok(());
            }
        };

        for event in self.drain_events()? {
            match animating_action(event) {
                AnimatingAction::FastForward => {
                    if !skip.is_set() {
                        info!(%source, "fast-forwarding animation");
                    }
                    skip.set();
                }
                AnimatingAction::Unsupported(msg) => warn!(%source, "{msg}"),
            }
        }

        self.pace();
        self.blit(frame)?;
        self.invalidate();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/host.rs"]
mod tests;
