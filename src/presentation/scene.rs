use tracing::{debug, info};

use crate::foundation::core::Fps;
use crate::foundation::error::{SlidesError, SlidesResult};
use crate::presentation::state::{PhaseStats, Presentable, PresentationState, SkipFlag};
use crate::render::frame::Frame;
use crate::render::source::{FrameSink, FrameSource, RenderRequest, SourceId};
use crate::scene::stage::{GroupSpec, ObjectSplit, Stage};
use crate::script::driver::{DriverYield, ScriptDriver, ScriptHost};
use crate::script::step::{Script, SubslideSignal};
use crate::slideshow::manifest::SlideDef;

/// Presentation state machine for one slide.
///
/// `S` picks the frame-source strategy: headless for prerendering, interactive for live
/// presenting.
#[derive(Debug)]
pub struct SlideScene<S: FrameSource> {
    name: String,
    script: Script,
    stage: Stage,
    source: S,
    fps: Fps,
    driver: Option<ScriptDriver>,
    state: PresentationState,
    skip: SkipFlag,
    at_end: bool,
    finished: bool,
    idle_split: ObjectSplit,
    stats: PhaseStats,
}

impl<S: FrameSource> SlideScene<S> {
    /// Validate `def` and build a scene in `NotReady`.
    pub fn new(def: &SlideDef, source: S, fps: Fps) -> SlidesResult<Self> {
        let stage = Stage::new(&def.objects)?;
        def.script
            .validate(&stage)
            .map_err(|e| SlidesError::authoring(format!("slide '{}': {e}", def.name)))?;
        Ok(Self {
            name: def.name.clone(),
            script: def.script.clone(),
            stage,
            source,
            fps,
            driver: None,
            state: PresentationState::NotReady,
            skip: SkipFlag::new(),
            at_end: false,
            finished: false,
            idle_split: ObjectSplit::default(),
            stats: PhaseStats::default(),
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// Whether the scene reported that nothing is left to show.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Live objects.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The frame source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Give the frame source back.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Build the script driver and enter `Animating`.
    pub fn start(&mut self) -> SlidesResult<()> {
        if self.state != PresentationState::NotReady {
            return Err(SlidesError::invalid_state(format!(
                "slide '{}' started twice (state {})",
                self.name, self.state
            )));
        }
        self.driver = Some(ScriptDriver::new(&self.script));
        self.at_end = false;
        self.finished = false;
        self.state = PresentationState::Animating;
        info!(slide = %self.name, "slide started");
        Ok(())
    }

    /// Play animation groups up to the next subslide boundary.
    ///
    /// Returns `true` after entering an idle phase, `false` once nothing is left to show.
    /// Running off the end of the script counts as one final boundary; an explicit exit
    /// does not.
    #[tracing::instrument(level = "debug", skip_all, fields(slide = %self.name))]
    pub fn advance_subslide(&mut self, sink: &mut dyn FrameSink) -> SlidesResult<bool> {
        if self.state == PresentationState::NotReady {
            return Err(SlidesError::invalid_state(format!(
                "advance_subslide on slide '{}' before start",
                self.name
            )));
        }
        if self.finished {
            return Ok(false);
        }
        let Some(driver) = self.driver.as_mut() else {
            return Err(SlidesError::invalid_state("script driver missing"));
        };

        self.skip.clear();
        self.source.set_static_background(None);
        self.state = PresentationState::Animating;

        let groups_before = self.stats.groups_played;
        let mut playback = Playback {
            stage: &mut self.stage,
            source: &mut self.source,
            skip: &self.skip,
            fps: self.fps,
            stats: &mut self.stats,
            sink,
        };
        let outcome = driver.resume(&mut playback)?;
        if self.stats.groups_played > groups_before {
            self.stats.animating_phases += 1;
        }

        let signal = match outcome {
            DriverYield::Boundary(signal) => signal,
            DriverYield::Exhausted if self.at_end => {
                self.finished = true;
                return Ok(false);
            }
            DriverYield::Exhausted => {
                self.at_end = true;
                SubslideSignal::Continue
            }
        };
        if signal == SubslideSignal::EndPresentation {
            self.finished = true;
            info!(slide = %self.name, "script ended the presentation");
            return Ok(false);
        }

        self.state = PresentationState::Idle;
        self.stage.update_objects(0.0);
        self.idle_split = self.stage.moving_and_static(&[]);
        self.source
            .save_static_frame(self.idle_split.static_objects(&self.stage))?;
        self.stats.idle_phases += 1;
        info!(slide = %self.name, idle_phase = self.stats.idle_phases, "entered idle phase");
        Ok(true)
    }

    /// Advance updaters by `dt` and draw the moving objects over the idle snapshot.
    pub fn render_idle_frame(&mut self, dt: f64) -> SlidesResult<Frame> {
        if self.state != PresentationState::Idle {
            return Err(SlidesError::invalid_state(format!(
                "idle frame requested from slide '{}' in state {}",
                self.name, self.state
            )));
        }
        self.stage.update_objects(dt);
        self.source
            .capture_current(self.idle_split.moving(&self.stage))
    }

    /// Whether idle frames change over time.
    pub fn should_update_objects(&self) -> bool {
        self.stage.should_update_objects()
    }

    /// Fast-forward handle for the host.
    pub fn skip_flag(&self) -> SkipFlag {
        self.skip.clone()
    }

    /// Lifetime counters.
    pub fn stats(&self) -> PhaseStats {
        self.stats
    }

    /// Run the frame source's end-of-script hook over the final stage.
    pub fn scene_finished(&mut self) -> SlidesResult<()> {
        self.source.scene_finished(self.stage.objects())
    }
}

struct Playback<'a, S> {
    stage: &'a mut Stage,
    source: &'a mut S,
    skip: &'a SkipFlag,
    fps: Fps,
    stats: &'a mut PhaseStats,
    sink: &'a mut dyn FrameSink,
}

impl<S: FrameSource> ScriptHost for Playback<'_, S> {
    fn add(&mut self, ids: &[String]) -> SlidesResult<()> {
        for id in ids {
            self.stage.add(id)?;
        }
        Ok(())
    }

    fn remove(&mut self, ids: &[String]) {
        for id in ids {
            self.stage.remove(id);
        }
    }

    fn play(&mut self, spec: GroupSpec<'_>) -> SlidesResult<()> {
        let Some(mut group) = self.stage.compile_animation_group(spec)? else {
            return Ok(());
        };
        let split = self.stage.moving_and_static(group.animations());
        self.source
            .save_static_frame(split.static_objects(self.stage))?;

        let dt = self.fps.frame_duration_secs();
        let duration = group.duration();
        let mut need_last_run = false;
        let mut step: u64 = 0;
        loop {
            let t = ((step as f64) * dt).min(duration);
            self.stage.update_to_time(&mut group, t);
            let request = RenderRequest {
                fast_forward: self.skip.is_set(),
                force: false,
            };
            self.source
                .render(split.moving(self.stage), request, self.sink)?;

            let stopped = group.stop_condition_met(self.stage, t);
            // Fast-forward wins over a stop condition firing on the same step.
            if self.source.skip_animations(self.skip.is_set()) {
                need_last_run = true;
                break;
            }
            if stopped || t >= duration {
                break;
            }
            step += 1;
        }

        if need_last_run {
            self.stage.update_to_time(&mut group, duration);
            let request = RenderRequest {
                fast_forward: self.skip.is_set(),
                force: true,
            };
            self.source
                .render(split.moving(self.stage), request, self.sink)?;
        }

        self.stage.finish_group(group);
        self.source.set_static_background(None);
        self.stats.groups_played += 1;
        debug!(
            group = self.stats.groups_played,
            steps = step + 1,
            fast_forward = need_last_run,
            "animation group done"
        );
        Ok(())
    }
}

impl<S: FrameSource> Presentable for SlideScene<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn presentation_state(&self) -> PresentationState {
        self.state
    }

    fn start(&mut self) -> SlidesResult<()> {
        SlideScene::start(self)
    }

    fn advance_subslide(&mut self, sink: &mut dyn FrameSink) -> SlidesResult<bool> {
        SlideScene::advance_subslide(self, sink)
    }

    fn skip_flag(&self) -> SkipFlag {
        SlideScene::skip_flag(self)
    }

    fn source_id(&self) -> SourceId {
        self.source.id()
    }

    fn should_update_objects(&self) -> bool {
        SlideScene::should_update_objects(self)
    }

    fn render_idle_frame(&mut self, dt: f64) -> SlidesResult<Frame> {
        SlideScene::render_idle_frame(self, dt)
    }

    fn stats(&self) -> PhaseStats {
        SlideScene::stats(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/scene.rs"]
mod tests;
