use crate::animation::ease::Ease;
use crate::foundation::color::Color;
use crate::foundation::core::Vec2;
use crate::foundation::error::{SlidesError, SlidesResult};
use crate::scene::stage::Stage;

/// What an animation does to its target.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnimationKind {
    /// Bring the target on stage and ramp opacity from 0 to its authored value.
    FadeIn,
    /// Ramp opacity to 0, then remove the target from the stage.
    FadeOut,
    /// Move the object origin.
    MoveTo {
        /// Destination in canvas pixels.
        to: Vec2,
    },
    /// Interpolate uniform scale.
    ScaleTo {
        /// Final scale.
        scale: f64,
    },
    /// Interpolate rotation.
    RotateTo {
        /// Final rotation in radians.
        rotation: f64,
    },
    /// Interpolate fill colour.
    Recolor {
        /// Final fill.
        to: Color,
    },
}

fn default_run_time() -> f64 {
    1.0
}

/// Authored animation: a kind applied to one target over `run_time` seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSpec {
    /// Target object id.
    pub target: String,
    /// Behaviour.
    #[serde(flatten)]
    pub kind: AnimationKind,
    /// Seconds, must be > 0.
    #[serde(default = "default_run_time")]
    pub run_time: f64,
    /// Easing curve applied to normalized time.
    #[serde(default)]
    pub ease: Ease,
}

impl AnimationSpec {
    /// Animation with the default run time and easing.
    pub fn new(target: impl Into<String>, kind: AnimationKind) -> Self {
        Self {
            target: target.into(),
            kind,
            run_time: default_run_time(),
            ease: Ease::default(),
        }
    }

    /// Shorthand for [`AnimationKind::FadeIn`].
    pub fn fade_in(target: impl Into<String>) -> Self {
        Self::new(target, AnimationKind::FadeIn)
    }

    /// Shorthand for [`AnimationKind::FadeOut`].
    pub fn fade_out(target: impl Into<String>) -> Self {
        Self::new(target, AnimationKind::FadeOut)
    }

    /// Shorthand for [`AnimationKind::MoveTo`].
    pub fn move_to(target: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(
            target,
            AnimationKind::MoveTo {
                to: Vec2::new(x, y),
            },
        )
    }

    /// Override the run time.
    pub fn run_time(mut self, secs: f64) -> Self {
        self.run_time = secs;
        self
    }

    /// Override the easing.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub(crate) fn validate(&self) -> SlidesResult<()> {
        if !(self.run_time.is_finite() && self.run_time > 0.0) {
            return Err(SlidesError::animation(format!(
                "animation on '{}' must have run_time > 0",
                self.target
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct StartState {
    position: Vec2,
    scale: f64,
    rotation: f64,
    opacity: f64,
    fill: Color,
}

/// A running animation bound to the stage it was compiled against.
#[derive(Clone, Debug)]
pub struct Animation {
    spec: AnimationSpec,
    start: StartState,
    // FadeIn ramps toward this; other kinds ignore it.
    authored_opacity: f64,
}

impl Animation {
    /// Capture the target's current state as the interpolation origin.
    pub(crate) fn begin(spec: &AnimationSpec, stage: &mut Stage) -> SlidesResult<Self> {
        spec.validate()?;
        if matches!(spec.kind, AnimationKind::FadeIn) && stage.object(&spec.target).is_none() {
            stage.add(&spec.target)?;
            if let Some(obj) = stage.object_mut(&spec.target) {
                obj.opacity = 0.0;
            }
        }
        let authored_opacity = stage
            .authored(&spec.target)
            .map(|o| o.opacity)
            .unwrap_or(1.0);
        let obj = stage.object(&spec.target).ok_or_else(|| {
            SlidesError::animation(format!("'{}' is not on stage", spec.target))
        })?;
        Ok(Self {
            spec: spec.clone(),
            start: StartState {
                position: obj.position,
                scale: obj.scale,
                rotation: obj.rotation,
                opacity: obj.opacity,
                fill: obj.fill,
            },
            authored_opacity,
        })
    }

    /// Id of the animated object.
    pub fn target(&self) -> &str {
        &self.spec.target
    }

    /// Seconds this animation runs for.
    pub fn run_time(&self) -> f64 {
        self.spec.run_time
    }

    /// Apply the state at group time `t`.
    pub(crate) fn interpolate(&self, stage: &mut Stage, t: f64) {
        let alpha = self.spec.ease.apply(t / self.spec.run_time);
        self.apply_alpha(stage, alpha);
    }

    /// Jump to the final state.
    pub fn finish(&self, stage: &mut Stage) {
        self.apply_alpha(stage, 1.0);
    }

    /// Detach from the stage once the group is over.
    pub fn clean_up_from_stage(&self, stage: &mut Stage) {
        if matches!(self.spec.kind, AnimationKind::FadeOut) {
            stage.remove(&self.spec.target);
        }
    }

    fn apply_alpha(&self, stage: &mut Stage, alpha: f64) {
        let Some(obj) = stage.object_mut(&self.spec.target) else {
            return;
        };
        let s = self.start;
        let lerp = |a: f64, b: f64| a + (b - a) * alpha;
        match &self.spec.kind {
            AnimationKind::FadeIn => obj.opacity = lerp(s.opacity, self.authored_opacity),
            AnimationKind::FadeOut => obj.opacity = lerp(s.opacity, 0.0),
            AnimationKind::MoveTo { to } => obj.position = s.position.lerp(*to, alpha),
            AnimationKind::ScaleTo { scale } => obj.scale = lerp(s.scale, *scale),
            AnimationKind::RotateTo { rotation } => obj.rotation = lerp(s.rotation, *rotation),
            AnimationKind::Recolor { to } => obj.fill = s.fill.lerp(*to, alpha),
        }
    }
}

/// Predicate that ends a group before its full duration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopCondition {
    /// Met once the target's opacity reaches `value`.
    OpacityAtLeast {
        /// Object id.
        target: String,
        /// Threshold.
        value: f64,
    },
    /// Met once the target's opacity drops to `value` or the target leaves the stage.
    OpacityAtMost {
        /// Object id.
        target: String,
        /// Threshold.
        value: f64,
    },
    /// Met once group time reaches `secs`.
    Elapsed {
        /// Threshold in seconds.
        secs: f64,
    },
}

impl StopCondition {
    /// Evaluate against the stage at group time `t`.
    pub fn is_met(&self, stage: &Stage, t: f64) -> bool {
        match self {
            Self::OpacityAtLeast { target, value } => {
                stage.object(target).is_some_and(|o| o.opacity >= *value)
            }
            Self::OpacityAtMost { target, value } => {
                stage.object(target).is_none_or(|o| o.opacity <= *value)
            }
            Self::Elapsed { secs } => t >= *secs,
        }
    }

    pub(crate) fn target(&self) -> Option<&str> {
        match self {
            Self::OpacityAtLeast { target, .. } | Self::OpacityAtMost { target, .. } => {
                Some(target)
            }
            Self::Elapsed { .. } => None,
        }
    }
}

/// Concurrent animations sharing one clock.
#[derive(Debug)]
pub struct AnimationGroup {
    animations: Vec<Animation>,
    duration: f64,
    stop_condition: Option<StopCondition>,
    last_t: f64,
}

impl AnimationGroup {
    pub(crate) fn new(
        animations: Vec<Animation>,
        duration: f64,
        stop_condition: Option<StopCondition>,
    ) -> Self {
        Self {
            animations,
            duration,
            stop_condition,
            last_t: 0.0,
        }
    }

    /// Members of the group.
    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    /// Seconds until the group is complete.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether the group's stop condition holds at time `t`.
    pub fn stop_condition_met(&self, stage: &Stage, t: f64) -> bool {
        self.stop_condition
            .as_ref()
            .is_some_and(|c| c.is_met(stage, t))
    }

    /// Advance the group clock, returning the elapsed delta.
    pub(crate) fn step_to(&mut self, t: f64) -> f64 {
        let dt = (t - self.last_t).max(0.0);
        self.last_t = t;
        dt
    }

    pub(crate) fn into_animations(self) -> Vec<Animation> {
        self.animations
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/animation.rs"]
mod tests;
