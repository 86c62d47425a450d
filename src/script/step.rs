use crate::foundation::error::{SlidesError, SlidesResult};
use crate::scene::animation::{AnimationSpec, StopCondition};
use crate::scene::stage::Stage;

/// One pre-compiled script instruction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Put catalog objects on stage, in order.
    Add {
        /// Object ids.
        ids: Vec<String>,
    },
    /// Take objects off stage.
    Remove {
        /// Object ids.
        ids: Vec<String>,
    },
    /// Play one animation group.
    Play {
        /// Concurrent animations.
        animations: Vec<AnimationSpec>,
        /// Explicit group duration.
        #[serde(default)]
        run_time: Option<f64>,
    },
    /// Let updaters run for up to `secs`.
    Wait {
        /// Maximum duration.
        secs: f64,
        /// Early exit.
        #[serde(default)]
        until: Option<StopCondition>,
    },
    /// Subslide boundary: pause and wait for the presenter.
    Subslide,
    /// End the presentation with no closing idle phase.
    Exit,
}

/// Signal emitted by the driver at each suspension point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubslideSignal {
    /// Hold an idle frame, then continue.
    Continue,
    /// Stop presenting.
    EndPresentation,
}

/// A slide's script.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Script {
    /// Suspends at every `subslide` step.
    Stepwise {
        /// Steps in order.
        steps: Vec<ScriptStep>,
    },
    /// Plays every step as one span and ends the presentation.
    SingleShot {
        /// Steps in order; `subslide` steps are ignored.
        steps: Vec<ScriptStep>,
    },
}

impl Script {
    /// Steps in order.
    pub fn steps(&self) -> &[ScriptStep] {
        match self {
            Self::Stepwise { steps } | Self::SingleShot { steps } => steps,
        }
    }

    /// Whether the script suspends at subslide boundaries.
    pub fn is_stepwise(&self) -> bool {
        matches!(self, Self::Stepwise { .. })
    }

    /// Check every step against the slide's object catalog.
    pub fn validate(&self, stage: &Stage) -> SlidesResult<()> {
        let known = |id: &str, what: &str| {
            if stage.knows(id) {
                Ok(())
            } else {
                Err(SlidesError::authoring(format!("{what} references unknown object '{id}'")))
            }
        };
        for (i, step) in self.steps().iter().enumerate() {
            let at = |e: SlidesError| SlidesError::authoring(format!("step {i}: {e}"));
            match step {
                ScriptStep::Add { ids } | ScriptStep::Remove { ids } => {
                    for id in ids {
                        known(id, "add/remove").map_err(at)?;
                    }
                }
                ScriptStep::Play {
                    animations,
                    run_time,
                } => {
                    for a in animations {
                        known(&a.target, "animation").map_err(at)?;
                        if !(a.run_time.is_finite() && a.run_time > 0.0) {
                            return Err(at(SlidesError::authoring(format!(
                                "animation on '{}' must have run_time > 0",
                                a.target
                            ))));
                        }
                    }
                    if let Some(d) = run_time
                        && !(d.is_finite() && *d > 0.0)
                    {
                        return Err(at(SlidesError::authoring("group run_time must be > 0")));
                    }
                }
                ScriptStep::Wait { secs, until } => {
                    if !(secs.is_finite() && *secs >= 0.0) {
                        return Err(at(SlidesError::authoring("wait must be >= 0 seconds")));
                    }
                    if let Some(target) = until.as_ref().and_then(StopCondition::target) {
                        known(target, "stop condition").map_err(at)?;
                    }
                }
                ScriptStep::Subslide | ScriptStep::Exit => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/step.rs"]
mod tests;
