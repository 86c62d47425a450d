use crate::scene::animation::{AnimationSpec, StopCondition};
use crate::script::step::{Script, ScriptStep};

/// Builder for a [`Script`].
#[derive(Clone, Debug, Default)]
pub struct ScriptBuilder {
    steps: Vec<ScriptStep>,
}

impl ScriptBuilder {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put objects on stage.
    pub fn add<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.push(ScriptStep::Add {
            ids: ids.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Take objects off stage.
    pub fn remove<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.push(ScriptStep::Remove {
            ids: ids.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Play animations concurrently; the group lasts as long as its longest member.
    pub fn play(mut self, animations: impl IntoIterator<Item = AnimationSpec>) -> Self {
        self.steps.push(ScriptStep::Play {
            animations: animations.into_iter().collect(),
            run_time: None,
        });
        self
    }

    /// Play animations concurrently for exactly `run_time` seconds.
    pub fn play_for(
        mut self,
        run_time: f64,
        animations: impl IntoIterator<Item = AnimationSpec>,
    ) -> Self {
        self.steps.push(ScriptStep::Play {
            animations: animations.into_iter().collect(),
            run_time: Some(run_time),
        });
        self
    }

    /// Let updaters run for `secs`.
    pub fn wait(mut self, secs: f64) -> Self {
        self.steps.push(ScriptStep::Wait { secs, until: None });
        self
    }

    /// Let updaters run until `until` holds, for at most `secs`.
    pub fn wait_until(mut self, secs: f64, until: StopCondition) -> Self {
        self.steps.push(ScriptStep::Wait {
            secs,
            until: Some(until),
        });
        self
    }

    /// Mark a subslide boundary.
    pub fn subslide(mut self) -> Self {
        self.steps.push(ScriptStep::Subslide);
        self
    }

    /// End the presentation here.
    pub fn exit(mut self) -> Self {
        self.steps.push(ScriptStep::Exit);
        self
    }

    /// Finish as a [`Script::Stepwise`].
    pub fn build(self) -> Script {
        Script::Stepwise { steps: self.steps }
    }

    /// Finish as a [`Script::SingleShot`].
    pub fn build_single_shot(self) -> Script {
        Script::SingleShot { steps: self.steps }
    }
}
