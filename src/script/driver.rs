use crate::foundation::error::SlidesResult;
use crate::scene::stage::GroupSpec;
use crate::script::step::{Script, ScriptStep, SubslideSignal};

/// What the driver asks of whoever is playing the script.
pub trait ScriptHost {
    /// Put objects on stage.
    fn add(&mut self, ids: &[String]) -> SlidesResult<()>;
    /// Take objects off stage.
    fn remove(&mut self, ids: &[String]);
    /// Compile and play one animation group to completion.
    fn play(&mut self, group: GroupSpec<'_>) -> SlidesResult<()>;
}

/// Outcome of one [`ScriptDriver::resume`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverYield {
    /// Suspended at a boundary.
    Boundary(SubslideSignal),
    /// Ran off the end of the script.
    Exhausted,
}

/// Resumable execution of a [`Script`] over a program counter.
#[derive(Clone, Debug)]
pub struct ScriptDriver {
    steps: Vec<ScriptStep>,
    pc: usize,
    single_shot: bool,
    ended: bool,
}

impl ScriptDriver {
    /// Driver positioned at the first step.
    pub fn new(script: &Script) -> Self {
        Self {
            steps: script.steps().to_vec(),
            pc: 0,
            single_shot: !script.is_stepwise(),
            ended: false,
        }
    }

    /// Index of the next step to run.
    pub fn position(&self) -> usize {
        self.pc
    }

    /// Run steps until the next suspension point.
    pub fn resume(&mut self, host: &mut dyn ScriptHost) -> SlidesResult<DriverYield> {
        if self.ended {
            return Ok(DriverYield::Exhausted);
        }
        while let Some(step) = self.steps.get(self.pc) {
            self.pc += 1;
            match step {
                ScriptStep::Add { ids } => host.add(ids)?,
                ScriptStep::Remove { ids } => host.remove(ids),
                ScriptStep::Play {
                    animations,
                    run_time,
                } => host.play(GroupSpec::Play {
                    animations,
                    run_time: *run_time,
                })?,
                ScriptStep::Wait { secs, until } => host.play(GroupSpec::Wait {
                    secs: *secs,
                    until: until.as_ref(),
                })?,
                ScriptStep::Subslide if self.single_shot => {}
                ScriptStep::Subslide => {
                    return Ok(DriverYield::Boundary(SubslideSignal::Continue));
                }
                ScriptStep::Exit => {
                    self.ended = true;
                    return Ok(DriverYield::Boundary(SubslideSignal::EndPresentation));
                }
            }
        }
        if self.single_shot {
            self.ended = true;
            return Ok(DriverYield::Boundary(SubslideSignal::EndPresentation));
        }
        Ok(DriverYield::Exhausted)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/driver.rs"]
mod tests;
