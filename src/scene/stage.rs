use std::collections::BTreeMap;

use crate::foundation::error::{SlidesError, SlidesResult};
use crate::scene::animation::{Animation, AnimationGroup, AnimationSpec, StopCondition};
use crate::scene::object::SceneObject;

/// Request to build one animation group.
#[derive(Clone, Copy, Debug)]
pub enum GroupSpec<'a> {
    /// Play concurrent animations.
    Play {
        /// Members.
        animations: &'a [AnimationSpec],
        /// Explicit duration overriding the longest member.
        run_time: Option<f64>,
    },
    /// Let updaters run for `secs`, optionally ending early.
    Wait {
        /// Maximum duration.
        secs: f64,
        /// Early exit.
        until: Option<&'a StopCondition>,
    },
}

/// Partition of the stage into a static prefix and a moving suffix (draw order).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectSplit {
    first_moving: usize,
}

impl ObjectSplit {
    /// Objects drawn below the first moving one.
    pub fn static_objects<'s>(&self, stage: &'s Stage) -> &'s [SceneObject] {
        let objects = stage.objects();
        &objects[..self.first_moving.min(objects.len())]
    }

    /// The first moving object and everything drawn above it.
    pub fn moving<'s>(&self, stage: &'s Stage) -> &'s [SceneObject] {
        let objects = stage.objects();
        &objects[self.first_moving.min(objects.len())..]
    }
}

/// Live object set of one slide, plus the authored catalog it draws from.
#[derive(Clone, Debug)]
pub struct Stage {
    catalog: BTreeMap<String, SceneObject>,
    objects: Vec<SceneObject>,
}

impl Stage {
    /// Build an empty stage over the given catalog.
    pub fn new(catalog: &[SceneObject]) -> SlidesResult<Self> {
        let mut map = BTreeMap::new();
        for obj in catalog {
            obj.validate()?;
            if map.insert(obj.id.clone(), obj.clone()).is_some() {
                return Err(SlidesError::authoring(format!(
                    "duplicate object id '{}'",
                    obj.id
                )));
            }
        }
        Ok(Self {
            catalog: map,
            objects: Vec::new(),
        })
    }

    /// Objects on stage, in draw order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Look up a live object.
    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub(crate) fn object_mut(&mut self, id: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Authored definition of an object, whether or not it is on stage.
    pub fn authored(&self, id: &str) -> Option<&SceneObject> {
        self.catalog.get(id)
    }

    /// Whether `id` names a catalog object.
    pub fn knows(&self, id: &str) -> bool {
        self.catalog.contains_key(id)
    }

    /// Put a catalog object on top of the stage.
    ///
    /// An object already on stage keeps its live state and moves to the top.
    pub fn add(&mut self, id: &str) -> SlidesResult<()> {
        if let Some(pos) = self.objects.iter().position(|o| o.id == id) {
            let obj = self.objects.remove(pos);
            self.objects.push(obj);
            return Ok(());
        }
        let obj = self
            .catalog
            .get(id)
            .ok_or_else(|| SlidesError::animation(format!("unknown object '{id}'")))?;
        self.objects.push(obj.clone());
        Ok(())
    }

    /// Remove a live object. Unknown or absent ids are ignored.
    pub fn remove(&mut self, id: &str) {
        self.objects.retain(|o| o.id != id);
    }

    /// Compile a group against the current stage.
    ///
    /// Returns `None` when there is nothing to animate: an empty play, or a wait with no
    /// updaters on stage and no stop condition.
    pub fn compile_animation_group(
        &mut self,
        spec: GroupSpec<'_>,
    ) -> SlidesResult<Option<AnimationGroup>> {
        match spec {
            GroupSpec::Play {
                animations,
                run_time,
            } => {
                if animations.is_empty() {
                    return Ok(None);
                }
                let mut compiled = Vec::with_capacity(animations.len());
                for a in animations {
                    compiled.push(Animation::begin(a, self)?);
                }
                let duration = match run_time {
                    Some(d) if d.is_finite() && d > 0.0 => d,
                    Some(d) => {
                        return Err(SlidesError::animation(format!(
                            "group run_time must be > 0, got {d}"
                        )));
                    }
                    None => compiled.iter().map(Animation::run_time).fold(0.0, f64::max),
                };
                Ok(Some(AnimationGroup::new(compiled, duration, None)))
            }
            GroupSpec::Wait { secs, until } => {
                if !(secs.is_finite() && secs >= 0.0) {
                    return Err(SlidesError::animation(format!(
                        "wait must be >= 0 seconds, got {secs}"
                    )));
                }
                if secs == 0.0 || (until.is_none() && !self.should_update_objects()) {
                    return Ok(None);
                }
                Ok(Some(AnimationGroup::new(Vec::new(), secs, until.cloned())))
            }
        }
    }

    /// Move every animation of `group` and every updater to group time `t`.
    pub fn update_to_time(&mut self, group: &mut AnimationGroup, t: f64) {
        let dt = group.step_to(t);
        for a in group.animations() {
            a.interpolate(self, t);
        }
        self.update_objects(dt);
    }

    /// Run updaters by `dt` seconds.
    pub fn update_objects(&mut self, dt: f64) {
        for obj in &mut self.objects {
            obj.update(dt);
        }
    }

    /// Whether any live object changes without an animation driving it.
    pub fn should_update_objects(&self) -> bool {
        self.objects.iter().any(|o| o.updater.is_some())
    }

    /// Split the stage for a span in which `animations` run.
    ///
    /// An object is moving if it is animated or has an updater; everything drawn above the
    /// first moving object also counts as moving so the static snapshot never covers it.
    pub fn moving_and_static(&self, animations: &[Animation]) -> ObjectSplit {
        let first_moving = self
            .objects
            .iter()
            .position(|o| o.updater.is_some() || animations.iter().any(|a| a.target() == o.id))
            .unwrap_or(self.objects.len());
        ObjectSplit { first_moving }
    }

    /// Finalize every member at alpha 1 and detach it from the stage.
    pub fn finish_group(&mut self, group: AnimationGroup) {
        let animations = group.into_animations();
        for a in &animations {
            a.finish(self);
        }
        for a in &animations {
            a.clean_up_from_stage(self);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;
