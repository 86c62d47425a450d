//! Minimal animation engine: drawable objects, animations and the stage that owns them.

pub(crate) mod animation;
pub(crate) mod object;
pub(crate) mod stage;
