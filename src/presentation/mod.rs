//! Per-slide presentation: the NOT_READY / ANIMATING / IDLE state machine and the headless
//! prerender pass built on it.

pub(crate) mod prerender;
pub(crate) mod scene;
pub(crate) mod state;
