//! Presentation scripts: authored step lists and the resumable driver that runs them.

pub(crate) mod builder;
pub(crate) mod driver;
pub(crate) mod step;
