//! Easing curves shared by every animation kind.

pub(crate) mod ease;
