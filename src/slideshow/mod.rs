//! Slide decks: JSON manifests of slides and their scripts.

pub(crate) mod manifest;
