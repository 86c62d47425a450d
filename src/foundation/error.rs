/// Result alias used across the crate.
pub type SlidesResult<T> = Result<T, SlidesError>;

/// Error taxonomy for the presentation scheduler and its collaborators.
#[derive(thiserror::Error, Debug)]
pub enum SlidesError {
    /// Malformed manifest or a slide that does not satisfy the presentation contract.
    #[error("authoring error: {0}")]
    Authoring(String),

    /// A state-machine transition was attempted from the wrong state.
    #[error("invalid presentation state: {0}")]
    InvalidState(String),

    /// Animation engine failure (bad run time, missing target, ...).
    #[error("animation error: {0}")]
    Animation(String),

    /// Rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// Display surface failure.
    #[error("display error: {0}")]
    Display(String),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidesError {
    /// Build an [`SlidesError::Authoring`].
    pub fn authoring(msg: impl Into<String>) -> Self {
        Self::Authoring(msg.into())
    }

    /// Build an [`SlidesError::InvalidState`].
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Build an [`SlidesError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build an [`SlidesError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`SlidesError::Display`].
    pub fn display(msg: impl Into<String>) -> Self {
        Self::Display(msg.into())
    }
}

impl From<std::io::Error> for SlidesError {
    fn from(e: std::io::Error) -> Self {
        Self::Display(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
