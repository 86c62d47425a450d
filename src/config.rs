//! Presenter configuration: deck defaults plus command-line overrides.

use crate::foundation::color::Color;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::SlidesResult;

fn black() -> Color {
    Color::rgba(0.0, 0.0, 0.0, 1.0)
}

/// Settings shared by the prerender pass and the live host.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Animation and idle refresh rate.
    pub frame_rate: Fps,
    /// Frame dimensions.
    pub canvas: Canvas,
    /// Ask the display for a fullscreen window.
    pub fullscreen: bool,
    /// Skip the prerender pass.
    pub disable_caching: bool,
    /// Clear colour behind every slide.
    pub background: Color,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            frame_rate: Fps::default(),
            canvas: Canvas::default(),
            fullscreen: false,
            disable_caching: false,
            background: black(),
        }
    }
}

/// Values given on the command line; `None` keeps the deck's setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Whole frames per second.
    pub fps: Option<u32>,
    /// Canvas width.
    pub width: Option<u32>,
    /// Canvas height.
    pub height: Option<u32>,
    /// Force fullscreen.
    pub fullscreen: bool,
    /// Force caching off.
    pub no_cache: bool,
}

impl PresenterConfig {
    /// Reject frame rates and canvases the renderer cannot use.
    pub fn validate(&self) -> SlidesResult<()> {
        Fps::new(self.frame_rate.num, self.frame_rate.den)?;
        self.canvas.validate()
    }

    /// Apply overrides and re-validate.
    pub fn with_overrides(mut self, o: &ConfigOverrides) -> SlidesResult<Self> {
        if let Some(fps) = o.fps {
            self.frame_rate = Fps::new(fps, 1)?;
        }
        if let Some(w) = o.width {
            self.canvas.width = w;
        }
        if let Some(h) = o.height {
            self.canvas.height = h;
        }
        self.fullscreen |= o.fullscreen;
        self.disable_caching |= o.no_cache;
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
