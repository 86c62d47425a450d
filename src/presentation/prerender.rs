use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::config::PresenterConfig;
use crate::foundation::error::{SlidesError, SlidesResult};
use crate::presentation::scene::SlideScene;
use crate::presentation::state::PhaseStats;
use crate::render::frame::Frame;
use crate::render::raster::{Rasterizer, ShapeCache};
use crate::render::source::{DiscardSink, HeadlessSource};
use crate::slideshow::manifest::{SlideDef, Slideshow};

/// First and last frames of a slide.
#[derive(Clone, Debug, Default)]
pub struct Thumbnails {
    /// First frame the script produced.
    pub start: Option<Frame>,
    /// Final state once the script ran to completion.
    pub end: Option<Frame>,
}

impl Thumbnails {
    /// Write `<stem>_start.png` and `<stem>_end.png` into `dir`.
    pub fn write_png(&self, dir: &Path, stem: &str) -> SlidesResult<Vec<PathBuf>> {
        std::fs::create_dir_all(dir).map_err(|e| {
            SlidesError::render(format!("create thumbnail dir '{}': {e}", dir.display()))
        })?;
        let mut written = Vec::new();
        for (suffix, frame) in [("start", &self.start), ("end", &self.end)] {
            let Some(frame) = frame else {
                continue;
            };
            let path = dir.join(format!("{stem}_{suffix}.png"));
            image::save_buffer_with_format(
                &path,
                &frame.to_straight_rgba(),
                frame.width(),
                frame.height(),
                image::ColorType::Rgba8,
                image::ImageFormat::Png,
            )
            .map_err(|e| SlidesError::render(format!("write '{}': {e}", path.display())))?;
            written.push(path);
        }
        Ok(written)
    }
}

/// Result of prerendering one slide.
#[derive(Clone, Debug)]
pub struct PrerenderedSlide {
    /// Slide name.
    pub name: String,
    /// First and last frames.
    pub thumbnails: Thumbnails,
    /// Phase counters from the headless run.
    pub stats: PhaseStats,
    /// Frames the headless source rasterized.
    pub frames_rendered: u64,
}

/// Per-slide outcome of [`prerender_slideshow`].
#[derive(Debug)]
pub enum PrerenderOutcome {
    /// The slide ran to completion.
    Ready(PrerenderedSlide),
    /// The slide failed; other slides were still attempted.
    Failed {
        /// Slide name.
        name: String,
        /// What went wrong.
        error: SlidesError,
    },
}

/// Outcome of a whole prerender pass.
#[derive(Debug, Default)]
pub struct PrerenderReport {
    /// One entry per slide, in deck order; empty when caching is disabled.
    pub slides: Vec<PrerenderOutcome>,
    /// Whether the pass was skipped.
    pub skipped: bool,
}

impl PrerenderReport {
    /// Number of slides that failed.
    pub fn failures(&self) -> usize {
        self.slides
            .iter()
            .filter(|s| matches!(s, PrerenderOutcome::Failed { .. }))
            .count()
    }

    /// The failure of the first slide, the only one the host presents.
    ///
    /// Failures of later slides are logged by the pass and never block a presentation.
    pub fn presented_failure(&self) -> Option<(&str, &SlidesError)> {
        match self.slides.first()? {
            PrerenderOutcome::Failed { name, error } => Some((name.as_str(), error)),
            PrerenderOutcome::Ready(_) => None,
        }
    }
}

/// Drive one slide start to finish with no display, warming `cache`.
#[tracing::instrument(skip_all, fields(slide = %def.name))]
pub fn prerender_slide(
    def: &SlideDef,
    config: &PresenterConfig,
    cache: &ShapeCache,
) -> SlidesResult<PrerenderedSlide> {
    let raster = Rasterizer::new(config.canvas, config.background, cache.clone())?;
    let source = HeadlessSource::new(raster, config.frame_rate);
    let mut scene = SlideScene::new(def, source, config.frame_rate)?;
    scene.start()?;
    let mut sink = DiscardSink;
    while scene.advance_subslide(&mut sink)? {}
    scene.scene_finished()?;

    let stats = scene.stats();
    let source = scene.into_source();
    let frames_rendered = source.frames_produced();
    let (start, end) = source.into_thumbnails();
    info!(frames_rendered, groups = stats.groups_played, "prerendered");
    Ok(PrerenderedSlide {
        name: def.name.clone(),
        thumbnails: Thumbnails { start, end },
        stats,
        frames_rendered,
    })
}

/// Prerender every slide; failures are logged and recorded, not fatal.
pub fn prerender_slideshow(show: &Slideshow, cache: &ShapeCache) -> PrerenderReport {
    if show.config().disable_caching {
        info!(slideshow = %show.name(), "caching disabled, skipping prerender");
        return PrerenderReport {
            slides: Vec::new(),
            skipped: true,
        };
    }
    let slides = show
        .slides()
        .iter()
        .map(|def| match prerender_slide(def, show.config(), cache) {
            Ok(done) => PrerenderOutcome::Ready(done),
            Err(e) => {
                error!(slide = %def.name, error = %e, "prerender failed");
                PrerenderOutcome::Failed {
                    name: def.name.clone(),
                    error: e,
                }
            }
        })
        .collect();
    PrerenderReport {
        slides,
        skipped: false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/prerender.rs"]
mod tests;
