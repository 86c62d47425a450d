use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::Fps;
use crate::foundation::error::SlidesResult;
use crate::render::frame::Frame;
use crate::render::raster::Rasterizer;
use crate::scene::object::SceneObject;

/// Identity of a frame source, used to reject deliveries from inactive scenes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceId(u64);

impl SourceId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

/// Consumer of frames produced while a scene animates.
pub trait FrameSink {
    /// Accept one frame produced by `source`.
    fn deliver(&mut self, source: SourceId, frame: &Frame) -> SlidesResult<()>;
}

/// Sink that drops every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardSink;

impl FrameSink for DiscardSink {
    fn deliver(&mut self, _source: SourceId, _frame: &Frame) -> SlidesResult<()> {
        Ok(())
    }
}

/// Per-call render flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderRequest {
    /// The presenter asked to skip the rest of the current animation.
    pub fast_forward: bool,
    /// Render even where the strategy would otherwise skip.
    pub force: bool,
}

/// Strategy that turns scene objects into frames.
pub trait FrameSource {
    /// Stable identity of this source.
    fn id(&self) -> SourceId;

    /// Rasterize `objects` over the static background and hand the frame on.
    ///
    /// Returns `None` when the strategy decided not to render.
    fn render(
        &mut self,
        objects: &[SceneObject],
        request: RenderRequest,
        sink: &mut dyn FrameSink,
    ) -> SlidesResult<Option<Frame>>;

    /// Rasterize over the static background with no gating and no delivery.
    fn capture_current(&mut self, objects: &[SceneObject]) -> SlidesResult<Frame>;

    /// Replace or clear the static background.
    fn set_static_background(&mut self, background: Option<Frame>);

    /// Current static background.
    fn static_background(&self) -> Option<&Frame>;

    /// Whether the playback loop should abandon intermediate frames.
    fn skip_animations(&self, fast_forward: bool) -> bool;

    /// Called once the script has run to completion.
    fn scene_finished(&mut self, objects: &[SceneObject]) -> SlidesResult<()>;

    /// Rebuild the static snapshot from `static_objects`.
    fn save_static_frame(&mut self, static_objects: &[SceneObject]) -> SlidesResult<Frame> {
        self.set_static_background(None);
        let frame = self.capture_current(static_objects)?;
        self.set_static_background(Some(frame.clone()));
        Ok(frame)
    }
}

/// Offline strategy: renders synchronously and keeps first and last frames as thumbnails.
#[derive(Debug)]
pub struct HeadlessSource {
    id: SourceId,
    raster: Rasterizer,
    fps: Fps,
    background: Option<Frame>,
    frames_produced: u64,
    thumbnail_start: Option<Frame>,
    thumbnail_end: Option<Frame>,
}

impl HeadlessSource {
    /// Headless source drawing through `raster`.
    pub fn new(raster: Rasterizer, fps: Fps) -> Self {
        Self {
            id: SourceId::next(),
            raster,
            fps,
            background: None,
            frames_produced: 0,
            thumbnail_start: None,
            thumbnail_end: None,
        }
    }

    /// First frame produced.
    pub fn thumbnail_start(&self) -> Option<&Frame> {
        self.thumbnail_start.as_ref()
    }

    /// Final state, set by [`FrameSource::scene_finished`].
    pub fn thumbnail_end(&self) -> Option<&Frame> {
        self.thumbnail_end.as_ref()
    }

    /// Frames rendered so far.
    pub fn frames_produced(&self) -> u64 {
        self.frames_produced
    }

    /// Seconds of playback the produced frames represent.
    pub fn playback_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.frames_produced)
    }

    pub(crate) fn into_thumbnails(self) -> (Option<Frame>, Option<Frame>) {
        (self.thumbnail_start, self.thumbnail_end)
    }

    fn add_frame(&mut self, frame: &Frame) {
        self.frames_produced += 1;
        if self.thumbnail_start.is_none() {
            self.thumbnail_start = Some(frame.clone());
        }
    }
}

impl FrameSource for HeadlessSource {
    fn id(&self) -> SourceId {
        self.id
    }

    fn render(
        &mut self,
        objects: &[SceneObject],
        request: RenderRequest,
        _sink: &mut dyn FrameSink,
    ) -> SlidesResult<Option<Frame>> {
        if self.thumbnail_start.is_some() && !request.force {
            return Ok(None);
        }
        let frame = self.capture_current(objects)?;
        self.add_frame(&frame);
        Ok(Some(frame))
    }

    fn capture_current(&mut self, objects: &[SceneObject]) -> SlidesResult<Frame> {
        self.raster
            .capture_objects(objects, self.background.as_ref())
    }

    fn set_static_background(&mut self, background: Option<Frame>) {
        self.background = background;
    }

    fn static_background(&self) -> Option<&Frame> {
        self.background.as_ref()
    }

    fn skip_animations(&self, _fast_forward: bool) -> bool {
        true
    }

    fn scene_finished(&mut self, objects: &[SceneObject]) -> SlidesResult<()> {
        self.background = None;
        let frame = self.capture_current(objects)?;
        self.add_frame(&frame);
        self.thumbnail_end = Some(frame);
        Ok(())
    }
}

/// Live strategy: every produced frame is pushed to the presenting host.
#[derive(Debug)]
pub struct InteractiveSource {
    id: SourceId,
    raster: Rasterizer,
    background: Option<Frame>,
    frames_delivered: u64,
}

impl InteractiveSource {
    /// Interactive source drawing through `raster`.
    pub fn new(raster: Rasterizer) -> Self {
        Self {
            id: SourceId::next(),
            raster,
            background: None,
            frames_delivered: 0,
        }
    }

    /// Frames handed to a sink so far.
    pub fn frames_delivered(&self) -> u64 {
        self.frames_delivered
    }
}

impl FrameSource for InteractiveSource {
    fn id(&self) -> SourceId {
        self.id
    }

    fn render(
        &mut self,
        objects: &[SceneObject],
        request: RenderRequest,
        sink: &mut dyn FrameSink,
    ) -> SlidesResult<Option<Frame>> {
        if request.fast_forward && !request.force {
            return Ok(None);
        }
        let frame = self.capture_current(objects)?;
        sink.deliver(self.id, &frame)?;
        self.frames_delivered += 1;
        Ok(Some(frame))
    }

    fn capture_current(&mut self, objects: &[SceneObject]) -> SlidesResult<Frame> {
        self.raster
            .capture_objects(objects, self.background.as_ref())
    }

    fn set_static_background(&mut self, background: Option<Frame>) {
        self.background = background;
    }

    fn static_background(&self) -> Option<&Frame> {
        self.background.as_ref()
    }

    fn skip_animations(&self, fast_forward: bool) -> bool {
        fast_forward
    }

    fn scene_finished(&mut self, _objects: &[SceneObject]) -> SlidesResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/source.rs"]
mod tests;
