use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Canvas, Rgba8Premul};
use crate::foundation::error::{SlidesError, SlidesResult};
use crate::render::composite;
use crate::render::frame::Frame;
use crate::scene::object::{SceneObject, Shape};

/// Shared memo of tessellated shape outlines, keyed by shape fingerprint.
///
/// Cloning the handle shares the cache, so a prerender pass warms it for the live sources.
#[derive(Clone, Debug, Default)]
pub struct ShapeCache {
    // Fingerprint buckets; the shape is kept so a collision cannot alias two outlines.
    inner: Rc<RefCell<HashMap<u64, Vec<(Shape, Rc<vello_cpu::kurbo::BezPath>)>>>>,
    hits: Rc<Cell<u64>>,
    misses: Rc<Cell<u64>>,
}

impl ShapeCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached outlines.
    pub fn len(&self) -> usize {
        self.inner.borrow().values().map(Vec::len).sum()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits.get(), self.misses.get())
    }

    fn outline(&self, shape: &Shape) -> SlidesResult<Rc<vello_cpu::kurbo::BezPath>> {
        let key = shape.fingerprint();
        let cached = self.inner.borrow().get(&key).and_then(|bucket| {
            bucket
                .iter()
                .find(|(s, _)| s == shape)
                .map(|(_, p)| Rc::clone(p))
        });
        if let Some(p) = cached {
            self.hits.set(self.hits.get() + 1);
            return Ok(p);
        }
        let path = Rc::new(bezpath_to_cpu(&shape.outline()?));
        self.misses.set(self.misses.get() + 1);
        self.inner
            .borrow_mut()
            .entry(key)
            .or_default()
            .push((shape.clone(), Rc::clone(&path)));
        Ok(path)
    }
}

/// CPU rasterizer for scene objects, built on `vello_cpu`.
pub struct Rasterizer {
    canvas: Canvas,
    clear: Rgba8Premul,
    cache: ShapeCache,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("canvas", &self.canvas)
            .field("clear", &self.clear)
            .finish_non_exhaustive()
    }
}

impl Rasterizer {
    /// Rasterizer for `canvas`, clearing to `background` when no static snapshot is supplied.
    pub fn new(canvas: Canvas, background: Color, cache: ShapeCache) -> SlidesResult<Self> {
        canvas.validate()?;
        Ok(Self {
            canvas,
            clear: background.to_rgba8_premul(),
            cache,
            ctx: None,
        })
    }

    /// Output dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Draw `objects` in order over `background`, or over the clear colour when absent.
    pub fn capture_objects(
        &mut self,
        objects: &[SceneObject],
        background: Option<&Frame>,
    ) -> SlidesResult<Frame> {
        if let Some(bg) = background
            && (bg.width() != self.canvas.width || bg.height() != self.canvas.height)
        {
            return Err(SlidesError::render(format!(
                "background is {}x{}, canvas is {}x{}",
                bg.width(),
                bg.height(),
                self.canvas.width,
                self.canvas.height
            )));
        }

        let visible: Vec<&SceneObject> = objects.iter().filter(|o| o.opacity > 0.0).collect();
        if visible.is_empty() {
            return Ok(match background {
                Some(bg) => bg.clone(),
                None => Frame::solid(self.canvas, self.clear),
            });
        }

        let mut out = match background {
            Some(bg) => bg.data().to_vec(),
            None => {
                let mut data = vec![0u8; self.canvas.byte_len()];
                composite::fill(&mut data, self.clear);
                data
            }
        };
        let layer = self.draw(&visible)?;
        composite::over_in_place(&mut out, layer.data_as_u8_slice())?;
        Frame::new(self.canvas.width, self.canvas.height, out)
    }

    fn draw(&mut self, objects: &[&SceneObject]) -> SlidesResult<vello_cpu::Pixmap> {
        // Canvas::validate bounds both sides to u16.
        let width = self.canvas.width as u16;
        let height = self.canvas.height as u16;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        for obj in objects {
            let path = self.cache.outline(&obj.shape)?;
            let [r, g, b, a] = obj.fill.to_rgba8();
            let opacity = obj.opacity.clamp(0.0, 1.0) as f32;
            ctx.set_transform(affine_to_cpu(obj.transform()));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            if opacity < 1.0 {
                ctx.push_opacity_layer(opacity);
            }
            ctx.fill_path(&path);
            if opacity < 1.0 {
                ctx.pop_layer();
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);
        Ok(pixmap)
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
