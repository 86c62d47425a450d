use std::sync::Arc;

use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{SlidesError, SlidesResult};
use crate::render::composite;

/// A rendered frame: premultiplied RGBA8, tightly packed, row-major.
///
/// Frames are immutable once produced and cheap to clone; clones share pixel storage.
#[derive(Clone, Debug)]
pub struct Frame {
    inner: Arc<FrameData>,
}

#[derive(Debug)]
struct FrameData {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap premultiplied pixels.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> SlidesResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| SlidesError::render("frame size overflow"))?;
        if data.len() != expected {
            return Err(SlidesError::render(format!(
                "frame buffer is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            inner: Arc::new(FrameData {
                width,
                height,
                data,
            }),
        })
    }

    /// Canvas-sized frame of one colour.
    pub fn solid(canvas: Canvas, color: Rgba8Premul) -> Self {
        let mut data = vec![0u8; canvas.byte_len()];
        composite::fill(&mut data, color);
        Self {
            inner: Arc::new(FrameData {
                width: canvas.width,
                height: canvas.height,
                data,
            }),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let i = ((y as usize) * (self.width() as usize) + (x as usize)) * 4;
        let p = &self.inner.data[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Whether both handles share the same pixel storage.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Straight-alpha copy of the pixels, for image encoders.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.inner.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
