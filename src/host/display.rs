use crate::foundation::core::Canvas;
use crate::foundation::error::SlidesResult;
use crate::host::event::RawEvent;
use crate::render::frame::Frame;

/// Opaque identifier of a window created by a display surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowHandle(u32);

impl WindowHandle {
    /// Wrap a raw id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw id.
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Where frames are shown and input comes from.
pub trait DisplaySurface {
    /// Create a window able to show `canvas`-sized frames.
    fn create_window(&mut self, canvas: Canvas, fullscreen: bool) -> SlidesResult<WindowHandle>;
    /// Make the window visible.
    fn show(&mut self, window: WindowHandle) -> SlidesResult<()>;
    /// Drain pending input without blocking.
    fn poll_events(&mut self) -> SlidesResult<Vec<RawEvent>>;
    /// Present one frame.
    fn blit(&mut self, window: WindowHandle, frame: &Frame) -> SlidesResult<()>;
}

impl<D: DisplaySurface + ?Sized> DisplaySurface for &mut D {
    fn create_window(&mut self, canvas: Canvas, fullscreen: bool) -> SlidesResult<WindowHandle> {
        (**self).create_window(canvas, fullscreen)
    }

    fn show(&mut self, window: WindowHandle) -> SlidesResult<()> {
        (**self).show(window)
    }

    fn poll_events(&mut self) -> SlidesResult<Vec<RawEvent>> {
        (**self).poll_events()
    }

    fn blit(&mut self, window: WindowHandle, frame: &Frame) -> SlidesResult<()> {
        (**self).blit(window, frame)
    }
}
