use std::collections::VecDeque;

use crate::foundation::core::Canvas;
use crate::foundation::error::{SlidesError, SlidesResult};
use crate::host::display::{DisplaySurface, WindowHandle};
use crate::host::event::{Key, RawEvent};
use crate::render::frame::Frame;

/// In-memory display for tests and dry runs.
///
/// Each poll returns the next scripted batch. Once the script is used up every poll reports
/// [`RawEvent::Quit`], so a session driven by it always ends.
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    window: Option<(WindowHandle, Canvas, bool)>,
    shown: bool,
    batches: VecDeque<Vec<RawEvent>>,
    polls: usize,
    blits: Vec<Frame>,
}

impl MemoryDisplay {
    /// Display with no scripted input.
    pub fn new() -> Self {
        Self::default()
    }

    /// The handle the next `create_window` returns.
    pub fn main_window() -> WindowHandle {
        WindowHandle::new(1)
    }

    /// Queue one batch, returned by a single poll.
    pub fn push_batch(&mut self, events: impl IntoIterator<Item = RawEvent>) -> &mut Self {
        self.batches.push_back(events.into_iter().collect());
        self
    }

    /// Queue `n` polls that return nothing.
    pub fn push_quiet(&mut self, n: usize) -> &mut Self {
        for _ in 0..n {
            self.batches.push_back(Vec::new());
        }
        self
    }

    /// Queue one poll that presses `key` in the main window.
    pub fn push_key(&mut self, key: Key) -> &mut Self {
        self.push_batch([RawEvent::Key {
            window: Self::main_window(),
            key,
        }])
    }

    /// Frames blitted so far, in order.
    pub fn blits(&self) -> &[Frame] {
        &self.blits
    }

    /// Polls served so far.
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Scripted batches not yet consumed.
    pub fn pending_batches(&self) -> usize {
        self.batches.len()
    }

    /// Whether `show` was called.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Fullscreen flag passed to `create_window`.
    pub fn fullscreen(&self) -> Option<bool> {
        self.window.map(|(_, _, fs)| fs)
    }
}

impl DisplaySurface for MemoryDisplay {
    fn create_window(&mut self, canvas: Canvas, fullscreen: bool) -> SlidesResult<WindowHandle> {
        if self.window.is_some() {
            return Err(SlidesError::display("memory display supports a single window"));
        }
        let handle = Self::main_window();
        self.window = Some((handle, canvas, fullscreen));
        Ok(handle)
    }

    fn show(&mut self, window: WindowHandle) -> SlidesResult<()> {
        match self.window {
            Some((h, _, _)) if h == window => {
                self.shown = true;
                Ok(())
            }
            _ => Err(SlidesError::display("show on unknown window")),
        }
    }

    fn poll_events(&mut self) -> SlidesResult<Vec<RawEvent>> {
        self.polls += 1;
        Ok(self.batches.pop_front().unwrap_or_else(|| vec![RawEvent::Quit]))
    }

    fn blit(&mut self, window: WindowHandle, frame: &Frame) -> SlidesResult<()> {
        let Some((h, canvas, _)) = self.window else {
            return Err(SlidesError::display("blit before create_window"));
        };
        if h != window {
            return Err(SlidesError::display("blit on unknown window"));
        }
        if frame.width() != canvas.width || frame.height() != canvas.height {
            return Err(SlidesError::display(format!(
                "frame is {}x{}, window is {}x{}",
                frame.width(),
                frame.height(),
                canvas.width,
                canvas.height
            )));
        }
        self.blits.push(frame.clone());
        Ok(())
    }
}
