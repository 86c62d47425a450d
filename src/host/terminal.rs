use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, queue, style, terminal};
use tracing::debug;

use crate::foundation::core::Canvas;
use crate::foundation::error::{SlidesError, SlidesResult};
use crate::host::display::{DisplaySurface, WindowHandle};
use crate::host::event::{Key, RawEvent};
use crate::render::frame::Frame;

const UPPER_HALF_BLOCK: char = '\u{2580}';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CellColors {
    top: [u8; 3],
    bottom: [u8; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Layout {
    cols: u16,
    rows: u16,
    // Cells used by the picture, and its top-left cell.
    width: u16,
    height: u16,
    x0: u16,
    y0: u16,
    // Frame pixels per half-cell.
    step: f64,
}

impl Layout {
    fn fit(frame_w: u32, frame_h: u32, cols: u16, rows: u16) -> Self {
        let px_h = f64::from(rows) * 2.0;
        let scale = (f64::from(cols) / f64::from(frame_w)).min(px_h / f64::from(frame_h));
        let width = ((f64::from(frame_w) * scale).floor() as u16).clamp(1, cols.max(1));
        let height = ((f64::from(frame_h) * scale / 2.0).floor() as u16).clamp(1, rows.max(1));
        Self {
            cols,
            rows,
            width,
            height,
            x0: (cols - width) / 2,
            y0: (rows - height) / 2,
            step: 1.0 / scale,
        }
    }
}

/// Terminal display drawing two pixels per cell with true-colour half blocks.
///
/// Esc, `q` and Ctrl-C are reported as [`RawEvent::Quit`].
#[derive(Debug)]
pub struct TerminalDisplay {
    out: io::Stdout,
    window: Option<WindowHandle>,
    fullscreen: bool,
    active: bool,
    layout: Option<Layout>,
    cells: Vec<Option<CellColors>>,
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDisplay {
    /// Display on stdout; the terminal is untouched until `show`.
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            window: None,
            fullscreen: false,
            active: false,
            layout: None,
            cells: Vec::new(),
        }
    }

    fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if self.fullscreen {
            let _ = self.out.write_all(b"\x1b[10;0t");
        }
        let _ = execute!(
            self.out,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }

    fn check_window(&self, window: WindowHandle) -> SlidesResult<()> {
        match self.window {
            Some(w) if w == window => Ok(()),
            _ => Err(SlidesError::display("unknown terminal window")),
        }
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        self.restore();
    }
}

impl DisplaySurface for TerminalDisplay {
    fn create_window(&mut self, canvas: Canvas, fullscreen: bool) -> SlidesResult<WindowHandle> {
        if self.window.is_some() {
            return Err(SlidesError::display("terminal supports a single window"));
        }
        debug!(width = canvas.width, height = canvas.height, fullscreen, "terminal window");
        let handle = WindowHandle::new(1);
        self.window = Some(handle);
        self.fullscreen = fullscreen;
        Ok(handle)
    }

    fn show(&mut self, window: WindowHandle) -> SlidesResult<()> {
        self.check_window(window)?;
        if self.active {
            return Ok(());
        }
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;
        if self.fullscreen {
            self.out.write_all(b"\x1b[10;1t")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn poll_events(&mut self) -> SlidesResult<Vec<RawEvent>> {
        let Some(window) = self.window else {
            return Ok(Vec::new());
        };
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            let raw = map_event(event::read()?, window);
            if raw == RawEvent::Resize {
                self.layout = None;
            }
            events.push(raw);
        }
        Ok(events)
    }

    fn blit(&mut self, window: WindowHandle, frame: &Frame) -> SlidesResult<()> {
        self.check_window(window)?;
        let (cols, rows) = terminal::size()?;
        if cols == 0 || rows == 0 {
            return Ok(());
        }
        let layout = Layout::fit(frame.width(), frame.height(), cols, rows);
        if self.layout != Some(layout) {
            queue!(
                self.out,
                style::ResetColor,
                terminal::Clear(terminal::ClearType::All)
            )?;
            self.cells = vec![None; usize::from(layout.width) * usize::from(layout.height)];
            self.layout = Some(layout);
        }

        let sample = |x: f64, y: f64| -> [u8; 3] {
            let px = (x.floor() as u32).min(frame.width() - 1);
            let py = (y.floor() as u32).min(frame.height() - 1);
            // Premultiplied colour is the colour over black.
            frame
                .pixel(px, py)
                .map(|p| [p[0], p[1], p[2]])
                .unwrap_or([0, 0, 0])
        };

        for cy in 0..layout.height {
            for cx in 0..layout.width {
                let x = (f64::from(cx) + 0.5) * layout.step;
                let top_y = (f64::from(cy) * 2.0 + 0.5) * layout.step;
                let colors = CellColors {
                    top: sample(x, top_y),
                    bottom: sample(x, top_y + layout.step),
                };
                let i = usize::from(cy) * usize::from(layout.width) + usize::from(cx);
                if self.cells[i] == Some(colors) {
                    continue;
                }
                self.cells[i] = Some(colors);
                let [tr, tg, tb] = colors.top;
                let [br, bg, bb] = colors.bottom;
                queue!(
                    self.out,
                    cursor::MoveTo(layout.x0 + cx, layout.y0 + cy),
                    style::SetForegroundColor(style::Color::Rgb {
                        r: tr,
                        g: tg,
                        b: tb
                    }),
                    style::SetBackgroundColor(style::Color::Rgb {
                        r: br,
                        g: bg,
                        b: bb
                    }),
                    style::Print(UPPER_HALF_BLOCK),
                )?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

fn map_event(ev: Event, window: WindowHandle) -> RawEvent {
    match ev {
        Event::Key(k) if k.kind != KeyEventKind::Release => map_key(k, window),
        Event::Resize(_, _) => RawEvent::Resize,
        _ => RawEvent::Other,
    }
}

fn map_key(k: KeyEvent, window: WindowHandle) -> RawEvent {
    let key = match k.code {
        KeyCode::Esc | KeyCode::Char('q') => return RawEvent::Quit,
        KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
            return RawEvent::Quit;
        }
        KeyCode::Right => Key::Right,
        KeyCode::Down => Key::Down,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Up => Key::Up,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };
    RawEvent::Key { window, key }
}

#[cfg(test)]
#[path = "../../tests/unit/host/terminal.rs"]
mod tests;
