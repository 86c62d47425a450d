use crate::host::display::WindowHandle;

/// Keys the presenter can press, as reported by a display surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Right arrow.
    Right,
    /// Down arrow.
    Down,
    /// Space bar.
    Space,
    /// Enter / Return.
    Enter,
    /// Left arrow.
    Left,
    /// Up arrow.
    Up,
    /// Backspace.
    Backspace,
    /// Any printable character.
    Char(char),
    /// Anything else.
    Other,
}

/// Unfiltered event from a display surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawEvent {
    /// The user closed the display.
    Quit,
    /// Key press addressed to one window.
    Key {
        /// Focused window.
        window: WindowHandle,
        /// Which key.
        key: Key,
    },
    /// The display changed size.
    Resize,
    /// Anything the host does not care about.
    Other,
}

/// Event after the input sieve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideshowEvent {
    /// Stop presenting.
    Exit,
    /// Next subslide, or fast-forward while animating.
    Advance,
    /// Previous subslide.
    Previous,
}

/// Map a raw event to a slideshow event, dropping everything else.
///
/// Key presses for other windows are reserved for a secondary display and are dropped.
pub fn sieve(raw: &RawEvent, window: WindowHandle) -> Option<SlideshowEvent> {
    match *raw {
        RawEvent::Quit => Some(SlideshowEvent::Exit),
        RawEvent::Key { window: w, .. } if w != window => None,
        RawEvent::Key { key, .. } => match key {
            Key::Right | Key::Down | Key::Space | Key::Enter => Some(SlideshowEvent::Advance),
            Key::Left | Key::Up | Key::Backspace => Some(SlideshowEvent::Previous),
            Key::Char(_) | Key::Other => None,
        },
        RawEvent::Resize | RawEvent::Other => None,
    }
}

/// Host reaction to an event while the active slide is idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum IdleAction {
    Exit,
    Advance,
    Unsupported(&'static str),
}

/// Host reaction to an event while frames are being delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AnimatingAction {
    FastForward,
    Unsupported(&'static str),
}

pub(crate) fn idle_action(event: SlideshowEvent) -> IdleAction {
    match event {
        SlideshowEvent::Exit => IdleAction::Exit,
        SlideshowEvent::Advance => IdleAction::Advance,
        SlideshowEvent::Previous => IdleAction::Unsupported("going back is not supported yet"),
    }
}

pub(crate) fn animating_action(event: SlideshowEvent) -> AnimatingAction {
    match event {
        SlideshowEvent::Advance => AnimatingAction::FastForward,
        SlideshowEvent::Exit => AnimatingAction::Unsupported(
            "exiting during an animation is not supported, wait for it to finish",
        ),
        SlideshowEvent::Previous => {
            AnimatingAction::Unsupported("going back during an animation is not supported")
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/event.rs"]
mod tests;
