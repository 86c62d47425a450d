use super::*;

const MAIN: WindowHandle = WindowHandle::new(1);
const SPEAKER: WindowHandle = WindowHandle::new(2);

fn key(window: WindowHandle, key: Key) -> RawEvent {
    RawEvent::Key { window, key }
}

#[test]
fn quit_maps_to_exit() {
    assert_eq!(sieve(&RawEvent::Quit, MAIN), Some(SlideshowEvent::Exit));
}

#[test]
fn forward_keys_advance_and_backward_keys_go_back() {
    for k in [Key::Right, Key::Down, Key::Space, Key::Enter] {
        assert_eq!(sieve(&key(MAIN, k), MAIN), Some(SlideshowEvent::Advance));
    }
    for k in [Key::Left, Key::Up, Key::Backspace] {
        assert_eq!(sieve(&key(MAIN, k), MAIN), Some(SlideshowEvent::Previous));
    }
}

#[test]
fn other_windows_and_other_events_are_dropped() {
    assert_eq!(sieve(&key(SPEAKER, Key::Right), MAIN), None);
    assert_eq!(sieve(&key(MAIN, Key::Char('x')), MAIN), None);
    assert_eq!(sieve(&key(MAIN, Key::Other), MAIN), None);
    assert_eq!(sieve(&RawEvent::Resize, MAIN), None);
    assert_eq!(sieve(&RawEvent::Other, MAIN), None);
}

#[test]
fn transitions_by_phase() {
    assert_eq!(idle_action(SlideshowEvent::Advance), IdleAction::Advance);
    assert_eq!(idle_action(SlideshowEvent::Exit), IdleAction::Exit);
    assert!(matches!(
        idle_action(SlideshowEvent::Previous),
        IdleAction::Unsupported(_)
    ));
    assert_eq!(
        animating_action(SlideshowEvent::Advance),
        AnimatingAction::FastForward
    );
    assert!(matches!(
        animating_action(SlideshowEvent::Exit),
        AnimatingAction::Unsupported(_)
    ));
}
