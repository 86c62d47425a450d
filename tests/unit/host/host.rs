use super::*;
use crate::foundation::core::{Canvas, Fps, Rgba8Premul};
use crate::host::clock::ManualClock;
use crate::host::event::{Key, RawEvent};
use crate::host::memory::MemoryDisplay;

fn config() -> PresenterConfig {
    PresenterConfig {
        canvas: Canvas {
            width: 8,
            height: 4,
        },
        ..PresenterConfig::default()
    }
}

/// Scripted stand-in for a slide.
struct Fake {
    id: SourceId,
    skip: SkipFlag,
    state: PresentationState,
    // Result of each advance, and whether it leaves the slide idle.
    advances: Vec<(bool, bool)>,
    animating_frames: usize,
    updating: bool,
    stats: PhaseStats,
}

impl Fake {
    fn new(advances: Vec<(bool, bool)>) -> Self {
        Self {
            id: SourceId::next(),
            skip: SkipFlag::new(),
            state: PresentationState::NotReady,
            advances,
            animating_frames: 0,
            updating: false,
            stats: PhaseStats::default(),
        }
    }

    fn frame() -> Frame {
        Frame::solid(config().canvas, Rgba8Premul::from_straight_rgba(10, 20, 30, 255))
    }
}

impl Presentable for Fake {
    fn name(&self) -> &str {
        "fake"
    }

    fn presentation_state(&self) -> PresentationState {
        self.state
    }

    fn start(&mut self) -> SlidesResult<()> {
        self.state = PresentationState::Animating;
        Ok(())
    }

    fn advance_subslide(&mut self, sink: &mut dyn FrameSink) -> SlidesResult<bool> {
        self.skip.clear();
        self.state = PresentationState::Animating;
        for _ in 0..self.animating_frames {
            sink.deliver(self.id, &Self::frame())?;
        }
        if self.advances.is_empty() {
            return Ok(false);
        }
        let (more, idle) = self.advances.remove(0);
        if idle {
            self.state = PresentationState::Idle;
            self.stats.idle_phases += 1;
        }
        Ok(more)
    }

    fn skip_flag(&self) -> SkipFlag {
        self.skip.clone()
    }

    fn source_id(&self) -> SourceId {
        self.id
    }

    fn should_update_objects(&self) -> bool {
        self.updating
    }

    fn render_idle_frame(&mut self, _dt: f64) -> SlidesResult<Frame> {
        Ok(Self::frame())
    }

    fn stats(&self) -> PhaseStats {
        self.stats
    }
}

#[test]
fn non_idle_slide_in_idle_loop_is_an_invalid_state() {
    let mut host = SlideshowHost::new(MemoryDisplay::new(), ManualClock::new());
    let err = host
        .run_scenes(&config(), vec![Fake::new(vec![(true, false)])])
        .unwrap_err();
    assert!(matches!(err, SlidesError::InvalidState(_)), "{err}");
    assert!(host.display().blits().is_empty());
}

#[test]
fn empty_scene_list_is_rejected() {
    let mut host = SlideshowHost::new(MemoryDisplay::new(), ManualClock::new());
    let err = host.run_scenes::<Fake>(&config(), Vec::new()).unwrap_err();
    assert!(matches!(err, SlidesError::Authoring(_)));
}

#[test]
fn zero_frame_rate_is_rejected_before_showing() {
    let mut host = SlideshowHost::new(MemoryDisplay::new(), ManualClock::new());
    let bad = PresenterConfig {
        frame_rate: Fps { num: 0, den: 1 },
        ..config()
    };
    let err = host
        .run_scenes(&bad, vec![Fake::new(vec![(true, true)])])
        .unwrap_err();
    assert!(matches!(err, SlidesError::Authoring(_)), "{err}");
    assert!(!host.display().is_shown());
}

#[test]
fn nothing_to_show_ends_before_the_idle_loop() {
    let mut host = SlideshowHost::new(MemoryDisplay::new(), ManualClock::new());
    let report = host.run_scenes(&config(), vec![Fake::new(Vec::new())]).unwrap();
    assert_eq!(report.exit, ExitReason::PresentationOver);
    assert!(host.display().is_shown());
    assert_eq!(host.display().polls(), 0);
}

#[test]
fn static_idle_frame_is_rendered_once_and_reblitted() {
    let mut display = MemoryDisplay::new();
    display.push_quiet(3);
    let mut host = SlideshowHost::new(display, ManualClock::new());
    let report = host
        .run_scenes(&config(), vec![Fake::new(vec![(true, true)])])
        .unwrap();
    assert_eq!(report.exit, ExitReason::UserExit);
    let blits = host.display().blits();
    assert_eq!(blits.len(), 4);
    assert!(blits.windows(2).all(|w| Frame::ptr_eq(&w[0], &w[1])));
    assert_eq!(report.frames_blitted, 4);
}

#[test]
fn advance_without_frames_rerenders_the_idle_frame() {
    let mut display = MemoryDisplay::new();
    display.push_key(Key::Right).push_quiet(1);
    let mut host = SlideshowHost::new(display, ManualClock::new());
    let report = host
        .run_scenes(&config(), vec![Fake::new(vec![(true, true), (true, true)])])
        .unwrap();
    assert_eq!(report.exit, ExitReason::UserExit);
    assert_eq!(report.stats.idle_phases, 2);
    let blits = host.display().blits();
    assert_eq!(blits.len(), 3);
    assert!(!Frame::ptr_eq(&blits[0], &blits[1]));
    assert!(Frame::ptr_eq(&blits[1], &blits[2]));
}

#[test]
fn updating_idle_frames_get_the_elapsed_time() {
    let mut display = MemoryDisplay::new();
    display.push_quiet(2);
    let clock = ManualClock::new();
    let mut host = SlideshowHost::new(display, clock.clone());
    let mut fake = Fake::new(vec![(true, true)]);
    fake.updating = true;

    let report = host.run_scenes(&config(), vec![fake]).unwrap();
    assert_eq!(report.frames_blitted, 3);
    let period = config().frame_rate.frame_period();
    assert_eq!(clock.now(), period * 2);
}

#[test]
fn advance_past_the_last_subslide_ends_the_session() {
    let mut display = MemoryDisplay::new();
    display.push_key(Key::Right);
    let mut host = SlideshowHost::new(display, ManualClock::new());
    let report = host
        .run_scenes(&config(), vec![Fake::new(vec![(true, true)])])
        .unwrap();
    assert_eq!(report.exit, ExitReason::PresentationOver);
    assert_eq!(report.stats.idle_phases, 1);
}

#[test]
fn previous_is_ignored_while_idle() {
    let mut display = MemoryDisplay::new();
    display.push_key(Key::Left);
    let mut host = SlideshowHost::new(display, ManualClock::new());
    let report = host
        .run_scenes(&config(), vec![Fake::new(vec![(true, true)])])
        .unwrap();
    assert_eq!(report.exit, ExitReason::UserExit);
    assert_eq!(host.display().blits().len(), 2);
}

#[test]
fn stale_delivery_is_dropped_without_bookkeeping() {
    let mut display = MemoryDisplay::new();
    let window = display.create_window(config().canvas, false).unwrap();
    let clock = ManualClock::new();
    let mut presenter = Presenter::new(&mut display, &clock, window, &config());
    let active = Fake::new(Vec::new());
    presenter.activate(&active);

    presenter.deliver(active.id, &Fake::frame()).unwrap();
    let paced_at = presenter.pacer.last_frame_at();
    clock.advance(Duration::from_millis(5));

    presenter.deliver(SourceId::next(), &Fake::frame()).unwrap();
    assert_eq!(presenter.pacer.last_frame_at(), paced_at);
    assert_eq!(presenter.stale_frames_dropped, 1);
    assert_eq!(presenter.frames_blitted, 1);
    drop(presenter);
    assert_eq!(display.blits().len(), 1);
    assert_eq!(display.polls(), 1);
}

#[test]
fn advance_during_delivery_sets_the_skip_flag() {
    let mut display = MemoryDisplay::new();
    let window = display.create_window(config().canvas, false).unwrap();
    display
        .push_batch([RawEvent::Key {
            window: WindowHandle::new(99),
            key: Key::Space,
        }])
        .push_key(Key::Space);
    let clock = ManualClock::new();
    let mut presenter = Presenter::new(&mut display, &clock, window, &config());
    let active = Fake::new(Vec::new());
    presenter.activate(&active);

    presenter.deliver(active.id, &Fake::frame()).unwrap();
    assert!(!active.skip.is_set());

    presenter.last_frame = Some(Fake::frame());
    presenter.deliver(active.id, &Fake::frame()).unwrap();
    assert!(active.skip.is_set());
    assert!(presenter.last_frame.is_none());
}

#[test]
fn exit_during_delivery_is_ignored() {
    let mut display = MemoryDisplay::new();
    let window = display.create_window(config().canvas, false).unwrap();
    display.push_batch([RawEvent::Quit]);
    let clock = ManualClock::new();
    let mut presenter = Presenter::new(&mut display, &clock, window, &config());
    let active = Fake::new(Vec::new());
    presenter.activate(&active);

    presenter.deliver(active.id, &Fake::frame()).unwrap();
    assert!(!active.skip.is_set());
    assert_eq!(presenter.frames_blitted, 1);
}

#[test]
fn frames_delivered_while_animating_are_paced() {
    let mut display = MemoryDisplay::new();
    display.push_quiet(7);
    let clock = ManualClock::new();
    let mut host = SlideshowHost::new(display, clock.clone());
    let mut fake = Fake::new(vec![(true, true)]);
    fake.animating_frames = 3;
    let report = host.run_scenes(&config(), vec![fake]).unwrap();
    // Each delivery polls once; the idle loop then blits until the quiet polls run out.
    assert_eq!(report.frames_blitted, 8);
    assert_eq!(clock.now(), config().frame_rate.frame_period() * 7);
    assert_eq!(report.stale_frames_dropped, 0);
}
