use super::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn first_call_only_records() {
    let clock = ManualClock::new();
    clock.advance(ms(7));
    let mut p = FramePacer::new(Fps::new(50, 1).unwrap());
    assert_eq!(p.pace(&clock), Duration::ZERO);
    assert_eq!(p.last_frame_at(), Some(ms(7)));
    assert_eq!(clock.total_slept(), Duration::ZERO);
}

#[test]
fn short_work_is_padded_to_the_period() {
    let clock = ManualClock::new();
    let mut p = FramePacer::new(Fps::new(50, 1).unwrap());
    p.pace(&clock);
    for _ in 0..5 {
        clock.advance(ms(5));
        assert_eq!(p.pace(&clock), ms(20));
    }
    assert_eq!(clock.total_slept(), ms(75));
    assert_eq!(p.last_frame_at(), Some(ms(100)));
}

#[test]
fn long_work_is_not_slept_on() {
    let clock = ManualClock::new();
    let mut p = FramePacer::new(Fps::new(50, 1).unwrap());
    p.pace(&clock);
    clock.advance(ms(35));
    assert_eq!(p.pace(&clock), ms(35));
    assert_eq!(clock.total_slept(), Duration::ZERO);
}

#[test]
fn average_moves_a_tenth_toward_the_instant_rate() {
    let clock = ManualClock::new();
    let mut p = FramePacer::new(Fps::new(50, 1).unwrap());
    p.pace(&clock);
    clock.advance(ms(100));
    p.pace(&clock);
    // 0.9 * 50 + 0.1 * 10
    assert!((p.average_fps() - 46.0).abs() < 1e-9);
}

#[test]
fn elapsed_peeks_without_pacing() {
    let clock = ManualClock::new();
    let mut p = FramePacer::new(Fps::default());
    assert_eq!(p.elapsed(&clock), None);
    p.pace(&clock);
    clock.advance(ms(3));
    assert_eq!(p.elapsed(&clock), Some(ms(3)));
    assert_eq!(clock.total_slept(), Duration::ZERO);
}

#[test]
fn system_clock_paces_real_time() {
    let clock = SystemClock::new();
    let mut p = FramePacer::new(Fps::new(50, 1).unwrap());
    p.pace(&clock);
    let start = clock.now();
    p.pace(&clock);
    p.pace(&clock);
    let took = clock.now() - start;
    assert!(took >= ms(39), "{took:?}");
    assert!(took < ms(500), "{took:?}");
}
