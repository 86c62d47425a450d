use super::*;

#[test]
fn defaults_are_thirty_fps_on_a_small_canvas() {
    let c = PresenterConfig::default();
    assert_eq!(c.frame_rate, Fps::new(30, 1).unwrap());
    assert_eq!((c.canvas.width, c.canvas.height), (640, 360));
    assert!(!c.disable_caching);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_json_fills_in_defaults() {
    let c: PresenterConfig =
        serde_json::from_str(r##"{"frame_rate":{"num":24,"den":1},"background":"#112233"}"##)
            .unwrap();
    assert_eq!(c.frame_rate.num, 24);
    assert_eq!(c.canvas, Canvas::default());
    assert_eq!(c.background.to_rgba8(), [0x11, 0x22, 0x33, 0xff]);
}

#[test]
fn overrides_win_and_are_validated() {
    let c = PresenterConfig::default()
        .with_overrides(&ConfigOverrides {
            fps: Some(60),
            width: Some(320),
            height: None,
            fullscreen: true,
            no_cache: true,
        })
        .unwrap();
    assert_eq!(c.frame_rate.num, 60);
    assert_eq!(c.canvas.width, 320);
    assert_eq!(c.canvas.height, 360);
    assert!(c.fullscreen && c.disable_caching);

    let bad = PresenterConfig::default().with_overrides(&ConfigOverrides {
        fps: Some(0),
        ..ConfigOverrides::default()
    });
    assert!(bad.is_err());
    let bad = PresenterConfig::default().with_overrides(&ConfigOverrides {
        width: Some(0),
        ..ConfigOverrides::default()
    });
    assert!(bad.is_err());
}
