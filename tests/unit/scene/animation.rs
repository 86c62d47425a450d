use super::*;
use crate::scene::object::{SceneObject, Shape};

fn stage() -> Stage {
    let dot = SceneObject::new("dot", Shape::Ellipse { rx: 2.0, ry: 2.0 }).at(0.0, 0.0);
    let mut s = Stage::new(&[dot]).unwrap();
    s.add("dot").unwrap();
    s
}

#[test]
fn spec_deserializes_with_flattened_kind() {
    let a: AnimationSpec = serde_json::from_str(
        r#"{"target":"dot","kind":"move_to","to":{"x":4,"y":2},"run_time":0.5,"ease":"linear"}"#,
    )
    .unwrap();
    assert_eq!(a.kind, AnimationKind::MoveTo { to: Vec2::new(4.0, 2.0) });
    assert_eq!(a.run_time, 0.5);
    assert_eq!(a.ease, Ease::Linear);

    let b: AnimationSpec = serde_json::from_str(r#"{"target":"dot","kind":"fade_out"}"#).unwrap();
    assert_eq!(b.run_time, 1.0);
    assert_eq!(b.ease, Ease::Smooth);
}

#[test]
fn interpolate_uses_eased_normalized_time() {
    let mut s = stage();
    let spec = AnimationSpec::move_to("dot", 10.0, 0.0)
        .run_time(2.0)
        .ease(Ease::Linear);
    let a = Animation::begin(&spec, &mut s).unwrap();
    a.interpolate(&mut s, 0.5);
    assert!((s.object("dot").unwrap().position.x - 2.5).abs() < 1e-12);
    a.interpolate(&mut s, 5.0);
    assert_eq!(s.object("dot").unwrap().position.x, 10.0);
}

#[test]
fn finish_lands_on_target_state() {
    let mut s = stage();
    let spec = AnimationSpec::new(
        "dot",
        AnimationKind::Recolor {
            to: Color::rgb8(255, 0, 0),
        },
    );
    let a = Animation::begin(&spec, &mut s).unwrap();
    a.finish(&mut s);
    assert_eq!(s.object("dot").unwrap().fill, Color::rgb8(255, 0, 0));
}

#[test]
fn begin_on_absent_target_is_an_animation_error() {
    let mut s = stage();
    s.remove("dot");
    let err = Animation::begin(&AnimationSpec::fade_out("dot"), &mut s).unwrap_err();
    assert!(matches!(err, SlidesError::Animation(_)));
}

#[test]
fn stop_conditions_read_live_state() {
    let mut s = stage();
    let at_least = StopCondition::OpacityAtLeast {
        target: "dot".to_owned(),
        value: 0.9,
    };
    let at_most = StopCondition::OpacityAtMost {
        target: "dot".to_owned(),
        value: 0.1,
    };
    assert!(at_least.is_met(&s, 0.0));
    assert!(!at_most.is_met(&s, 0.0));
    s.remove("dot");
    assert!(!at_least.is_met(&s, 0.0));
    assert!(at_most.is_met(&s, 0.0));

    let elapsed = StopCondition::Elapsed { secs: 1.0 };
    assert!(!elapsed.is_met(&s, 0.5));
    assert!(elapsed.is_met(&s, 1.0));
}
