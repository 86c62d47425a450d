use super::*;

const DECK: &str = r##"{
    "name": "demo",
    "config": { "frame_rate": { "num": 12, "den": 1 }, "canvas": { "width": 64, "height": 36 } },
    "slides": [
        {
            "name": "intro",
            "objects": [
                { "id": "title", "shape": { "kind": "rect", "width": 40, "height": 8 }, "fill": "#ffcc00" }
            ],
            "script": {
                "kind": "stepwise",
                "steps": [
                    { "op": "play", "animations": [ { "target": "title", "kind": "fade_in" } ] },
                    { "op": "subslide" },
                    { "op": "play", "animations": [ { "target": "title", "kind": "fade_out", "run_time": 0.5 } ] }
                ]
            }
        }
    ]
}"##;

fn authoring_message(json: &str) -> String {
    match Slideshow::from_reader(json.as_bytes()) {
        Err(SlidesError::Authoring(msg)) => msg,
        other => panic!("expected authoring error, got {other:?}"),
    }
}

#[test]
fn parses_a_complete_deck() {
    let show = Slideshow::from_reader(DECK.as_bytes()).unwrap();
    assert_eq!(show.name(), "demo");
    assert_eq!(show.config().frame_rate.num, 12);
    assert_eq!(show.slides().len(), 1);
    assert_eq!(show.slides()[0].script.steps().len(), 3);
}

#[test]
fn missing_or_empty_slides_are_rejected() {
    assert!(authoring_message(r#"{"name":"x"}"#).contains("slides"));
    assert!(authoring_message(r#"{"name":"x","slides":[]}"#).contains("empty"));
}

#[test]
fn malformed_json_is_an_authoring_error() {
    assert!(authoring_message("{").contains("parse slideshow JSON"));
}

#[test]
fn duplicate_object_ids_are_rejected() {
    let json = r#"{"name":"x","slides":[{"name":"s","objects":[
        {"id":"a","shape":{"kind":"ellipse","rx":1,"ry":1}},
        {"id":"a","shape":{"kind":"ellipse","rx":1,"ry":1}}
    ],"script":{"kind":"stepwise","steps":[]}}]}"#;
    let msg = authoring_message(json);
    assert!(msg.contains("duplicate object id"), "{msg}");
}

#[test]
fn unknown_targets_and_bad_run_times_are_rejected() {
    let json = r#"{"name":"x","slides":[{"name":"s","objects":[],"script":{"kind":"stepwise","steps":[
        {"op":"play","animations":[{"target":"ghost","kind":"fade_in"}]}
    ]}}]}"#;
    assert!(authoring_message(json).contains("ghost"));

    let json = r#"{"name":"x","slides":[{"name":"s","objects":[
        {"id":"a","shape":{"kind":"ellipse","rx":1,"ry":1}}
    ],"script":{"kind":"stepwise","steps":[
        {"op":"play","animations":[{"target":"a","kind":"fade_in","run_time":0}]}
    ]}}]}"#;
    assert!(authoring_message(json).contains("run_time"));
}

#[test]
fn duplicate_slide_names_are_rejected() {
    let s = SlideDef::new("same", Script::Stepwise { steps: vec![] });
    let err = Slideshow::new("x", PresenterConfig::default(), vec![s.clone(), s]).unwrap_err();
    assert!(err.to_string().contains("duplicate slide name"));
}

#[test]
fn invalid_config_is_rejected() {
    let json = r#"{"name":"x","config":{"canvas":{"width":0,"height":10}},
        "slides":[{"name":"s","script":{"kind":"stepwise","steps":[]}}]}"#;
    authoring_message(json);
}
