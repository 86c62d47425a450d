use super::*;
use crate::foundation::color::Color;
use crate::foundation::core::Canvas;
use crate::scene::animation::AnimationSpec;
use crate::scene::object::{SceneObject, Shape};
use crate::script::builder::ScriptBuilder;

fn config() -> PresenterConfig {
    PresenterConfig {
        canvas: Canvas {
            width: 20,
            height: 12,
        },
        ..PresenterConfig::default()
    }
}

fn bar(id: &str) -> SceneObject {
    SceneObject::new(
        id,
        Shape::Rect {
            width: 6.0,
            height: 4.0,
        },
    )
    .at(5.0, 6.0)
    .fill(Color::rgb8(255, 0, 0))
}

fn good_slide() -> SlideDef {
    SlideDef::new(
        "good",
        ScriptBuilder::new()
            .play([AnimationSpec::fade_in("bar").run_time(0.5)])
            .subslide()
            .play([AnimationSpec::move_to("bar", 15.0, 6.0).run_time(0.5)])
            .build(),
    )
    .object(bar("bar"))
}

fn broken_slide() -> SlideDef {
    // Valid at load time, but fades out an object that never went on stage.
    SlideDef::new(
        "broken",
        ScriptBuilder::new()
            .play([AnimationSpec::fade_out("bar")])
            .build(),
    )
    .object(bar("bar"))
}

#[test]
fn thumbnails_capture_first_and_final_state() {
    let cache = ShapeCache::new();
    let done = prerender_slide(&good_slide(), &config(), &cache).unwrap();
    let start = done.thumbnails.start.as_ref().unwrap();
    let end = done.thumbnails.end.as_ref().unwrap();

    // Fade-in starts fully transparent.
    assert_eq!(start.pixel(5, 6), Some([0, 0, 0, 255]));
    assert_eq!(end.pixel(5, 6), Some([0, 0, 0, 255]));
    assert_eq!(end.pixel(15, 6), Some([255, 0, 0, 255]));

    assert_eq!(done.stats.idle_phases, 2);
    assert_eq!(done.stats.groups_played, 2);
    assert_eq!(cache.len(), 1);
}

#[test]
fn failing_slides_are_recorded_and_others_still_run() {
    let show = Slideshow::new("deck", config(), vec![broken_slide(), good_slide()]).unwrap();
    let report = prerender_slideshow(&show, &ShapeCache::new());
    assert!(!report.skipped);
    assert_eq!(report.failures(), 1);
    assert!(matches!(
        &report.slides[0],
        PrerenderOutcome::Failed { name, error: SlidesError::Animation(_) } if name == "broken"
    ));
    assert!(matches!(&report.slides[1], PrerenderOutcome::Ready(s) if s.name == "good"));
}

#[test]
fn only_a_failing_first_slide_blocks_presenting() {
    let later = Slideshow::new("deck", config(), vec![good_slide(), broken_slide()]).unwrap();
    let report = prerender_slideshow(&later, &ShapeCache::new());
    assert_eq!(report.failures(), 1);
    assert!(report.presented_failure().is_none());

    let first = Slideshow::new("deck", config(), vec![broken_slide(), good_slide()]).unwrap();
    let report = prerender_slideshow(&first, &ShapeCache::new());
    let (name, error) = report.presented_failure().unwrap();
    assert_eq!(name, "broken");
    assert!(matches!(error, SlidesError::Animation(_)));
}

#[test]
fn disabled_caching_skips_the_pass() {
    let cfg = PresenterConfig {
        disable_caching: true,
        ..config()
    };
    let show = Slideshow::new("deck", cfg, vec![good_slide()]).unwrap();
    let cache = ShapeCache::new();
    let report = prerender_slideshow(&show, &cache);
    assert!(report.skipped);
    assert!(report.slides.is_empty());
    assert!(cache.is_empty());
}

#[test]
fn thumbnails_are_written_as_png() {
    let done = prerender_slide(&good_slide(), &config(), &ShapeCache::new()).unwrap();
    let dir = std::env::temp_dir().join(format!("liveslides-thumbs-{}", std::process::id()));
    let written = done.thumbnails.write_png(&dir, "good").unwrap();
    assert_eq!(written.len(), 2);
    let img = image::open(&written[1]).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (20, 12));
    assert_eq!(img.get_pixel(15, 6).0, [255, 0, 0, 255]);
    std::fs::remove_dir_all(&dir).ok();
}
