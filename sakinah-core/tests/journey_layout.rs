use std::fs;

use sakinah_core::{ActivationSource, StepKey, TimelineLayout};
use serde_json::Value;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn load_layout() -> TimelineLayout {
    let raw = fs::read_to_string(fixture_path("journey_layout.json")).expect("layout fixture");
    serde_json::from_str(&raw).expect("layout fixture is valid")
}

#[test]
fn first_step_is_active_on_plain_load() {
    let layout = load_layout();
    let (state, frame) = layout.load(None).expect("timeline has steps");

    assert_eq!(state.active(), Some(0));
    assert_eq!(frame.progress, 32.0);
}

#[test]
fn scrolling_third_step_into_center_matches_golden() {
    let layout = load_layout();
    let (mut state, _) = layout.load(None).expect("timeline has steps");

    let frame = layout.scrolled(500.0).scroll(&mut state);

    let actual = serde_json::to_value(&frame).expect("frame serializes");
    let expected: Value = serde_json::from_str(
        &fs::read_to_string(fixture_path("journey_scrolled_frame.json")).expect("golden frame"),
    )
    .expect("golden frame is valid");
    assert_eq!(actual, expected);
}

#[test]
fn fragment_selects_initial_step_without_rewrite() {
    let layout = load_layout();
    let (mut state, frame) = layout.load(Some("#step-4")).expect("timeline has steps");

    assert_eq!(frame.active, Some(3));
    assert_eq!(frame.progress, 932.0);

    // Scroll activation afterwards never asks for a fragment rewrite.
    let transition = state.set_active(0, ActivationSource::Scroll);
    assert_eq!(transition.fragment(), None);
}

#[test]
fn enter_on_second_step_rewrites_fragment() {
    let layout = load_layout();
    let (mut state, _) = layout.load(None).expect("timeline has steps");

    let target = state.key_target(1, StepKey::Activate);
    let transition = state.set_active(target, ActivationSource::Keyboard);

    assert_eq!(state.active(), Some(1));
    assert_eq!(transition.fragment(), Some("step-2"));
}

#[test]
fn progress_stays_on_rail_at_any_scroll_offset() {
    let layout = load_layout();
    let (mut state, _) = layout.load(None).expect("timeline has steps");

    for offset in (-2_000..4_000).step_by(125) {
        let frame = layout.scrolled(offset as f64).scroll(&mut state);
        assert!(frame.progress >= 0.0);
        assert!(frame.progress <= layout.track.height);
        assert_eq!(frame.flags.iter().filter(|flags| flags.active).count(), 1);
    }
}
