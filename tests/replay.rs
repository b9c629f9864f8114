use std::path::PathBuf;

use life_ride::{
    script::ScriptLoader,
    session::{CUSTOM_MODE_LABEL, DEFAULT_MODE_LABEL},
    ConfigLoader, JourneySettings, Sex,
};

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn narrow_settings() -> JourneySettings {
    ConfigLoader::new(fixture_root())
        .load("configs/narrow_range.yaml")
        .expect("config parses")
        .settings()
        .expect("config validates")
}

#[test]
fn bundled_default_config_matches_built_in_defaults() {
    let config = ConfigLoader::new(fixture_root())
        .load("configs/default.yaml")
        .expect("config parses");
    assert_eq!(config.settings().unwrap(), JourneySettings::default());
}

#[test]
fn long_ride_script_replays_step_by_step() {
    let script = ScriptLoader::new(fixture_root())
        .load("scripts/long_ride.yaml")
        .expect("script parses");
    assert_eq!(script.name, "long_ride");
    assert_eq!(script.sex, Sex::Male);

    let mut steps = Vec::new();
    let session = script.replay_with_hook(narrow_settings(), |step| {
        steps.push((step.event.name(), step.accepted, step.frame));
    });
    assert_eq!(steps.len(), 10);

    let (_, _, after_field) = &steps[4];
    assert_eq!(after_field.state.effective_life_expectancy, 95);
    assert_eq!(after_field.state.age, 95);
    assert_eq!(after_field.state.journey_percent, 100);
    assert_eq!(after_field.mode_label, CUSTOM_MODE_LABEL);

    let (name, accepted, _) = &steps[5];
    assert_eq!(*name, "age_field");
    assert!(!accepted);

    let (_, _, hovered) = &steps[6];
    assert!(hovered.tooltip.visible);
    assert_eq!(hovered.tooltip.text, "Prime Biking (18–65) • 0 yrs remaining");

    let (_, _, after_switch) = &steps[7];
    assert_eq!(after_switch.state.effective_life_expectancy, 95);

    let (_, _, after_toggle) = &steps[8];
    assert_eq!(after_toggle.state.effective_life_expectancy, 81);
    assert_eq!(after_toggle.state.age, 81);
    assert_eq!(after_toggle.mode_label, DEFAULT_MODE_LABEL);

    assert_eq!(session.sex(), Sex::Female);
    assert!(!session.override_enabled());
    let frame = session.render();
    assert!(!frame.tooltip.visible);
    let layout = frame.layout.expect("script resizes first");
    assert!((layout.age_marker_x - layout.life_end_x).abs() < 1e-9);
}

#[test]
fn replaying_twice_gives_identical_frames() {
    let script = ScriptLoader::new(fixture_root())
        .load("scripts/long_ride.yaml")
        .unwrap();
    assert_eq!(
        script.replay(narrow_settings()),
        script.replay(narrow_settings())
    );
}

#[test]
fn missing_script_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = ScriptLoader::new(dir.path())
        .load("nope.yaml")
        .unwrap_err();
    assert!(format!("{err:#}").contains("nope.yaml"));
}
