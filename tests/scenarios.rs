use life_ride::{
    band::{compute_band_fractions, PrimeBand},
    compute_journey_state,
    geometry::{map_to_pixels, Calibration, SurfaceGeometry},
    labels::{resolve_label_layout, LabelBounds, LabelRows},
    OverrideRange, Sex,
};

const EPS: f64 = 1e-9;

fn thousand_pixel_bike() -> SurfaceGeometry {
    SurfaceGeometry {
        offset: 0.0,
        width: 1000.0,
    }
}

#[test]
fn sex_defaults_apply_without_override() {
    let range = OverrideRange::default();
    let female = compute_journey_state(Sex::Female, "0", false, "", range);
    let male = compute_journey_state(Sex::Male, "0", false, "", range);
    assert_eq!(female.effective_life_expectancy, 81);
    assert_eq!(male.effective_life_expectancy, 76);
}

#[test]
fn forty_year_old_woman() {
    let state = compute_journey_state(Sex::Female, "40", false, "", OverrideRange::default());
    assert_eq!(state.effective_life_expectancy, 81);
    assert_eq!(state.years_remaining, 41);
    assert_eq!(state.journey_percent, 49);
}

#[test]
fn overridden_man_past_his_expectancy() {
    let range = OverrideRange::new(50, 100).unwrap();
    let state = compute_journey_state(Sex::Male, "96", true, "95", range);
    assert_eq!(state.effective_life_expectancy, 95);
    assert_eq!(state.age, 95);
    assert_eq!(state.years_remaining, 0);
    assert_eq!(state.journey_percent, 100);
}

#[test]
fn half_journey_lands_mid_bike() {
    let band = compute_band_fractions(76, PrimeBand::default());
    let layout = map_to_pixels(0.5, band, thousand_pixel_bike(), Calibration::default());
    assert!((layout.life_start_x - 85.0).abs() < EPS);
    assert!((layout.life_end_x - 933.0).abs() < EPS);
    assert!((layout.age_marker_x - 509.0).abs() < EPS);
}

#[test]
fn ten_year_life_collapses_the_band() {
    let band = compute_band_fractions(10, PrimeBand::default());
    assert_eq!(band.start_frac, 1.0);
    assert_eq!(band.end_frac, 1.0);
    let layout = map_to_pixels(1.0, band, thousand_pixel_bike(), Calibration::default());
    assert_eq!(layout.band_width, 0.0);
}

#[test]
fn end_marker_ignores_life_expectancy() {
    let range = OverrideRange::default();
    let short = compute_journey_state(Sex::Male, "30", true, "40", range);
    let long = compute_journey_state(Sex::Male, "30", true, "110", range);
    let layout_for = |life: i32, fraction: f64| {
        map_to_pixels(
            fraction,
            compute_band_fractions(life, PrimeBand::default()),
            thousand_pixel_bike(),
            Calibration::default(),
        )
    };
    let short_layout = layout_for(short.effective_life_expectancy, short.journey_fraction);
    let long_layout = layout_for(long.effective_life_expectancy, long.journey_fraction);
    assert_eq!(short_layout.end_marker_x, long_layout.end_marker_x);
    assert!(short_layout.age_marker_x > long_layout.age_marker_x);
}

#[test]
fn full_pipeline_for_an_old_rider() {
    let state = compute_journey_state(Sex::Male, "74", false, "", OverrideRange::default());
    let band = compute_band_fractions(state.effective_life_expectancy, PrimeBand::default());
    let layout = map_to_pixels(
        state.journey_fraction,
        band,
        thousand_pixel_bike(),
        Calibration::default(),
    );

    // Pills roughly 110px wide centered on their markers.
    let pill = |x: f64| LabelBounds {
        left: x - 55.0,
        right: x + 55.0,
    };
    let labels = resolve_label_layout(
        state.age,
        state.effective_life_expectancy,
        pill(layout.age_marker_x),
        pill(layout.end_marker_x),
        LabelRows::default(),
    );
    assert!(labels.show_age_label);
    assert_eq!(labels.age_label_top, 6.0);
    assert_eq!(labels.end_label_top, 30.0);
    assert_eq!(PrimeBand::default().years_left(state.age), 0);
}
