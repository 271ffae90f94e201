mod support;

use support::stubs::TableGeocoder;

use quakecast::location::{self, LocationQuery, NoticeLevel, Resolution};
use quakecast::ml::ModelBundle;
use quakecast::params::SourceParameters;
use quakecast::prediction::{self, Category, PredictError, ResultSlot};
use quakecast::presenter::{self, MarkerColor, STRONG_GUIDE};
use quakecast::config::MapSettings;

fn geocoder() -> TableGeocoder {
    TableGeocoder::default().with("Jakarta", -6.2, 106.8)
}

#[test]
fn place_name_and_manual_entry_predict_identically() {
    let model = ModelBundle::bundled().unwrap();
    let geocoder = geocoder();
    let params = SourceParameters::default();

    let by_name = location::resolve(&LocationQuery::PlaceName("Jakarta".into()), &geocoder);
    let manual = location::resolve(
        &LocationQuery::Manual {
            latitude: -6.2,
            longitude: 106.8,
        },
        &geocoder,
    );
    assert_eq!(by_name, manual);

    let mut first = ResultSlot::default();
    let mut second = ResultSlot::default();
    let a = prediction::predict(&model, by_name.coordinates(), &params, &mut first).unwrap();
    let b = prediction::predict(&model, manual.coordinates(), &params, &mut second).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.category, Category::Moderate);
    assert_eq!(presenter::format_magnitude(a.magnitude), "5.47");
    assert_eq!(geocoder.query_count(), 1);
}

#[test]
fn unknown_place_blocks_prediction() {
    let model = ModelBundle::bundled().unwrap();
    let resolution = location::resolve(&LocationQuery::PlaceName("Atlantis".into()), &geocoder());
    assert_eq!(resolution, Resolution::NotFound);

    let mut slot = ResultSlot::default();
    let err = prediction::predict(
        &model,
        resolution.coordinates(),
        &SourceParameters::default(),
        &mut slot,
    )
    .unwrap_err();

    assert!(matches!(err, PredictError::CoordinatesUnavailable));
    assert!(slot.current().is_none());
}

#[test]
fn geocoder_failure_becomes_error_notice() {
    let resolution = location::resolve(&LocationQuery::PlaceName("offline".into()), &geocoder());

    assert_eq!(
        resolution.notice(),
        Some((
            NoticeLevel::Error,
            "Failed to get coordinates: HTTP error: connection refused".to_string()
        ))
    );
    assert_eq!(resolution.coordinates(), None);
}

#[test]
fn blank_place_name_never_reaches_geocoder() {
    let geocoder = geocoder();
    let resolution = location::resolve(&LocationQuery::PlaceName("  ".into()), &geocoder);

    assert_eq!(resolution, Resolution::Skipped);
    assert_eq!(resolution.notice(), None);
    assert_eq!(geocoder.query_count(), 0);
}

#[test]
fn shallow_steep_thrust_presents_as_strong() {
    let model = ModelBundle::bundled().unwrap();
    let mut slot = ResultSlot::default();
    let coordinates = quakecast::location::Coordinates::new(-0.9, 100.4).ok();

    let result = prediction::predict(
        &model,
        coordinates,
        &SourceParameters::clamped(20, 180, 60, 90),
        &mut slot,
    )
    .unwrap();
    let view = presenter::result_view(result, &MapSettings::default());

    assert_eq!(view.category_text, "Strong");
    assert_eq!(view.marker.color, MarkerColor::Red);
    assert_eq!(view.mitigation, Some(&STRONG_GUIDE));
    assert_eq!(view.marker.popup_lines[0], "Quake");
}

#[test]
fn later_prediction_replaces_earlier_one() {
    let model = ModelBundle::bundled().unwrap();
    let mut slot = ResultSlot::default();
    let jakarta = quakecast::location::Coordinates::new(-6.2, 106.8).ok();

    prediction::predict(&model, jakarta, &SourceParameters::default(), &mut slot).unwrap();
    prediction::predict(
        &model,
        jakarta,
        &SourceParameters::clamped(400, 45, 30, -90),
        &mut slot,
    )
    .unwrap();

    assert_eq!(slot.current().unwrap().category, Category::Light);
}
