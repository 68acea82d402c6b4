//! Loader behavior on handwritten GeoJSON inputs.

use std::path::PathBuf;

use atlas_ingest::{DISPUTED_EXCLUDED_ROW, load_boundaries, load_disputed};
use atlas_model::TerritoryClass;

fn feature(code: &str, x: f64) -> String {
    format!(
        r#"{{"type":"Feature","properties":{{"WB_A3":"{code}","TYPE":"Sovereign country","WB_NAME":"{code} name"}},"geometry":{{"type":"Polygon","coordinates":[[[{x},0.0],[{x1},0.0],[{x1},1.0],[{x},1.0],[{x},0.0]]]}}}}"#,
        x1 = x + 1.0,
    )
}

fn collection(features: &[String]) -> String {
    format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    )
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("atlas-ingest-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).expect("write temp geojson");
    path
}

#[test]
fn boundaries_round_trip_properties() {
    let body = collection(&[feature("AAA", 0.0), feature("BBB", 5.0)]);
    let path = write_temp("boundaries.geojson", &body);
    let set = load_boundaries(&path).expect("load");
    std::fs::remove_file(&path).ok();

    assert_eq!(set.codes(), vec!["AAA", "BBB"]);
    let first = set.find("AAA").expect("record");
    assert_eq!(first.class, Some(TerritoryClass::SovereignCountry));
    assert_eq!(first.display_name.as_deref(), Some("AAA name"));
    assert_eq!(first.geometry.0.len(), 1);
}

#[test]
fn disputed_loader_drops_known_bad_row() {
    let features: Vec<String> = (0..8)
        .map(|i| feature(&format!("D{i:02}"), i as f64 * 3.0))
        .collect();
    let path = write_temp("disputed.geojson", &collection(&features));
    let set = load_disputed(&path).expect("load");
    std::fs::remove_file(&path).ok();

    assert_eq!(set.len(), 7);
    assert!(set.find(&format!("D{DISPUTED_EXCLUDED_ROW:02}")).is_none());
    for record in &set {
        assert_eq!(record.class, Some(TerritoryClass::Disputed));
        assert_eq!(record.group_code.as_deref(), Some(record.code.as_str()));
    }
}

#[test]
fn non_polygonal_features_are_skipped() {
    let point = r#"{"type":"Feature","properties":{"WB_A3":"PNT"},"geometry":{"type":"Point","coordinates":[0.0,0.0]}}"#
        .to_string();
    let body = collection(&[feature("AAA", 0.0), point]);
    let path = write_temp("mixed.geojson", &body);
    let set = load_boundaries(&path).expect("load");
    std::fs::remove_file(&path).ok();

    assert_eq!(set.codes(), vec!["AAA"]);
}

#[test]
fn non_collection_input_is_rejected() {
    let path = write_temp("not-a-collection.geojson", &feature("AAA", 0.0));
    let result = load_boundaries(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}
