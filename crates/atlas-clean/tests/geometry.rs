//! Split, classification, and dissolve geometry properties.

use approx::assert_relative_eq;
use atlas_clean::{
    OverseasRule, PartSelector, SplitRule, apply_overseas_split, apply_split, dissolve_by_code,
    explode,
};
use atlas_model::{FeatureSet, Territory, TerritoryClass};
use geo::{Area, MultiPolygon, Polygon, polygon};

fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
    polygon![
        (x: x, y: y),
        (x: x + size, y: y),
        (x: x + size, y: y + size),
        (x: x, y: y + size),
        (x: x, y: y),
    ]
}

fn china_like() -> Territory {
    // Two disjoint parts: a large mainland block and a small island that
    // contains the Taiwan reference point (121.0, 23.7).
    let mut record = Territory::new(
        "CHN",
        MultiPolygon(vec![square(100.0, 30.0, 10.0), square(120.0, 23.0, 2.0)]),
    );
    record.class = Some(TerritoryClass::SovereignCountry);
    record.name = Some("China".to_string());
    record.display_name = Some("China".to_string());
    record
}

fn france_like() -> Territory {
    // Mainland inside the reference box plus one far-away island.
    let mut record = Territory::new(
        "FRA",
        MultiPolygon(vec![square(-2.0, 44.0, 5.0), square(-61.0, 14.0, 1.0)]),
    );
    record.class = Some(TerritoryClass::SovereignCountry);
    record.name = Some("France".to_string());
    record.display_name = Some("France".to_string());
    record.subregion = Some("Western Europe".to_string());
    record
}

fn total_area(set: &FeatureSet) -> f64 {
    set.iter().map(|r| r.geometry.unsigned_area()).sum()
}

#[test]
fn split_relabels_island_part() {
    let set = FeatureSet::new(vec![china_like()]);
    let out = apply_split(set, &SplitRule::china_taiwan()).expect("split");

    let mut codes = out.codes();
    codes.sort();
    assert_eq!(codes, vec!["CHN", "TWN"]);
    let taiwan = out.find("TWN").expect("taiwan record");
    assert_eq!(taiwan.name.as_deref(), Some("Taiwan"));
    assert_eq!(taiwan.display_name.as_deref(), Some("Taiwan"));
}

#[test]
fn positional_selector_matches_content_selector_on_stable_ordering() {
    let set = FeatureSet::new(vec![china_like()]);
    let rule = SplitRule {
        selector: PartSelector::Index(1),
        ..SplitRule::china_taiwan()
    };
    let positional = apply_split(set.clone(), &rule).expect("positional split");
    let content = apply_split(set, &SplitRule::china_taiwan()).expect("content split");

    let area_of = |set: &FeatureSet, code: &str| {
        set.find(code)
            .map(|r| r.geometry.unsigned_area())
            .unwrap_or_default()
    };
    assert_relative_eq!(
        area_of(&positional, "TWN"),
        area_of(&content, "TWN"),
        max_relative = 1e-12
    );
}

#[test]
fn split_preserves_total_area() {
    let set = FeatureSet::new(vec![china_like()]);
    let before = total_area(&set);
    let out = apply_split(set, &SplitRule::china_taiwan()).expect("split");
    assert_relative_eq!(total_area(&out), before, max_relative = 1e-9);
}

#[test]
fn explode_then_dissolve_preserves_area() {
    let record = china_like();
    let before = record.geometry.unsigned_area();
    let parts = explode(&record);
    assert_eq!(parts.len(), 2);
    let dissolved = dissolve_by_code(FeatureSet::new(parts));
    assert_eq!(dissolved.len(), 1);
    assert_relative_eq!(total_area(&dissolved), before, max_relative = 1e-9);
}

#[test]
fn overseas_split_yields_two_codes_and_keeps_area() {
    let set = FeatureSet::new(vec![france_like()]);
    let before = total_area(&set);
    let out = apply_overseas_split(set, &OverseasRule::france()).expect("overseas split");

    let mut codes = out.codes();
    codes.sort();
    assert_eq!(codes, vec!["FRA", "FRA-OT"]);
    assert_relative_eq!(total_area(&out), before, max_relative = 1e-9);

    let overseas = out.find("FRA-OT").expect("overseas record");
    assert_eq!(overseas.class, Some(TerritoryClass::Dependency));
    assert_eq!(overseas.subregion, None);
    let mainland = out.find("FRA").expect("mainland record");
    assert_eq!(mainland.subregion.as_deref(), Some("Western Europe"));
}

#[test]
fn no_duplicate_codes_after_split_and_classify() {
    let set = FeatureSet::new(vec![china_like(), france_like()]);
    let out = apply_split(set, &SplitRule::china_taiwan()).expect("split");
    let out = apply_overseas_split(out, &OverseasRule::france()).expect("classify");

    let mut codes = out.codes();
    codes.sort();
    let mut deduped = codes.clone();
    deduped.dedup();
    assert_eq!(codes, deduped, "duplicate codes after split/classify");
}

#[test]
fn dissolve_unions_duplicate_codes() {
    let a = Territory::new("AAA", MultiPolygon(vec![square(0.0, 0.0, 1.0)]));
    let b = Territory::new("AAA", MultiPolygon(vec![square(5.0, 0.0, 1.0)]));
    let dissolved = dissolve_by_code(FeatureSet::new(vec![a, b]));
    assert_eq!(dissolved.len(), 1);
    assert_relative_eq!(total_area(&dissolved), 2.0, max_relative = 1e-9);
}
