//! End-to-end rendering run on handwritten inputs.

use std::path::PathBuf;

use atlas_render::{RenderOptions, run_render};

fn feature(code: &str, x: f64) -> String {
    format!(
        r#"{{"type":"Feature","properties":{{"WB_A3":"{code}","TYPE":"Country","WB_NAME":"{code}"}},"geometry":{{"type":"Polygon","coordinates":[[[{x},0.0],[{x1},0.0],[{x1},1.0],[{x},1.0],[{x},0.0]]]}}}}"#,
        x1 = x + 1.0,
    )
}

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("atlas-render-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    dir
}

#[test]
fn renders_svg_with_missing_fill_for_unscored_territories() {
    let dir = temp_dir();
    let boundaries = dir.join("boundaries.geojson");
    let scores = dir.join("scores.csv");
    let output = dir.join("map.svg");

    std::fs::write(
        &boundaries,
        format!(
            r#"{{"type":"FeatureCollection","features":[{},{}]}}"#,
            feature("AAA", 0.0),
            feature("BBB", 5.0),
        ),
    )
    .expect("write boundaries");
    std::fs::write(
        &scores,
        "country,code,year,overall\nAlandia,AAA,2023,0.62\nAlandia,AAA,2022,0.60\n",
    )
    .expect("write scores");

    let result = run_render(
        &boundaries,
        &scores,
        "overall",
        2023,
        &output,
        &RenderOptions::default(),
    )
    .expect("render");

    assert_eq!(result.records, 2);
    assert_eq!(result.matched, 1);
    assert_eq!(result.missing, 1);

    let svg = std::fs::read_to_string(&output).expect("read svg");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("#EBEBEB"), "missing territory keeps grey fill");
    assert!(svg.contains("<title>AAA</title>"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn absent_year_renders_everything_missing() {
    let dir = temp_dir().join("absent-year");
    std::fs::create_dir_all(&dir).expect("temp dir");
    let boundaries = dir.join("boundaries.geojson");
    let scores = dir.join("scores.csv");
    let output = dir.join("map.svg");

    std::fs::write(
        &boundaries,
        format!(
            r#"{{"type":"FeatureCollection","features":[{}]}}"#,
            feature("AAA", 0.0),
        ),
    )
    .expect("write boundaries");
    std::fs::write(&scores, "code,year,overall\nAAA,2023,0.62\n").expect("write scores");

    let result = run_render(
        &boundaries,
        &scores,
        "overall",
        1999,
        &output,
        &RenderOptions::default(),
    )
    .expect("render");

    assert_eq!(result.matched, 0);
    assert_eq!(result.missing, 1);
    assert!(output.exists());

    std::fs::remove_dir_all(&dir).ok();
}
