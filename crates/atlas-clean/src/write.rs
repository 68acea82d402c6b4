//! Writers for the combined output: GeoJSON plus a flat attribute table.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject};
use serde_json::Value;
use tracing::debug;

use atlas_model::{FeatureSet, Territory};

/// Serialize the feature set as a GeoJSON FeatureCollection.
pub fn write_geojson(set: &FeatureSet, path: &Path) -> Result<()> {
    let features: Vec<Feature> = set.iter().map(to_feature).collect();
    let collection = GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    });
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), &collection)
        .with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), records = set.len(), "wrote geojson");
    Ok(())
}

/// Serialize the attributes-only table as CSV, in the fixed output schema.
pub fn write_flat_csv(set: &FeatureSet, path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(atlas_model::OUTPUT_COLUMNS)
        .context("write csv header")?;
    for record in set {
        writer
            .write_record(attribute_row(record))
            .with_context(|| format!("write csv row for {}", record.code))?;
    }
    writer.flush().context("flush csv")?;
    debug!(path = %path.display(), records = set.len(), "wrote flat table");
    Ok(())
}

fn to_feature(record: &Territory) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("TYPE".to_string(), optional_class(record));
    properties.insert("WB_A3".to_string(), Value::String(record.code.clone()));
    properties.insert("REGION_UN".to_string(), optional_string(&record.region_un));
    properties.insert("SUBREGION".to_string(), optional_string(&record.subregion));
    properties.insert("REGION_WB".to_string(), optional_string(&record.region_wb));
    properties.insert(
        "WB_NAME".to_string(),
        optional_string(&record.display_name),
    );
    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(
            &record.geometry,
        ))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn attribute_row(record: &Territory) -> Vec<String> {
    vec![
        record
            .class
            .map(|class| class.as_str().to_string())
            .unwrap_or_default(),
        record.code.clone(),
        record.region_un.clone().unwrap_or_default(),
        record.subregion.clone().unwrap_or_default(),
        record.region_wb.clone().unwrap_or_default(),
        record.display_name.clone().unwrap_or_default(),
    ]
}

fn optional_class(record: &Territory) -> Value {
    record
        .class
        .map(|class| Value::String(class.as_str().to_string()))
        .unwrap_or(Value::Null)
}

fn optional_string(value: &Option<String>) -> Value {
    value
        .as_ref()
        .map(|text| Value::String(text.clone()))
        .unwrap_or(Value::Null)
}
