//! GeoJSON boundary loaders.
//!
//! Reads the primary admin-0 boundary file and the disputed-territories
//! file into [`FeatureSet`]s. Only polygonal features are kept; point and
//! line features in the source are skipped with a warning.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use geo::{Geometry, MultiPolygon};
use geojson::GeoJson;
use serde_json::Value;
use tracing::{debug, warn};

use atlas_model::{FeatureSet, Territory, TerritoryClass, schema::source};

/// Row index dropped unconditionally from the disputed-territories file.
///
/// The upstream snapshot carries one known-bad row at this position.
pub const DISPUTED_EXCLUDED_ROW: usize = 6;

/// Read the primary boundary file into a feature set.
pub fn load_boundaries(path: &Path) -> Result<FeatureSet> {
    let set = read_feature_set(path)?;
    debug!(path = %path.display(), records = set.len(), "loaded boundaries");
    Ok(set)
}

/// Read the disputed-territories file.
///
/// The known-bad row is dropped, every surviving record is forced to class
/// `Disputed`, and the group code is set to mirror the code so the records
/// pass through later stages untouched.
pub fn load_disputed(path: &Path) -> Result<FeatureSet> {
    let raw = read_feature_set(path)?;
    let mut set = FeatureSet::default();
    for (index, mut record) in raw.into_iter().enumerate() {
        if index == DISPUTED_EXCLUDED_ROW {
            continue;
        }
        record.class = Some(TerritoryClass::Disputed);
        record.group_code = Some(record.code.clone());
        set.push(record);
    }
    debug!(path = %path.display(), records = set.len(), "loaded disputed territories");
    Ok(set)
}

fn read_feature_set(path: &Path) -> Result<FeatureSet> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let geojson = GeoJson::from_str(&contents)
        .with_context(|| format!("parse geojson {}", path.display()))?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        bail!("{}: expected a FeatureCollection", path.display());
    };

    let mut set = FeatureSet::default();
    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            warn!(path = %path.display(), index, "feature without geometry skipped");
            continue;
        };
        let geometry = Geometry::<f64>::try_from(geometry.value)
            .with_context(|| format!("{}: feature {index} geometry", path.display()))?;
        let Some(multi) = to_multi_polygon(geometry) else {
            warn!(path = %path.display(), index, "non-polygonal feature skipped");
            continue;
        };

        let properties = feature.properties.unwrap_or_default();
        let mut record = Territory::new(
            string_property(&properties, source::CODE).unwrap_or_default(),
            multi,
        );
        record.class = string_property(&properties, source::TYPE)
            .and_then(|label| TerritoryClass::from_str(&label).ok());
        record.continent = string_property(&properties, source::CONTINENT);
        record.region_un = string_property(&properties, source::REGION_UN);
        record.subregion = string_property(&properties, source::SUBREGION);
        record.region_wb = string_property(&properties, source::REGION_WB);
        record.name = string_property(&properties, source::NAME);
        record.display_name = string_property(&properties, source::DISPLAY_NAME);
        set.push(record);
    }
    Ok(set)
}

fn to_multi_polygon(geometry: Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => Some(MultiPolygon(vec![polygon])),
        Geometry::MultiPolygon(multi) => Some(multi),
        _ => None,
    }
}

fn string_property(
    properties: &serde_json::Map<String, Value>,
    key: &str,
) -> Option<String> {
    let value = properties.get(key)?;
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
