//! Explode: one record per constituent single polygon.

use geo::MultiPolygon;

use atlas_model::Territory;

/// Decompose a record's multi-polygon into single-polygon records.
///
/// Part order follows the source multi-polygon's polygon order; attributes
/// are cloned onto every part.
pub fn explode(record: &Territory) -> Vec<Territory> {
    record
        .geometry
        .0
        .iter()
        .map(|polygon| {
            let mut part = record.clone();
            part.geometry = MultiPolygon(vec![polygon.clone()]);
            part
        })
        .collect()
}
