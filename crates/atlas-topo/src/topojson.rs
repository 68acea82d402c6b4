//! TopoJSON serialization.
//!
//! Coordinates are quantized to a fixed grid at serialization time only;
//! the in-memory topology and the simplifier always work in full-precision
//! degrees. Arcs are written delta-encoded against the grid with the
//! standard `transform` block, so consumers reconstruct positions as
//! `translate + scale * running_sum`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use geo::Coord;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use atlas_model::Territory;

use crate::topology::Topology;

/// Number of addressable grid positions per axis.
pub const QUANTIZATION: f64 = 1_000_000.0;

#[derive(Debug, Serialize)]
struct TopologyFile {
    #[serde(rename = "type")]
    kind: &'static str,
    bbox: [f64; 4],
    transform: Transform,
    objects: BTreeMap<&'static str, GeometryCollection>,
    arcs: Vec<Vec<[i64; 2]>>,
}

#[derive(Debug, Serialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Serialize)]
struct GeometryCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    geometries: Vec<TopoGeometry>,
}

#[derive(Debug, Serialize)]
struct TopoGeometry {
    #[serde(rename = "type")]
    kind: &'static str,
    arcs: Vec<Vec<Vec<i32>>>,
    properties: Map<String, Value>,
}

/// Write the topology with the given (possibly simplified) arc set.
pub fn write_topojson(topology: &Topology, arcs: &[Vec<Coord<f64>>], path: &Path) -> Result<()> {
    let bbox = topology.bbox();
    let scale = [
        grid_scale(bbox.min().x, bbox.max().x),
        grid_scale(bbox.min().y, bbox.max().y),
    ];
    let translate = [bbox.min().x, bbox.min().y];

    let geometries = topology
        .objects
        .iter()
        .map(|object| TopoGeometry {
            kind: "MultiPolygon",
            arcs: object.rings.clone(),
            properties: properties_of(&object.record),
        })
        .collect();
    let mut objects = BTreeMap::new();
    objects.insert(
        "boundaries",
        GeometryCollection {
            kind: "GeometryCollection",
            geometries,
        },
    );

    let file = TopologyFile {
        kind: "Topology",
        bbox: [bbox.min().x, bbox.min().y, bbox.max().x, bbox.max().y],
        transform: Transform { scale, translate },
        objects,
        arcs: arcs
            .iter()
            .map(|arc| quantize_arc(arc, translate, scale))
            .collect(),
    };

    let out = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(out), &file)
        .with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), arcs = arcs.len(), "wrote topojson");
    Ok(())
}

fn grid_scale(min: f64, max: f64) -> f64 {
    let span = max - min;
    if span > 0.0 {
        span / (QUANTIZATION - 1.0)
    } else {
        1.0
    }
}

/// Quantize an arc to grid positions and delta-encode it. Consecutive
/// coordinates landing on the same grid point collapse, but an arc always
/// keeps at least two positions.
fn quantize_arc(arc: &[Coord<f64>], translate: [f64; 2], scale: [f64; 2]) -> Vec<[i64; 2]> {
    let mut grid: Vec<[i64; 2]> = Vec::with_capacity(arc.len());
    for c in arc {
        let gx = ((c.x - translate[0]) / scale[0]).round() as i64;
        let gy = ((c.y - translate[1]) / scale[1]).round() as i64;
        if grid.last() != Some(&[gx, gy]) {
            grid.push([gx, gy]);
        }
    }
    if grid.len() < 2 {
        let point = grid.first().copied().unwrap_or([0, 0]);
        grid.resize(2, point);
    }

    let mut encoded = Vec::with_capacity(grid.len());
    let mut previous = [0i64, 0i64];
    for point in grid {
        encoded.push([point[0] - previous[0], point[1] - previous[1]]);
        previous = point;
    }
    encoded
}

fn properties_of(record: &Territory) -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "TYPE".to_string(),
        record
            .class
            .map(|class| Value::String(class.as_str().to_string()))
            .unwrap_or(Value::Null),
    );
    properties.insert("WB_A3".to_string(), Value::String(record.code.clone()));
    properties.insert("REGION_UN".to_string(), text(&record.region_un));
    properties.insert("SUBREGION".to_string(), text(&record.subregion));
    properties.insert("REGION_WB".to_string(), text(&record.region_wb));
    properties.insert("WB_NAME".to_string(), text(&record.display_name));
    properties
}

fn text(value: &Option<String>) -> Value {
    value
        .as_ref()
        .map(|v| Value::String(v.clone()))
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use geo::coord;

    use super::*;

    #[test]
    fn delta_encoding_reconstructs_within_grid_resolution() {
        let arc = vec![
            coord! { x: -5.5, y: 41.0 },
            coord! { x: 3.25, y: 47.125 },
            coord! { x: 10.0, y: 51.5 },
        ];
        let translate = [-5.5, 41.0];
        let scale = [grid_scale(-5.5, 10.0), grid_scale(41.0, 51.5)];
        let encoded = quantize_arc(&arc, translate, scale);

        let mut running = [0i64, 0i64];
        for (delta, original) in encoded.iter().zip(&arc) {
            running = [running[0] + delta[0], running[1] + delta[1]];
            let x = translate[0] + running[0] as f64 * scale[0];
            let y = translate[1] + running[1] as f64 * scale[1];
            assert!((x - original.x).abs() <= scale[0]);
            assert!((y - original.y).abs() <= scale[1]);
        }
    }

    #[test]
    fn coincident_grid_points_collapse_but_keep_two_positions() {
        let arc = vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 0.0, y: 0.0 }];
        let encoded = quantize_arc(&arc, [0.0, 0.0], [1.0, 1.0]);
        assert_eq!(encoded.len(), 2);
    }
}
