//! Choropleth SVG writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geo::Coord;
use tracing::debug;

use atlas_model::FeatureSet;

use crate::color::{ColorRamp, EDGE_COLOR, MISSING_FILL};
use crate::extent::Extent;
use crate::merge::ScoreColumn;

/// Canvas geometry and stroke styling.
#[derive(Debug, Clone)]
pub struct MapStyle {
    pub width: f64,
    pub height: f64,
    pub edge_width: f64,
}

impl Default for MapStyle {
    fn default() -> Self {
        // 25in x 16in at 100 dpi.
        Self {
            width: 2500.0,
            height: 1600.0,
            edge_width: 0.5,
        }
    }
}

/// Render the feature set as a choropleth SVG.
///
/// Scores are normalized against the column's observed range and mapped
/// through the ramp; records without a score use the missing fill. The
/// extent both filters the drawn records and fixes the viewport.
pub fn write_choropleth(
    set: &FeatureSet,
    column: &ScoreColumn,
    ramp: &ColorRamp,
    extent: &Extent,
    style: &MapStyle,
    path: &Path,
) -> Result<()> {
    let window = extent.window(set)?;
    let span_x = (window.max().x - window.min().x).max(f64::EPSILON);
    let span_y = (window.max().y - window.min().y).max(f64::EPSILON);

    // Fit the window inside the canvas, preserving aspect, centered.
    let scale = (style.width / span_x).min(style.height / span_y);
    let offset_x = (style.width - span_x * scale) / 2.0;
    let offset_y = (style.height - span_y * scale) / 2.0;
    let project = |c: &Coord<f64>| {
        let x = offset_x + (c.x - window.min().x) * scale;
        let y = offset_y + (window.max().y - c.y) * scale;
        (x, y)
    };

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.2} {:.2}">"#,
        style.width, style.height, style.width, style.height
    )?;

    let mut drawn = 0usize;
    for (record, value) in set.iter().zip(&column.values) {
        if !extent.includes(record) {
            continue;
        }
        let fill = match value {
            Some(score) => ramp.sample(column.normalize(*score)).to_hex(),
            None => MISSING_FILL.to_string(),
        };
        let mut data = String::new();
        for polygon in &record.geometry.0 {
            append_ring(&mut data, &polygon.exterior().0, &project);
            for interior in polygon.interiors() {
                append_ring(&mut data, &interior.0, &project);
            }
        }
        if data.is_empty() {
            continue;
        }
        writeln!(
            out,
            r#"  <path d="{data}" fill="{fill}" fill-rule="evenodd" stroke="{EDGE_COLOR}" stroke-width="{:.2}"><title>{}</title></path>"#,
            style.edge_width,
            xml_escape(&record.code),
        )?;
        drawn += 1;
    }

    writeln!(out, "</svg>")?;
    out.flush().context("flush svg")?;
    debug!(path = %path.display(), drawn, "wrote choropleth");
    Ok(())
}

fn append_ring<F>(data: &mut String, ring: &[Coord<f64>], project: &F)
where
    F: Fn(&Coord<f64>) -> (f64, f64),
{
    use std::fmt::Write as _;

    let open = if ring.len() > 1 && ring.first() == ring.last() {
        &ring[..ring.len() - 1]
    } else {
        ring
    };
    for (i, coord) in open.iter().enumerate() {
        let (x, y) = project(coord);
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(data, "{command}{x:.2} {y:.2}");
    }
    data.push('Z');
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}
