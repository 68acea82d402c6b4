//! SVG preview of a (simplified) topology.
//!
//! A quick visual check per tier, not a production rendering: every
//! territory in a flat orange fill with light grey edges on a
//! plate-carrée projection of the topology bbox.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geo::Coord;
use tracing::debug;

use crate::topology::{Topology, assemble_ring};

const FILL: &str = "orange";
const EDGE: &str = "#EBEBEB";
const EDGE_WIDTH: f64 = 0.25;
const WIDTH_PX: f64 = 1500.0;

/// Write an SVG preview of the topology using the given arc set.
pub fn write_preview(topology: &Topology, arcs: &[Vec<Coord<f64>>], path: &Path) -> Result<()> {
    let bbox = topology.bbox();
    let span_x = (bbox.max().x - bbox.min().x).max(f64::EPSILON);
    let span_y = (bbox.max().y - bbox.min().y).max(f64::EPSILON);
    let height = WIDTH_PX * span_y / span_x;
    let scale = WIDTH_PX / span_x;

    let project = |c: &Coord<f64>| {
        let x = (c.x - bbox.min().x) * scale;
        // SVG y grows downward.
        let y = (bbox.max().y - c.y) * scale;
        (x, y)
    };

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH_PX:.0}" height="{height:.0}" viewBox="0 0 {WIDTH_PX:.2} {height:.2}">"#
    )?;

    for object in &topology.objects {
        let mut data = String::new();
        for polygon in &object.rings {
            for refs in polygon {
                let ring = assemble_ring(arcs, refs);
                append_ring_path(&mut data, &ring, project);
            }
        }
        if data.is_empty() {
            continue;
        }
        writeln!(
            out,
            r#"  <path d="{data}" fill="{FILL}" fill-rule="evenodd" stroke="{EDGE}" stroke-width="{EDGE_WIDTH}"/>"#
        )?;
    }

    writeln!(out, "</svg>")?;
    out.flush().context("flush preview")?;
    debug!(path = %path.display(), objects = topology.objects.len(), "wrote preview");
    Ok(())
}

fn append_ring_path<F>(data: &mut String, ring: &[Coord<f64>], project: F)
where
    F: Fn(&Coord<f64>) -> (f64, f64),
{
    use std::fmt::Write as _;

    // Drop the duplicated closing coordinate; `Z` closes the subpath.
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
