//! The rendering pipeline: load, merge, ramp, draw.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use atlas_ingest::{load_boundaries, load_index_table};

use crate::color::{ColorRamp, DEFAULT_BREAKS, default_palette};
use crate::extent::Extent;
use crate::map::{MapStyle, write_choropleth};
use crate::merge::merge_scores;

/// Options for a rendering run.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub extent: Extent,
    /// Hex break colors; empty means the default palette.
    pub breaks: Vec<String>,
    pub style: MapStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            extent: Extent::World,
            breaks: Vec::new(),
            style: MapStyle::default(),
        }
    }
}

/// Counters and paths from a rendering run.
#[derive(Debug)]
pub struct RenderResult {
    pub records: usize,
    pub matched: usize,
    pub missing: usize,
    pub svg_path: PathBuf,
}

/// Render one (variable, year) choropleth to `output`.
pub fn run_render(
    boundaries_path: &Path,
    scores_path: &Path,
    variable: &str,
    year: i32,
    output: &Path,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let run_span = info_span!("render", variable, year);
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    let (set, table) = info_span!("load").in_scope(|| {
        let set = load_boundaries(boundaries_path).context("load boundaries")?;
        let table = load_index_table(scores_path).context("load index scores")?;
        info!(
            records = set.len(),
            score_rows = table.rows.len(),
            "load complete"
        );
        Ok::<_, anyhow::Error>((set, table))
    })?;

    let column = merge_scores(&set, &table, variable, year)?;
    let breaks = if options.breaks.is_empty() {
        default_palette(DEFAULT_BREAKS)?
    } else {
        options.breaks.clone()
    };
    let ramp = ColorRamp::from_breaks(&breaks)?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    info_span!("draw").in_scope(|| {
        write_choropleth(&set, &column, &ramp, &options.extent, &options.style, output)
    })?;

    let result = RenderResult {
        records: set.len(),
        matched: column.matched(),
        missing: set.len() - column.matched(),
        svg_path: output.to_path_buf(),
    };
    info!(
        records = result.records,
        matched = result.matched,
        missing = result.missing,
        duration_ms = run_start.elapsed().as_millis(),
        "render complete"
    );
    Ok(result)
}
