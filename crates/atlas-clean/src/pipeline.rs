//! The cleaning pipeline with explicit stages.
//!
//! Stage order, each stage a pure function from feature set to feature set:
//! 1. **Load**: read boundary and disputed GeoJSON files
//! 2. **Rules**: apply the correction table
//! 3. **Split**: targeted multi-polygon split (China/Taiwan)
//! 4. **Classify**: overseas split by bounding-box membership (France)
//! 5. **Group**: fold dependencies into parents, dissolve, unify labels
//! 6. **Union**: concatenate with disputed territories, drop internals
//! 7. **Write**: GeoJSON + flat CSV
//!
//! Either the whole pipeline completes and both outputs are written, or an
//! error aborts the run with nothing finalized.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use atlas_ingest::{load_boundaries, load_disputed};
use atlas_model::FeatureSet;

use crate::grouping::group_dependencies;
use crate::overseas::{OverseasRule, apply_overseas_split};
use crate::rules::{RuleAudit, apply_rules, default_rules};
use crate::split::{SplitRule, apply_split};
use crate::union::build_union;
use crate::write::{write_flat_csv, write_geojson};

/// Options controlling the cleaning run.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Use legacy positional part selection instead of the
    /// content-based selector (compatibility testing only).
    pub positional_parts: bool,
}

/// Result of a full cleaning run.
#[derive(Debug)]
pub struct CleanResult {
    pub input_records: usize,
    pub disputed_records: usize,
    pub output_records: usize,
    pub rule_audit: RuleAudit,
    pub geojson_path: PathBuf,
    pub csv_path: PathBuf,
}

/// Transform loaded feature sets into the final combined set.
///
/// Exposed separately from [`run_clean`] so tests can drive the pipeline
/// with synthetic data and custom rules.
pub fn clean_feature_sets(
    boundaries: FeatureSet,
    disputed: FeatureSet,
    split_rule: &SplitRule,
    overseas_rule: &OverseasRule,
) -> Result<(FeatureSet, RuleAudit)> {
    let (corrected, audit) = info_span!("rules").in_scope(|| {
        let start = Instant::now();
        let (corrected, audit) = apply_rules(boundaries, &default_rules());
        info!(
            applied = audit.applied.len(),
            missed = audit.missed.len(),
            hits = audit.hit_count(),
            duration_ms = start.elapsed().as_millis(),
            "rules applied"
        );
        (corrected, audit)
    });

    let split = info_span!("split").in_scope(|| {
        let start = Instant::now();
        let split = apply_split(corrected, split_rule).context("split stage")?;
        info!(
            records = split.len(),
            duration_ms = start.elapsed().as_millis(),
            "split complete"
        );
        Ok::<_, anyhow::Error>(split)
    })?;

    let classified = info_span!("classify").in_scope(|| {
        let start = Instant::now();
        let classified =
            apply_overseas_split(split, overseas_rule).context("classify stage")?;
        info!(
            records = classified.len(),
            duration_ms = start.elapsed().as_millis(),
            "classification complete"
        );
        Ok::<_, anyhow::Error>(classified)
    })?;

    let grouped = info_span!("group").in_scope(|| {
        let start = Instant::now();
        let grouped = group_dependencies(classified);
        info!(
            records = grouped.len(),
            duration_ms = start.elapsed().as_millis(),
            "grouping complete"
        );
        grouped
    });

    let combined = build_union(grouped, disputed);
    Ok((combined, audit))
}

/// Run the full pipeline: load, clean, and write both outputs.
pub fn run_clean(
    boundaries_path: &Path,
    disputed_path: &Path,
    output_dir: &Path,
    options: &CleanOptions,
) -> Result<CleanResult> {
    let run_span = info_span!("clean", boundaries = %boundaries_path.display());
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    let (boundaries, disputed) = info_span!("load").in_scope(|| {
        let boundaries = load_boundaries(boundaries_path).context("load boundaries")?;
        let disputed = load_disputed(disputed_path).context("load disputed territories")?;
        info!(
            boundary_records = boundaries.len(),
            disputed_records = disputed.len(),
            "load complete"
        );
        Ok::<_, anyhow::Error>((boundaries, disputed))
    })?;
    let input_records = boundaries.len();
    let disputed_records = disputed.len();

    let split_rule = if options.positional_parts {
        SplitRule::china_taiwan_positional()
    } else {
        SplitRule::china_taiwan()
    };
    let overseas_rule = OverseasRule::france();
    let (combined, rule_audit) =
        clean_feature_sets(boundaries, disputed, &split_rule, &overseas_rule)?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let geojson_path = output_dir.join("boundaries.geojson");
    let csv_path = output_dir.join("boundaries.csv");
    info_span!("write").in_scope(|| {
        write_geojson(&combined, &geojson_path)?;
        write_flat_csv(&combined, &csv_path)
    })?;

    info!(
        input_records,
        disputed_records,
        output_records = combined.len(),
        duration_ms = run_start.elapsed().as_millis(),
        "clean complete"
    );

    Ok(CleanResult {
        input_records,
        disputed_records,
        output_records: combined.len(),
        rule_audit,
        geojson_path,
        csv_path,
    })
}
