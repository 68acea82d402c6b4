//! The simplification pipeline: load, build topology, derive tiers, write.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use atlas_ingest::load_boundaries;

use crate::preview::write_preview;
use crate::simplify::{SimplifyStats, simplify_arcs};
use crate::tier::Tier;
use crate::topojson::write_topojson;
use crate::topology::{Topology, build_topology};

/// Options for a simplification run.
#[derive(Debug, Clone, Default)]
pub struct SimplifyOptions {
    /// Tiers to derive; empty means all shipped tiers.
    pub tiers: Vec<Tier>,
}

/// Per-tier outputs and counters.
#[derive(Debug)]
pub struct TierOutcome {
    pub tier: Tier,
    pub stats: SimplifyStats,
    pub topojson_path: PathBuf,
    pub preview_path: PathBuf,
}

/// Result of a full simplification run.
#[derive(Debug)]
pub struct SimplifyResult {
    pub input_records: usize,
    pub arc_count: usize,
    /// The unsimplified topology, written alongside the tiers.
    pub full_topology_path: PathBuf,
    pub tiers: Vec<TierOutcome>,
}

/// Run the simplifier: one topology build, one output pair per tier.
///
/// Every tier is derived from the full-resolution topology, so tier
/// outputs are independent of each other and of the tier order.
pub fn run_simplify(
    input: &Path,
    output_dir: &Path,
    options: &SimplifyOptions,
) -> Result<SimplifyResult> {
    let run_span = info_span!("simplify", input = %input.display());
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    let set = info_span!("load").in_scope(|| {
        let set = load_boundaries(input).context("load boundaries")?;
        info!(records = set.len(), "load complete");
        Ok::<_, anyhow::Error>(set)
    })?;
    let input_records = set.len();

    let topology = info_span!("topology").in_scope(|| {
        let start = Instant::now();
        let topology = build_topology(&set);
        info!(
            arcs = topology.arcs.len(),
            points = topology.point_count(),
            duration_ms = start.elapsed().as_millis(),
            "topology built"
        );
        topology
    });

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let full_topology_path = output_dir.join("boundaries_full.topojson");
    write_topojson(&topology, &topology.arcs, &full_topology_path)?;

    let tiers = if options.tiers.is_empty() {
        Tier::ALL.to_vec()
    } else {
        options.tiers.clone()
    };
    let mut outcomes = Vec::with_capacity(tiers.len());
    for tier in tiers {
        outcomes.push(derive_tier(&topology, tier, output_dir)?);
    }

    info!(
        input_records,
        arcs = topology.arcs.len(),
        tiers = outcomes.len(),
        duration_ms = run_start.elapsed().as_millis(),
        "simplify complete"
    );
    Ok(SimplifyResult {
        input_records,
        arc_count: topology.arcs.len(),
        full_topology_path,
        tiers: outcomes,
    })
}

fn derive_tier(topology: &Topology, tier: Tier, output_dir: &Path) -> Result<TierOutcome> {
    let span = info_span!("tier", label = tier.label());
    let _guard = span.enter();
    let start = Instant::now();

    let (arcs, stats) = simplify_arcs(topology, tier.epsilon());
    let topojson_path = output_dir.join(format!("boundaries_{}.topojson", tier.label()));
    let preview_path = output_dir.join(format!("preview_{}.svg", tier.label()));
    write_topojson(topology, &arcs, &topojson_path)
        .with_context(|| format!("write {} topojson", tier.label()))?;
    write_preview(topology, &arcs, &preview_path)
        .with_context(|| format!("write {} preview", tier.label()))?;

    info!(
        points_before = stats.points_before,
        points_after = stats.points_after,
        relaxed_arcs = stats.relaxed_arcs,
        fallback_rings = stats.fallback_rings,
        duration_ms = start.elapsed().as_millis(),
        "tier complete"
    );
    Ok(TierOutcome {
        tier,
        stats,
        topojson_path,
        preview_path,
    })
}
