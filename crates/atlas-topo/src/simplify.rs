//! Per-arc Visvalingam–Whyatt simplification with an oversimplification
//! guard.
//!
//! Arcs are simplified independently so shared borders stay coincident.
//! Two guards keep the result renderable:
//! - an arc that closes a junction-free ring keeps at least four
//!   coordinates; a collapse below that is retried at half the threshold,
//!   readmitting the largest dropped triangles first;
//! - a ring that self-intersects after reassembly falls back to its
//!   unsimplified arcs.

use geo::algorithm::line_intersection::line_intersection;
use geo::{Coord, Line, LineString, SimplifyVw};
use tracing::debug;

use crate::topology::{Topology, assemble_ring, decode_ref};

/// How many times the threshold is halved before giving up on an arc.
const MAX_RELAXATIONS: u32 = 8;

/// Minimum coordinate count for an arc that is a closed ring on its own.
const CLOSED_ARC_FLOOR: usize = 4;

/// Counters from one simplification pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplifyStats {
    /// Coordinates across all arcs before simplification.
    pub points_before: usize,
    /// Coordinates across all arcs after simplification.
    pub points_after: usize,
    /// Arcs that needed a relaxed threshold to stay above the ring floor.
    pub relaxed_arcs: usize,
    /// Rings reverted to unsimplified arcs after a self-intersection.
    pub fallback_rings: usize,
}

/// Simplify every arc of the topology at the given threshold.
///
/// Returns the simplified arc set alongside counters; the input topology is
/// untouched so further tiers can be derived from it.
pub fn simplify_arcs(topology: &Topology, epsilon: f64) -> (Vec<Vec<Coord<f64>>>, SimplifyStats) {
    let mut stats = SimplifyStats {
        points_before: topology.point_count(),
        ..SimplifyStats::default()
    };

    let mut arcs: Vec<Vec<Coord<f64>>> = topology
        .arcs
        .iter()
        .map(|arc| {
            let (simplified, relaxed) = simplify_arc(arc, epsilon);
            if relaxed {
                stats.relaxed_arcs += 1;
            }
            simplified
        })
        .collect();

    restore_intersecting_rings(topology, &mut arcs, &mut stats);
    stats.points_after = arcs.iter().map(Vec::len).sum();
    debug!(
        epsilon,
        points_before = stats.points_before,
        points_after = stats.points_after,
        relaxed_arcs = stats.relaxed_arcs,
        fallback_rings = stats.fallback_rings,
        "simplified arcs"
    );
    (arcs, stats)
}

/// Simplify one arc, relaxing the threshold while a closed-ring arc sits
/// below the coordinate floor. Returns the result and whether relaxation
/// was needed.
fn simplify_arc(arc: &[Coord<f64>], epsilon: f64) -> (Vec<Coord<f64>>, bool) {
    let closed = arc.len() > 1 && arc.first() == arc.last();
    let floor = if closed { CLOSED_ARC_FLOOR } else { 2 };
    if arc.len() <= floor {
        return (arc.to_vec(), false);
    }

    let line = LineString::from(arc.to_vec());
    let simplified = line.simplify_vw(&epsilon).0;
    if simplified.len() >= floor {
        return (simplified, false);
    }

    let mut eps = epsilon;
    for _ in 0..MAX_RELAXATIONS {
        eps /= 2.0;
        let relaxed = line.simplify_vw(&eps).0;
        if relaxed.len() >= floor {
            return (relaxed, true);
        }
    }
    (arc.to_vec(), true)
}

/// Revert the arcs of any ring that self-intersects after reassembly.
///
/// Reverting an arc can change other rings that share it, so the scan
/// repeats until no ring needs another fallback.
fn restore_intersecting_rings(
    topology: &Topology,
    arcs: &mut [Vec<Coord<f64>>],
    stats: &mut SimplifyStats,
) {
    loop {
        let mut changed = false;
        for object in &topology.objects {
            for polygon in &object.rings {
                for refs in polygon {
                    let ring = assemble_ring(arcs, refs);
                    if !ring_self_intersects(&ring) {
                        continue;
                    }
                    let mut reverted = false;
                    for &reference in refs {
                        let (index, _) = decode_ref(reference);
                        if arcs[index] != topology.arcs[index] {
                            arcs[index] = topology.arcs[index].clone();
                            reverted = true;
                        }
                    }
                    if reverted {
                        stats.fallback_rings += 1;
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
}

/// True when any two non-adjacent ring segments touch or cross.
fn ring_self_intersects(ring: &[Coord<f64>]) -> bool {
    if ring.len() < 4 {
        return false;
    }
    // Segments of the closed ring; the duplicated closing coordinate means
    // segment i runs ring[i] -> ring[i + 1].
    let count = ring.len() - 1;
    for i in 0..count {
        let a = Line::new(ring[i], ring[i + 1]);
        for j in (i + 1)..count {
            // Adjacent segments share an endpoint legitimately, including
            // the first/last pair around the ring start.
            if j == i + 1 || (i == 0 && j == count - 1) {
                continue;
            }
            let b = Line::new(ring[j], ring[j + 1]);
            if line_intersection(a, b).is_some() {
                return true;
            }
        }
    }
    false
}
