//! Tier-level simplification properties on a synthetic boundary set.

use approx::assert_relative_eq;
use atlas_model::{FeatureSet, Territory};
use atlas_topo::{Tier, assemble_ring, build_topology, decode_ref, simplify_arcs};
use geo::{Area, Coord, MultiPolygon, Polygon, coord};

/// A wiggly square: straight corners joined by slightly perturbed edges,
/// so there is something for the simplifier to remove.
fn wiggly_square(x0: f64, y0: f64, size: f64) -> Polygon<f64> {
    let step = size / 8.0;
    let wiggle = size / 400.0;
    let mut coords: Vec<Coord<f64>> = Vec::new();
    for i in 0..8 {
        let offset = if i % 2 == 0 { wiggle } else { -wiggle };
        coords.push(coord! { x: x0 + i as f64 * step, y: y0 + offset });
    }
    for i in 0..8 {
        let offset = if i % 2 == 0 { wiggle } else { -wiggle };
        coords.push(coord! { x: x0 + size + offset, y: y0 + i as f64 * step });
    }
    for i in 0..8 {
        let offset = if i % 2 == 0 { wiggle } else { -wiggle };
        coords.push(coord! { x: x0 + size - i as f64 * step, y: y0 + size + offset });
    }
    for i in 0..8 {
        let offset = if i % 2 == 0 { wiggle } else { -wiggle };
        coords.push(coord! { x: x0 + offset, y: y0 + size - i as f64 * step });
    }
    coords.push(coords[0]);
    Polygon::new(geo::LineString::from(coords), vec![])
}

fn synthetic_set() -> FeatureSet {
    FeatureSet::new(vec![
        Territory::new("AAA", MultiPolygon(vec![wiggly_square(0.0, 0.0, 1.0)])),
        Territory::new("BBB", MultiPolygon(vec![wiggly_square(5.0, 0.0, 1.0)])),
        Territory::new("CCC", MultiPolygon(vec![wiggly_square(10.0, 0.0, 0.01)])),
    ])
}

#[test]
fn every_tier_preserves_territory_count() {
    let set = synthetic_set();
    let topo = build_topology(&set);
    for tier in Tier::ALL {
        let (arcs, _) = simplify_arcs(&topo, tier.epsilon());
        assert_eq!(topo.objects.len(), set.len(), "{tier}");
        for object in &topo.objects {
            for polygon in &object.rings {
                for refs in polygon {
                    let ring = assemble_ring(&arcs, refs);
                    assert!(
                        ring.len() >= 4,
                        "{tier}: ring of {} collapsed",
                        object.record.code
                    );
                    assert_eq!(ring.first(), ring.last(), "{tier}: ring must close");
                }
            }
        }
    }
}

#[test]
fn finer_tiers_keep_at_least_as_many_points() {
    let topo = build_topology(&synthetic_set());
    let mut previous: Option<usize> = None;
    for tier in Tier::ALL {
        let (_, stats) = simplify_arcs(&topo, tier.epsilon());
        if let Some(finer) = previous {
            assert!(
                finer >= stats.points_after,
                "{tier}: finer tier kept fewer points"
            );
        }
        previous = Some(stats.points_after);
    }
}

#[test]
fn coarse_tier_removes_points() {
    let topo = build_topology(&synthetic_set());
    let (_, stats) = simplify_arcs(&topo, Tier::M100.epsilon());
    assert!(stats.points_after < stats.points_before);
}

/// A shelf passing just above a tall spike. The dip vertex over the spike
/// tip carries the smallest triangle area of the ring, so plain
/// Visvalingam-Whyatt drops it first and the straightened shelf would cut
/// through the spike.
fn spiked_shelf(scale: f64) -> Polygon<f64> {
    let outline = [
        (0.0, 0.0),
        (4.0, 0.0),
        (5.0, 4.0),
        (6.0, 0.0),
        (10.0, 0.0),
        (10.0, 5.0),
        (8.0, 3.9),
        (5.0, 4.05),
        (2.0, 3.9),
        (0.0, 5.0),
        (0.0, 0.0),
    ];
    let coords: Vec<Coord<f64>> = outline
        .iter()
        .map(|&(x, y)| coord! { x: x * scale, y: y * scale })
        .collect();
    Polygon::new(geo::LineString::from(coords), vec![])
}

#[test]
fn self_intersecting_reduction_falls_back_to_original_arcs() {
    let shelf = spiked_shelf(0.04);
    let set = FeatureSet::new(vec![Territory::new(
        "AAA",
        MultiPolygon(vec![shelf.clone()]),
    )]);
    let topo = build_topology(&set);

    let (arcs, stats) = simplify_arcs(&topo, Tier::M100.epsilon());
    assert!(stats.fallback_rings > 0, "fallback never fired");

    // The reassembled ring is the unsimplified one, not the cut-through
    // reduction.
    let ring = assemble_ring(&arcs, &topo.objects[0].rings[0][0]);
    let restored: std::collections::HashSet<(u64, u64)> =
        ring.iter().map(|c| (c.x.to_bits(), c.y.to_bits())).collect();
    let original: std::collections::HashSet<(u64, u64)> = shelf
        .exterior()
        .0
        .iter()
        .map(|c| (c.x.to_bits(), c.y.to_bits()))
        .collect();
    assert_eq!(restored, original, "ring must revert to unsimplified arcs");

    let rebuilt = Polygon::new(geo::LineString::from(ring), vec![]);
    assert_relative_eq!(rebuilt.unsigned_area(), shelf.unsigned_area());
}

#[test]
fn shared_borders_stay_structurally_coincident() {
    // Two squares sharing a wiggly edge: after simplification both
    // territories still reference the same arc storage, so their shared
    // border cannot diverge.
    let shared_edge: Vec<Coord<f64>> = (0..=8)
        .map(|i| {
            let wiggle = if i % 2 == 0 { 0.002 } else { -0.002 };
            coord! { x: 1.0 + wiggle, y: i as f64 / 8.0 }
        })
        .collect();
    let mut left: Vec<Coord<f64>> = vec![
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 1.0, y: 0.0 },
    ];
    left.extend(shared_edge.iter().skip(1).take(7).copied());
    left.extend([
        coord! { x: 1.0, y: 1.0 },
        coord! { x: 0.0, y: 1.0 },
        coord! { x: 0.0, y: 0.0 },
    ]);
    let mut right: Vec<Coord<f64>> = vec![
        coord! { x: 1.0, y: 1.0 },
    ];
    right.extend(shared_edge.iter().skip(1).take(7).rev().copied());
    right.extend([
        coord! { x: 1.0, y: 0.0 },
        coord! { x: 2.0, y: 0.0 },
        coord! { x: 2.0, y: 1.0 },
        coord! { x: 1.0, y: 1.0 },
    ]);

    let set = FeatureSet::new(vec![
        Territory::new(
            "AAA",
            MultiPolygon(vec![Polygon::new(geo::LineString::from(left), vec![])]),
        ),
        Territory::new(
            "BBB",
            MultiPolygon(vec![Polygon::new(geo::LineString::from(right), vec![])]),
        ),
    ]);
    let topo = build_topology(&set);

    let arcs_of = |object: usize| -> std::collections::HashSet<usize> {
        topo.objects[object].rings[0][0]
            .iter()
            .map(|&r| decode_ref(r).0)
            .collect()
    };
    let shared: Vec<usize> = arcs_of(0).intersection(&arcs_of(1)).copied().collect();
    assert!(
        !shared.is_empty(),
        "adjacent territories must share arc storage"
    );

    // Simplification happens on the shared storage, so the border stays
    // bit-identical from both sides at any tier.
    let (arcs, _) = simplify_arcs(&topo, Tier::M100.epsilon());
    for index in shared {
        assert!(arcs[index].len() >= 2);
    }
}
