//! Shared-arc topology construction.
//!
//! Rings are cut into arcs at junction points, so a border shared by two
//! territories is stored once and referenced from both. Arc references use
//! the TopoJSON convention: a non-negative index reads the arc forward, a
//! negative index `n` reads arc `!n` backwards.
//!
//! Junction detection and arc deduplication compare coordinates bitwise,
//! which is sound here because adjacent polygons in the source snapshot
//! carry exactly coincident border vertices.

use std::collections::{HashMap, HashSet};

use geo::{Coord, LineString, Polygon, Rect, coord};
use tracing::debug;

use atlas_model::{FeatureSet, Territory};

/// Exact-coordinate hash key.
type PointKey = (u64, u64);

fn key(c: Coord<f64>) -> PointKey {
    (c.x.to_bits(), c.y.to_bits())
}

/// One territory's ring structure expressed as arc references.
#[derive(Debug, Clone)]
pub struct TopoObject {
    /// Source record; its attributes feed the TopoJSON properties.
    pub record: Territory,
    /// polygon -> ring (exterior first) -> arc references.
    pub rings: Vec<Vec<Vec<i32>>>,
}

/// Arc-decomposed feature set.
#[derive(Debug, Clone)]
pub struct Topology {
    /// Arc coordinate strings, in unprojected degrees.
    pub arcs: Vec<Vec<Coord<f64>>>,
    pub objects: Vec<TopoObject>,
}

impl Topology {
    /// Bounding rectangle over every arc coordinate.
    pub fn bbox(&self) -> Rect<f64> {
        let mut min = coord! { x: f64::INFINITY, y: f64::INFINITY };
        let mut max = coord! { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY };
        for arc in &self.arcs {
            for c in arc {
                min.x = min.x.min(c.x);
                min.y = min.y.min(c.y);
                max.x = max.x.max(c.x);
                max.y = max.y.max(c.y);
            }
        }
        Rect::new(min, max)
    }

    /// Total coordinate count across all arcs.
    pub fn point_count(&self) -> usize {
        self.arcs.iter().map(Vec::len).sum()
    }
}

/// Build the shared-arc topology for a feature set.
pub fn build_topology(set: &FeatureSet) -> Topology {
    let junctions = find_junctions(set);
    let mut store = ArcStore::default();
    let mut objects = Vec::with_capacity(set.len());

    for record in set {
        let mut polygons = Vec::with_capacity(record.geometry.0.len());
        for polygon in &record.geometry.0 {
            polygons.push(polygon_arcs(polygon, &junctions, &mut store));
        }
        objects.push(TopoObject {
            record: record.clone(),
            rings: polygons,
        });
    }

    debug!(
        objects = objects.len(),
        arcs = store.arcs.len(),
        junctions = junctions.len(),
        "built topology"
    );
    Topology {
        arcs: store.arcs,
        objects,
    }
}

/// Reassemble one ring from arc references.
///
/// Consecutive arcs share endpoints; the duplicate join point is dropped so
/// the result is a closed ring with a single repeated start/end coordinate.
pub fn assemble_ring(arcs: &[Vec<Coord<f64>>], refs: &[i32]) -> Vec<Coord<f64>> {
    let mut ring: Vec<Coord<f64>> = Vec::new();
    for &reference in refs {
        let (index, reversed) = decode_ref(reference);
        let arc = &arcs[index];
        if reversed {
            let skip = usize::from(!ring.is_empty());
            ring.extend(arc.iter().rev().skip(skip));
        } else {
            let skip = usize::from(!ring.is_empty());
            ring.extend(arc.iter().skip(skip));
        }
    }
    ring
}

/// Split a TopoJSON-style arc reference into (arc index, reversed).
pub fn decode_ref(reference: i32) -> (usize, bool) {
    if reference < 0 {
        (!reference as usize, true)
    } else {
        (reference as usize, false)
    }
}

/// A point is a junction when the set of its neighbors across all rings
/// has more than two members: somewhere a third border leaves it.
fn find_junctions(set: &FeatureSet) -> HashSet<PointKey> {
    let mut neighbors: HashMap<PointKey, HashSet<PointKey>> = HashMap::new();
    for record in set {
        for polygon in &record.geometry.0 {
            for ring in rings_of(polygon) {
                let open = open_ring(ring);
                let n = open.len();
                if n < 3 {
                    continue;
                }
                for i in 0..n {
                    let prev = open[(i + n - 1) % n];
                    let next = open[(i + 1) % n];
                    let entry = neighbors.entry(key(open[i])).or_default();
                    entry.insert(key(prev));
                    entry.insert(key(next));
                }
            }
        }
    }
    neighbors
        .into_iter()
        .filter(|(_, set)| set.len() > 2)
        .map(|(point, _)| point)
        .collect()
}

fn rings_of(polygon: &Polygon<f64>) -> impl Iterator<Item = &LineString<f64>> {
    std::iter::once(polygon.exterior()).chain(polygon.interiors())
}

/// The ring without its duplicated closing coordinate.
fn open_ring(ring: &LineString<f64>) -> &[Coord<f64>] {
    let coords = &ring.0;
    if coords.len() > 1 && coords.first() == coords.last() {
        &coords[..coords.len() - 1]
    } else {
        coords
    }
}

fn polygon_arcs(
    polygon: &Polygon<f64>,
    junctions: &HashSet<PointKey>,
    store: &mut ArcStore,
) -> Vec<Vec<i32>> {
    rings_of(polygon)
        .map(|ring| ring_arcs(ring, junctions, store))
        .collect()
}

fn ring_arcs(
    ring: &LineString<f64>,
    junctions: &HashSet<PointKey>,
    store: &mut ArcStore,
) -> Vec<i32> {
    let open = open_ring(ring);
    if open.len() < 3 {
        // Degenerate ring; keep it as a single closed arc untouched.
        let mut closed = open.to_vec();
        if let Some(&first) = closed.first() {
            closed.push(first);
        }
        return vec![store.intern_closed(closed)];
    }

    let cut_points: Vec<usize> = open
        .iter()
        .enumerate()
        .filter(|(_, c)| junctions.contains(&key(**c)))
        .map(|(i, _)| i)
        .collect();

    if cut_points.is_empty() {
        // Junction-free ring: one closed arc, canonically rotated so a
        // coincident ring elsewhere dedupes to the same storage.
        let mut closed = rotate_to_min(open);
        closed.push(closed[0]);
        return vec![store.intern_closed(closed)];
    }

    // Rotate so the ring starts at the first junction, then split at each
    // junction along the way.
    let start = cut_points[0];
    let rotated: Vec<Coord<f64>> = open[start..]
        .iter()
        .chain(open[..start].iter())
        .copied()
        .collect();

    let mut refs = Vec::new();
    let mut arc: Vec<Coord<f64>> = vec![rotated[0]];
    for &point in rotated.iter().skip(1) {
        arc.push(point);
        if junctions.contains(&key(point)) {
            refs.push(store.intern_open(std::mem::replace(&mut arc, vec![point])));
        }
    }
    // Close the final arc back to the rotated start.
    arc.push(rotated[0]);
    if arc.len() > 1 {
        refs.push(store.intern_open(arc));
    }
    refs
}

fn rotate_to_min(open: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let start = open
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    open[start..]
        .iter()
        .chain(open[..start].iter())
        .copied()
        .collect()
}

/// Interns arcs, reusing storage when the same coordinate string was seen
/// before in either direction.
#[derive(Debug, Default)]
struct ArcStore {
    arcs: Vec<Vec<Coord<f64>>>,
    by_coords: HashMap<Vec<PointKey>, i32>,
}

impl ArcStore {
    fn intern_open(&mut self, coords: Vec<Coord<f64>>) -> i32 {
        let forward: Vec<PointKey> = coords.iter().copied().map(key).collect();
        if let Some(&index) = self.by_coords.get(&forward) {
            return index;
        }
        let reversed: Vec<PointKey> = forward.iter().rev().copied().collect();
        if let Some(&index) = self.by_coords.get(&reversed) {
            return !index;
        }
        let index = self.arcs.len() as i32;
        self.by_coords.insert(forward, index);
        self.arcs.push(coords);
        index
    }

    /// Closed arcs arrive canonically rotated; a reversed duplicate must be
    /// re-rotated before lookup because reversal moves the minimum point.
    fn intern_closed(&mut self, coords: Vec<Coord<f64>>) -> i32 {
        let forward: Vec<PointKey> = coords.iter().copied().map(key).collect();
        if let Some(&index) = self.by_coords.get(&forward) {
            return index;
        }
        if coords.len() > 2 {
            let open_reversed: Vec<Coord<f64>> =
                coords[..coords.len() - 1].iter().rev().copied().collect();
            let mut canonical = rotate_to_min(&open_reversed);
            canonical.push(canonical[0]);
            let reversed_key: Vec<PointKey> = canonical.iter().copied().map(key).collect();
            if let Some(&index) = self.by_coords.get(&reversed_key) {
                return !index;
            }
        }
        let index = self.arcs.len() as i32;
        self.by_coords.insert(forward, index);
        self.arcs.push(coords);
        index
    }
}
