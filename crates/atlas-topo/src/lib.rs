//! Topology-preserving boundary simplification.
//!
//! Builds a shared-arc topology from a cleaned boundary set, simplifies
//! arcs with Visvalingam–Whyatt at fixed output tiers, and writes
//! quantized TopoJSON plus an SVG preview per tier.

pub mod pipeline;
pub mod preview;
pub mod simplify;
pub mod tier;
pub mod topojson;
pub mod topology;

pub use pipeline::{SimplifyOptions, SimplifyResult, TierOutcome, run_simplify};
pub use preview::write_preview;
pub use simplify::{SimplifyStats, simplify_arcs};
pub use tier::Tier;
pub use topojson::{QUANTIZATION, write_topojson};
pub use topology::{TopoObject, Topology, assemble_ring, build_topology, decode_ref};
