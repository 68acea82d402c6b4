//! Choropleth rendering over cleaned boundaries and index scores.
//!
//! Thin by design: a left join of scores onto territory codes, a linear
//! color ramp over user break colors, and an SVG writer. Everything
//! interactive sits above this crate.

pub mod color;
pub mod extent;
pub mod map;
pub mod merge;
pub mod pipeline;

pub use color::{ColorRamp, DEFAULT_BREAKS, EDGE_COLOR, MISSING_FILL, Rgb, default_palette};
pub use extent::{Extent, REGION_NAMES};
pub use map::{MapStyle, write_choropleth};
pub use merge::{ScoreColumn, merge_scores};
pub use pipeline::{RenderOptions, RenderResult, run_render};
