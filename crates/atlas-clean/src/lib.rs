//! Boundary-cleaning pipeline.
//!
//! Dataset-specific corrections applied to an admin-0 boundary snapshot
//! before it is merged with the disputed-territories table: rule-table
//! field overwrites, a targeted multi-polygon split, an overseas
//! bounding-box classification, dependency grouping, and a final union.

pub mod dissolve;
pub mod explode;
pub mod grouping;
pub mod overseas;
pub mod pipeline;
pub mod rules;
pub mod split;
pub mod union;
pub mod write;

pub use dissolve::{dissolve_by, dissolve_by_code, dissolve_by_group_key};
pub use explode::explode;
pub use grouping::{group_dependencies, parent_code};
pub use overseas::{OverseasRule, apply_overseas_split};
pub use pipeline::{CleanOptions, CleanResult, clean_feature_sets, run_clean};
pub use rules::{CorrectionRule, RuleAction, RuleAudit, RuleKey, apply_rules, default_rules};
pub use split::{PartSelector, SplitRule, apply_split};
pub use union::build_union;
pub use write::{write_flat_csv, write_geojson};
