pub mod class;
pub mod error;
pub mod record;
pub mod schema;

pub use class::TerritoryClass;
pub use error::{AtlasError, Result};
pub use record::{FeatureSet, Territory};
pub use schema::{LEASE_SENTINEL_CODE, OUTPUT_COLUMNS, OVERSEAS_SUFFIX};
