//! Fixed attribute schema shared by the GeoJSON and flat-table outputs.

/// Sentinel code assigned to leased areas.
pub const LEASE_SENTINEL_CODE: &str = "XXX";

/// Suffix appended to a sovereign code for its overseas split record.
pub const OVERSEAS_SUFFIX: &str = "-OT";

/// Attribute columns written to the final outputs, in order.
///
/// Internal-only columns (group code, continent, English name) are dropped
/// before serialization.
pub const OUTPUT_COLUMNS: [&str; 6] = [
    "TYPE",
    "WB_A3",
    "REGION_UN",
    "SUBREGION",
    "REGION_WB",
    "WB_NAME",
];

/// Source property names recognized by the loaders.
pub mod source {
    pub const TYPE: &str = "TYPE";
    pub const CODE: &str = "WB_A3";
    pub const CONTINENT: &str = "CONTINENT";
    pub const REGION_UN: &str = "REGION_UN";
    pub const SUBREGION: &str = "SUBREGION";
    pub const REGION_WB: &str = "REGION_WB";
    pub const NAME: &str = "NAME_EN";
    pub const DISPLAY_NAME: &str = "WB_NAME";
}
