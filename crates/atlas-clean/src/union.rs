//! Union builder: concatenate corrected boundaries with the disputed set.

use atlas_model::FeatureSet;

/// Concatenate the corrected primary set with the disputed-territories set
/// and strip internal-only columns.
///
/// No deduplication happens across the two sources; the disputed codes are
/// expected to be disjoint from the primary codes.
pub fn build_union(primary: FeatureSet, disputed: FeatureSet) -> FeatureSet {
    let mut combined = FeatureSet::default();
    for record in primary.into_iter().chain(disputed) {
        combined.push(record);
    }
    drop_internal_columns(combined)
}

/// Clear the columns that never reach the output schema: the grouping key,
/// continent, and English name.
fn drop_internal_columns(set: FeatureSet) -> FeatureSet {
    let mut set = set;
    for record in &mut set.records {
        record.group_code = None;
        record.continent = None;
        record.name = None;
    }
    set
}
