//! Dissolve: merge records sharing a key into one record per key.
//!
//! Geometries are unioned; every other field takes the first non-null value
//! in input order. That order dependence is observable: conflicting
//! non-empty values are logged at debug level when they are discarded.

use std::collections::BTreeMap;

use geo::{BooleanOps, MultiPolygon};
use tracing::debug;

use atlas_model::{FeatureSet, Territory};

/// Dissolve a feature set, deriving the key per record with `key_fn`.
///
/// Output records appear in order of each key's first appearance. The
/// dissolved record's `code` is the first non-empty code in the group, or
/// the key itself when every member was blanked.
pub fn dissolve_by<F>(set: FeatureSet, key_fn: F) -> FeatureSet
where
    F: Fn(&Territory) -> String,
{
    let mut order: Vec<String> = Vec::new();
    let mut groups: BTreeMap<String, Vec<Territory>> = BTreeMap::new();
    for record in set {
        let key = key_fn(&record);
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(record);
    }

    let mut out = FeatureSet::default();
    for key in order {
        let members = groups.remove(&key).unwrap_or_default();
        out.push(merge_group(&key, members));
    }
    out
}

/// Dissolve by each record's effective group key (group code, else code).
pub fn dissolve_by_group_key(set: FeatureSet) -> FeatureSet {
    dissolve_by(set, |record| record.group_key().to_string())
}

/// Dissolve by code; used to re-merge exploded parts after relabeling.
pub fn dissolve_by_code(set: FeatureSet) -> FeatureSet {
    dissolve_by(set, |record| record.code.clone())
}

fn merge_group(key: &str, members: Vec<Territory>) -> Territory {
    let mut iter = members.into_iter();
    let Some(first) = iter.next() else {
        return Territory::new(key.to_string(), MultiPolygon(Vec::new()));
    };

    let mut merged = first;
    for member in iter {
        merged.geometry = merged.geometry.union(&member.geometry);
        take_first(key, "TYPE", &mut merged.class, member.class);
        if merged.code.trim().is_empty() {
            merged.code = member.code;
        } else if !member.code.trim().is_empty() && member.code != merged.code {
            debug!(key, kept = %merged.code, dropped = %member.code, "conflicting codes in dissolve group");
        }
        take_first_string(key, "CONTINENT", &mut merged.continent, member.continent);
        take_first_string(key, "REGION_UN", &mut merged.region_un, member.region_un);
        take_first_string(key, "SUBREGION", &mut merged.subregion, member.subregion);
        take_first_string(key, "REGION_WB", &mut merged.region_wb, member.region_wb);
        take_first_string(key, "NAME_EN", &mut merged.name, member.name);
        take_first_string(key, "WB_NAME", &mut merged.display_name, member.display_name);
    }

    if merged.code.trim().is_empty() {
        merged.code = key.to_string();
    }
    merged.group_code = Some(key.to_string());
    merged
}

fn take_first<T: PartialEq>(key: &str, field: &str, kept: &mut Option<T>, candidate: Option<T>) {
    let Some(value) = candidate else {
        return;
    };
    match kept {
        None => *kept = Some(value),
        Some(current) => {
            if *current != value {
                debug!(key, field, "conflicting values in dissolve group");
            }
        }
    }
}

fn take_first_string(key: &str, field: &str, kept: &mut Option<String>, candidate: Option<String>) {
    take_first(key, field, kept, candidate);
}
