//! Dependency grouping: fold dependent territories into their parent
//! sovereign state.
//!
//! Each dependency code maps to a parent code; grouped rows have their
//! attributes blanked so the parent's values win the subsequent dissolve.
//! Greenland stays a separate territory. Dependencies without a parent
//! mapping (including overseas-split records) keep their own identity.

use atlas_model::{FeatureSet, TerritoryClass};

use crate::dissolve::dissolve_by_group_key;

/// Parent sovereign code for a dependency code, if one is defined.
pub fn parent_code(code: &str) -> Option<&'static str> {
    match code {
        "ASM" | "UMI" | "GUM" | "MNP" | "PRI" | "VIR" => Some("USA"),
        "AIA" | "BMU" | "IOT" | "VGB" | "CYM" | "FLK" | "GIB" | "GGY" | "IMY" | "JEY"
        | "MSR" | "PCN" | "SHN" | "SGS" | "TCA" => Some("GBR"),
        "ABW" | "BES" | "CUW" | "SXM" => Some("NLD"),
        "PYF" | "ATF" | "NCL" | "BLM" | "MAF" | "SPM" | "WLF" => Some("FRA"),
        "CXR" | "CCK" | "HMD" | "NFK" => Some("AUS"),
        "COK" | "NIU" | "TKL" => Some("NZL"),
        "FRO" => Some("DNK"),
        _ => None,
    }
}

/// Assign group codes, blank grouped dependencies, dissolve by group key,
/// and unify the sovereign-country label.
pub fn group_dependencies(set: FeatureSet) -> FeatureSet {
    let mut set = set;
    for record in &mut set.records {
        let group = parent_code(&record.code)
            .map(str::to_string)
            .unwrap_or_else(|| record.code.clone());
        record.group_code = Some(group);
    }

    // Blank every field of rows folding into another territory, so the
    // parent's attributes are the first non-null values in the group.
    for record in &mut set.records {
        if record.class == Some(TerritoryClass::Dependency) && record.group_key() != record.code {
            record.class = None;
            record.code = String::new();
            record.continent = None;
            record.region_un = None;
            record.subregion = None;
            record.region_wb = None;
            record.name = None;
            record.display_name = None;
        }
    }

    let mut dissolved = dissolve_by_group_key(set);
    for record in &mut dissolved.records {
        if record.class == Some(TerritoryClass::SovereignCountry) {
            record.class = Some(TerritoryClass::Country);
        }
    }
    dissolved
}
