//! Rule table applier: ordered, unconditional field overwrites.
//!
//! Each rule is keyed by an exact match on code or class and overwrites a
//! single field. Rules are disjoint by key, unmatched rows pass through,
//! and applying the table twice equals applying it once. A rule whose key
//! matches nothing is a no-op, but the miss is counted and logged so an
//! upstream schema change cannot silently strand a correction.

use tracing::warn;

use atlas_model::{FeatureSet, LEASE_SENTINEL_CODE, TerritoryClass};

/// Exact-match predicate selecting the rows a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKey {
    /// Rows whose code equals the value.
    Code(&'static str),
    /// Rows whose class equals the value.
    Class(TerritoryClass),
}

/// Field overwrite applied to every matching row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
    SetClass(TerritoryClass),
    SetCode(&'static str),
    SetSubregion(&'static str),
    SetRegionWb(&'static str),
}

/// One correction: "where key matches, set field".
#[derive(Debug, Clone)]
pub struct CorrectionRule {
    pub key: RuleKey,
    pub action: RuleAction,
}

impl CorrectionRule {
    fn describe(&self) -> String {
        let key = match &self.key {
            RuleKey::Code(code) => format!("code={code}"),
            RuleKey::Class(class) => format!("class={class}"),
        };
        let action = match &self.action {
            RuleAction::SetClass(class) => format!("TYPE={class}"),
            RuleAction::SetCode(code) => format!("WB_A3={code}"),
            RuleAction::SetSubregion(value) => format!("SUBREGION={value}"),
            RuleAction::SetRegionWb(value) => format!("REGION_WB={value}"),
        };
        format!("{key} -> {action}")
    }
}

/// Outcome of one pass over the rule table.
#[derive(Debug, Clone, Default)]
pub struct RuleAudit {
    /// (rule description, matched row count) for rules that hit.
    pub applied: Vec<(String, usize)>,
    /// Descriptions of rules whose key matched no row.
    pub missed: Vec<String>,
}

impl RuleAudit {
    pub fn hit_count(&self) -> usize {
        self.applied.iter().map(|(_, hits)| hits).sum()
    }
}

/// The shipped correction table for the World Bank admin-0 snapshot.
///
/// Order matters only where two rules could touch the same row's same
/// field; the table below is disjoint by key.
pub fn default_rules() -> Vec<CorrectionRule> {
    use RuleAction::{SetClass, SetCode, SetRegionWb, SetSubregion};
    use RuleKey::{Class, Code};

    let mut rules = Vec::new();

    // Dependent territories labeled as countries upstream.
    for code in ["JEY", "GGY", "IMY", "SXM", "CUW", "ABW", "BES", "TKL"] {
        rules.push(CorrectionRule {
            key: Code(code),
            action: SetClass(TerritoryClass::Dependency),
        });
    }

    // Leased areas get the sentinel code.
    rules.push(CorrectionRule {
        key: Class(TerritoryClass::Lease),
        action: SetCode(LEASE_SENTINEL_CODE),
    });

    // Regional reassignments to match the index classification scheme.
    rules.push(CorrectionRule {
        key: Code("MEX"),
        action: SetSubregion("Central America"),
    });
    rules.push(CorrectionRule {
        key: Code("MLT"),
        action: SetRegionWb("Europe & Central Asia"),
    });

    // Legacy code remaps so dissolve keys match the index data.
    rules.push(CorrectionRule {
        key: Code("ZAR"),
        action: SetCode("COD"),
    });
    rules.push(CorrectionRule {
        key: Code("KSV"),
        action: SetCode("XKX"),
    });
    rules.push(CorrectionRule {
        key: Code("ROM"),
        action: SetCode("ROU"),
    });

    rules
}

/// Apply an ordered rule table, returning the corrected set and an audit.
///
/// Disputed records never participate: they come from the separate
/// disputed-territories table, which bypasses this stage entirely.
pub fn apply_rules(set: FeatureSet, rules: &[CorrectionRule]) -> (FeatureSet, RuleAudit) {
    let mut set = set;
    let mut audit = RuleAudit::default();

    for rule in rules {
        let mut hits = 0usize;
        for record in &mut set.records {
            if record.class == Some(TerritoryClass::Disputed) {
                continue;
            }
            let matches = match &rule.key {
                RuleKey::Code(code) => record.code == *code,
                RuleKey::Class(class) => record.class == Some(*class),
            };
            if !matches {
                continue;
            }
            hits += 1;
            match &rule.action {
                RuleAction::SetClass(class) => record.class = Some(*class),
                RuleAction::SetCode(code) => record.code = (*code).to_string(),
                RuleAction::SetSubregion(value) => record.subregion = Some((*value).to_string()),
                RuleAction::SetRegionWb(value) => record.region_wb = Some((*value).to_string()),
            }
        }
        if hits == 0 {
            let description = rule.describe();
            warn!(rule = %description, "correction rule matched no rows");
            audit.missed.push(description);
        } else {
            audit.applied.push((rule.describe(), hits));
        }
    }

    (set, audit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_model::Territory;
    use geo::{MultiPolygon, polygon};

    fn record(code: &str, class: TerritoryClass) -> Territory {
        let mut record = Territory::new(
            code,
            MultiPolygon(vec![polygon![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
                (x: 0.0, y: 0.0),
            ]]),
        );
        record.class = Some(class);
        record
    }

    #[test]
    fn lease_rows_get_sentinel_code() {
        let set = FeatureSet::new(vec![record("ABC", TerritoryClass::Lease)]);
        let (set, audit) = apply_rules(set, &default_rules());
        assert_eq!(set.records[0].code, LEASE_SENTINEL_CODE);
        assert_eq!(audit.hit_count(), 1);
    }

    #[test]
    fn disputed_rows_bypass_rules() {
        let set = FeatureSet::new(vec![record("ZAR", TerritoryClass::Disputed)]);
        let (set, _audit) = apply_rules(set, &default_rules());
        assert_eq!(set.records[0].code, "ZAR");
    }

    #[test]
    fn missed_rules_are_audited() {
        let set = FeatureSet::new(vec![record("MEX", TerritoryClass::SovereignCountry)]);
        let (set, audit) = apply_rules(set, &default_rules());
        assert_eq!(set.records[0].subregion.as_deref(), Some("Central America"));
        assert_eq!(audit.applied.len(), 1);
        // Every other rule missed on this single-row table.
        assert_eq!(audit.missed.len(), default_rules().len() - 1);
    }
}
