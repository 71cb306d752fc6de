use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::AgeTier;

/// A drug entry from the `drugs` section of the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugRecord {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub adult_dose: Option<String>,
    #[serde(default)]
    pub child_dose: Option<String>,
}

impl DrugRecord {
    pub fn dose_for_tier(&self, tier: AgeTier) -> Option<&str> {
        match tier {
            AgeTier::Child => self.child_dose.as_deref(),
            AgeTier::Adult => self.adult_dose.as_deref(),
        }
    }
}

/// Per-drug daily ceilings in milligrams. A missing tier means no known limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseLimit {
    #[serde(default)]
    pub child: Option<u32>,
    #[serde(default)]
    pub adult: Option<u32>,
}

impl DoseLimit {
    pub fn for_tier(&self, tier: AgeTier) -> Option<u32> {
        match tier {
            AgeTier::Child => self.child,
            AgeTier::Adult => self.adult,
        }
    }
}

/// An unordered drug pair plus whatever descriptive fields the data
/// file carries (severity, effect, advice, ...). The extra fields are
/// passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub pair: [String; 2],
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl InteractionRecord {
    /// True when this record pairs `a` with `b`, in either order.
    pub fn involves(&self, a: &str, b: &str) -> bool {
        (self.pair[0] == a && self.pair[1] == b) || (self.pair[0] == b && self.pair[1] == a)
    }

    /// Self-pairs (`[A, A]`) never describe an interaction.
    pub fn is_self_pair(&self) -> bool {
        self.pair[0] == self.pair[1]
    }
}

/// On-disk shape of the knowledge-base document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeData {
    pub drugs: Vec<DrugRecord>,
    #[serde(default)]
    pub max_daily_dose_mg: HashMap<String, DoseLimit>,
    #[serde(default)]
    pub interactions: Vec<InteractionRecord>,
    #[serde(default)]
    pub alternatives: HashMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_keeps_extra_fields() {
        let json = r#"{"pair": ["Warfarin", "Aspirin"], "severity": "high", "effect": "bleeding"}"#;
        let rec: InteractionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.pair, ["Warfarin".to_string(), "Aspirin".to_string()]);
        assert_eq!(rec.details["severity"], "high");

        let back = serde_json::to_value(&rec).unwrap();
        assert_eq!(back["effect"], "bleeding");
        assert_eq!(back["pair"][1], "Aspirin");
    }

    #[test]
    fn interaction_pair_must_have_two_names() {
        let json = r#"{"pair": ["Warfarin"]}"#;
        assert!(serde_json::from_str::<InteractionRecord>(json).is_err());
    }

    #[test]
    fn involves_is_symmetric() {
        let rec = InteractionRecord {
            pair: ["A".into(), "B".into()],
            details: Default::default(),
        };
        assert!(rec.involves("A", "B"));
        assert!(rec.involves("B", "A"));
        assert!(!rec.involves("A", "C"));
    }

    #[test]
    fn dose_limit_either_tier_optional() {
        let limit: DoseLimit = serde_json::from_str(r#"{"adult": 4000}"#).unwrap();
        assert_eq!(limit.for_tier(AgeTier::Adult), Some(4000));
        assert_eq!(limit.for_tier(AgeTier::Child), None);
    }
}
