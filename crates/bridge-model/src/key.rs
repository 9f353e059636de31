//! Grouping keys for bridge assignment.

use serde::Serialize;
use std::fmt;

/// Heuristic record key built from name, cleaned label and classifier output.
///
/// The components are kept as separate fields, so free-form label text can
/// never collide with another key through a shared delimiter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NarrowKey {
    pub variable_name: String,
    pub clean_label: String,
    pub time_period: &'static str,
    pub substance: &'static str,
}

impl fmt::Display for NarrowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.variable_name, self.clean_label, self.time_period, self.substance
        )
    }
}

/// The key a record is grouped under when bridge ids are assigned.
///
/// Starts as [`BridgeKey::Heuristic`] and is rewritten to
/// [`BridgeKey::Confirmed`] when the crosswalk claims the heuristic key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BridgeKey {
    Confirmed(String),
    Heuristic(NarrowKey),
}

impl BridgeKey {
    pub fn as_heuristic(&self) -> Option<&NarrowKey> {
        match self {
            BridgeKey::Heuristic(key) => Some(key),
            BridgeKey::Confirmed(_) => None,
        }
    }
}

impl From<NarrowKey> for BridgeKey {
    fn from(key: NarrowKey) -> Self {
        BridgeKey::Heuristic(key)
    }
}

impl fmt::Display for BridgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeKey::Confirmed(id) => write!(f, "confirmed:{id}"),
            BridgeKey::Heuristic(key) => write!(f, "narrow:{key}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str, label: &str) -> NarrowKey {
        NarrowKey {
            variable_name: name.to_string(),
            clean_label: label.to_string(),
            time_period: "lifetime",
            substance: "marijuana",
        }
    }

    #[test]
    fn delimiter_in_label_does_not_collide() {
        let a = NarrowKey {
            variable_name: "A|B".to_string(),
            clean_label: "C".to_string(),
            time_period: "",
            substance: "other",
        };
        let b = NarrowKey {
            variable_name: "A".to_string(),
            clean_label: "B|C".to_string(),
            time_period: "",
            substance: "other",
        };
        assert_eq!(a.to_string(), b.to_string());
        assert_ne!(a, b);
    }

    #[test]
    fn bridge_key_accessors() {
        let heuristic = BridgeKey::from(key("MRJFLAG", "MARIJUANA"));
        assert_eq!(heuristic.as_heuristic().map(|k| k.variable_name.as_str()), Some("MRJFLAG"));

        let confirmed = BridgeKey::Confirmed("MRJFLAG_x.csv_1".to_string());
        assert!(confirmed.as_heuristic().is_none());
        assert_eq!(confirmed.to_string(), "confirmed:MRJFLAG_x.csv_1");
    }
}
