use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable patient identifier.
///
/// The canonical text form (see [`PatientId::seed_key`]) is the entropy
/// source for success-rate sampling, so `Numeric(42)` and `Text("42")`
/// sample identically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatientId {
    Numeric(u64),
    Text(String),
}

impl PatientId {
    /// Parse from free text: all-digit values become `Numeric`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<u64>() {
            Ok(n) => PatientId::Numeric(n),
            Err(_) => PatientId::Text(trimmed.to_string()),
        }
    }

    /// Canonical bytes fed into seed derivation
    pub fn seed_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientId::Numeric(n) => write!(f, "{n}"),
            PatientId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for PatientId {
    fn from(n: u64) -> Self {
        PatientId::Numeric(n)
    }
}

impl From<&str> for PatientId {
    fn from(s: &str) -> Self {
        PatientId::parse(s)
    }
}

impl From<String> for PatientId {
    fn from(s: String) -> Self {
        PatientId::parse(&s)
    }
}
