use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Closed iteration order for zero-filled groupings.
    pub const fn ordered() -> [Self; 4] {
        [Self::Critical, Self::High, Self::Medium, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(Self::Critical),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckStatus {
    Passing,
    Failing,
    Warning,
}

impl CheckStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Passing, Self::Failing, Self::Warning]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Passing => "Passing",
            Self::Failing => "Failing",
            Self::Warning => "Warning",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "passing" => Some(Self::Passing),
            "failing" => Some(Self::Failing),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }
}

/// A single audited control finding. Immutable once ingested; reporting
/// always works over a cloned snapshot of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub id: String,
    pub framework: String,
    pub provider: String,
    pub severity: Severity,
    pub status: CheckStatus,
    pub risk_score: f64,
    pub description: String,
    pub last_checked: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
}

impl ComplianceCheck {
    /// A violation is any check that is not currently passing.
    pub fn is_violation(&self) -> bool {
        self.status != CheckStatus::Passing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels_round_trip() {
        for severity in Severity::ordered() {
            assert_eq!(Severity::parse(severity.label()), Some(severity));
        }
        assert_eq!(Severity::parse("severe"), None);
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(CheckStatus::parse(" FAILING "), Some(CheckStatus::Failing));
        assert_eq!(CheckStatus::parse("ok"), None);
    }

    #[test]
    fn serde_uses_wire_labels() {
        let json = serde_json::to_string(&Severity::Critical).expect("serializes");
        assert_eq!(json, "\"Critical\"");
        let status: CheckStatus = serde_json::from_str("\"Warning\"").expect("deserializes");
        assert_eq!(status, CheckStatus::Warning);
    }
}
