use crate::checks::domain::ComplianceCheck;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-provider rollup on the dashboard. `critical` counts checks that are
/// both critical severity and not passing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStats {
    pub total: usize,
    pub critical: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_checks: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub critical_count: usize,
    pub framework_scores: BTreeMap<String, f64>,
    pub provider_stats: BTreeMap<String, ProviderStats>,
    pub recent_violations: Vec<ComplianceCheck>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOverview {
    pub total_checks: usize,
    pub avg_risk_score: f64,
    pub critical_violations: usize,
    pub last_updated: DateTime<Utc>,
}

/// Group-count wrapper; framework and provider groupings emit `{count: n}`
/// entries rather than bare integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedStatistics {
    pub overview: StatsOverview,
    pub by_severity: BTreeMap<String, usize>,
    pub by_framework: BTreeMap<String, CountEntry>,
    pub by_provider: BTreeMap<String, CountEntry>,
    pub by_status: BTreeMap<String, usize>,
    pub trends: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub results: Vec<ComplianceCheck>,
    pub scanned_at: DateTime<Utc>,
}
