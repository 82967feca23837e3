use super::round2;
use super::views::{CountEntry, DetailedStatistics, StatsOverview};
use crate::checks::domain::{ComplianceCheck, Severity};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

const TREND_WINDOW_DAYS: i64 = 7;

/// Detailed grouped statistics. Severity counts are zero-filled across the
/// closed enum; framework, provider, and status groupings only list values
/// actually present. That asymmetry matches the upstream reporting contract
/// and is pinned by tests.
pub fn compute_statistics(records: &[ComplianceCheck], now: DateTime<Utc>) -> DetailedStatistics {
    let total_checks = records.len();
    let avg_risk_score = if total_checks > 0 {
        round2(records.iter().map(|r| r.risk_score).sum::<f64>() / total_checks as f64)
    } else {
        0.0
    };
    let critical_violations = records
        .iter()
        .filter(|record| record.severity == Severity::Critical)
        .count();

    let mut by_severity: BTreeMap<String, usize> = Severity::ordered()
        .into_iter()
        .map(|severity| (severity.label().to_string(), 0))
        .collect();
    for record in records {
        *by_severity
            .get_mut(record.severity.label())
            .expect("severity map is pre-filled") += 1;
    }

    let mut by_framework: BTreeMap<String, CountEntry> = BTreeMap::new();
    let mut by_provider: BTreeMap<String, CountEntry> = BTreeMap::new();
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        by_framework
            .entry(record.framework.clone())
            .or_insert(CountEntry { count: 0 })
            .count += 1;
        by_provider
            .entry(record.provider.clone())
            .or_insert(CountEntry { count: 0 })
            .count += 1;
        *by_status.entry(record.status.label().to_string()).or_insert(0) += 1;
    }

    let week_ago = now - Duration::days(TREND_WINDOW_DAYS);
    let mut trends: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        if record.last_checked >= week_ago {
            let day = record.last_checked.format("%Y-%m-%d").to_string();
            *trends.entry(day).or_insert(0) += 1;
        }
    }

    DetailedStatistics {
        overview: StatsOverview {
            total_checks,
            avg_risk_score,
            critical_violations,
            last_updated: now,
        },
        by_severity,
        by_framework,
        by_provider,
        by_status,
        trends,
    }
}
