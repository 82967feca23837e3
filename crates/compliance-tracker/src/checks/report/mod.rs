//! Pure reporting functions over a snapshot of compliance checks. Every
//! function is deterministic for a given input and `now`, and produces a
//! fully zero-filled result for empty input.

mod dashboard;
mod scan;
mod statistics;
pub mod views;

pub use dashboard::compute_dashboard;
pub use scan::perform_scan;
pub use statistics::compute_statistics;

/// Rounds to two decimal places, the precision every averaged risk score
/// is reported at.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::checks::domain::{CheckStatus, ComplianceCheck, Severity};
    use chrono::{DateTime, Duration, Utc};

    pub(crate) fn check(
        id: &str,
        framework: &str,
        provider: &str,
        severity: Severity,
        status: CheckStatus,
        risk_score: f64,
        last_checked: DateTime<Utc>,
    ) -> ComplianceCheck {
        ComplianceCheck {
            id: id.to_string(),
            framework: framework.to_string(),
            provider: provider.to_string(),
            severity,
            status,
            risk_score,
            description: format!("{framework} control {id}"),
            last_checked,
            ai_summary: None,
        }
    }

    pub(crate) fn hours_ago(now: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
        now - Duration::hours(hours)
    }
}
