use super::views::ScanResult;
use crate::checks::domain::ComplianceCheck;
use chrono::{DateTime, Utc};

/// Filters the snapshot down to violations. Never truncates; callers that
/// want a capped preview apply their own limit.
pub fn perform_scan(records: &[ComplianceCheck], now: DateTime<Utc>) -> ScanResult {
    let results = records
        .iter()
        .filter(|record| record.is_violation())
        .cloned()
        .collect();

    ScanResult {
        results,
        scanned_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{check, hours_ago};
    use super::*;
    use crate::checks::domain::{CheckStatus, Severity};

    #[test]
    fn empty_input_yields_empty_scan() {
        let now = Utc::now();
        let scan = perform_scan(&[], now);
        assert!(scan.results.is_empty());
        assert_eq!(scan.scanned_at, now);
    }

    #[test]
    fn scan_keeps_every_violation_exactly_once_and_drops_passing() {
        let now = Utc::now();
        let mut records = Vec::new();
        for i in 0..15 {
            let status = match i % 3 {
                0 => CheckStatus::Passing,
                1 => CheckStatus::Failing,
                _ => CheckStatus::Warning,
            };
            records.push(check(
                &format!("chk-{i}"),
                "SOC2",
                "AWS",
                Severity::Medium,
                status,
                5.0,
                hours_ago(now, i),
            ));
        }

        let scan = perform_scan(&records, now);
        // Ten of fifteen are non-passing; no cap applies.
        assert_eq!(scan.results.len(), 10);
        assert!(scan.results.iter().all(|r| r.is_violation()));
        for record in records.iter().filter(|r| r.is_violation()) {
            assert_eq!(
                scan.results.iter().filter(|r| r.id == record.id).count(),
                1
            );
        }
    }
}
