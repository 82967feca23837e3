use super::round2;
use super::views::{DashboardSummary, ProviderStats};
use crate::checks::domain::{CheckStatus, ComplianceCheck, Severity};
use std::collections::BTreeMap;

const RECENT_VIOLATION_LIMIT: usize = 10;

/// Folds a snapshot into the dashboard rollup: compliance counts, average
/// risk per framework, per-provider totals, and the ten most recent
/// violations.
pub fn compute_dashboard(records: &[ComplianceCheck]) -> DashboardSummary {
    let total_checks = records.len();
    let compliant = records
        .iter()
        .filter(|record| record.status == CheckStatus::Passing)
        .count();
    let non_compliant = total_checks - compliant;
    let critical_count = records
        .iter()
        .filter(|record| record.severity == Severity::Critical)
        .count();

    let mut framework_sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = framework_sums
            .entry(record.framework.clone())
            .or_insert((0.0, 0));
        entry.0 += record.risk_score;
        entry.1 += 1;
    }
    let framework_scores = framework_sums
        .into_iter()
        .map(|(framework, (sum, count))| (framework, round2(sum / count as f64)))
        .collect();

    let mut provider_stats: BTreeMap<String, ProviderStats> = BTreeMap::new();
    for record in records {
        let entry = provider_stats
            .entry(record.provider.clone())
            .or_insert(ProviderStats {
                total: 0,
                critical: 0,
            });
        entry.total += 1;
        if record.severity == Severity::Critical && record.is_violation() {
            entry.critical += 1;
        }
    }

    let mut recent_violations: Vec<ComplianceCheck> = records
        .iter()
        .filter(|record| record.is_violation())
        .cloned()
        .collect();
    // Stable sort keeps input order for equal timestamps.
    recent_violations.sort_by(|a, b| b.last_checked.cmp(&a.last_checked));
    recent_violations.truncate(RECENT_VIOLATION_LIMIT);

    DashboardSummary {
        total_checks,
        compliant,
        non_compliant,
        critical_count,
        framework_scores,
        provider_stats,
        recent_violations,
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{check, hours_ago};
    use super::*;
    use chrono::Utc;

    #[test]
    fn empty_input_yields_zeroed_summary() {
        let summary = compute_dashboard(&[]);
        assert_eq!(summary.total_checks, 0);
        assert_eq!(summary.compliant, 0);
        assert_eq!(summary.non_compliant, 0);
        assert_eq!(summary.critical_count, 0);
        assert!(summary.framework_scores.is_empty());
        assert!(summary.provider_stats.is_empty());
        assert!(summary.recent_violations.is_empty());
    }

    #[test]
    fn counts_match_worked_example() {
        let now = Utc::now();
        let records = vec![
            check(
                "a",
                "SOC2",
                "AWS",
                Severity::Critical,
                CheckStatus::Failing,
                9.0,
                hours_ago(now, 1),
            ),
            check(
                "b",
                "GDPR",
                "Azure",
                Severity::Low,
                CheckStatus::Passing,
                1.0,
                hours_ago(now, 2),
            ),
            check(
                "c",
                "SOC2",
                "AWS",
                Severity::High,
                CheckStatus::Warning,
                6.0,
                hours_ago(now, 3),
            ),
        ];

        let summary = compute_dashboard(&records);
        assert_eq!(summary.total_checks, 3);
        assert_eq!(summary.compliant, 1);
        assert_eq!(summary.non_compliant, 2);
        assert_eq!(summary.critical_count, 1);
        assert_eq!(summary.compliant + summary.non_compliant, summary.total_checks);
    }

    #[test]
    fn framework_scores_average_and_round() {
        let now = Utc::now();
        let records = vec![
            check(
                "a",
                "SOC2",
                "AWS",
                Severity::Low,
                CheckStatus::Passing,
                1.0,
                now,
            ),
            check(
                "b",
                "SOC2",
                "AWS",
                Severity::Low,
                CheckStatus::Passing,
                2.005,
                now,
            ),
            check(
                "c",
                "GDPR",
                "AWS",
                Severity::Low,
                CheckStatus::Passing,
                4.0,
                now,
            ),
        ];

        let summary = compute_dashboard(&records);
        assert_eq!(summary.framework_scores["SOC2"], 1.5);
        assert_eq!(summary.framework_scores["GDPR"], 4.0);
        assert!(!summary.framework_scores.contains_key("HIPAA"));
    }

    #[test]
    fn provider_critical_excludes_passing_checks() {
        let now = Utc::now();
        let records = vec![
            check(
                "a",
                "SOC2",
                "AWS",
                Severity::Critical,
                CheckStatus::Failing,
                9.0,
                now,
            ),
            check(
                "b",
                "SOC2",
                "AWS",
                Severity::Critical,
                CheckStatus::Passing,
                9.0,
                now,
            ),
            check(
                "c",
                "SOC2",
                "Azure",
                Severity::High,
                CheckStatus::Failing,
                7.0,
                now,
            ),
        ];

        let summary = compute_dashboard(&records);
        assert_eq!(
            summary.provider_stats["AWS"],
            ProviderStats {
                total: 2,
                critical: 1
            }
        );
        assert_eq!(
            summary.provider_stats["Azure"],
            ProviderStats {
                total: 1,
                critical: 0
            }
        );
    }

    #[test]
    fn recent_violations_sorted_capped_and_stable() {
        let now = Utc::now();
        let mut records = Vec::new();
        for i in 0..12 {
            records.push(check(
                &format!("v{i}"),
                "SOC2",
                "AWS",
                Severity::Medium,
                CheckStatus::Failing,
                5.0,
                hours_ago(now, i),
            ));
        }
        // Two violations sharing a timestamp must keep input order.
        records.push(check(
            "tie-first",
            "SOC2",
            "AWS",
            Severity::Medium,
            CheckStatus::Warning,
            5.0,
            hours_ago(now, 2),
        ));
        records.push(check(
            "tie-second",
            "SOC2",
            "AWS",
            Severity::Medium,
            CheckStatus::Warning,
            5.0,
            hours_ago(now, 2),
        ));
        records.push(check(
            "passing",
            "SOC2",
            "AWS",
            Severity::Low,
            CheckStatus::Passing,
            1.0,
            now,
        ));

        let summary = compute_dashboard(&records);
        assert_eq!(summary.recent_violations.len(), 10);
        assert!(summary
            .recent_violations
            .windows(2)
            .all(|pair| pair[0].last_checked >= pair[1].last_checked));
        assert!(summary
            .recent_violations
            .iter()
            .all(|violation| violation.id != "passing"));

        let tie_first = summary
            .recent_violations
            .iter()
            .position(|v| v.id == "v2")
            .expect("v2 within cap");
        let tie_second = summary
            .recent_violations
            .iter()
            .position(|v| v.id == "tie-first")
            .expect("tie-first within cap");
        let tie_third = summary
            .recent_violations
            .iter()
            .position(|v| v.id == "tie-second")
            .expect("tie-second within cap");
        assert!(tie_first < tie_second && tie_second < tie_third);
    }
}
