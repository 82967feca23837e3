//! Offline reporting command: ingest a CSV export and print the same
//! rollups the HTTP endpoints serve, for demos and spot checks.

use chrono::Utc;
use clap::Args;
use compliance_tracker::checks::{
    compute_dashboard, compute_statistics, parse_csv, ComplianceCheck, InsightEngine,
};
use compliance_tracker::error::AppError;
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Path to a CSV export of compliance checks
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Emit the full report as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let file = File::open(&args.csv)?;
    let records = parse_csv(file)?;

    let now = Utc::now();
    let dashboard = compute_dashboard(&records);
    let statistics = compute_statistics(&records, now);

    let violations: Vec<ComplianceCheck> = records
        .into_iter()
        .filter(|record| record.is_violation())
        .collect();
    let insights = InsightEngine::new(None).generate(&violations, now);

    if args.json {
        let report = json!({
            "dashboard": dashboard,
            "statistics": statistics,
            "insights": insights,
        });
        println!("{}", serde_json::to_string_pretty(&report).expect("report serializes"));
        return Ok(());
    }

    println!("Compliance report for {}", args.csv.display());
    println!(
        "  checks: {} total, {} compliant, {} non-compliant, {} critical",
        dashboard.total_checks,
        dashboard.compliant,
        dashboard.non_compliant,
        dashboard.critical_count
    );
    println!(
        "  average risk score: {:.2}",
        statistics.overview.avg_risk_score
    );
    for (framework, score) in &dashboard.framework_scores {
        println!("  {framework}: average risk {score:.2}");
    }
    for (provider, stats) in &dashboard.provider_stats {
        println!(
            "  {provider}: {} checks, {} critical failing",
            stats.total, stats.critical
        );
    }
    println!(
        "  violations: {} ({} critical, {} frameworks affected)",
        insights.summary.total_violations,
        insights.summary.critical_violations,
        insights.summary.frameworks_affected
    );
    for recommendation in &insights.recommendations {
        println!(
            "  [{}] {} -> {}",
            recommendation.priority.label(),
            recommendation.description,
            recommendation.action
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn report_runs_against_a_csv_file() {
        let path = std::env::temp_dir().join(format!(
            "compliance-report-demo-{}.csv",
            std::process::id()
        ));
        let mut file = File::create(&path).expect("temp csv created");
        writeln!(
            file,
            "framework,provider,severity,status,risk_score,description,last_checked"
        )
        .expect("header written");
        writeln!(
            file,
            "SOC2,AWS,Critical,Failing,9.0,Unencrypted transport,2025-08-20T10:00:00Z"
        )
        .expect("row written");

        run_report(ReportArgs {
            csv: path.clone(),
            json: true,
        })
        .expect("report succeeds");

        let _ = std::fs::remove_file(path);
    }
}
