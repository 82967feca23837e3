use super::domain::{CheckStatus, ComplianceCheck, Severity};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use uuid::Uuid;

const REQUIRED_COLUMNS: [&str; 7] = [
    "framework",
    "provider",
    "severity",
    "status",
    "risk_score",
    "description",
    "last_checked",
];

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("invalid CSV payload: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("row {line}: {reason}")]
    Row { line: usize, reason: String },
}

/// Parses a CSV payload into validated checks. All-or-nothing: any
/// malformed row rejects the whole batch so the store is never left with
/// a partial upload.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<ComplianceCheck>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<CheckRow>().enumerate() {
        // Header occupies line 1.
        let line = index + 2;
        let row = row?;
        records.push(row.into_check(line)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CheckRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    framework: String,
    provider: String,
    severity: String,
    status: String,
    risk_score: String,
    description: String,
    last_checked: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    ai_summary: Option<String>,
}

impl CheckRow {
    fn into_check(self, line: usize) -> Result<ComplianceCheck, IngestError> {
        let row_error = |reason: String| IngestError::Row { line, reason };

        let severity = Severity::parse(&self.severity)
            .ok_or_else(|| row_error(format!("unknown severity '{}'", self.severity)))?;
        let status = CheckStatus::parse(&self.status)
            .ok_or_else(|| row_error(format!("unknown status '{}'", self.status)))?;

        let risk_score: f64 = self
            .risk_score
            .trim()
            .parse()
            .map_err(|_| row_error(format!("risk_score '{}' is not a number", self.risk_score)))?;
        if !(0.0..=10.0).contains(&risk_score) {
            return Err(row_error(format!(
                "risk_score {risk_score} outside the 0.0..=10.0 range"
            )));
        }

        let last_checked = parse_timestamp(&self.last_checked).ok_or_else(|| {
            row_error(format!(
                "last_checked '{}' is not a recognized timestamp",
                self.last_checked
            ))
        })?;

        if self.description.trim().is_empty() {
            return Err(row_error("description must not be empty".to_string()));
        }

        Ok(ComplianceCheck {
            id: self
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            framework: self.framework,
            provider: self.provider,
            severity,
            status,
            risk_score,
            description: self.description,
            last_checked,
            ai_summary: self.ai_summary,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CSV: &str = "\
framework,provider,severity,status,risk_score,description,last_checked
SOC2,AWS,Critical,Failing,9.0,Unencrypted transport,2025-08-20T10:00:00Z
GDPR,Azure,Low,Passing,1.0,Retention policy verified,2025-08-19 08:30:00
";

    #[test]
    fn parses_valid_rows_and_generates_ids() {
        let records = parse_csv(VALID_CSV.as_bytes()).expect("valid payload parses");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].severity, Severity::Critical);
        assert_eq!(records[1].status, CheckStatus::Passing);
        assert!(!records[0].id.is_empty());
        assert_ne!(records[0].id, records[1].id);
    }

    #[test]
    fn keeps_explicit_ids() {
        let csv = "\
id,framework,provider,severity,status,risk_score,description,last_checked
chk-7,HIPAA,GCP,High,Warning,6.5,Audit trail gaps,2025-08-18
";
        let records = parse_csv(csv.as_bytes()).expect("payload parses");
        assert_eq!(records[0].id, "chk-7");
        assert_eq!(
            records[0].last_checked,
            NaiveDate::from_ymd_opt(2025, 8, 18)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
                .expect("valid date")
        );
    }

    #[test]
    fn rejects_missing_required_columns() {
        let csv = "framework,provider,severity,status,description,last_checked\n";
        let err = parse_csv(csv.as_bytes()).expect_err("missing risk_score rejected");
        match err {
            IngestError::MissingColumns(columns) => {
                assert_eq!(columns, vec!["risk_score".to_string()])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_out_of_range_risk_score() {
        let csv = "\
framework,provider,severity,status,risk_score,description,last_checked
SOC2,AWS,Low,Passing,11.2,Too risky,2025-08-20T10:00:00Z
";
        let err = parse_csv(csv.as_bytes()).expect_err("range enforced");
        assert!(matches!(err, IngestError::Row { line: 2, .. }));
    }

    #[test]
    fn rejects_unknown_enum_values() {
        let csv = "\
framework,provider,severity,status,risk_score,description,last_checked
SOC2,AWS,Severe,Failing,5.0,Bad severity,2025-08-20T10:00:00Z
";
        let err = parse_csv(csv.as_bytes()).expect_err("unknown severity rejected");
        assert!(err.to_string().contains("unknown severity"));
    }

    #[test]
    fn rejects_unparseable_timestamps() {
        let csv = "\
framework,provider,severity,status,risk_score,description,last_checked
SOC2,AWS,Low,Passing,2.0,Fine otherwise,yesterday
";
        let err = parse_csv(csv.as_bytes()).expect_err("timestamp rejected");
        assert!(err.to_string().contains("last_checked"));
    }
}
