//! Compliance-check domain: record model, CSV ingestion, the persistent
//! store, the reporting engine, and the insight policy.

pub mod domain;
pub mod ingest;
pub mod insights;
pub mod report;
pub mod store;

pub use domain::{CheckStatus, ComplianceCheck, Severity};
pub use ingest::{parse_csv, IngestError};
pub use insights::{AiInsights, InsightEngine, Recommendation, RecommendationPriority};
pub use report::{compute_dashboard, compute_statistics, perform_scan};
pub use store::{CheckStore, StoreError};
