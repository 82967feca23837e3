//! Insight policy: maps the current violation set to a summary plus
//! prioritized recommendations. A learned model is tried first when one
//! was loaded; any model failure degrades deterministically to the
//! rule-based policy.

mod model;

pub use model::{ModelError, RecommendationModel, ScoredModel, ViolationFeatures};

use super::domain::{ComplianceCheck, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl RecommendationPriority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: RecommendationPriority,
    pub description: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightSummary {
    pub total_violations: usize,
    pub critical_violations: usize,
    pub frameworks_affected: usize,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiInsights {
    pub summary: InsightSummary,
    pub recommendations: Vec<Recommendation>,
}

/// Strategy holder fixed at construction: either a loaded model with the
/// rule-based fallback behind it, or fallback only.
pub struct InsightEngine {
    model: Option<Box<dyn RecommendationModel>>,
}

impl InsightEngine {
    pub fn new(model: Option<Box<dyn RecommendationModel>>) -> Self {
        Self { model }
    }

    /// Builds the engine from an optional artifact path. A missing or
    /// unloadable artifact is logged once and leaves the engine in
    /// fallback-only mode; it never fails startup.
    pub fn from_artifact(path: Option<&Path>) -> Self {
        let model = path.and_then(|path| match ScoredModel::load(path) {
            Ok(model) => Some(Box::new(model) as Box<dyn RecommendationModel>),
            Err(err) => {
                warn!(path = %path.display(), %err, "insight model unavailable, using rule-based fallback");
                None
            }
        });
        Self { model }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Generates insights for the given violations. The summary is
    /// computed the same way for both strategies; only the recommendation
    /// list differs.
    pub fn generate(&self, violations: &[ComplianceCheck], now: DateTime<Utc>) -> AiInsights {
        let summary = summarize(violations, now);
        if violations.is_empty() {
            return AiInsights {
                summary,
                recommendations: Vec::new(),
            };
        }

        let recommendations = match &self.model {
            Some(model) => {
                let features: Vec<ViolationFeatures> = violations
                    .iter()
                    .map(|violation| ViolationFeatures {
                        is_critical: violation.severity == Severity::Critical,
                        is_high: violation.severity == Severity::High,
                        risk_score: violation.risk_score,
                        description_length: violation.description.len(),
                    })
                    .collect();

                match model.recommend(&features) {
                    Ok(recommendations) => recommendations,
                    Err(err) => {
                        warn!(%err, "insight model inference failed, using rule-based fallback");
                        fallback_recommendations(violations)
                    }
                }
            }
            None => fallback_recommendations(violations),
        };

        AiInsights {
            summary,
            recommendations,
        }
    }
}

fn summarize(violations: &[ComplianceCheck], now: DateTime<Utc>) -> InsightSummary {
    let critical_violations = violations
        .iter()
        .filter(|violation| violation.severity == Severity::Critical)
        .count();
    let frameworks_affected = violations
        .iter()
        .map(|violation| violation.framework.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    InsightSummary {
        total_violations: violations.len(),
        critical_violations,
        frameworks_affected,
        last_updated: now,
    }
}

/// Deterministic rule-based policy: one recommendation per populated
/// bucket, emitted critical first, then high, then a generic entry for
/// everything else.
fn fallback_recommendations(violations: &[ComplianceCheck]) -> Vec<Recommendation> {
    let critical = violations
        .iter()
        .filter(|violation| violation.severity == Severity::Critical)
        .count();
    let high = violations
        .iter()
        .filter(|violation| violation.severity == Severity::High)
        .count();

    let mut recommendations = Vec::new();
    if critical > 0 {
        recommendations.push(Recommendation {
            priority: RecommendationPriority::High,
            description: format!("Address {critical} critical violations immediately"),
            action: "Review and fix critical compliance issues".to_string(),
        });
    }
    if high > 0 {
        recommendations.push(Recommendation {
            priority: RecommendationPriority::Medium,
            description: format!("Address {high} high-severity violations"),
            action: "Schedule remediation for high-priority issues".to_string(),
        });
    }
    if violations.len() > critical + high {
        recommendations.push(Recommendation {
            priority: RecommendationPriority::Low,
            description: "Review remaining compliance violations".to_string(),
            action: "Plan systematic review of all violations".to_string(),
        });
    }

    recommendations
}
