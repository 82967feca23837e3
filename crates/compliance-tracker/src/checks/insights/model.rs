use super::{Recommendation, RecommendationPriority};
use std::fs;
use std::path::Path;

/// Per-violation feature vector handed to the predictive model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViolationFeatures {
    pub is_critical: bool,
    pub is_high: bool,
    pub risk_score: f64,
    pub description_length: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unable to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact rejected: {0}")]
    Artifact(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Seam for the learned recommendation path. Implementations must be
/// deterministic for a given feature set; any error falls the caller
/// through to the rule-based policy.
pub trait RecommendationModel: Send + Sync {
    fn recommend(&self, features: &[ViolationFeatures]) -> Result<Vec<Recommendation>, ModelError>;
}

/// Linear scoring model loaded from a JSON artifact of feature weights and
/// priority thresholds. Stands in for the trained artifact the insight
/// endpoint was designed around while staying fully deterministic.
#[derive(Debug, serde::Deserialize)]
pub struct ScoredModel {
    weights: FeatureWeights,
    thresholds: PriorityThresholds,
}

#[derive(Debug, serde::Deserialize)]
struct FeatureWeights {
    critical: f64,
    high: f64,
    risk_score: f64,
    description_length: f64,
}

#[derive(Debug, serde::Deserialize)]
struct PriorityThresholds {
    high: f64,
    medium: f64,
}

impl ScoredModel {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&raw)?;
        if model.thresholds.medium > model.thresholds.high {
            return Err(ModelError::Artifact(
                "medium threshold exceeds high threshold".to_string(),
            ));
        }
        Ok(model)
    }

    fn score(&self, features: &ViolationFeatures) -> f64 {
        let critical = if features.is_critical { 1.0 } else { 0.0 };
        let high = if features.is_high { 1.0 } else { 0.0 };
        critical * self.weights.critical
            + high * self.weights.high
            + features.risk_score * self.weights.risk_score
            + features.description_length as f64 * self.weights.description_length
    }
}

impl RecommendationModel for ScoredModel {
    fn recommend(&self, features: &[ViolationFeatures]) -> Result<Vec<Recommendation>, ModelError> {
        let recommendations = features
            .iter()
            .map(|violation| {
                let score = self.score(violation);
                if !score.is_finite() {
                    return Err(ModelError::Inference(
                        "violation score is not finite".to_string(),
                    ));
                }

                let (priority, description, action) = if score >= self.thresholds.high {
                    (
                        RecommendationPriority::High,
                        format!("Violation scored {score:.2}: remediate immediately"),
                        "Open an incident and drive remediation to closure".to_string(),
                    )
                } else if score >= self.thresholds.medium {
                    (
                        RecommendationPriority::Medium,
                        format!("Violation scored {score:.2}: schedule remediation"),
                        "Add to the next remediation sprint".to_string(),
                    )
                } else {
                    (
                        RecommendationPriority::Low,
                        format!("Violation scored {score:.2}: track for review"),
                        "Fold into the periodic compliance review".to_string(),
                    )
                };

                Ok(Recommendation {
                    priority,
                    description,
                    action,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(recommendations)
    }
}
