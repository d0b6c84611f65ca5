//! Per-client scoring models: credit, churn risk, and lifetime value.
//!
//! Each model is a stateless function over a [`ClientFeatureVector`]
//! producing a [`ScoreResult`]: a weighted composite of capped sub-scores
//! plus a categorical band derived from fixed thresholds.

mod churn;
mod credit;
mod value;

pub use churn::{score_churn, RiskLevel, NEW_ACCOUNT_DAMPENING_DAYS};
pub use credit::{score_credit, CreditRating, CREDIT_SCORE_MAX, CREDIT_SCORE_MIN};
pub use value::{score_value, ValueSegment};

use serde::Serialize;

use super::domain::ClientId;

/// The scoring model that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Credit,
    Churn,
    Value,
}

impl ScoreKind {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreKind::Credit => "credit",
            ScoreKind::Churn => "churn",
            ScoreKind::Value => "value",
        }
    }
}

/// Discrete contribution to a composite score, kept for transparent audits.
/// `value` is the capped sub-score before weighting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub name: &'static str,
    pub value: f64,
    pub weight: f64,
}

impl ScoreComponent {
    pub fn weighted(&self) -> f64 {
        self.value * self.weight
    }
}

/// Output of one scoring model for one client.
///
/// `score` is the headline value on the model's own scale: an integer-valued
/// 300–850 figure for `credit`, and a 0–1 figure for `churn` and `value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub client_id: ClientId,
    pub kind: ScoreKind,
    pub score: f64,
    pub band: &'static str,
    pub components: Vec<ScoreComponent>,
}

impl ScoreResult {
    /// Sum of the weighted components, in `[0, 1]` for every model.
    pub fn composite(&self) -> f64 {
        self.components
            .iter()
            .map(ScoreComponent::weighted)
            .sum::<f64>()
    }
}

/// Cap a raw sub-score into `[0, 1]`.
pub(crate) fn capped(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
