use super::super::features::ClientFeatureVector;
use super::{capped, ScoreComponent, ScoreKind, ScoreResult};

/// Lifetime-value segments on the 0–1 composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSegment {
    Premium,
    Standard,
    Basic,
}

impl ValueSegment {
    pub fn for_score(score: f64) -> Self {
        if score > 0.8 {
            ValueSegment::Premium
        } else if score > 0.4 {
            ValueSegment::Standard
        } else {
            ValueSegment::Basic
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ValueSegment::Premium => "Premium",
            ValueSegment::Standard => "Standard",
            ValueSegment::Basic => "Basic",
        }
    }
}

/// Client lifetime value: five capped components, weighted, in `[0, 1]`.
pub fn score_value(features: &ClientFeatureVector) -> ScoreResult {
    let components = vec![
        ScoreComponent {
            name: "balance_score",
            value: capped(features.balance / 10_000.0),
            weight: 0.30,
        },
        ScoreComponent {
            name: "transaction_score",
            value: capped(f64::from(features.transaction_count) / 100.0),
            weight: 0.20,
        },
        ScoreComponent {
            name: "amount_score",
            value: capped(features.total_transaction_amount / 100_000.0),
            weight: 0.20,
        },
        ScoreComponent {
            name: "product_score",
            value: capped(f64::from(features.card_count) / 2.0),
            weight: 0.15,
        },
        ScoreComponent {
            name: "loyalty_score",
            value: capped(features.days_active as f64 / 365.0),
            weight: 0.15,
        },
    ];

    let score: f64 = components.iter().map(ScoreComponent::weighted).sum();

    ScoreResult {
        client_id: features.client_id,
        kind: ScoreKind::Value,
        score,
        band: ValueSegment::for_score(score).label(),
        components,
    }
}
