use super::super::features::{ratio_or_zero, ClientFeatureVector};
use super::{capped, ScoreComponent, ScoreKind, ScoreResult};

pub const CREDIT_SCORE_MIN: f64 = 300.0;
pub const CREDIT_SCORE_MAX: f64 = 850.0;

/// Span of the credit scale; the composite in `[0, 1]` maps onto it linearly.
const CREDIT_SCORE_SPAN: f64 = 550.0;

/// Rating bands on the 300–850 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CreditRating {
    pub fn for_score(score: f64) -> Self {
        if score >= 750.0 {
            CreditRating::Excellent
        } else if score >= 670.0 {
            CreditRating::Good
        } else if score >= 580.0 {
            CreditRating::Fair
        } else {
            CreditRating::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CreditRating::Excellent => "Excellent",
            CreditRating::Good => "Good",
            CreditRating::Fair => "Fair",
            CreditRating::Poor => "Poor",
        }
    }
}

/// Internal credit score: six capped components, weighted, mapped onto the
/// conventional 300–850 scale. Components with an empty denominator (no
/// transactions, no cards) evaluate to zero rather than erroring.
pub fn score_credit(features: &ClientFeatureVector) -> ScoreResult {
    let transactions = f64::from(features.transaction_count);

    let components = vec![
        ScoreComponent {
            name: "balance_score",
            value: capped(features.balance / 10_000.0),
            weight: 0.25,
        },
        ScoreComponent {
            name: "transaction_reliability",
            value: capped(ratio_or_zero(
                f64::from(features.successful_transactions),
                transactions,
            )),
            weight: 0.20,
        },
        ScoreComponent {
            name: "activity_score",
            value: capped(transactions / 100.0),
            weight: 0.15,
        },
        ScoreComponent {
            name: "average_amount_score",
            value: capped(features.avg_transaction_amount / 1_000.0),
            weight: 0.15,
        },
        ScoreComponent {
            name: "product_diversity",
            value: capped(f64::from(features.card_count) / 2.0),
            weight: 0.10,
        },
        ScoreComponent {
            name: "account_age_score",
            value: capped(features.days_active as f64 / 365.0),
            weight: 0.15,
        },
    ];

    let total: f64 = components.iter().map(ScoreComponent::weighted).sum();
    // Truncate like the integer conversion upstream systems expect.
    let score = (CREDIT_SCORE_MIN + total * CREDIT_SCORE_SPAN).floor();

    ScoreResult {
        client_id: features.client_id,
        kind: ScoreKind::Credit,
        score,
        band: CreditRating::for_score(score).label(),
        components,
    }
}
