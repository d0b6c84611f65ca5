use super::super::features::ClientFeatureVector;
use super::{ScoreComponent, ScoreKind, ScoreResult};

/// Accounts younger than this have their risk scaled by `age / 90` so that
/// necessarily low-activity new accounts are not flagged as high risk.
pub const NEW_ACCOUNT_DAMPENING_DAYS: i64 = 90;

/// Risk bands on the 0–1 churn scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn for_score(score: f64) -> Self {
        if score > 0.7 {
            RiskLevel::High
        } else if score > 0.3 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

fn balance_risk(balance: f64) -> f64 {
    if balance < 100.0 {
        1.0
    } else if balance < 1_000.0 {
        0.7
    } else if balance < 5_000.0 {
        0.4
    } else {
        0.1
    }
}

fn activity_decline_risk(features: &ClientFeatureVector) -> f64 {
    let avg_monthly = f64::from(features.yearly_successful_transactions) / 12.0;
    if avg_monthly <= 0.0 {
        // No yearly baseline to decline from.
        return 0.0;
    }

    // Recent + previous windows cover the trailing quarter twice over; the
    // upstream convention averages them over six months.
    let current_monthly =
        f64::from(features.recent_transactions + features.previous_transactions) / 6.0;
    let activity_ratio = current_monthly / avg_monthly;

    if activity_ratio < 0.3 {
        1.0
    } else if activity_ratio < 0.5 {
        0.7
    } else if activity_ratio < 0.7 {
        0.4
    } else {
        0.1
    }
}

/// Churn risk: five weighted sub-scores in `[0, 1]`, dampened for new
/// accounts and capped at `1.0`.
pub fn score_churn(features: &ClientFeatureVector) -> ScoreResult {
    let product_engagement_risk = 1.0 - (f64::from(features.product_count()) / 3.0).min(1.0);

    let payment_issue_risk = (f64::from(features.late_installments + features.delinquent_loans)
        / f64::from(features.loan_count.max(1)))
    .min(1.0);

    let engagement_risk = if features.recent_transactions < 5
        && features.days_active > 180
    {
        0.8
    } else {
        0.0
    };

    let components = vec![
        ScoreComponent {
            name: "balance_risk",
            value: balance_risk(features.balance),
            weight: 0.25,
        },
        ScoreComponent {
            name: "product_engagement",
            value: product_engagement_risk,
            weight: 0.20,
        },
        ScoreComponent {
            name: "payment_issues",
            value: payment_issue_risk,
            weight: 0.25,
        },
        ScoreComponent {
            name: "activity_risk",
            value: activity_decline_risk(features),
            weight: 0.15,
        },
        ScoreComponent {
            name: "engagement_risk",
            value: engagement_risk,
            weight: 0.15,
        },
    ];

    let base_risk: f64 = components.iter().map(ScoreComponent::weighted).sum();

    let damped = if features.days_active < NEW_ACCOUNT_DAMPENING_DAYS {
        base_risk * (features.days_active as f64 / NEW_ACCOUNT_DAMPENING_DAYS as f64)
    } else {
        base_risk
    };
    let score = damped.min(1.0);

    ScoreResult {
        client_id: features.client_id,
        kind: ScoreKind::Churn,
        score,
        band: RiskLevel::for_score(score).label(),
        components,
    }
}
