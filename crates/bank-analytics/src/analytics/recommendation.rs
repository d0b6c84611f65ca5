//! Loan recommendations: a rule cascade over the client's feature vector and
//! credit score, each rule contributing at most one product.

use serde::Serialize;

use super::domain::LoanProduct;
use super::features::ClientFeatureVector;
use super::scoring::{ScoreResult, CREDIT_SCORE_MIN};

/// Pricing tier attached to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateTier {
    Premium,
    Standard,
    Competitive,
    Business,
}

impl RateTier {
    pub const fn label(self) -> &'static str {
        match self {
            RateTier::Premium => "Premium",
            RateTier::Standard => "Standard",
            RateTier::Competitive => "Competitive",
            RateTier::Business => "Business",
        }
    }
}

/// One suggested loan product with its sizing and pricing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub product: LoanProduct,
    pub max_amount: f64,
    pub confidence: f64,
    pub rate_tier: RateTier,
    pub term: &'static str,
    pub description: &'static str,
    pub rationale: Vec<String>,
}

/// Map a 300–850 credit score onto a 0–100 repayment likelihood.
///
/// The floor of 20 reflects that even the weakest scored client carries some
/// repayment probability; the ceiling of 80 leaves headroom for signals the
/// score does not capture.
pub fn likelihood_to_repay(credit_score: f64) -> f64 {
    20.0 + (credit_score - CREDIT_SCORE_MIN) / 550.0 * 60.0
}

/// Turn the strongest credit components into human-readable rationale lines
/// shared by every recommendation in the batch.
fn rationale_from(credit: &ScoreResult) -> Vec<String> {
    let mut lines = Vec::new();
    for component in &credit.components {
        let strength = if component.value > 0.7 {
            "strong"
        } else if component.value > 0.4 {
            "moderate"
        } else {
            continue;
        };
        lines.push(format!(
            "{} {} ({:.2})",
            strength,
            component.name.replace('_', " "),
            component.value
        ));
    }
    if lines.is_empty() {
        lines.push(format!(
            "limited credit history, score {:.0} ({})",
            credit.score, credit.band
        ));
    }
    lines
}

struct Cascade {
    recommendations: Vec<Recommendation>,
    rationale: Vec<String>,
}

impl Cascade {
    fn push(
        &mut self,
        product: LoanProduct,
        max_amount: f64,
        confidence: f64,
        rate_tier: RateTier,
        term: &'static str,
        description: &'static str,
    ) {
        // Each product appears at most once; the first (strongest) rule wins.
        if self.recommendations.iter().any(|r| r.product == product) {
            return;
        }
        self.recommendations.push(Recommendation {
            product,
            max_amount,
            confidence,
            rate_tier,
            term,
            description,
            rationale: self.rationale.clone(),
        });
    }
}

/// Evaluate the full rule cascade for one client.
///
/// Rules fire independently, in order of decreasing confidence, and a
/// product already recommended by an earlier rule is never re-added. A
/// client matching no rule gets an empty list, not an error.
pub fn recommend_loans(features: &ClientFeatureVector, credit: &ScoreResult) -> Vec<Recommendation> {
    let likelihood = likelihood_to_repay(credit.score);
    let mut cascade = Cascade {
        recommendations: Vec::new(),
        rationale: rationale_from(credit),
    };

    if likelihood > 70.0 && features.balance > 10_000.0 {
        cascade.push(
            LoanProduct::Premium,
            (features.balance * 5.0).min(200_000.0),
            0.9,
            RateTier::Premium,
            "12-84 months",
            "Premium loan with preferential rates for high-value clients",
        );
    }

    if likelihood >= 60.0 {
        cascade.push(
            LoanProduct::Personal,
            (features.balance * 3.0).min(100_000.0),
            0.7,
            RateTier::Standard,
            "12-60 months",
            "Personal loan with standard terms",
        );
        if features.credit_card_ratio < 0.5 {
            cascade.push(
                LoanProduct::CreditCard,
                (features.balance * 0.3).min(20_000.0),
                0.6,
                RateTier::Standard,
                "Revolving",
                "Credit card to complement existing products",
            );
        }
    }

    if features.transaction_count > 20 && features.transaction_success_rate > 0.7 {
        cascade.push(
            LoanProduct::Personal,
            (features.balance * 2.0).min(50_000.0),
            0.5,
            RateTier::Standard,
            "12-36 months",
            "Personal loan based on consistent transaction history",
        );
        if features.card_count == 0 && features.balance > 1_000.0 {
            cascade.push(
                LoanProduct::CreditCard,
                (features.balance * 0.2).min(10_000.0),
                0.4,
                RateTier::Standard,
                "Revolving",
                "Starter credit card for active transactors",
            );
        }
    }

    if features.has_foreign_account {
        cascade.push(
            LoanProduct::ForeignCurrency,
            (features.balance * 2.0).min(100_000.0),
            0.7,
            RateTier::Competitive,
            "Flexible",
            "Foreign currency loan matching international activity",
        );
    }

    if features.activity_level > 0.5 {
        cascade.push(
            LoanProduct::Business,
            (features.balance * 3.0).min(150_000.0),
            0.6,
            RateTier::Business,
            "12-60 months",
            "Business loan for highly active clients",
        );
    }

    cascade.recommendations
}
