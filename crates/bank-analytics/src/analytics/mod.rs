//! Behavioral analytics over bank client records.
//!
//! The pipeline is provider -> snapshot -> feature vector -> models. The
//! [`provider::DataProvider`] trait abstracts the record source, the
//! aggregator flattens a snapshot into a [`features::ClientFeatureVector`],
//! and the scoring, segmentation, and recommendation modules are pure
//! functions over those vectors. [`service::AnalyticsService`] ties the
//! stages together and [`router::analytics_router`] exposes them over HTTP.

pub mod domain;
pub mod features;
pub mod provider;
pub mod recommendation;
pub mod router;
pub mod scoring;
pub mod segmentation;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Account, AccountOwnerType, AccountStatus, AccountType, Card, CardStatus, CardType, ClientId,
    Installment, InstallmentStatus, Loan, LoanProduct, LoanStatus, Payment, PaymentStatus,
};
pub use features::{aggregate, ClientFeatureVector};
pub use provider::{ClientSnapshot, DataProvider, ProviderError};
pub use recommendation::{likelihood_to_repay, recommend_loans, RateTier, Recommendation};
pub use router::analytics_router;
pub use scoring::{
    score_churn, score_credit, score_value, CreditRating, RiskLevel, ScoreComponent, ScoreKind,
    ScoreResult, ValueSegment,
};
pub use segmentation::{
    segment_population, segment_population_with, ClusterProfile, Clusterer, KMeansClusterer,
    SegmentAssignment, SegmentationError, SegmentationOutcome,
};
pub use service::{AnalyticsError, AnalyticsService};
