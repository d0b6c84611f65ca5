//! Service facade tying the provider, aggregator, models, and segmentation
//! together behind one API.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;

use super::domain::ClientId;
use super::features::{aggregate, ClientFeatureVector};
use super::provider::{ClientSnapshot, DataProvider, ProviderError};
use super::recommendation::{recommend_loans, Recommendation};
use super::scoring::{score_churn, score_credit, score_value, ScoreResult};
use super::segmentation::{
    segment_population_with, KMeansClusterer, SegmentationError, SegmentationOutcome,
    DEFAULT_CLUSTER_COUNT, DEFAULT_SEED,
};

/// Error enumeration for analytics operations.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("client {0} not found")]
    ClientNotFound(ClientId),
    #[error(transparent)]
    Segmentation(#[from] SegmentationError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Stateless analytics engine over a shared [`DataProvider`].
///
/// Every operation reads a fresh snapshot and recomputes; nothing is cached
/// between calls. Methods without an `_at` suffix evaluate at the current
/// instant; the `_at` variants take an explicit instant for reproducible
/// results.
#[derive(Clone)]
pub struct AnalyticsService<P: DataProvider> {
    provider: Arc<P>,
    default_clusters: usize,
    seed: u64,
}

impl<P: DataProvider> AnalyticsService<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            default_clusters: DEFAULT_CLUSTER_COUNT,
            seed: DEFAULT_SEED,
        }
    }

    /// Override the configured cluster count and clustering seed.
    pub fn with_segmentation_defaults(mut self, default_clusters: usize, seed: u64) -> Self {
        self.default_clusters = default_clusters;
        self.seed = seed;
        self
    }

    /// Cluster count used when a request does not specify one.
    pub fn default_clusters(&self) -> usize {
        self.default_clusters
    }

    fn snapshot(&self, client_id: ClientId) -> Result<ClientSnapshot, AnalyticsError> {
        ClientSnapshot::load(self.provider.as_ref(), client_id)?
            .ok_or(AnalyticsError::ClientNotFound(client_id))
    }

    /// Feature vector for one client, evaluated now.
    pub fn client_features(
        &self,
        client_id: ClientId,
    ) -> Result<ClientFeatureVector, AnalyticsError> {
        self.client_features_at(client_id, Utc::now())
    }

    #[instrument(skip(self), fields(client_id = %client_id))]
    pub fn client_features_at(
        &self,
        client_id: ClientId,
        as_of: DateTime<Utc>,
    ) -> Result<ClientFeatureVector, AnalyticsError> {
        let snapshot = self.snapshot(client_id)?;
        Ok(aggregate(&snapshot, as_of))
    }

    /// Feature vectors for every known client. Clients without accounts are
    /// skipped rather than failing the batch.
    pub fn population_features(&self) -> Result<Vec<ClientFeatureVector>, AnalyticsError> {
        self.population_features_at(Utc::now())
    }

    #[instrument(skip(self))]
    pub fn population_features_at(
        &self,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<ClientFeatureVector>, AnalyticsError> {
        let mut population = Vec::new();
        for client_id in self.provider.client_ids()? {
            if let Some(snapshot) = ClientSnapshot::load(self.provider.as_ref(), client_id)? {
                population.push(aggregate(&snapshot, as_of));
            }
        }
        Ok(population)
    }

    /// Partition the whole client base into `k` behavioral segments using
    /// the service's configured seed.
    #[instrument(skip(self))]
    pub fn segment_population(&self, k: usize) -> Result<SegmentationOutcome, AnalyticsError> {
        let population = self.population_features()?;
        Ok(segment_population_with(
            &population,
            k,
            self.seed,
            &KMeansClusterer::default(),
        )?)
    }

    pub fn score_credit(&self, client_id: ClientId) -> Result<ScoreResult, AnalyticsError> {
        self.score_credit_at(client_id, Utc::now())
    }

    pub fn score_credit_at(
        &self,
        client_id: ClientId,
        as_of: DateTime<Utc>,
    ) -> Result<ScoreResult, AnalyticsError> {
        Ok(score_credit(&self.client_features_at(client_id, as_of)?))
    }

    pub fn score_churn(&self, client_id: ClientId) -> Result<ScoreResult, AnalyticsError> {
        self.score_churn_at(client_id, Utc::now())
    }

    pub fn score_churn_at(
        &self,
        client_id: ClientId,
        as_of: DateTime<Utc>,
    ) -> Result<ScoreResult, AnalyticsError> {
        Ok(score_churn(&self.client_features_at(client_id, as_of)?))
    }

    pub fn score_value(&self, client_id: ClientId) -> Result<ScoreResult, AnalyticsError> {
        self.score_value_at(client_id, Utc::now())
    }

    pub fn score_value_at(
        &self,
        client_id: ClientId,
        as_of: DateTime<Utc>,
    ) -> Result<ScoreResult, AnalyticsError> {
        Ok(score_value(&self.client_features_at(client_id, as_of)?))
    }

    /// Loan recommendations for one client, derived from the same feature
    /// vector and credit score evaluation.
    pub fn recommend_loans(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<Recommendation>, AnalyticsError> {
        self.recommend_loans_at(client_id, Utc::now())
    }

    #[instrument(skip(self), fields(client_id = %client_id))]
    pub fn recommend_loans_at(
        &self,
        client_id: ClientId,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<Recommendation>, AnalyticsError> {
        let features = self.client_features_at(client_id, as_of)?;
        let credit = score_credit(&features);
        Ok(recommend_loans(&features, &credit))
    }
}
