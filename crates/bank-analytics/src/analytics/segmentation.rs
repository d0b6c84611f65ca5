//! Population segmentation: standardize client feature vectors and partition
//! them into behavioral clusters with k-means.
//!
//! Clustering sits behind the [`Clusterer`] trait so the engine does not
//! depend on a particular implementation; the default is Lloyd's algorithm
//! from `linfa-clustering` driven by a pinned-seed RNG, which makes both the
//! assignments and the cluster index labels reproducible for identical input.

use linfa::prelude::*;
use linfa_clustering::KMeans;
use linfa_nn::distance::L2Dist;
use ndarray::{Array1, Array2};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::domain::ClientId;
use super::features::ClientFeatureVector;

/// Default cluster count when the caller does not supply one.
pub const DEFAULT_CLUSTER_COUNT: usize = 5;

/// Fixed seed guaranteeing deterministic assignments across invocations.
pub const DEFAULT_SEED: u64 = 42;

/// Number of features fed into the clustering space.
const FEATURE_COLUMNS: usize = 9;

/// Error enumeration for segmentation failures.
#[derive(Debug, thiserror::Error)]
pub enum SegmentationError {
    #[error("cluster count must be positive, got {0}")]
    InvalidClusterCount(usize),
    #[error("population of {population} clients cannot support {requested} clusters")]
    InsufficientData { population: usize, requested: usize },
    #[error("clustering failed: {0}")]
    Clustering(String),
}

/// Pluggable partitioner over standardized points.
pub trait Clusterer: Send + Sync {
    /// Partition `points` (one row per client) into `k` clusters, returning
    /// one cluster index per row. Must be deterministic for a fixed `seed`.
    fn cluster(
        &self,
        points: &Array2<f64>,
        k: usize,
        seed: u64,
    ) -> Result<Vec<usize>, SegmentationError>;
}

/// Default k-means partitioner.
#[derive(Debug, Clone)]
pub struct KMeansClusterer {
    pub max_iterations: u64,
    pub tolerance: f64,
}

impl Default for KMeansClusterer {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

impl Clusterer for KMeansClusterer {
    fn cluster(
        &self,
        points: &Array2<f64>,
        k: usize,
        seed: u64,
    ) -> Result<Vec<usize>, SegmentationError> {
        let n_samples = points.nrows();
        let dataset = Dataset::new(points.clone(), Array1::<usize>::zeros(n_samples));

        let rng = SmallRng::seed_from_u64(seed);
        let model = KMeans::params_with(k, rng, L2Dist)
            .max_n_iterations(self.max_iterations)
            .tolerance(self.tolerance)
            .fit(&dataset)
            .map_err(|err| SegmentationError::Clustering(err.to_string()))?;

        let labels = model.predict(points);
        Ok(labels.to_vec())
    }
}

/// Cluster membership for one client, valid only for the population and `k`
/// used in the producing invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentAssignment {
    pub client_id: ClientId,
    pub cluster: usize,
}

/// Qualitative three-band level used for activity, volume, and rate means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    High,
    Medium,
    Low,
}

impl Band {
    pub const fn label(self) -> &'static str {
        match self {
            Band::High => "High",
            Band::Medium => "Medium",
            Band::Low => "Low",
        }
    }

    fn standard(mean: f64) -> Self {
        if mean > 0.7 {
            Band::High
        } else if mean > 0.3 {
            Band::Medium
        } else {
            Band::Low
        }
    }

    fn success_rate(mean: f64) -> Self {
        if mean > 0.9 {
            Band::High
        } else if mean > 0.7 {
            Band::Medium
        } else {
            Band::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceLevel {
    VeryHigh,
    High,
    Moderate,
    Low,
    VeryLow,
}

impl BalanceLevel {
    pub fn for_mean(balance: f64) -> Self {
        if balance > 50_000.0 {
            BalanceLevel::VeryHigh
        } else if balance > 20_000.0 {
            BalanceLevel::High
        } else if balance > 5_000.0 {
            BalanceLevel::Moderate
        } else if balance > 1_000.0 {
            BalanceLevel::Low
        } else {
            BalanceLevel::VeryLow
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            BalanceLevel::VeryHigh => "Very High",
            BalanceLevel::High => "High",
            BalanceLevel::Moderate => "Moderate",
            BalanceLevel::Low => "Low",
            BalanceLevel::VeryLow => "Very Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardUsage {
    Multiple,
    Standard,
    None,
}

impl CardUsage {
    pub fn for_mean(card_count: f64) -> Self {
        if card_count > 2.0 {
            CardUsage::Multiple
        } else if card_count > 0.0 {
            CardUsage::Standard
        } else {
            CardUsage::None
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CardUsage::Multiple => "Multiple",
            CardUsage::Standard => "Standard",
            CardUsage::None => "None",
        }
    }
}

/// Qualitative description of one cluster, derived from its raw feature means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentCharacteristics {
    pub balance_level: BalanceLevel,
    pub activity_level: Band,
    pub transaction_volume: Band,
    pub card_usage: CardUsage,
    pub credit_card_usage: Band,
    pub success_rate: Band,
    pub international_activity: bool,
}

/// Per-cluster summary: member count plus the mean of each raw
/// (non-standardized) clustering feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterProfile {
    pub cluster: usize,
    pub size: usize,
    pub mean_balance: f64,
    pub mean_transaction_count: f64,
    pub mean_total_transaction_amount: f64,
    pub mean_avg_transaction_amount: f64,
    pub mean_card_count: f64,
    pub mean_credit_card_ratio: f64,
    pub mean_transaction_success_rate: f64,
    pub mean_activity_level: f64,
    pub foreign_account_share: f64,
    pub characteristics: SegmentCharacteristics,
}

/// Full segmentation result for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationOutcome {
    pub assignments: Vec<SegmentAssignment>,
    pub profiles: Vec<ClusterProfile>,
}

/// Project one feature vector onto the clustering space.
fn feature_row(features: &ClientFeatureVector) -> [f64; FEATURE_COLUMNS] {
    [
        features.balance,
        f64::from(features.transaction_count),
        features.total_transaction_amount,
        features.avg_transaction_amount,
        f64::from(features.card_count),
        features.credit_card_ratio,
        features.transaction_success_rate,
        features.activity_level,
        if features.has_foreign_account { 1.0 } else { 0.0 },
    ]
}

/// Z-score standardization across the population. A column with zero
/// variance standardizes to `0` for every client.
fn standardize(raw: &Array2<f64>) -> Array2<f64> {
    let n = raw.nrows() as f64;
    let mut standardized = raw.clone();

    for mut column in standardized.columns_mut() {
        let mean = column.sum() / n;
        let variance = column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        if std > 0.0 {
            column.mapv_inplace(|x| (x - mean) / std);
        } else {
            column.fill(0.0);
        }
    }

    standardized
}

fn profile_cluster(
    cluster: usize,
    members: &[&ClientFeatureVector],
) -> ClusterProfile {
    let size = members.len();
    let n = size as f64;
    let mean = |select: fn(&ClientFeatureVector) -> f64| -> f64 {
        members.iter().map(|features| select(features)).sum::<f64>() / n
    };

    let mean_balance = mean(|f| f.balance);
    let mean_transaction_count = mean(|f| f64::from(f.transaction_count));
    let mean_total_transaction_amount = mean(|f| f.total_transaction_amount);
    let mean_avg_transaction_amount = mean(|f| f.avg_transaction_amount);
    let mean_card_count = mean(|f| f64::from(f.card_count));
    let mean_credit_card_ratio = mean(|f| f.credit_card_ratio);
    let mean_transaction_success_rate = mean(|f| f.transaction_success_rate);
    let mean_activity_level = mean(|f| f.activity_level);
    let foreign_account_share = mean(|f| if f.has_foreign_account { 1.0 } else { 0.0 });

    let characteristics = SegmentCharacteristics {
        balance_level: BalanceLevel::for_mean(mean_balance),
        activity_level: Band::standard(mean_activity_level),
        transaction_volume: Band::standard(mean_total_transaction_amount),
        card_usage: CardUsage::for_mean(mean_card_count),
        credit_card_usage: Band::standard(mean_credit_card_ratio),
        success_rate: Band::success_rate(mean_transaction_success_rate),
        international_activity: foreign_account_share > 0.5,
    };

    ClusterProfile {
        cluster,
        size,
        mean_balance,
        mean_transaction_count,
        mean_total_transaction_amount,
        mean_avg_transaction_amount,
        mean_card_count,
        mean_credit_card_ratio,
        mean_transaction_success_rate,
        mean_activity_level,
        foreign_account_share,
        characteristics,
    }
}

/// Segment the population with the default k-means partitioner and seed.
pub fn segment_population(
    features: &[ClientFeatureVector],
    k: usize,
) -> Result<SegmentationOutcome, SegmentationError> {
    segment_population_with(features, k, DEFAULT_SEED, &KMeansClusterer::default())
}

/// Segment the population with an explicit seed and partitioner.
///
/// Rejects `k == 0` up front and refuses (rather than truncates) a `k`
/// larger than the population.
pub fn segment_population_with(
    features: &[ClientFeatureVector],
    k: usize,
    seed: u64,
    clusterer: &dyn Clusterer,
) -> Result<SegmentationOutcome, SegmentationError> {
    if k == 0 {
        return Err(SegmentationError::InvalidClusterCount(k));
    }
    if features.is_empty() || k > features.len() {
        return Err(SegmentationError::InsufficientData {
            population: features.len(),
            requested: k,
        });
    }

    let mut raw = Array2::<f64>::zeros((features.len(), FEATURE_COLUMNS));
    for (row, vector) in features.iter().enumerate() {
        for (column, value) in feature_row(vector).into_iter().enumerate() {
            raw[(row, column)] = value;
        }
    }

    let points = standardize(&raw);
    let labels = clusterer.cluster(&points, k, seed)?;

    let assignments: Vec<SegmentAssignment> = features
        .iter()
        .zip(labels.iter())
        .map(|(vector, &cluster)| SegmentAssignment {
            client_id: vector.client_id,
            cluster,
        })
        .collect();

    let profiles = (0..k)
        .filter_map(|cluster| {
            let members: Vec<&ClientFeatureVector> = features
                .iter()
                .zip(labels.iter())
                .filter(|(_, &label)| label == cluster)
                .map(|(vector, _)| vector)
                .collect();
            if members.is_empty() {
                None
            } else {
                Some(profile_cluster(cluster, &members))
            }
        })
        .collect();

    Ok(SegmentationOutcome {
        assignments,
        profiles,
    })
}
