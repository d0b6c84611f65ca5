use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::ClientId;
use super::provider::DataProvider;
use super::segmentation::SegmentationError;
use super::service::{AnalyticsError, AnalyticsService};

/// Router builder exposing HTTP endpoints for the analytics engine.
pub fn analytics_router<P>(service: Arc<AnalyticsService<P>>) -> Router
where
    P: DataProvider + 'static,
{
    Router::new()
        .route(
            "/api/v1/analytics/clients/:client_id/features",
            get(features_handler::<P>),
        )
        .route(
            "/api/v1/analytics/clients/:client_id/credit-score",
            get(credit_handler::<P>),
        )
        .route(
            "/api/v1/analytics/clients/:client_id/churn-risk",
            get(churn_handler::<P>),
        )
        .route(
            "/api/v1/analytics/clients/:client_id/value",
            get(value_handler::<P>),
        )
        .route(
            "/api/v1/analytics/clients/:client_id/loan-recommendations",
            get(recommendations_handler::<P>),
        )
        .route("/api/v1/analytics/segments", get(segments_handler::<P>))
        .with_state(service)
}

fn error_response(error: AnalyticsError) -> Response {
    let status = match &error {
        AnalyticsError::ClientNotFound(_) => StatusCode::NOT_FOUND,
        AnalyticsError::Segmentation(SegmentationError::InvalidClusterCount(_)) => {
            StatusCode::BAD_REQUEST
        }
        AnalyticsError::Segmentation(SegmentationError::InsufficientData { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AnalyticsError::Segmentation(SegmentationError::Clustering(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AnalyticsError::Provider(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn features_handler<P>(
    State(service): State<Arc<AnalyticsService<P>>>,
    Path(client_id): Path<u64>,
) -> Response
where
    P: DataProvider + 'static,
{
    match service.client_features(ClientId(client_id)) {
        Ok(features) => (StatusCode::OK, axum::Json(features)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn credit_handler<P>(
    State(service): State<Arc<AnalyticsService<P>>>,
    Path(client_id): Path<u64>,
) -> Response
where
    P: DataProvider + 'static,
{
    match service.score_credit(ClientId(client_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn churn_handler<P>(
    State(service): State<Arc<AnalyticsService<P>>>,
    Path(client_id): Path<u64>,
) -> Response
where
    P: DataProvider + 'static,
{
    match service.score_churn(ClientId(client_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn value_handler<P>(
    State(service): State<Arc<AnalyticsService<P>>>,
    Path(client_id): Path<u64>,
) -> Response
where
    P: DataProvider + 'static,
{
    match service.score_value(ClientId(client_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendations_handler<P>(
    State(service): State<Arc<AnalyticsService<P>>>,
    Path(client_id): Path<u64>,
) -> Response
where
    P: DataProvider + 'static,
{
    match service.recommend_loans(ClientId(client_id)) {
        Ok(recommendations) => (StatusCode::OK, axum::Json(recommendations)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SegmentsQuery {
    clusters: Option<usize>,
}

pub(crate) async fn segments_handler<P>(
    State(service): State<Arc<AnalyticsService<P>>>,
    Query(query): Query<SegmentsQuery>,
) -> Response
where
    P: DataProvider + 'static,
{
    let k = query.clusters.unwrap_or_else(|| service.default_clusters());

    // Population fetch plus k-means is CPU-bound; keep it off the async
    // worker threads.
    let result = tokio::task::spawn_blocking(move || service.segment_population(k)).await;
    match result {
        Ok(Ok(outcome)) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Ok(Err(error)) => error_response(error),
        Err(error) => {
            let payload = json!({
                "error": format!("segmentation task failed: {error}"),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
