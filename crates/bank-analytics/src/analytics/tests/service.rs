use super::common::*;
use crate::analytics::domain::ClientId;
use crate::analytics::service::AnalyticsError;

#[test]
fn unknown_client_is_reported_as_not_found() {
    let service = service(MemoryProvider::default());
    let result = service.client_features_at(ClientId(999), as_of());
    assert!(matches!(
        result,
        Err(AnalyticsError::ClientNotFound(ClientId(999)))
    ));
}

#[test]
fn provider_failures_surface_as_provider_errors() {
    let service = service(UnavailableProvider);
    let result = service.client_features_at(ClientId(1), as_of());
    assert!(matches!(result, Err(AnalyticsError::Provider(_))));

    let result = service.population_features_at(as_of());
    assert!(matches!(result, Err(AnalyticsError::Provider(_))));
}

#[test]
fn scoring_is_wired_through_the_same_feature_vector() {
    let service = service(established_provider());

    let credit = service
        .score_credit_at(ClientId(1), as_of())
        .expect("credit scores");
    assert_eq!(credit.score, 748.0);

    let churn = service
        .score_churn_at(ClientId(1), as_of())
        .expect("churn scores");
    assert!(churn.score >= 0.0 && churn.score <= 1.0);

    let value = service
        .score_value_at(ClientId(1), as_of())
        .expect("value scores");
    assert_eq!(value.band, "Standard");
}

#[test]
fn population_features_cover_every_client_with_accounts() {
    let service = service(population_provider());
    let population = service
        .population_features_at(as_of())
        .expect("population loads");
    assert_eq!(population.len(), 12);
}

#[test]
fn segmentation_errors_pass_through_the_facade() {
    let service = service(population_provider());
    let result = service.segment_population(0);
    assert!(matches!(result, Err(AnalyticsError::Segmentation(_))));

    let outcome = service.segment_population(4).expect("segmentation runs");
    assert_eq!(outcome.assignments.len(), 12);
}

#[test]
fn configured_seed_keeps_segmentation_deterministic() {
    let build = || {
        crate::analytics::AnalyticsService::new(std::sync::Arc::new(population_provider()))
            .with_segmentation_defaults(4, 7)
    };

    let first = build().segment_population(4).expect("first run");
    let second = build().segment_population(4).expect("second run");
    assert_eq!(first.assignments, second.assignments);
    assert_eq!(build().default_clusters(), 4);
}

#[test]
fn recommendations_require_an_existing_client() {
    let service = service(MemoryProvider::default());
    let result = service.recommend_loans_at(ClientId(5), as_of());
    assert!(matches!(result, Err(AnalyticsError::ClientNotFound(_))));
}
