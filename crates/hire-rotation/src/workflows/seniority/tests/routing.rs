use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::{
    equipment, scoring_rules, service, UnavailableRepository, WeightedYearsFormula,
};
use crate::workflows::seniority::router::{
    recalculate_handler, seniority_router, RecalculateRequest,
};
use crate::workflows::seniority::service::SeniorityListService;

#[tokio::test]
async fn recalculate_handler_reports_outcome() {
    let (service, _repository) = service(vec![equipment(1, Some(101))]);
    let service = Arc::new(service);

    let response = recalculate_handler(
        State(service),
        axum::Json(RecalculateRequest {
            local_area_id: 10,
            district_equipment_type_id: 20,
            equipment_type_id: 30,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn recalculate_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(SeniorityListService::new(
        Arc::new(UnavailableRepository),
        Arc::new(UnavailableRepository),
        Arc::new(WeightedYearsFormula),
        scoring_rules(),
    ));

    let response = recalculate_handler(
        State(service),
        axum::Json(RecalculateRequest {
            local_area_id: 10,
            district_equipment_type_id: 20,
            equipment_type_id: 30,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn list_endpoint_serves_projected_entries() {
    let (service, _repository) = service(vec![equipment(1, Some(101))]);
    let router = seniority_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/seniority/10/20")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn recalculate_endpoint_accepts_json_body() {
    let (service, repository) = service(vec![equipment(1, Some(101))]);
    let router = seniority_router(Arc::new(service));

    let body = json!({
        "local_area_id": 10,
        "district_equipment_type_id": 20,
        "equipment_type_id": 30,
    });

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/seniority/recalculate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(repository.record(1).seniority.is_some());
}
