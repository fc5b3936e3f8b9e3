use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DistrictEquipmentTypeId, EquipmentTypeId, LocalAreaId};
use super::repository::{EquipmentRepository, RotationPointerSource, ScoreFormula};
use super::service::{SeniorityListService, SeniorityServiceError};

/// Router builder exposing HTTP endpoints for recalculation and the
/// seniority list view.
pub fn seniority_router<R, P, F>(service: Arc<SeniorityListService<R, P, F>>) -> Router
where
    R: EquipmentRepository + 'static,
    P: RotationPointerSource + 'static,
    F: ScoreFormula + 'static,
{
    Router::new()
        .route(
            "/api/v1/seniority/recalculate",
            post(recalculate_handler::<R, P, F>),
        )
        .route(
            "/api/v1/seniority/:local_area_id/:district_equipment_type_id",
            get(list_handler::<R, P, F>),
        )
        .with_state(service)
}

/// Cohort coordinates for a recalculation request.
#[derive(Debug, Deserialize)]
pub struct RecalculateRequest {
    pub local_area_id: i32,
    pub district_equipment_type_id: i32,
    pub equipment_type_id: i32,
}

pub(crate) async fn recalculate_handler<R, P, F>(
    State(service): State<Arc<SeniorityListService<R, P, F>>>,
    axum::Json(request): axum::Json<RecalculateRequest>,
) -> Response
where
    R: EquipmentRepository + 'static,
    P: RotationPointerSource + 'static,
    F: ScoreFormula + 'static,
{
    match service.recalculate(
        LocalAreaId(request.local_area_id),
        DistrictEquipmentTypeId(request.district_equipment_type_id),
        EquipmentTypeId(request.equipment_type_id),
    ) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(SeniorityServiceError::Rules(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<R, P, F>(
    State(service): State<Arc<SeniorityListService<R, P, F>>>,
    Path((local_area_id, district_equipment_type_id)): Path<(i32, i32)>,
) -> Response
where
    R: EquipmentRepository + 'static,
    P: RotationPointerSource + 'static,
    F: ScoreFormula + 'static,
{
    match service.seniority_list(
        LocalAreaId(local_area_id),
        DistrictEquipmentTypeId(district_equipment_type_id),
    ) {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(SeniorityServiceError::Rules(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
