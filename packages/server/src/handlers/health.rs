use axum::{Json, extract::State};

use crate::error::{AppError, ErrorBody};
use crate::models::auth::HealthResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/actuator/health",
    tag = "Health",
    operation_id = "health",
    summary = "Liveness and database probe",
    responses(
        (status = 200, description = "Service and database are reachable", body = HealthResponse),
        (status = 500, description = "Database unreachable (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.db.ping().await?;
    Ok(Json(HealthResponse { status: "UP" }))
}
