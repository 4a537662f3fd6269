use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::auth::{
    AuthenticateRequest, AuthenticateResponse, validate_authenticate_request,
};
use crate::services::member::find_member_by_email;
use crate::state::AppState;
use crate::utils::{hash, jwt};

#[utoipa::path(
    post,
    path = "/authenticate",
    tag = "Auth",
    operation_id = "authenticate",
    summary = "Exchange credentials for a bearer token",
    description = "Checks the e-mail and password of a registered member and returns an HS512 JWT \
        carrying the member's e-mail and role.",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthenticateResponse),
        (status = 400, description = "Blank e-mail or password (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unknown member or wrong password (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = payload.email.as_deref().unwrap_or_default()))]
pub async fn authenticate(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AuthenticateRequest>,
) -> Result<Json<AuthenticateResponse>, AppError> {
    validate_authenticate_request(&payload)?;

    let email = payload.email.as_deref().unwrap_or_default();
    let password = payload.password.as_deref().unwrap_or_default();

    let member = find_member_by_email(&state.db, email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    // Members that never completed registration have no password.
    let stored = member
        .password
        .as_deref()
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(password, stored)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let token = jwt::sign(
        &member.email,
        member.role,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_secs,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    tracing::info!(role = %member.role, "Member authenticated");
    Ok(Json(AuthenticateResponse { jwt_token: token }))
}
