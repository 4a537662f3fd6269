use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::is_blank;

/// Request body for `/rest/authenticate`.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AuthenticateRequest {
    #[schema(example = "jane.doe@example.com")]
    pub email: Option<String>,
    #[schema(example = "s3cure_P@ss!")]
    pub password: Option<String>,
}

pub fn validate_authenticate_request(payload: &AuthenticateRequest) -> Result<(), AppError> {
    if is_blank(payload.email.as_deref()) {
        return Err(AppError::Validation("E-mail must not be empty".into()));
    }
    if is_blank(payload.password.as_deref()) {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful authentication response.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    /// HS512 bearer token to send as `Authorization: Bearer <token>`.
    #[schema(example = "eyJhbGciOiJIUzUxMiJ9...")]
    pub jwt_token: String,
}

/// Body of the health probe.
#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[schema(example = "UP")]
    pub status: &'static str,
}
