use axum::{extract::FromRequestParts, http::request::Parts};

use crate::entity::role::Role;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{self, TokenError};

/// Principal decoded from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require a valid token. Role checks
/// happen per GraphQL field through `RoleGuard`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub role: Role,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::NoToken)?;

        let claims = jwt::verify(token.trim(), &state.config.auth.jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            match e {
                TokenError::Expired => AppError::TokenExpired,
                TokenError::BadSignature => AppError::BadCredentials,
                TokenError::Malformed(_) | TokenError::Signing(_) => AppError::WrongTokenFormat,
            }
        })?;

        Ok(AuthUser {
            email: claims.sub,
            role: claims.role,
        })
    }
}
