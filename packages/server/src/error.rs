use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by REST endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `no_token`,
    /// `token_expired`, `wrong_token_format`, `bad_credentials`,
    /// `INVALID_CREDENTIALS`, `NOT_FOUND`, `INTERNAL_ERROR`.
    #[schema(example = "token_expired")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "The token has expired")]
    pub message: String,
}

/// Application-level error type for the HTTP surface.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// No `Authorization: Bearer` header.
    NoToken,
    TokenExpired,
    WrongTokenFormat,
    /// Token signature does not match the server secret.
    BadCredentials,
    /// Login with an unknown e-mail or a wrong password.
    InvalidCredentials,
    NotFound(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NoToken => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "no_token",
                    message: "No bearer token found in the Authorization header".into(),
                },
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "token_expired",
                    message: "The token has expired".into(),
                },
            ),
            AppError::WrongTokenFormat => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "wrong_token_format",
                    message: "The token could not be decoded".into(),
                },
            ),
            AppError::BadCredentials => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "bad_credentials",
                    message: "The token signature is not valid".into(),
                },
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "INVALID_CREDENTIALS",
                    message: "Invalid e-mail or password".into(),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Domain failure raised by the service layer. Each variant has a stable
/// code exposed to GraphQL clients as the `errorCode` extension.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Specified member has not been found in the database")]
    MemberNotFound,
    #[error("A member with the same e-mail address already exist in the database")]
    MemberEmailAlreadyExist,
    #[error("Specified event has not been found in the database")]
    EventNotFound,
    #[error("Specified track has not been found in the database")]
    TrackNotFound,
    #[error("Specified lap record has not been found in the database")]
    LapRecordNotFound,
    #[error("Specified news has not been found in the database")]
    NewsNotFound,
    #[error("Specified news is already liked by the specified member")]
    NewsAlreadyLikedByMember,
    #[error("Specified news is not liked by the specified member")]
    NewsNotLikedByMember,
    #[error("Specified member already participates in the specified event")]
    MemberAlreadyParticipant,
    #[error("Specified member does not participate in the specified event")]
    MemberNotParticipant,
    #[error("Event end date must not be before its start date")]
    EventEndBeforeStart,
    #[error("{0} is not a valid ISO date-time")]
    InvalidDate(String),
    #[error("{0} is not a valid role")]
    InvalidRole(String),
    #[error("Avatar file is not valid base64")]
    InvalidAvatar,
    #[error("{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::MemberNotFound => "member_not_found",
            ServiceError::MemberEmailAlreadyExist => "member_email_already_exist",
            ServiceError::EventNotFound => "event_not_found",
            ServiceError::TrackNotFound => "track_not_found",
            ServiceError::LapRecordNotFound => "lap_record_not_found",
            ServiceError::NewsNotFound => "news_not_found",
            ServiceError::NewsAlreadyLikedByMember => "news_already_liked_by_member",
            ServiceError::NewsNotLikedByMember => "news_not_liked_by_member",
            ServiceError::MemberAlreadyParticipant => "member_already_participant",
            ServiceError::MemberNotParticipant => "member_not_participant",
            ServiceError::EventEndBeforeStart => "event_end_before_start",
            ServiceError::InvalidDate(_) => "invalid_date",
            ServiceError::InvalidRole(_) => "invalid_role",
            ServiceError::InvalidAvatar => "invalid_avatar",
            ServiceError::InvalidArgument(_) => "invalid_argument",
            ServiceError::Database(_) => "internal_error",
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::MemberNotFound
            | ServiceError::EventNotFound
            | ServiceError::TrackNotFound
            | ServiceError::LapRecordNotFound
            | ServiceError::NewsNotFound => AppError::NotFound(err.to_string()),
            ServiceError::Database(e) => AppError::from(e),
            other => AppError::Validation(other.to_string()),
        }
    }
}
