use async_graphql::{Error, ErrorExtensions};

use crate::error::ServiceError;

impl ErrorExtensions for ServiceError {
    fn extend(&self) -> Error {
        let message = match self {
            ServiceError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        };
        let code = self.code();
        Error::new(message).extend_with(|_, ext| ext.set("errorCode", code))
    }
}

/// Error returned when the caller's role is below a field's requirement.
pub fn access_denied() -> Error {
    Error::new("Access denied").extend_with(|_, ext| ext.set("errorCode", "access_denied"))
}

/// Error for a date argument that is not a valid ISO date-time.
pub fn invalid_date(input: &str) -> Error {
    ServiceError::InvalidDate(input.to_string()).extend()
}
