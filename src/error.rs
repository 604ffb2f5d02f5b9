//! API Error Taxonomy
//! Mission: typed failures internally, one flattened envelope externally

use crate::messages;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Every failure a handler or store can surface. Internally the kinds stay
/// distinct; on the wire they all collapse into `{statusCode, message, data}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    NotFound(String),
    AlreadyExists(String),
    InvalidPassword,
    TokenExpired,
    InvalidToken,
    Unauthorized(String),
    BadRequest(String),
    /// Catch-all wrapping unexpected failures, surfaced as HTTP 502.
    Unknown(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AlreadyExists(_) => StatusCode::CONFLICT,
            ApiError::InvalidPassword
            | ApiError::TokenExpired
            | ApiError::InvalidToken
            | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unknown(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg)
            | ApiError::AlreadyExists(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Unknown(msg) => msg,
            ApiError::InvalidPassword => messages::INVALID_PASSWORD,
            ApiError::TokenExpired => messages::TOKEN_EXPIRED,
            ApiError::InvalidToken => messages::TOKEN_INVALID,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::BAD_GATEWAY {
            tracing::error!("Unexpected failure: {}", self.message());
        }
        let body = Json(json!({
            "statusCode": status.as_u16(),
            "message": self.message(),
            "data": {},
        }));
        (status, body).into_response()
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        if is_unique_violation(&err) {
            return ApiError::AlreadyExists(messages::EMAIL_ALREADY_EXIST.to_string());
        }
        ApiError::Unknown(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::Unknown(err.to_string())
    }
}

/// Email uniqueness is enforced by the schema; a constraint violation on
/// insert maps to the duplicate-email error rather than a generic failure.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
