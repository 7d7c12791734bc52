//! API error handling
//!
//! Every failure renders as `{ "error": message }` with the status code of
//! its category: validation, duplicate ticker, and insufficient balance are
//! 400, an unknown fund is 404, and anything unexpected is 500. Nothing
//! crashes the process.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_ledger::LedgerError;
use infra_db::{DatabaseError, RecordError};

/// API error types, one per failure category
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InsufficientBalance(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            // The original API reports duplicate tickers as 400
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InsufficientBalance(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(msg) => ApiError::Validation(msg),
            LedgerError::FundNotFound(_) => ApiError::NotFound("Fund not found".to_string()),
            LedgerError::InsufficientBalance { .. } => {
                ApiError::InsufficientBalance(err.to_string())
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::DuplicateEntry(msg) => ApiError::Conflict(msg),
            DatabaseError::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Ledger(e) => e.into(),
            RecordError::Database(e) => e.into(),
        }
    }
}

/// JSON extractor whose rejection is a 400 `{ "error": ... }` body
///
/// The stock `axum::Json` rejection answers 422 for deserialization
/// failures; the original API answers 400 for any malformed body, so the
/// handlers use this wrapper instead.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(ApiError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::Conflict("dup".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::NotFound("missing".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::InsufficientBalance("overdraw".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_ledger_error_categories() {
        let err: ApiError = LedgerError::missing_field("ticker").into();
        assert!(matches!(err, ApiError::Validation(_)));

        let err: ApiError = LedgerError::FundNotFound(core_kernel::FundId::new()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = LedgerError::InsufficientBalance {
            requested: dec!(2),
            available: dec!(1),
        }
        .into();
        assert!(matches!(err, ApiError::InsufficientBalance(_)));
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err: ApiError = DatabaseError::duplicate("Fund", "ticker", "XPML11").into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_storage_failure_maps_to_internal() {
        let err: ApiError = DatabaseError::PoolExhausted.into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
