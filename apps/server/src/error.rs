use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finboard_core::errors::{CalculatorError, DatabaseError, Error as CoreError};
use finboard_core::market_data::MarketDataError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    NotImplemented(String),
    #[error("Too many requests, retry later")]
    TooManyRequests,
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Validation(_)
        | CoreError::UnsupportedCurrency(_)
        | CoreError::AssetClassDisabled(_) => StatusCode::BAD_REQUEST,
        CoreError::InsufficientFunds { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::Calculation(
            CalculatorError::InsufficientQuantity { .. } | CalculatorError::PositionNotFound { .. },
        ) => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Database(
            DatabaseError::UniqueViolation(_) | DatabaseError::ForeignKeyViolation(_),
        ) => StatusCode::CONFLICT,
        CoreError::MarketData(MarketDataError::SymbolNotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::MarketData(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => core_status(e),
            ApiError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<MarketDataError> for ApiError {
    fn from(err: MarketDataError) -> Self {
        ApiError::Core(CoreError::MarketData(err))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use finboard_core::errors::ValidationError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_core_errors_map_to_statuses() {
        let cases = vec![
            (
                ApiError::from(CoreError::Validation(ValidationError::invalid("bad"))),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(CoreError::Database(DatabaseError::NotFound(
                    "Goal g1".to_string(),
                ))),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(CoreError::InsufficientFunds {
                    account_id: 1,
                    required: dec!(10),
                    available: dec!(5),
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(CoreError::Database(DatabaseError::QueryFailed(
                    "disk I/O error".to_string(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::TooManyRequests, StatusCode::TOO_MANY_REQUESTS),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{}", err);
        }
    }
}
