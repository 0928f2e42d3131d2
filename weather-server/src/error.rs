//! API error handling
//!
//! Every failure leaves the service as a JSON body `{"error": "..."}`.
//! Decoder and upstream details go to the log, never to the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No upstream result or no stored record for the requested city.
    #[error("unable to locate city")]
    CityNotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    /// POST body did not decode into a weather record.
    #[error("invalid weather record")]
    InvalidRecord,

    #[error("method not allowed")]
    MethodNotAllowed,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::CityNotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRecord => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
