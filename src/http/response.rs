//! Mapping of relay results to HTTP responses.
//!
//! - quotation → 200, body is the bid and nothing else
//! - response deadline → 504, empty body
//! - unrecoverable failure → 500, fixed generic body

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::relay::{RelayError, Reply};

pub const INTERNAL_ERROR_BODY: &str = "internal server error";

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Quote(body) => (StatusCode::OK, body).into_response(),
            Reply::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT.into_response(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        internal_error()
    }
}

pub fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
}
