use std::any::Any;

use axum::{
    http::{header::CACHE_CONTROL, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::CACHE_CONTROL_NO_STORE;

/// Message returned for any fault the client cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The requested id did not match a user, including ids that failed to parse.
    #[error("User not found")]
    UserNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::UserNotFound(id) => {
                tracing::debug!(id = %id, "User not found");
                "User not found"
            }
            AppError::Internal(_) => {
                tracing::error!("Internal error: {:?}", self);
                INTERNAL_ERROR_MESSAGE
            }
        };

        error_response(self.status(), message)
    }
}

/// Build a JSON error response that upstream caches must not store.
pub fn error_response(status: StatusCode, message: &'static str) -> Response {
    let mut response = (status, Json(ErrorBody { error: message })).into_response();
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_NO_STORE));
    response
}

/// Convert a handler panic into the generic 500 body.
///
/// Installed through `CatchPanicLayer::custom`, so a panicking request is
/// answered like any other internal error and the worker keeps serving.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}
