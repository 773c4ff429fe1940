use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::question::InvalidQuestion;

/// Application-level failures handlers surface directly.
#[derive(Debug)]
pub enum AppError {
    Internal(&'static str),
    Input(&'static str),
    Invalid(InvalidQuestion),
    NotFound,
}

impl From<InvalidQuestion> for AppError {
    fn from(err: InvalidQuestion) -> Self {
        AppError::Invalid(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message.to_owned()),
            AppError::Input(message) => (StatusCode::BAD_REQUEST, message.to_owned()),
            AppError::Invalid(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND".to_owned()),
        };

        (code, Json(json!({ "error": message }))).into_response()
    }
}

/// Collapse infrastructure errors into an [`AppError`], logging at the
/// boundary.
pub trait ResultExt<T> {
    fn reject(self, message: &'static str) -> Result<T, AppError>;
    fn reject_input(self, message: &'static str) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for color_eyre::Result<T> {
    fn reject(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e}");
            AppError::Internal(message)
        })
    }

    fn reject_input(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e}");
            AppError::Input(message)
        })
    }
}
