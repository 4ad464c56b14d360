use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Malformed JSON body: {0}")]
    MalformedJson(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Required field missing or empty: {0}")]
    MissingRequiredField(&'static str),

    #[error("Could not parse request body: {0}")]
    BodyParseFailure(String),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MalformedJson(_)
            | AppError::MissingRequiredField(_)
            | AppError::BodyParseFailure(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.to_string(),
        };

        (self.status(), axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
