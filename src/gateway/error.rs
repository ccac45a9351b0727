use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Request-level failures surfaced by the analyze endpoint.
///
/// The first three variants are the validation contract: their display
/// strings are wire-visible and clients match on them verbatim.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Teacher key not uploaded")]
    TeacherKeyMissing,

    #[error("No student files uploaded")]
    NoStudentFiles,

    #[error("Teacher answers could not be extracted")]
    TeacherKeyUnreadable,

    #[error("invalid multipart request: {0}")]
    InvalidMultipart(#[from] MultipartError),

    #[error("embedding failed: {0}")]
    EmbeddingFailed(#[from] EmbeddingError),
}

impl GatewayError {
    /// Whether this is a client-side validation failure (400) as opposed to
    /// an internal one (500).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GatewayError::TeacherKeyMissing
                | GatewayError::NoStudentFiles
                | GatewayError::TeacherKeyUnreadable
                | GatewayError::InvalidMultipart(_)
        )
    }
}

/// 400 body: `{"error": "<message>"}`.
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// 500 body: `{"success": false, "error": "<message>"}`.
#[derive(serde::Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        if self.is_validation() {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse {
                    success: false,
                    error: message,
                }),
            )
                .into_response()
        }
    }
}
