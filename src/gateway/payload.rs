use axum::body::Bytes;
use serde::{Deserialize, Serialize};

use crate::scoring::StudentResult;

/// Success envelope for `POST /analyze`: one result per student, upload order.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: Vec<StudentResult>,
}

impl AnalyzeResponse {
    pub fn new(data: Vec<StudentResult>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// One file pulled out of the multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename, echoed back as `pdf_name` in the result.
    pub name: String,
    pub bytes: Bytes,
}
