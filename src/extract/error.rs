//! Text extraction error types.

use thiserror::Error;

/// Failures inside the extraction pipeline.
///
/// These never cross the public extraction API. They are logged where they
/// happen, and the one that ends the fallback chain rides along in
/// [`ExtractionOutcome::Degraded`](super::ExtractionOutcome::Degraded) for
/// diagnostics.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The PDF text layer could not be parsed.
    #[error("direct text extraction failed: {reason}")]
    DirectExtraction { reason: String },

    /// The document could not be rasterized for OCR.
    #[error("page rasterization failed: {reason}")]
    Rasterization { reason: String },

    /// Scratch-space I/O for OCR page images failed.
    #[error("ocr scratch io failed: {0}")]
    Io(#[from] std::io::Error),
}
