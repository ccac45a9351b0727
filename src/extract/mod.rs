//! PDF text extraction.
//!
//! Two-stage, best-effort: parse the embedded text layer first, and only when
//! that yields next to nothing (scanned or stripped documents) rasterize the
//! pages and OCR them. The public contract never fails; every error is logged
//! with its cause and degrades to whatever text has been recovered, possibly
//! an empty string.

pub mod error;


pub use error::ExtractError;

use std::panic::{AssertUnwindSafe, catch_unwind};

use pdf2image::{PDF, Pages, RenderOptionsBuilder};
use rusty_tesseract::{Args, Image};
use tracing::{debug, warn};

use crate::constants::DIRECT_TEXT_MIN_CHARS;

/// Seam between the HTTP gateway and the document pipeline: anything that can
/// turn uploaded bytes into text.
pub trait TextExtractor: Send + Sync {
    /// Best-effort text for an uploaded document. Never fails; unreadable
    /// input yields an empty string.
    fn extract_text(&self, bytes: &[u8]) -> String;
}

/// How a document's text was obtained.
#[derive(Debug)]
pub enum ExtractionOutcome {
    /// The embedded text layer was present and substantial.
    Direct(String),
    /// The text layer was missing or sparse; OCR supplied (or topped up) the text.
    Ocr(String),
    /// Both passes failed; carries whatever accumulated plus the final cause.
    Degraded(String, ExtractError),
}

impl ExtractionOutcome {
    /// The recovered text, however it was produced.
    pub fn text(&self) -> &str {
        match self {
            Self::Direct(text) | Self::Ocr(text) | Self::Degraded(text, _) => text,
        }
    }

    /// Consumes the outcome, keeping only the text.
    pub fn into_text(self) -> String {
        match self {
            Self::Direct(text) | Self::Ocr(text) | Self::Degraded(text, _) => text,
        }
    }
}

/// Production extractor: `pdf-extract` for the text layer, poppler + tesseract
/// (via `pdf2image` / `rusty-tesseract`) for the OCR fallback. Both fallback
/// tools shell out, so a host without them degrades instead of failing.
#[derive(Debug, Clone)]
pub struct PdfTextExtractor {
    ocr_lang: String,
}

impl PdfTextExtractor {
    /// Creates an extractor using the given tesseract language code.
    pub fn new(ocr_lang: impl Into<String>) -> Self {
        Self {
            ocr_lang: ocr_lang.into(),
        }
    }

    /// Runs the fallback chain and reports how the text was obtained.
    ///
    /// The direct pass wins outright when its trimmed output exceeds
    /// [`DIRECT_TEXT_MIN_CHARS`]; anything at or below that is treated as a
    /// stripped text layer and OCR output is appended to it.
    pub fn extract(&self, bytes: &[u8]) -> ExtractionOutcome {
        let mut accumulated = String::new();

        match Self::direct_pass(bytes) {
            Ok(text) => {
                let trimmed_chars = text.trim().chars().count();
                if trimmed_chars > DIRECT_TEXT_MIN_CHARS {
                    return ExtractionOutcome::Direct(text);
                }
                debug!(chars = trimmed_chars, "Sparse text layer, falling back to OCR");
                accumulated = text;
            }
            Err(cause) => {
                warn!(error = %cause, "Direct text extraction failed, falling back to OCR");
            }
        }

        match self.ocr_pass(bytes) {
            Ok(ocr_text) => {
                accumulated.push_str(&ocr_text);
                ExtractionOutcome::Ocr(accumulated)
            }
            Err(cause) => {
                warn!(error = %cause, "OCR fallback failed, returning accumulated text");
                ExtractionOutcome::Degraded(accumulated, cause)
            }
        }
    }

    fn direct_pass(bytes: &[u8]) -> Result<String, ExtractError> {
        // pdf-extract panics on some malformed documents; treat a panic like
        // any other parse failure.
        let parsed = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)));

        match parsed {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ExtractError::DirectExtraction {
                reason: e.to_string(),
            }),
            Err(_) => Err(ExtractError::DirectExtraction {
                reason: "parser panic on malformed document".to_string(),
            }),
        }
    }

    /// Rasterizes every page and OCRs them independently. A page that fails
    /// to render or recognize is skipped; the pass only fails as a whole when
    /// the document cannot be rasterized at all.
    fn ocr_pass(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let document = PDF::from_bytes(bytes.to_vec()).map_err(|e| ExtractError::Rasterization {
            reason: e.to_string(),
        })?;
        let options = RenderOptionsBuilder::default()
            .build()
            .map_err(|e| ExtractError::Rasterization {
                reason: e.to_string(),
            })?;
        let pages = document
            .render(Pages::All, options)
            .map_err(|e| ExtractError::Rasterization {
                reason: e.to_string(),
            })?;

        let scratch = tempfile::tempdir()?;
        let args = Args {
            lang: self.ocr_lang.clone(),
            ..Args::default()
        };

        let mut text = String::new();
        for (index, page) in pages.iter().enumerate() {
            let page_path = scratch.path().join(format!("page-{index}.png"));
            let recognized = page
                .save(&page_path)
                .map_err(|e| e.to_string())
                .and_then(|()| Image::from_path(&page_path).map_err(|e| e.to_string()))
                .and_then(|image| {
                    rusty_tesseract::image_to_string(&image, &args).map_err(|e| e.to_string())
                });

            match recognized {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Err(reason) => warn!(page = index + 1, %reason, "OCR failed for page, skipping"),
            }
        }

        Ok(text)
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> String {
        let outcome = self.extract(bytes);

        match &outcome {
            ExtractionOutcome::Direct(text) => {
                debug!(chars = text.len(), "Extracted embedded text layer");
            }
            ExtractionOutcome::Ocr(text) => {
                debug!(chars = text.len(), "Extracted text via OCR fallback");
            }
            ExtractionOutcome::Degraded(text, cause) => {
                warn!(chars = text.len(), error = %cause, "Extraction degraded");
            }
        }

        outcome.into_text()
    }
}

/// Extractor that treats the upload as UTF-8 text. Lets contract tests drive
/// the full request pipeline without real PDF bytes.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default, Clone)]
pub struct MockTextExtractor;

#[cfg(any(test, feature = "mock"))]
impl MockTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(any(test, feature = "mock"))]
impl TextExtractor for MockTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }
}
