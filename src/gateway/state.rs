use std::sync::Arc;

use crate::embedding::MiniLmEmbedder;
use crate::extract::TextExtractor;
use crate::scoring::SimilarityScorer;

/// Shared request-handling state.
///
/// Generic over the extractor seam so contract tests can swap the PDF
/// pipeline for a mock while keeping the real embedder wiring.
pub struct HandlerState<E: TextExtractor + 'static> {
    pub embedder: Arc<MiniLmEmbedder>,

    pub extractor: Arc<E>,

    pub scorer: SimilarityScorer,

    pub max_upload_bytes: usize,
}

// Derived Clone would demand E: Clone, which the Arc makes unnecessary.
impl<E: TextExtractor + 'static> Clone for HandlerState<E> {
    fn clone(&self) -> Self {
        Self {
            embedder: Arc::clone(&self.embedder),
            extractor: Arc::clone(&self.extractor),
            scorer: self.scorer,
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

impl<E: TextExtractor + 'static> HandlerState<E> {
    pub fn new(
        embedder: Arc<MiniLmEmbedder>,
        extractor: Arc<E>,
        scorer: SimilarityScorer,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            embedder,
            extractor,
            scorer,
            max_upload_bytes,
        }
    }
}
