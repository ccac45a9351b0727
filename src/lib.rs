//! Keyscore library crate (used by the server binary and integration tests).
//!
//! Scores student answer PDFs against a teacher's answer key. Each upload is
//! reduced to text (embedded text layer first, OCR as the fallback), split
//! into per-question answers on numbered markers, embedded with a MiniLM
//! sentence encoder, and compared pairwise by cosine similarity.
//!
//! # Public API Surface
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - server settings from `KEYSCORE_*` env vars
//!
//! ## Document Pipeline
//! - [`PdfTextExtractor`], [`TextExtractor`] - best-effort PDF text recovery
//! - [`split_answers`] - answer segmentation on `1.` / `Q3.` style markers
//!
//! ## Embedding & Scoring
//! - [`MiniLmEmbedder`], [`MiniLmConfig`] - sentence embeddings (real or stub)
//! - [`SimilarityScorer`] - pairwise cosine scoring with a noise floor
//! - [`StudentResult`], [`QuestionResult`], [`QuestionStatus`] - wire types
//!
//! ## HTTP Surface
//! - [`create_router_with_state`], [`HandlerState`] - the axum router
//! - [`AnalyzeResponse`], [`GatewayError`] - envelopes and error mapping
//!
//! ## Test/Mock Support
//! A scripted [`MockTextExtractor`] sits behind `#[cfg(any(test, feature = "mock"))]`;
//! the embedder's stub mode needs no feature flag.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod extract;
pub mod gateway;
pub mod scoring;
pub mod segment;

pub use config::{Config, ConfigError};
pub use embedding::{
    EmbeddingError, MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig, MiniLmEmbedder,
};
#[cfg(any(test, feature = "mock"))]
pub use extract::MockTextExtractor;
pub use extract::{ExtractError, ExtractionOutcome, PdfTextExtractor, TextExtractor};
pub use gateway::{AnalyzeResponse, GatewayError, HandlerState, create_router_with_state};
pub use scoring::{
    QuestionResult, QuestionStatus, ScoreReport, SimilarityScorer, StudentResult,
    cosine_similarity,
};
pub use segment::split_answers;
