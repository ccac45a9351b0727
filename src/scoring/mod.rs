//! Pairwise answer scoring.
//!
//! Given the answer-key vectors and one submission's vectors, score each
//! position-aligned pair by cosine similarity, clamp sub-floor matches to
//! zero, and label every question with an understanding band. Scoring is
//! pure arithmetic over the vectors and never fails.

pub mod scorer;
pub mod types;


pub use scorer::{SimilarityScorer, cosine_similarity};
pub use types::{QuestionResult, QuestionStatus, ScoreReport, StudentResult};
