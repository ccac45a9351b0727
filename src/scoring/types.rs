use serde::{Deserialize, Serialize};

use crate::constants::{PARTIAL_UNDERSTANDING_PERCENT, STRONG_UNDERSTANDING_PERCENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Understanding band assigned to one scored question.
pub enum QuestionStatus {
    /// Rounded percentage at or above 75.
    #[serde(rename = "Strong Understanding")]
    StrongUnderstanding,
    /// Rounded percentage at or above 45.
    #[serde(rename = "Partial Understanding")]
    PartialUnderstanding,
    /// Rounded percentage above 0.
    #[serde(rename = "Weak Understanding")]
    WeakUnderstanding,
    /// Similarity clamped to zero.
    #[serde(rename = "Not Related")]
    NotRelated,
}

impl QuestionStatus {
    /// Maps a rounded percentage onto its band.
    pub fn from_percent(percent: f64) -> Self {
        if percent >= STRONG_UNDERSTANDING_PERCENT {
            QuestionStatus::StrongUnderstanding
        } else if percent >= PARTIAL_UNDERSTANDING_PERCENT {
            QuestionStatus::PartialUnderstanding
        } else if percent > 0.0 {
            QuestionStatus::WeakUnderstanding
        } else {
            QuestionStatus::NotRelated
        }
    }

    /// Returns the wire label for this band.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionStatus::StrongUnderstanding => "Strong Understanding",
            QuestionStatus::PartialUnderstanding => "Partial Understanding",
            QuestionStatus::WeakUnderstanding => "Weak Understanding",
            QuestionStatus::NotRelated => "Not Related",
        }
    }
}

impl std::fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Score for one position-aligned key/submission pair.
pub struct QuestionResult {
    /// 1-based input order.
    pub question_number: usize,
    /// Similarity as a percentage, rounded to 2 decimals.
    pub similarity_percent: f64,
    /// Band derived from `similarity_percent`.
    pub status: QuestionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Full evaluation of one student upload.
pub struct StudentResult {
    /// Uploaded file name as received.
    pub pdf_name: String,
    /// Per-question scores in input order.
    pub questions: Vec<QuestionResult>,
    /// Mean post-clamp similarity as a percentage, rounded to 2 decimals.
    pub performance_score: f64,
}

impl StudentResult {
    /// Result for a submission that yielded no scorable answers.
    pub fn empty<S: Into<String>>(pdf_name: S) -> Self {
        Self {
            pdf_name: pdf_name.into(),
            questions: Vec::new(),
            performance_score: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Output of [`SimilarityScorer::score_pairs`](super::SimilarityScorer::score_pairs),
/// not yet tied to a file name.
pub struct ScoreReport {
    /// Per-question scores in input order.
    pub questions: Vec<QuestionResult>,
    /// Mean post-clamp similarity as a percentage, rounded to 2 decimals.
    pub overall_percent: f64,
}

impl ScoreReport {
    /// Attaches a file name, producing the wire-level [`StudentResult`].
    pub fn into_student_result<S: Into<String>>(self, pdf_name: S) -> StudentResult {
        StudentResult {
            pdf_name: pdf_name.into(),
            questions: self.questions,
            performance_score: self.overall_percent,
        }
    }
}
