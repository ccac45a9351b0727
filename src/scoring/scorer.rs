use tracing::debug;

use crate::constants::DEFAULT_NOISE_FLOOR;

use super::types::{QuestionResult, QuestionStatus, ScoreReport};

/// Pairwise cosine scorer with a noise floor.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer {
    noise_floor: f32,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityScorer {
    /// Creates a scorer with the default noise floor.
    pub fn new() -> Self {
        Self {
            noise_floor: DEFAULT_NOISE_FLOOR,
        }
    }

    /// Creates a scorer with a custom noise floor, clamped into `[0, 1]`.
    pub fn with_noise_floor(noise_floor: f32) -> Self {
        Self {
            noise_floor: noise_floor.clamp(0.0, 1.0),
        }
    }

    /// Returns the similarity below which a pair scores zero.
    pub fn noise_floor(&self) -> f32 {
        self.noise_floor
    }

    /// Scores position-aligned pairs of key and submission vectors.
    ///
    /// Pair `i` compares `key[i]` against `submission[i]`; unpaired extras
    /// on either side are ignored. Question numbers are 1-based input order.
    /// The overall percentage averages the post-clamp similarities before
    /// any per-question rounding.
    pub fn score_pairs(&self, key: &[Vec<f32>], submission: &[Vec<f32>]) -> ScoreReport {
        let pair_count = key.len().min(submission.len());

        let mut questions = Vec::with_capacity(pair_count);
        let mut similarities = Vec::with_capacity(pair_count);

        for i in 0..pair_count {
            let mut similarity = cosine_similarity(&key[i], &submission[i]);

            // Matches below the noise floor count as unrelated.
            if similarity < self.noise_floor {
                similarity = 0.0;
            }

            similarities.push(similarity);

            let percent = round2(f64::from(similarity) * 100.0);
            let status = QuestionStatus::from_percent(percent);

            questions.push(QuestionResult {
                question_number: i + 1,
                similarity_percent: percent,
                status,
            });
        }

        let overall_percent = if similarities.is_empty() {
            0.0
        } else {
            let mean = similarities.iter().map(|&s| f64::from(s)).sum::<f64>()
                / similarities.len() as f64;
            round2(mean * 100.0)
        };

        debug!(
            pairs = pair_count,
            overall = overall_percent,
            "Scored answer pairs"
        );

        ScoreReport {
            questions,
            overall_percent,
        }
    }
}

/// Cosine similarity over `f32` slices.
///
/// Mismatched lengths, empty inputs, and zero-norm vectors all score `0.0`.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Rounds to 2 decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
