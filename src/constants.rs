//! Tuning constants shared across the pipeline.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift. The
//! similarity thresholds below are wire-visible behavior: changing them changes
//! every score label the service hands out.

/// Vector width of the sentence embedder (all-MiniLM-L6-v2 hidden size).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Token budget per segment; longer answers are truncated at tokenization.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Direct PDF text extraction counts as successful only when the trimmed
/// text is longer than this. Anything at or below it is treated as a
/// stripped/scanned document and falls through to OCR.
pub const DIRECT_TEXT_MIN_CHARS: usize = 50;

/// Answer segments at or below this many characters are discarded as
/// headings, stray numbering, or noise.
pub const MIN_SEGMENT_CHARS: usize = 20;

/// Cosine similarities below this floor are clamped to exactly zero before
/// any percentage math.
pub const DEFAULT_NOISE_FLOOR: f32 = 0.20;

/// Percent score at or above which an answer counts as strong understanding.
pub const STRONG_UNDERSTANDING_PERCENT: f64 = 75.0;

/// Percent score at or above which an answer counts as partial understanding.
pub const PARTIAL_UNDERSTANDING_PERCENT: f64 = 45.0;

/// Default cap on the whole multipart request body.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
