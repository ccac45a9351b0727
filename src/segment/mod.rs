//! Answer segmentation.
//!
//! Splits extracted document text into per-question answer segments on
//! numbered markers (`1.`, `12.`, `Q3.` and so on). The marker itself is
//! discarded; what remains is trimmed and length-filtered so headings and
//! stray numbering don't become scoreable answers.


use std::sync::LazyLock;

use regex::Regex;

use crate::constants::MIN_SEGMENT_CHARS;

/// Matches a question marker: an optional `Q` prefix, one or more digits, and
/// a literal period, anchored on a word boundary so digits inside a word
/// (`version1.`) don't split.
static ANSWER_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bQ?\d+\.").expect("answer delimiter pattern is valid"));

/// Splits `text` into answer segments, in document order.
///
/// Each piece between markers is whitespace-trimmed; pieces of
/// [`MIN_SEGMENT_CHARS`] characters or fewer are dropped. Text with no
/// markers at all yields at most one segment. Unreadable or empty input
/// yields an empty set, which callers treat as "nothing to score".
pub fn split_answers(text: &str) -> Vec<String> {
    ANSWER_DELIMITER
        .split(text)
        .map(str::trim)
        .filter(|part| part.chars().count() > MIN_SEGMENT_CHARS)
        .map(str::to_owned)
        .collect()
}
