//! Pronunciation scoring against a reference phrase.
//!
//! Similarity is a naive positional alignment: characters are compared at the
//! same index up to the shorter length, and the match count is divided by the
//! longer length. An insertion or deletion shifts every later character out
//! of alignment. The feedback bands are calibrated to this measure, so it
//! must not be swapped for an edit distance without re-deriving them.

use vaani_types::{Feedback, ScoreResult};

use crate::normalize::{NormalizedText, normalize_opt};

/// Positional similarity in 0.0..=1.0
pub fn similarity(reference: &NormalizedText, attempt: &NormalizedText) -> f64 {
    match (reference.is_empty(), attempt.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let matches = reference
        .chars()
        .zip(attempt.chars())
        .filter(|(a, b)| a == b)
        .count();
    let longest = reference.chars().count().max(attempt.chars().count());

    matches as f64 / longest as f64
}

/// Score an attempt against a reference. Absent attempts count as empty.
pub fn score(reference: &str, attempt: Option<&str>) -> ScoreResult {
    let reference = normalize_opt(Some(reference));
    let attempt = normalize_opt(attempt);

    let similarity = similarity(&reference, &attempt);
    let score = (similarity * 100.0).floor().clamp(0.0, 100.0) as u8;

    ScoreResult {
        score,
        similarity: round3(similarity),
        feedback: Feedback::from_score(score),
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
