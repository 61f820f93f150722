//! Fuzzy trigger matching.
//!
//! Scores user input against every configured trigger with a partial-ratio
//! metric: the shorter string is slid over the longer one and each
//! equal-length window is scored with normalized Levenshtein similarity.
//! The best window decides the score, so a trigger buried anywhere inside
//! a longer sentence still scores as a full match.

use strsim::normalized_levenshtein;

use crate::keyword_index::KeywordIndex;

/// Best-window similarity between `a` and `b`, in `[0.0, 100.0]`.
///
/// Case-insensitive and symmetric. The windows are taken over chars, not
/// bytes, so CJK triggers behave exactly like ASCII ones: input containing
/// a trigger verbatim scores 100.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.to_lowercase().chars().collect();
    let b_chars: Vec<char> = b.to_lowercase().chars().collect();
    let (needle, hay) = if a_chars.len() <= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };
    if needle.is_empty() {
        return if hay.is_empty() { 100.0 } else { 0.0 };
    }

    let needle_str: String = needle.iter().collect();
    let mut best = 0.0_f64;
    for window in hay.windows(needle.len()) {
        let window_str: String = window.iter().collect();
        let score = normalized_levenshtein(&needle_str, &window_str);
        if score > best {
            best = score;
        }
        if best >= 1.0 {
            break;
        }
    }
    best * 100.0
}

/// Pick the best-scoring trigger at or above `threshold`.
///
/// Triggers are scanned in config order and only a strictly greater score
/// replaces the current best, so ties resolve to the earliest trigger.
pub fn best_match<'a>(input: &str, index: &'a KeywordIndex, threshold: u8) -> Option<&'a str> {
    let mut best: Option<(&str, f64)> = None;
    for trigger in index.triggers() {
        let score = partial_ratio(input, trigger);
        let replace = match best {
            Some((_, best_score)) => score > best_score,
            None => true,
        };
        if replace {
            best = Some((trigger, score));
        }
    }
    match best {
        Some((trigger, score)) if score >= f64::from(threshold) => Some(trigger),
        _ => None,
    }
}
