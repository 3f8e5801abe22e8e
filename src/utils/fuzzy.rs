//! Fuzzy matching utilities for topping names
//!
//! Recognizers rarely hand back the exact catalog spelling ("mushroom",
//! "green pepper", "anchovy"), so topping lookups go through a
//! normalized Levenshtein score instead of exact string equality.

use strsim::normalized_levenshtein;

/// Result of a fuzzy match with the matched value and score
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    pub value: String,
    pub score: f64,
}

/// Lowercase, strip punctuation, collapse whitespace
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find a candidate phrase anywhere inside an utterance
///
/// Each candidate is compared against every word window of the same
/// length. The highest score wins; ties go to the later mention.
pub fn find_in_utterance(
    utterance: &str,
    candidates: &[String],
    cutoff: f64,
) -> Option<FuzzyMatch> {
    let normalized = normalize_text(utterance);
    let words: Vec<&str> = normalized.split_whitespace().collect();
    let mut best: Option<(FuzzyMatch, usize)> = None;

    for candidate in candidates {
        let target = normalize_text(candidate);
        let width = target.split_whitespace().count();
        if width == 0 || width > words.len() {
            continue;
        }

        for (pos, window) in words.windows(width).enumerate() {
            let score = normalized_levenshtein(&window.join(" "), &target);
            if score < cutoff {
                continue;
            }
            let better = match &best {
                Some((m, at)) => score > m.score || (score == m.score && pos >= *at),
                None => true,
            };
            if better {
                best = Some((
                    FuzzyMatch {
                        value: candidate.clone(),
                        score,
                    },
                    pos,
                ));
            }
        }
    }

    best.map(|(m, _)| m)
}
