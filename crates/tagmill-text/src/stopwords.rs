//! Static English stop-word set.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Static stop-word list.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "can", "this",
        "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "what", "which",
        "who", "whom", "how", "when", "where", "why", "all", "each", "every", "both", "few",
        "more", "most", "other", "some", "such", "no", "not", "only", "same", "so", "than", "too",
        "very", "just", "but", "and", "or", "if", "because", "as", "until", "while", "of", "at",
        "by", "for", "with", "about", "against", "between", "into", "through", "during", "before",
        "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
        "under", "again", "further", "then", "once", "here", "there", "any", "nor", "own", "its",
        "itself", "them", "their", "theirs", "our", "ours", "your", "yours", "my", "mine", "his",
        "her", "hers", "him", "me", "us", "am",
    ]
    .into_iter()
    .collect()
});

/// Check whether a lowercased token is an English stop word.
#[must_use]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}
