// Stop word lexicon. Words on this list are flagged by the tokenizer and
// excluded from frequency analysis unless the caller opts out.
use once_cell::sync::Lazy;
use std::collections::HashSet;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being",
        "below", "between", "both", "but", "by", "can", "could", "did", "do",
        "does", "doing", "down", "during", "each", "few", "for", "from",
        "further", "had", "has", "have", "having", "he", "her", "here", "hers",
        "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is",
        "it", "its", "itself", "just", "may", "me", "might", "more", "most",
        "must", "my", "myself", "never", "no", "nor", "not", "now", "of", "off",
        "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
        "over", "own", "per", "same", "shall", "she", "should", "so", "some",
        "such", "than", "that", "the", "their", "theirs", "them", "themselves",
        "then", "there", "these", "they", "this", "those", "through", "to",
        "too", "under", "until", "up", "upon", "us", "very", "was", "we", "were",
        "what", "when", "where", "which", "while", "who", "whom", "why", "will",
        "with", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .iter()
    .copied()
    .collect()
});

/// Case-insensitive stop word lookup.
pub fn is_stop(word: &str) -> bool {
    STOP_WORDS.contains(word.to_lowercase().as_str())
}

pub fn count() -> usize {
    STOP_WORDS.len()
}

pub fn iter() -> impl Iterator<Item = &'static str> {
    STOP_WORDS.iter().copied()
}
