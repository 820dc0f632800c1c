//! Search query derivation from a blog title and description.

use std::collections::BTreeSet;

/// Maximum number of description keywords turned into queries
const MAX_KEYWORDS: usize = 5;

/// Shortest word considered a keyword
const MIN_KEYWORD_LEN: usize = 4;

/// Common filler words that make poor image searches
const STOP_WORDS: &[&str] = &[
    "this", "that", "with", "have", "will", "from", "they", "been", "said", "each", "which",
    "their", "time", "about", "would", "there", "could", "other", "more", "very", "what", "know",
    "just", "first", "into", "over", "think", "also", "your", "work", "life", "only", "can",
    "still", "should", "after", "being", "now", "made", "before", "here", "through", "when",
    "where", "much", "some", "these", "many", "then", "them", "well", "were",
];

/// Extract up to five distinct keywords from `description`.
///
/// Words are lowercased runs of word characters; only purely alphabetic
/// ASCII words of at least four letters count. Keywords come back in
/// lexicographic order so the result is reproducible.
pub fn extract_keywords(description: &str) -> Vec<String> {
    let lowered = description.to_lowercase();
    let words: BTreeSet<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.len() >= MIN_KEYWORD_LEN)
        .filter(|word| word.chars().all(|c| c.is_ascii_alphabetic()))
        .filter(|word| !STOP_WORDS.contains(word))
        .collect();

    words
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(String::from)
        .collect()
}

/// Build exactly `count` image search queries for a blog post.
///
/// The title comes first, followed by "{title} {keyword}" for each keyword,
/// padded with "{title} concept".
pub fn extract_queries(title: &str, description: &str, count: usize) -> Vec<String> {
    let mut queries = vec![title.to_string()];
    queries.extend(
        extract_keywords(description)
            .into_iter()
            .map(|keyword| format!("{} {}", title, keyword)),
    );

    while queries.len() < count {
        queries.push(format!("{} concept", title));
    }
    queries.truncate(count);
    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_comes_first_and_stop_words_are_dropped() {
        let queries = extract_queries("Cats", "Cats are great pets and cats love naps", 3);
        assert_eq!(queries.len(), 3);
        assert_eq!(queries[0], "Cats");
        for query in &queries {
            for word in query.split_whitespace() {
                assert!(!STOP_WORDS.contains(&word.to_lowercase().as_str()));
            }
        }
        assert_eq!(queries, vec!["Cats", "Cats cats", "Cats great"]);
    }

    #[test]
    fn test_keywords_are_deduplicated_and_sorted() {
        let keywords = extract_keywords("Rust rust RUST ownership borrowing lifetimes traits");
        assert_eq!(
            keywords,
            vec!["borrowing", "lifetimes", "ownership", "rust", "traits"]
        );
    }

    #[test]
    fn test_keywords_limit() {
        let keywords =
            extract_keywords("alpha bravo charlie delta echo foxtrot golf hotel india juliet");
        assert_eq!(keywords.len(), 5);
        assert_eq!(keywords[0], "alpha");
    }

    #[test]
    fn test_short_and_mixed_words_are_skipped() {
        // "web3" is a single word with a digit, "don't" splits into "don" and "t"
        let keywords = extract_keywords("the web3 era, don't go; kubernetes!");
        assert_eq!(keywords, vec!["kubernetes"]);
    }

    #[test]
    fn test_stop_words_only() {
        assert!(extract_keywords("this that with have will from").is_empty());
    }

    #[test]
    fn test_empty_description_pads_with_concept() {
        let queries = extract_queries("Space Exploration", "", 6);
        assert_eq!(queries[0], "Space Exploration");
        assert_eq!(queries.len(), 6);
        assert!(queries[1..]
            .iter()
            .all(|q| q == "Space Exploration concept"));
    }

    #[test]
    fn test_truncates_to_count() {
        let queries = extract_queries("Go", "goroutines channels interfaces modules", 2);
        assert_eq!(queries, vec!["Go", "Go channels"]);
    }

    #[test]
    fn test_zero_count() {
        assert!(extract_queries("Title", "some words here", 0).is_empty());
    }
}
