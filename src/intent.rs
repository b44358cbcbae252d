//! Intent classification — fast keyword rules, no LLM, no I/O.
//!
//! Classification runs on every message before anything touches the network,
//! so it stays a pure function over lowercase substring matches. Rule order
//! is the contract: Search > Trending > Category > Author > Recommendation >
//! General, first match wins.

/// The classified purpose of a user utterance. Produced fresh per message,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Look up stories by keyword.
    Search { keyword: String },
    /// Show currently hot stories.
    Trending,
    /// Browse or ask about story categories.
    Category { query: String },
    /// Ask about an author's works.
    Author { query: String },
    /// Ask for reading suggestions (answered from conversation context only).
    Recommendation,
    /// Anything else — small talk, app questions.
    General,
}

impl Intent {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Search { .. } => "search",
            Intent::Trending => "trending",
            Intent::Category { .. } => "category",
            Intent::Author { .. } => "author",
            Intent::Recommendation => "recommendation",
            Intent::General => "general",
        }
    }
}

/// Search-family keywords.
const SEARCH_KEYWORDS: &[&str] = &["tìm kiếm", "tìm", "kiếm", "search"];

/// Trending-family keywords.
const TRENDING_KEYWORDS: &[&str] = &[
    "hot",
    "nổi bật",
    "thịnh hành",
    "xu hướng",
    "trending",
    "xem nhiều",
];

/// Category-family keywords.
const CATEGORY_KEYWORDS: &[&str] = &["thể loại", "danh mục", "category"];

/// Author-family keywords.
const AUTHOR_KEYWORDS: &[&str] = &["tác giả", "author"];

/// Recommendation-family keywords.
const RECOMMENDATION_KEYWORDS: &[&str] = &["gợi ý", "đề xuất", "recommend", "nên đọc"];

/// Words stripped from a search utterance to isolate the search keyword.
/// Ordered longest-first so phrase stop-words are removed before their
/// single-word substrings.
const SEARCH_STOP_WORDS: &[&str] = &[
    "tìm kiếm",
    "tìm giúp tôi",
    "tìm cho tôi",
    "giúp tôi",
    "cho tôi",
    "tìm",
    "kiếm",
    "search",
    "truyện",
];

/// Filler stripped from category/author utterances to isolate the query.
const QUERY_STOP_WORDS: &[&str] = &[
    "thể loại",
    "danh mục",
    "category",
    "tác giả",
    "author",
    "của",
    "là ai",
    "là gì",
    "có những",
    "truyện",
    "nào",
    "gì",
];

/// Classify a raw user utterance into an [`Intent`].
///
/// Deterministic and total: always returns an intent, never errors. Matching
/// is case-insensitive substring containment over Vietnamese keyword sets.
pub fn classify(utterance: &str) -> Intent {
    let lower = utterance.to_lowercase();

    if contains_any(&lower, SEARCH_KEYWORDS) {
        let keyword = strip_words(&lower, SEARCH_STOP_WORDS);
        if keyword.is_empty() {
            // A bare "tìm" with nothing to search for is just chatter.
            return Intent::General;
        }
        return Intent::Search { keyword };
    }

    if contains_any(&lower, TRENDING_KEYWORDS) {
        return Intent::Trending;
    }

    if contains_any(&lower, CATEGORY_KEYWORDS) {
        return Intent::Category {
            query: strip_words(&lower, QUERY_STOP_WORDS),
        };
    }

    if contains_any(&lower, AUTHOR_KEYWORDS) {
        return Intent::Author {
            query: strip_words(&lower, QUERY_STOP_WORDS),
        };
    }

    if contains_any(&lower, RECOMMENDATION_KEYWORDS) {
        return Intent::Recommendation;
    }

    Intent::General
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

/// Remove every stop word from `text` and collapse the remaining whitespace.
fn strip_words(text: &str, stop_words: &[&str]) -> String {
    let mut result = text.to_string();
    for word in stop_words {
        result = result.replace(word, " ");
    }
    result.split_whitespace().collect::<Vec<_>>().join(" ")
}
