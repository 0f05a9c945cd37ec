//! Content-type and sentiment emoji selection.

use super::{first_match, KeywordRule};

/// Icon used when no content rule matches.
pub const DEFAULT_CONTENT_EMOJI: &str = "🔥";

/// Icon used for unrecognized sentiment labels.
pub const DEFAULT_SENTIMENT_EMOJI: &str = "📄";

/// Content icon rules, checked in order against `"{content_type} {title}"`.
pub const CONTENT_TYPE_ICON_RULES: &[KeywordRule<&str>] = &[
    KeywordRule {
        keywords: &["video", "youtube"],
        value: "🎥",
    },
    KeywordRule {
        keywords: &["pdf", "guide", "documentation"],
        value: "📄",
    },
    KeywordRule {
        keywords: &["tool", "platform", "app"],
        value: "🛠️",
    },
    KeywordRule {
        keywords: &["research", "study", "analysis"],
        value: "📊",
    },
    KeywordRule {
        keywords: &["how to", "tutorial", "guide"],
        value: "📚",
    },
    KeywordRule {
        keywords: &["announcement", "release", "launch"],
        value: "📢",
    },
    KeywordRule {
        keywords: &["ai", "machine learning", "llm"],
        value: "🤖",
    },
    KeywordRule {
        keywords: &["performance", "optimization", "speed"],
        value: "⚡",
    },
    KeywordRule {
        keywords: &["security", "privacy", "vulnerability"],
        value: "🔒",
    },
];

/// Pick an icon for an entry from its content type and title.
pub fn content_type_emoji(content_type: &str, title: &str) -> &'static str {
    let text = format!("{content_type} {title}");
    first_match(CONTENT_TYPE_ICON_RULES, &text).unwrap_or(DEFAULT_CONTENT_EMOJI)
}

/// Map a sentiment label to its emoji.
pub fn sentiment_emoji(label: &str) -> &'static str {
    match label.trim().to_lowercase().as_str() {
        "positive" | "very positive" => "😊",
        "negative" | "very negative" => "😟",
        "neutral" => "😐",
        "mixed" => "🤔",
        _ => DEFAULT_SENTIMENT_EMOJI,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_drives_icon() {
        assert_eq!(content_type_emoji("youtube", "Conference keynote"), "🎥");
        assert_eq!(content_type_emoji("pdf", "Quarterly report"), "📄");
    }

    #[test]
    fn test_title_keywords_in_order() {
        assert_eq!(content_type_emoji("html", "A new platform for builds"), "🛠️");
        assert_eq!(content_type_emoji("", "Study of compile times"), "📊");
        assert_eq!(content_type_emoji("", "How to write a lexer"), "📚");
        assert_eq!(content_type_emoji("", "Version 2 release notes"), "📢");
        assert_eq!(content_type_emoji("", "Running an LLM locally"), "🤖");
        assert_eq!(content_type_emoji("", "Speed tricks for SQL"), "⚡");
        assert_eq!(content_type_emoji("", "Privacy by default"), "🔒");
        assert_eq!(content_type_emoji("", "Weekly roundup"), DEFAULT_CONTENT_EMOJI);
    }

    #[test]
    fn test_guide_hits_documentation_rule_first() {
        // "guide" sits in both the documentation and tutorial rows.
        assert_eq!(content_type_emoji("", "The complete guide"), "📄");
    }

    #[test]
    fn test_sentiment_emoji() {
        assert_eq!(sentiment_emoji("Positive"), "😊");
        assert_eq!(sentiment_emoji("very negative"), "😟");
        assert_eq!(sentiment_emoji("neutral"), "😐");
        assert_eq!(sentiment_emoji("mixed"), "🤔");
        assert_eq!(sentiment_emoji(""), DEFAULT_SENTIMENT_EMOJI);
    }
}
