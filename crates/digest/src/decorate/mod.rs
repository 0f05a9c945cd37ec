//! Keyword-driven decoration: icons, suggested actions and categories.
//!
//! Every heuristic here is an ordered rule table evaluated top to bottom;
//! the first rule with a matching keyword wins.

mod actions;
mod categories;
mod icons;

pub use actions::{
    actionable_item, extract_key_term, extract_tool_name, why_it_matters, ActionRule,
    ActionableItem, ACTION_RULES, WHY_IT_MATTERS_RULES,
};
pub use categories::{
    categorize_articles_for_brief, BriefCategory, ScannableCategory, BRIEF_CATEGORY_RULES,
};
pub use icons::{
    content_type_emoji, sentiment_emoji, CONTENT_TYPE_ICON_RULES, DEFAULT_CONTENT_EMOJI,
    DEFAULT_SENTIMENT_EMOJI,
};

/// One row of a first-match-wins keyword table.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T: 'static> {
    /// Lowercase keywords or phrases; any one of them triggers the rule.
    pub keywords: &'static [&'static str],
    /// Value produced when the rule fires.
    pub value: T,
}

impl<T> KeywordRule<T> {
    /// Whether any keyword of this rule occurs in `haystack`.
    pub fn matches(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|kw| matches_keyword(haystack, kw))
    }
}

/// Return the value of the first rule matching `text`.
pub fn first_match<T: Copy>(rules: &[KeywordRule<T>], text: &str) -> Option<T> {
    let haystack = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&haystack))
        .map(|rule| rule.value)
}

/// Match one keyword against lowercase text.
///
/// Phrases match as substrings. Single words match whole words, or word
/// prefixes when longer than three characters ("deploy" hits "deployment",
/// "ai" does not hit "maintain"). A trailing plural `s` is accepted.
pub(crate) fn matches_keyword(haystack: &str, keyword: &str) -> bool {
    if keyword.contains(' ') {
        return haystack.contains(keyword);
    }

    haystack
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .any(|word| {
            if keyword.chars().count() <= 3 {
                word == keyword || word.strip_suffix('s') == Some(keyword)
            } else {
                word.starts_with(keyword)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_keywords_match_whole_words() {
        assert!(matches_keyword("new ai model", "ai"));
        assert!(!matches_keyword("maintain the repo", "ai"));
        assert!(matches_keyword("comparing llms", "llm"));
        assert!(!matches_keyword("good habits", "go"));
    }

    #[test]
    fn test_long_keywords_match_prefixes() {
        assert!(matches_keyword("zero-downtime deployments", "deploy"));
        assert!(matches_keyword("v2 released today", "release"));
    }

    #[test]
    fn test_phrases_match_substrings() {
        assert!(matches_keyword("how to write a parser", "how to"));
        assert!(!matches_keyword("how it works", "how to"));
    }

    #[test]
    fn test_first_match_respects_order() {
        const RULES: &[KeywordRule<u8>] = &[
            KeywordRule {
                keywords: &["rust"],
                value: 1,
            },
            KeywordRule {
                keywords: &["compiler"],
                value: 2,
            },
        ];
        assert_eq!(first_match(RULES, "The Rust compiler"), Some(1));
        assert_eq!(first_match(RULES, "A compiler"), Some(2));
        assert_eq!(first_match(RULES, "Nothing here"), None);
    }
}
