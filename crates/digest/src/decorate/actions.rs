//! Suggested next steps and "why it matters" lines for entries.

use super::{first_match, KeywordRule};
use crate::model::ArticleEntry;

/// Recommendation template. `{api}`, `{tool}` and `{term}` are substituted
/// from the entry title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRule {
    pub template: &'static str,
}

/// Action rules in priority order, matched against title and summary.
pub const ACTION_RULES: &[KeywordRule<ActionRule>] = &[
    KeywordRule {
        keywords: &["api"],
        value: ActionRule {
            template: "Test the {api} API in a sandbox project before wiring it into production",
        },
    },
    KeywordRule {
        keywords: &["tool", "library"],
        value: ActionRule {
            template: "Evaluate {tool} against what your team uses today",
        },
    },
    KeywordRule {
        keywords: &["security", "vulnerability", "cve"],
        value: ActionRule {
            template: "Audit your services for the issues described here",
        },
    },
    KeywordRule {
        keywords: &["performance", "latency", "benchmark"],
        value: ActionRule {
            template: "Profile a hot path in your code using these techniques",
        },
    },
    KeywordRule {
        keywords: &["testing", "test"],
        value: ActionRule {
            template: "Add tests covering the scenarios this article walks through",
        },
    },
    KeywordRule {
        keywords: &["docker", "container"],
        value: ActionRule {
            template: "Containerize one service with the approach shown here",
        },
    },
    KeywordRule {
        keywords: &["ai", "llm", "ml"],
        value: ActionRule {
            template: "Experiment with {tool} on a small internal use case",
        },
    },
    KeywordRule {
        keywords: &["database", "sql", "query"],
        value: ActionRule {
            template: "Review your slowest database queries with these optimizations in mind",
        },
    },
    KeywordRule {
        keywords: &["monitoring", "observability"],
        value: ActionRule {
            template: "Add monitoring for the signals this article highlights",
        },
    },
    KeywordRule {
        keywords: &["deployment", "deploy"],
        value: ActionRule {
            template: "Automate one manual step of your deployment pipeline",
        },
    },
    KeywordRule {
        keywords: &["react"],
        value: ActionRule {
            template: "Try these React patterns in a component you own",
        },
    },
    KeywordRule {
        keywords: &["kubernetes", "k8s"],
        value: ActionRule {
            template: "Apply these Kubernetes practices to a staging cluster first",
        },
    },
    KeywordRule {
        keywords: &["go", "golang"],
        value: ActionRule {
            template: "Prototype the Go approach described here in a small service",
        },
    },
    KeywordRule {
        keywords: &["rust"],
        value: ActionRule {
            template: "Port a small utility to Rust using the ideas from this article",
        },
    },
];

/// Fallback recommendation when no rule fires.
const DEFAULT_ACTION: &str = "Research {term} further to see whether it applies to your work";

/// "Why it matters" lines, matched against title and summary.
pub const WHY_IT_MATTERS_RULES: &[KeywordRule<&str>] = &[
    KeywordRule {
        keywords: &["security", "vulnerability", "breach", "privacy"],
        value: "Security gaps like this tend to reach production before anyone notices.",
    },
    KeywordRule {
        keywords: &["performance", "latency", "optimization", "speed"],
        value: "Performance wins translate directly into lower costs and happier users.",
    },
    KeywordRule {
        keywords: &["ai", "llm", "machine learning", "model"],
        value: "AI tooling is changing how software gets built and reviewed.",
    },
    KeywordRule {
        keywords: &["release", "launch", "announce", "update"],
        value: "New releases can change what is practical in your stack.",
    },
    KeywordRule {
        keywords: &["research", "study", "analysis", "survey"],
        value: "Evidence from real data helps ground technical decisions.",
    },
];

const DEFAULT_WHY_IT_MATTERS: &str = "Worth keeping on your radar as the ecosystem shifts.";

/// Terms preferred when naming the subject of an entry.
const TECH_TERMS: &[&str] = &[
    "kubernetes",
    "docker",
    "react",
    "rust",
    "golang",
    "go",
    "python",
    "typescript",
    "javascript",
    "node.js",
    "deno",
    "bun",
    "postgres",
    "postgresql",
    "mysql",
    "sqlite",
    "redis",
    "kafka",
    "terraform",
    "graphql",
    "grpc",
    "webassembly",
    "wasm",
    "linux",
    "llm",
    "gpt",
    "claude",
    "openai",
    "pytorch",
    "tensorflow",
    "aws",
    "azure",
    "gcp",
    "github",
    "git",
    "nginx",
    "prometheus",
    "grafana",
    "elasticsearch",
    "mongodb",
    "vue",
    "svelte",
    "django",
    "rails",
    "spark",
    "tokio",
    "axum",
];

/// Words never used as an extracted term.
const STOP_WORDS: &[&str] = &[
    "the",
    "a",
    "an",
    "and",
    "or",
    "but",
    "for",
    "with",
    "from",
    "into",
    "onto",
    "your",
    "you",
    "how",
    "what",
    "why",
    "when",
    "where",
    "this",
    "that",
    "these",
    "those",
    "new",
    "using",
    "use",
    "about",
    "over",
    "after",
    "before",
    "its",
    "is",
    "are",
    "was",
    "were",
    "will",
    "can",
    "to",
    "of",
    "in",
    "on",
    "at",
    "by",
    "as",
    "be",
    "my",
    "our",
    "we",
    "i",
    "it",
    "all",
    "more",
    "most",
    "best",
    "top",
    "introducing",
    "announcing",
    "just",
    "now",
    "here",
    "there",
    "than",
    "then",
    "does",
    "do",
    "get",
    "got",
    "make",
    "made",
];

/// A suggested next step for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionableItem {
    pub text: String,
    /// False when only the generic research fallback applied.
    pub specific: bool,
}

/// Build the suggested action for an entry.
pub fn actionable_item(entry: &ArticleEntry) -> ActionableItem {
    let haystack = format!("{} {}", entry.title, entry.summary_text);
    let (template, specific) = match first_match(ACTION_RULES, &haystack) {
        Some(rule) => (rule.template, true),
        None => (DEFAULT_ACTION, false),
    };

    let mut text = template.to_string();
    if text.contains("{api}") {
        text = text.replace("{api}", &extract_api_subject(&entry.title));
    }
    if text.contains("{tool}") {
        text = text.replace("{tool}", &extract_tool_name(&entry.title));
    }
    if text.contains("{term}") {
        text = text.replace("{term}", &extract_key_term(&entry.title));
    }

    ActionableItem { text, specific }
}

/// One-line explanation of why an entry deserves attention.
pub fn why_it_matters(entry: &ArticleEntry) -> &'static str {
    let haystack = format!("{} {}", entry.title, entry.summary_text);
    first_match(WHY_IT_MATTERS_RULES, &haystack).unwrap_or(DEFAULT_WHY_IT_MATTERS)
}

/// Name the tool an entry talks about.
pub fn extract_tool_name(title: &str) -> String {
    extract_term(title).unwrap_or_else(|| "this tool".to_string())
}

/// Name the product whose API an entry covers: the word right before "API",
/// else the extracted tool name.
pub fn extract_api_subject(title: &str) -> String {
    let words = title_words(title);
    words
        .windows(2)
        .find(|pair| pair[1].eq_ignore_ascii_case("api"))
        .map(|pair| pair[0])
        .filter(|w| !STOP_WORDS.contains(&w.to_lowercase().as_str()))
        .map_or_else(|| extract_tool_name(title), str::to_string)
}

/// Name the subject of an entry for generic recommendations.
pub fn extract_key_term(title: &str) -> String {
    extract_term(title).unwrap_or_else(|| "this topic".to_string())
}

fn title_words(title: &str) -> Vec<&str> {
    title
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '.' && c != '-'))
        .map(|w| w.trim_end_matches('.'))
        .filter(|w| !w.is_empty())
        .collect()
}

fn extract_term(title: &str) -> Option<String> {
    let words = title_words(title);

    if let Some(known) = words
        .iter()
        .find(|w| TECH_TERMS.contains(&w.to_lowercase().as_str()))
    {
        return Some((*known).to_string());
    }

    words
        .iter()
        .find(|w| w.chars().count() > 3 && !STOP_WORDS.contains(&w.to_lowercase().as_str()))
        .map(|w| (*w).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_rule_wins_over_later_rules() {
        let entry = ArticleEntry::new(
            "Stripe API adds Rust SDK",
            "https://example.com",
            "Security fixes too",
        );
        let item = actionable_item(&entry);
        assert!(item.specific);
        assert_eq!(
            item.text,
            "Test the Stripe API in a sandbox project before wiring it into production"
        );
    }

    #[test]
    fn test_api_subject_falls_back_to_tool_name() {
        assert_eq!(extract_api_subject("GitHub API rate limits change"), "GitHub");
        assert_eq!(extract_api_subject("The API behind Kafka Streams"), "Kafka");
        assert_eq!(extract_api_subject("API design in Rust"), "Rust");
    }

    #[test]
    fn test_tool_rule_uses_extracted_name() {
        let entry = ArticleEntry::new("Why we picked Terraform as our tool", "https://e", "");
        let item = actionable_item(&entry);
        assert_eq!(item.text, "Evaluate Terraform against what your team uses today");
    }

    #[test]
    fn test_default_falls_back_to_key_term() {
        let entry = ArticleEntry::new("The history of typography", "https://e", "Letters");
        let item = actionable_item(&entry);
        assert!(!item.specific);
        assert_eq!(
            item.text,
            "Research history further to see whether it applies to your work"
        );
    }

    #[test]
    fn test_extract_skips_stop_words() {
        assert_eq!(extract_key_term("How the Best Teams Ship"), "Teams");
        assert_eq!(extract_tool_name("A b c"), "this tool");
        assert_eq!(extract_tool_name("Scaling Postgres at work"), "Postgres");
    }

    #[test]
    fn test_why_it_matters() {
        let entry = ArticleEntry::new("Critical vulnerability in OpenSSL", "https://e", "");
        assert!(why_it_matters(&entry).starts_with("Security gaps"));

        let entry = ArticleEntry::new("Gardening notes", "https://e", "");
        assert_eq!(why_it_matters(&entry), DEFAULT_WHY_IT_MATTERS);
    }
}
