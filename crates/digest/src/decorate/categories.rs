//! Editorial categories for compact digest views.

use std::fmt;

use super::{first_match, KeywordRule};
use crate::model::ArticleEntry;

/// Category used by the compact overview of brief-style digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BriefCategory {
    /// Launches, releases and announcements.
    ProductLaunches,
    /// Guides, architecture and performance write-ups.
    EngineeringDeepDives,
    /// Things people built and case studies.
    InterestingImplementations,
    /// Everything else.
    WorthExploring,
}

impl BriefCategory {
    /// All categories in display order.
    #[must_use]
    pub fn all() -> &'static [BriefCategory] {
        &[
            BriefCategory::ProductLaunches,
            BriefCategory::EngineeringDeepDives,
            BriefCategory::InterestingImplementations,
            BriefCategory::WorthExploring,
        ]
    }

    /// Section heading.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            BriefCategory::ProductLaunches => "Product Launches",
            BriefCategory::EngineeringDeepDives => "Engineering Deep Dives",
            BriefCategory::InterestingImplementations => "Interesting Implementations",
            BriefCategory::WorthExploring => "Worth Exploring",
        }
    }

    /// Heading emoji.
    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            BriefCategory::ProductLaunches => "🚀",
            BriefCategory::EngineeringDeepDives => "🔬",
            BriefCategory::InterestingImplementations => "🏗️",
            BriefCategory::WorthExploring => "🧭",
        }
    }
}

impl fmt::Display for BriefCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Brief categorization rules; unmatched entries land in `WorthExploring`.
pub const BRIEF_CATEGORY_RULES: &[KeywordRule<BriefCategory>] = &[
    KeywordRule {
        keywords: &[
            "launch",
            "release",
            "announce",
            "announcing",
            "announcement",
            "update",
            "introducing",
            "unveil",
            "available",
            "version",
        ],
        value: BriefCategory::ProductLaunches,
    },
    KeywordRule {
        keywords: &[
            "deep dive",
            "deep-dive",
            "guide",
            "tutorial",
            "architecture",
            "performance",
            "internals",
            "under the hood",
            "benchmark",
        ],
        value: BriefCategory::EngineeringDeepDives,
    },
    KeywordRule {
        keywords: &[
            "built",
            "building",
            "implementation",
            "implemented",
            "case study",
            "migrated",
            "migration",
            "lessons learned",
        ],
        value: BriefCategory::InterestingImplementations,
    },
];

/// Assign every entry to exactly one brief category.
///
/// Returns all four categories in display order; entries keep their input
/// order within a category.
pub fn categorize_articles_for_brief(
    entries: &[ArticleEntry],
) -> Vec<(BriefCategory, Vec<&ArticleEntry>)> {
    let mut buckets: Vec<(BriefCategory, Vec<&ArticleEntry>)> = BriefCategory::all()
        .iter()
        .map(|c| (*c, Vec::new()))
        .collect();

    for entry in entries {
        let haystack = format!("{} {}", entry.title, entry.summary_text);
        let category =
            first_match(BRIEF_CATEGORY_RULES, &haystack).unwrap_or(BriefCategory::WorthExploring);
        if let Some((_, bucket)) = buckets.iter_mut().find(|(c, _)| *c == category) {
            bucket.push(entry);
        }
    }

    buckets
}

/// Category named in a `"<category> | <insight>"` take, used by the
/// scannable digest. Variants are in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScannableCategory {
    BreakingAndHot,
    ProductUpdates,
    DevToolsAndTechniques,
    ResearchAndAnalysis,
    IdeasAndInspiration,
    WorthMonitoring,
}

impl ScannableCategory {
    /// All categories in priority order.
    #[must_use]
    pub fn all() -> &'static [ScannableCategory] {
        &[
            ScannableCategory::BreakingAndHot,
            ScannableCategory::ProductUpdates,
            ScannableCategory::DevToolsAndTechniques,
            ScannableCategory::ResearchAndAnalysis,
            ScannableCategory::IdeasAndInspiration,
            ScannableCategory::WorthMonitoring,
        ]
    }

    /// Section heading.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            ScannableCategory::BreakingAndHot => "Breaking & Hot",
            ScannableCategory::ProductUpdates => "Product Updates",
            ScannableCategory::DevToolsAndTechniques => "Dev Tools & Techniques",
            ScannableCategory::ResearchAndAnalysis => "Research & Analysis",
            ScannableCategory::IdeasAndInspiration => "Ideas & Inspiration",
            ScannableCategory::WorthMonitoring => "Worth Monitoring",
        }
    }

    /// Heading emoji.
    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            ScannableCategory::BreakingAndHot => "🔥",
            ScannableCategory::ProductUpdates => "🚀",
            ScannableCategory::DevToolsAndTechniques => "🛠️",
            ScannableCategory::ResearchAndAnalysis => "📊",
            ScannableCategory::IdeasAndInspiration => "💡",
            ScannableCategory::WorthMonitoring => "👀",
        }
    }

    /// Resolve the category token of a take.
    ///
    /// Case, spacing and `&`/`and` differences are ignored.
    pub fn parse(token: &str) -> Option<Self> {
        let wanted = normalize(token);
        if wanted.is_empty() {
            return None;
        }
        Self::all()
            .iter()
            .copied()
            .find(|c| normalize(c.title()) == wanted)
    }
}

impl fmt::Display for ScannableCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

fn normalize(s: &str) -> String {
    s.to_lowercase()
        .replace('&', "and")
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> ArticleEntry {
        ArticleEntry::new(title, format!("https://example.com/{}", title.len()), "")
    }

    #[test]
    fn test_every_entry_lands_in_one_category() {
        let entries = vec![
            entry("Postgres 17 released"),
            entry("A deep dive into async Rust"),
            entry("How we built our search engine"),
            entry("Thoughts on remote work"),
            entry("Announcing the new CLI"),
        ];

        let buckets = categorize_articles_for_brief(&entries);
        let total: usize = buckets.iter().map(|(_, b)| b.len()).sum();
        assert_eq!(total, entries.len());

        let launches = &buckets[0];
        assert_eq!(launches.0, BriefCategory::ProductLaunches);
        let titles: Vec<_> = launches.1.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Postgres 17 released", "Announcing the new CLI"]);

        assert_eq!(buckets[1].1[0].title, "A deep dive into async Rust");
        assert_eq!(buckets[2].1[0].title, "How we built our search engine");
        assert_eq!(buckets[3].1[0].title, "Thoughts on remote work");
    }

    #[test]
    fn test_scannable_parse() {
        assert_eq!(
            ScannableCategory::parse("breaking and hot"),
            Some(ScannableCategory::BreakingAndHot)
        );
        assert_eq!(
            ScannableCategory::parse(" Dev Tools & Techniques "),
            Some(ScannableCategory::DevToolsAndTechniques)
        );
        assert_eq!(ScannableCategory::parse("Gossip"), None);
        assert_eq!(ScannableCategory::parse(""), None);
    }
}
