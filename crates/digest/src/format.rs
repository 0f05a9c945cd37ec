//! Digest format profiles.
//!
//! A profile bundles the inclusion switches and length budgets of one
//! editorial style. Profiles are static; unknown names resolve to
//! [`DigestFormat::Standard`].

use std::fmt;

/// Named digest style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestFormat {
    Brief,
    #[default]
    Standard,
    Detailed,
    Newsletter,
    Scannable,
    Email,
}

impl DigestFormat {
    /// Get all formats.
    #[must_use]
    pub fn all() -> &'static [DigestFormat] {
        &[
            DigestFormat::Brief,
            DigestFormat::Standard,
            DigestFormat::Detailed,
            DigestFormat::Newsletter,
            DigestFormat::Scannable,
            DigestFormat::Email,
        ]
    }

    /// Parse a format name. Unknown names fall back to `Standard`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "brief" | "short" => DigestFormat::Brief,
            "detailed" | "full" => DigestFormat::Detailed,
            "newsletter" => DigestFormat::Newsletter,
            "scannable" | "scan" => DigestFormat::Scannable,
            "email" => DigestFormat::Email,
            _ => DigestFormat::Standard,
        }
    }

    /// Lowercase name used in filenames and on the CLI.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DigestFormat::Brief => "brief",
            DigestFormat::Standard => "standard",
            DigestFormat::Detailed => "detailed",
            DigestFormat::Newsletter => "newsletter",
            DigestFormat::Scannable => "scannable",
            DigestFormat::Email => "email",
        }
    }

    /// The static profile for this format.
    #[must_use]
    pub fn profile(&self) -> &'static FormatProfile {
        match self {
            DigestFormat::Brief => &BRIEF,
            DigestFormat::Standard => &STANDARD,
            DigestFormat::Detailed => &DETAILED,
            DigestFormat::Newsletter => &NEWSLETTER,
            DigestFormat::Scannable => &SCANNABLE,
            DigestFormat::Email => &EMAIL,
        }
    }
}

impl fmt::Display for DigestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusion switches and budgets for one digest style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatProfile {
    pub format: DigestFormat,
    /// Default document title.
    pub title: &'static str,
    pub include_summaries: bool,
    pub include_key_insights: bool,
    pub include_action_items: bool,
    pub include_source_links: bool,
    pub include_prompt_corner: bool,
    pub include_individual_articles: bool,
    pub include_topic_clustering: bool,
    pub include_banner: bool,
    /// Compact per-category list of linked titles.
    pub include_category_overview: bool,
    /// Words per article summary; 0 means unlimited.
    pub max_summary_words: usize,
    /// Word budget for the whole digest; 0 means unlimited.
    pub max_digest_words: usize,
    pub intro_text: &'static str,
    pub conclusion_text: &'static str,
    /// Placed between consecutive article entries.
    pub section_separator: &'static str,
}

impl FormatProfile {
    /// Look up a profile by name, falling back to `standard`.
    pub fn lookup(name: &str) -> &'static FormatProfile {
        DigestFormat::parse(name).profile()
    }

    /// Whether the profile enforces a digest-wide word budget.
    #[must_use]
    pub const fn enforces_digest_budget(&self) -> bool {
        self.max_digest_words > 0
    }

    /// Whether the key insights block is shown for this profile.
    #[must_use]
    pub fn shows_insights(&self) -> bool {
        self.include_key_insights
            || matches!(
                self.format,
                DigestFormat::Detailed | DigestFormat::Newsletter
            )
    }
}

pub const BRIEF: FormatProfile = FormatProfile {
    format: DigestFormat::Brief,
    title: "Daily Brief",
    include_summaries: true,
    include_key_insights: false,
    include_action_items: false,
    include_source_links: true,
    include_prompt_corner: false,
    include_individual_articles: false,
    include_topic_clustering: false,
    include_banner: false,
    include_category_overview: true,
    max_summary_words: 25,
    max_digest_words: 200,
    intro_text: "The essentials, in two minutes or less.",
    conclusion_text: "",
    section_separator: "\n\n",
};

pub const STANDARD: FormatProfile = FormatProfile {
    format: DigestFormat::Standard,
    title: "Tech Digest",
    include_summaries: true,
    include_key_insights: true,
    include_action_items: true,
    include_source_links: true,
    include_prompt_corner: false,
    include_individual_articles: true,
    include_topic_clustering: true,
    include_banner: false,
    include_category_overview: false,
    max_summary_words: 25,
    max_digest_words: 400,
    intro_text: "Here's what caught our attention, grouped by topic.",
    conclusion_text: "That's all for this edition. Happy reading!",
    section_separator: "\n\n",
};

pub const DETAILED: FormatProfile = FormatProfile {
    format: DigestFormat::Detailed,
    title: "Detailed Tech Digest",
    include_summaries: true,
    include_key_insights: true,
    include_action_items: true,
    include_source_links: true,
    include_prompt_corner: true,
    include_individual_articles: true,
    include_topic_clustering: true,
    include_banner: true,
    include_category_overview: false,
    max_summary_words: 0,
    max_digest_words: 0,
    intro_text: "A complete walkthrough of everything worth reading this round, with analysis.",
    conclusion_text: "Thanks for reading the full edition. See you next time.",
    section_separator: "\n\n---\n\n",
};

pub const NEWSLETTER: FormatProfile = FormatProfile {
    format: DigestFormat::Newsletter,
    title: "Tech Newsletter",
    include_summaries: true,
    include_key_insights: true,
    include_action_items: true,
    include_source_links: true,
    include_prompt_corner: true,
    include_individual_articles: false,
    include_topic_clustering: true,
    include_banner: true,
    include_category_overview: true,
    max_summary_words: 40,
    max_digest_words: 800,
    intro_text: "Welcome to this edition of the newsletter. Grab a coffee.",
    conclusion_text: "Until next time, keep building.",
    section_separator: "\n\n",
};

pub const SCANNABLE: FormatProfile = FormatProfile {
    format: DigestFormat::Scannable,
    title: "Quick Scan",
    include_summaries: true,
    include_key_insights: false,
    include_action_items: false,
    include_source_links: true,
    include_prompt_corner: false,
    include_individual_articles: true,
    include_topic_clustering: false,
    include_banner: false,
    include_category_overview: false,
    max_summary_words: 30,
    max_digest_words: 400,
    intro_text: "Skim the headlines, dive into what matters.",
    conclusion_text: "",
    section_separator: "\n",
};

pub const EMAIL: FormatProfile = FormatProfile {
    format: DigestFormat::Email,
    title: "Tech Digest",
    include_summaries: true,
    include_key_insights: true,
    include_action_items: true,
    include_source_links: true,
    include_prompt_corner: false,
    include_individual_articles: false,
    include_topic_clustering: true,
    include_banner: true,
    include_category_overview: true,
    max_summary_words: 40,
    max_digest_words: 400,
    intro_text: "Welcome to this edition of the newsletter. Grab a coffee.",
    conclusion_text: "Until next time, keep building.",
    section_separator: "\n\n",
};
