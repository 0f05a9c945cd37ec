//! Section composer.
//!
//! Runs the fixed block pipeline for one format profile and returns the
//! ordered [`ComposedDigest`]. Every stage is synchronous except the prompt
//! corner, which calls out to a [`PromptCornerGenerator`] under a timeout.

mod articles;
mod blocks;
mod sections;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{info, warn};

pub use articles::{
    articles_block, category_overview_block, content_meta_line, entry_icon, RELEVANCE_THRESHOLD,
};
pub use blocks::{BlockKind, ComposedDigest, ContentBlock};
pub use sections::{
    action_lines, dedup_suggestions, sentiment_distribution, word_count_line, ActionLine,
    EXECUTIVE_SUMMARY_MAX_WORDS, MAX_ACTION_ITEMS, MAX_RESEARCH_SUGGESTIONS,
};

use crate::format::{DigestFormat, FormatProfile};
use crate::model::{non_empty, DigestInput};
use crate::prompt_corner::PromptCornerGenerator;
use crate::text::count_words;

/// Default bound on one prompt-corner call.
pub const DEFAULT_PROMPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Entries listed in the structured summary handed to the prompt corner
/// when no executive summary was supplied.
const STRUCTURED_SUMMARY_ENTRIES: usize = 10;

/// One render call: the input plus the choices that shape it.
#[derive(Debug, Clone)]
pub struct DigestRequest {
    pub input: DigestInput,
    pub format: DigestFormat,
    pub date: NaiveDate,
    /// Overrides the profile title when set.
    pub custom_title: Option<String>,
}

impl DigestRequest {
    /// Request for a format on a date.
    #[must_use]
    pub fn new(input: DigestInput, format: DigestFormat, date: NaiveDate) -> Self {
        Self {
            input,
            format,
            date,
            custom_title: None,
        }
    }

    /// Override the document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.custom_title = Some(title.into());
        self
    }

    /// Active profile.
    pub fn profile(&self) -> &'static FormatProfile {
        self.format.profile()
    }
}

/// Builds digests through the block pipeline.
#[derive(Clone)]
pub struct DigestComposer {
    prompt_corner: Option<Arc<dyn PromptCornerGenerator>>,
    prompt_timeout: Duration,
    sort_groups_by_confidence: bool,
}

impl Default for DigestComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestComposer {
    /// Composer without a prompt-corner generator, sorting groups by
    /// confidence.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prompt_corner: None,
            prompt_timeout: DEFAULT_PROMPT_TIMEOUT,
            sort_groups_by_confidence: true,
        }
    }

    /// Attach a prompt-corner generator.
    #[must_use]
    pub fn with_prompt_corner(mut self, generator: Arc<dyn PromptCornerGenerator>) -> Self {
        self.prompt_corner = Some(generator);
        self
    }

    /// Bound each prompt-corner call.
    #[must_use]
    pub fn with_prompt_timeout(mut self, timeout: Duration) -> Self {
        self.prompt_timeout = timeout;
        self
    }

    /// Order topic groups by descending confidence (`true`) or by first
    /// appearance (`false`).
    #[must_use]
    pub fn with_group_sorting(mut self, sort_by_confidence: bool) -> Self {
        self.sort_groups_by_confidence = sort_by_confidence;
        self
    }

    /// Run the pipeline.
    pub async fn compose(&self, request: &DigestRequest) -> ComposedDigest {
        let profile = request.profile();
        let input = &request.input;
        let entries = &input.entries;

        info!(
            format = %profile.format,
            entries = entries.len(),
            "Composing digest"
        );

        let mut digest = ComposedDigest::new(profile.format);

        digest.push(
            BlockKind::Title,
            Some(sections::title_block(
                profile,
                request.custom_title.as_deref(),
                request.date,
            )),
        );
        digest.push(
            BlockKind::Banner,
            sections::banner_block(profile, input.banner.as_ref()),
        );
        digest.push(BlockKind::Intro, sections::intro_block(profile));
        digest.push(
            BlockKind::ExecutiveSummary,
            sections::executive_summary_block(profile, input.digest_summary.as_deref()),
        );
        digest.push(BlockKind::Alerts, sections::alerts_block(profile, input));
        digest.push(BlockKind::Insights, sections::insights_block(profile, input));
        digest.push(BlockKind::Actions, sections::actions_block(profile, entries));
        digest.push(
            BlockKind::CategoryOverview,
            articles::category_overview_block(profile, entries),
        );
        digest.push(
            BlockKind::Articles,
            articles::articles_block(profile, entries, self.sort_groups_by_confidence),
        );
        digest.push(BlockKind::Conclusion, sections::conclusion_block(profile));
        digest.push(BlockKind::PromptCorner, self.prompt_corner_block(profile, input).await);
        digest.push(
            BlockKind::MyTake,
            sections::my_take_block(input.my_take.as_deref()),
        );
        digest.push(
            BlockKind::References,
            sections::references_block(profile, entries),
        );

        let words = count_words(&digest.to_markdown());
        if profile.enforces_digest_budget() && words > 0 {
            digest.insert_after_title(BlockKind::WordCount, word_count_line(words));
        }

        info!(
            format = %profile.format,
            blocks = digest.blocks().len(),
            words,
            "Digest composed"
        );

        digest
    }

    async fn prompt_corner_block(
        &self,
        profile: &FormatProfile,
        input: &DigestInput,
    ) -> Option<String> {
        if !profile.include_prompt_corner {
            return None;
        }
        let generator = self.prompt_corner.as_ref()?;
        let summary = prompt_source(input)?;

        match tokio::time::timeout(self.prompt_timeout, generator.generate(&summary)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => {
                Some(format!("## 🧠 Prompt Corner\n\n{}", text.trim()))
            }
            Ok(Ok(_)) => {
                warn!(generator = generator.name(), "Prompt corner came back empty");
                None
            }
            Ok(Err(e)) => {
                warn!(generator = generator.name(), error = %e, "Prompt corner generation failed");
                None
            }
            Err(_) => {
                warn!(
                    generator = generator.name(),
                    timeout_secs = self.prompt_timeout.as_secs(),
                    "Prompt corner generation timed out"
                );
                None
            }
        }
    }
}

/// Text handed to the prompt corner: the executive summary, or a structured
/// list of the leading entries.
fn prompt_source(input: &DigestInput) -> Option<String> {
    if let Some(summary) = non_empty(input.digest_summary.as_deref()) {
        return Some(summary.to_string());
    }
    if input.entries.is_empty() {
        return None;
    }

    let lines = input
        .entries
        .iter()
        .take(STRUCTURED_SUMMARY_ENTRIES)
        .map(|e| match non_empty(Some(&e.summary_text)) {
            Some(summary) => format!("- {}: {summary}", e.title),
            None => format!("- {}", e.title),
        })
        .collect::<Vec<_>>()
        .join("\n");
    Some(lines)
}
