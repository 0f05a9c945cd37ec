//! Non-article pipeline stages.
//!
//! Each stage returns `None` when it has nothing to emit.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::NaiveDate;

use crate::decorate::{actionable_item, sentiment_emoji};
use crate::format::{DigestFormat, FormatProfile};
use crate::model::{non_empty, ArticleEntry, BannerArtifact, DigestInput};
use crate::text::{estimate_read_time, truncate_to_word_limit};

/// Words kept from the executive summary under a digest budget.
pub const EXECUTIVE_SUMMARY_MAX_WORDS: usize = 150;

/// Cap on research suggestions in the insights block.
pub const MAX_RESEARCH_SUGGESTIONS: usize = 8;

/// Cap on entry-specific action items.
pub const MAX_ACTION_ITEMS: usize = 3;

/// Minimum specific actions before generic ones are added.
const MIN_SPECIFIC_ACTIONS: usize = 2;

/// Cap on generic fallback actions.
const MAX_FALLBACK_ACTIONS: usize = 2;

const GENERIC_ACTIONS: &[&str] = &[
    "Pick one article from this digest and share it with your team",
    "Block 30 minutes this week to go deeper on the topic that surprised you most",
];

/// `# {title} — {date}`.
pub fn title_block(profile: &FormatProfile, custom_title: Option<&str>, date: NaiveDate) -> String {
    let title = non_empty(custom_title).unwrap_or(profile.title);
    format!("# {title} — {}", date.format("%B %-d, %Y"))
}

/// Banner image with alt text and themes.
pub fn banner_block(profile: &FormatProfile, banner: Option<&BannerArtifact>) -> Option<String> {
    if !profile.include_banner {
        return None;
    }
    let banner = banner.filter(|b| !b.image_url.trim().is_empty())?;

    let mut md = format!("![{}]({})", banner.alt_text.trim(), banner.image_url.trim());
    let themes: Vec<&str> = banner
        .themes
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if !themes.is_empty() {
        let _ = write!(md, "\n\n*Themes: {}*", themes.join(" • "));
    }
    Some(md)
}

/// Profile introduction, verbatim.
pub fn intro_block(profile: &FormatProfile) -> Option<String> {
    non_empty(Some(profile.intro_text)).map(str::to_string)
}

/// Upstream executive summary under a header.
pub fn executive_summary_block(profile: &FormatProfile, summary: Option<&str>) -> Option<String> {
    let summary = non_empty(summary)?;
    let text = if profile.enforces_digest_budget() {
        truncate_to_word_limit(summary, EXECUTIVE_SUMMARY_MAX_WORDS)
    } else {
        summary.to_string()
    };
    Some(format!("## 📋 Executive Summary\n\n{text}"))
}

/// Alerts, or a neutral monitoring note when entries carry alert data.
pub fn alerts_block(profile: &FormatProfile, input: &DigestInput) -> Option<String> {
    if profile.format == DigestFormat::Scannable {
        return None;
    }

    if let Some(summary) = non_empty(input.alerts_summary.as_deref()) {
        return Some(format!("## ⚠️ Alerts\n\n{summary}"));
    }

    let flagged: Vec<&ArticleEntry> = input.entries.iter().filter(|e| e.has_alert()).collect();
    if flagged.is_empty() {
        return None;
    }

    let mut md = String::from("## ⚠️ Alerts\n\n");
    let _ = write!(
        md,
        "🔔 Alert monitoring is active: {} of {} articles matched watch conditions.\n",
        flagged.len(),
        input.entries.len()
    );
    for entry in flagged {
        if entry.alert_conditions.is_empty() {
            let _ = write!(md, "\n- **{}**", entry.title);
        } else {
            let _ = write!(
                md,
                "\n- **{}**: {}",
                entry.title,
                entry.alert_conditions.join(", ")
            );
        }
    }
    Some(md)
}

/// Sentiment distribution, trend summary and research suggestions.
pub fn insights_block(profile: &FormatProfile, input: &DigestInput) -> Option<String> {
    if profile.format == DigestFormat::Scannable || !profile.shows_insights() {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();

    let distribution = sentiment_distribution(&input.entries);
    if !distribution.is_empty() {
        let line = distribution
            .iter()
            .map(|(label, count)| format!("{} {label} ({count})", sentiment_emoji(label)))
            .collect::<Vec<_>>()
            .join(" • ");
        parts.push(format!("**Sentiment:** {line}"));
    }

    if let Some(trend) = non_empty(input.trend_summary.as_deref()) {
        parts.push(format!("**Trends:** {trend}"));
    }

    let suggestions = dedup_suggestions(&input.research_suggestions);
    if !suggestions.is_empty() {
        let list = suggestions
            .iter()
            .map(|s| format!("- {s}"))
            .collect::<Vec<_>>()
            .join("\n");
        parts.push(format!("**Research suggestions:**\n\n{list}"));
    }

    if parts.is_empty() {
        return None;
    }
    Some(format!("## 📊 Key Insights\n\n{}", parts.join("\n\n")))
}

/// Count entries per lowercase sentiment label, most common first.
///
/// Ties keep first-appearance order; unlabeled entries are skipped.
pub fn sentiment_distribution(entries: &[ArticleEntry]) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let label = entry.sentiment_label.trim().to_lowercase();
        if label.is_empty() {
            continue;
        }
        let count = counts.entry(label.clone()).or_insert(0);
        if *count == 0 {
            order.push(label);
        }
        *count += 1;
    }

    let mut dist: Vec<(String, usize)> = order
        .into_iter()
        .map(|label| {
            let count = counts.get(&label).copied().unwrap_or(0);
            (label, count)
        })
        .collect();
    dist.sort_by(|a, b| b.1.cmp(&a.1));
    dist
}

/// Case-insensitive dedupe, capped at [`MAX_RESEARCH_SUGGESTIONS`].
pub fn dedup_suggestions(suggestions: &[String]) -> Vec<&str> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for s in suggestions {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(trimmed);
        if out.len() == MAX_RESEARCH_SUGGESTIONS {
            break;
        }
    }
    out
}

/// One action item: an entry-derived recommendation or a generic one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLine<'a> {
    /// Title of the entry the action came from; `None` for generic actions.
    pub title: Option<&'a str>,
    pub text: String,
}

/// Choose the action items shown for a set of entries.
///
/// Up to three specific actions; when fewer than two are found, contextual
/// actions and then generic ones fill in up to two more.
pub fn action_lines(entries: &[ArticleEntry]) -> Vec<ActionLine<'_>> {
    let mut lines: Vec<ActionLine<'_>> = Vec::new();
    let mut contextual: Vec<ActionLine<'_>> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for entry in entries {
        let item = actionable_item(entry);
        if seen.contains(&item.text) {
            continue;
        }
        seen.push(item.text.clone());
        let line = ActionLine {
            title: Some(entry.title.as_str()),
            text: item.text,
        };
        if item.specific {
            if lines.len() < MAX_ACTION_ITEMS {
                lines.push(line);
            }
        } else {
            contextual.push(line);
        }
    }

    if lines.len() < MIN_SPECIFIC_ACTIONS {
        let generic = GENERIC_ACTIONS.iter().map(|a| ActionLine {
            title: None,
            text: (*a).to_string(),
        });
        lines.extend(contextual.into_iter().chain(generic).take(MAX_FALLBACK_ACTIONS));
    }

    lines
}

/// Numbered action items.
pub fn actions_block(profile: &FormatProfile, entries: &[ArticleEntry]) -> Option<String> {
    if profile.format == DigestFormat::Scannable || !profile.include_action_items {
        return None;
    }
    if entries.is_empty() {
        return None;
    }

    let list = action_lines(entries)
        .iter()
        .enumerate()
        .map(|(i, line)| match line.title {
            Some(title) => format!("{}. **{title}**: {}", i + 1, line.text),
            None => format!("{}. {}", i + 1, line.text),
        })
        .collect::<Vec<_>>()
        .join("\n");
    Some(format!("## ✅ Action Items\n\n{list}"))
}

/// Profile conclusion, verbatim.
pub fn conclusion_block(profile: &FormatProfile) -> Option<String> {
    non_empty(Some(profile.conclusion_text)).map(str::to_string)
}

/// Digest-level take.
pub fn my_take_block(my_take: Option<&str>) -> Option<String> {
    non_empty(my_take).map(|t| format!("## 💭 My Take\n\n{t}"))
}

/// Numbered `[n] url` / title pairs for every entry, in input order.
pub fn references_block(profile: &FormatProfile, entries: &[ArticleEntry]) -> Option<String> {
    if !profile.include_source_links || entries.is_empty() {
        return None;
    }

    let refs = entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("[{}] {}\n*{}*", i + 1, e.url, e.title))
        .collect::<Vec<_>>()
        .join("\n\n");
    Some(format!("## 📚 References\n\n{refs}"))
}

/// `"{n} words • {readTime} read"`.
pub fn word_count_line(words: usize) -> String {
    format!("{words} words • {} read", estimate_read_time(words))
}
