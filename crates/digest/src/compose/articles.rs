//! Article rendering: grouped, flat, scannable and category overview.

use std::fmt::Write;

use crate::decorate::{
    categorize_articles_for_brief, content_type_emoji, sentiment_emoji, why_it_matters,
    ScannableCategory,
};
use crate::format::{DigestFormat, FormatProfile};
use crate::grouping::group_by_topic;
use crate::model::{non_empty, ArticleEntry, ContentKind};
use crate::text::{format_duration, truncate_to_complete_sentence, truncate_to_word_limit};

/// Confidence above which the topic relevance note is shown.
pub const RELEVANCE_THRESHOLD: f64 = 0.7;

const ADDITIONAL_ITEMS: &str = "Additional Items";

/// How an article heading is numbered.
#[derive(Debug, Clone, Copy)]
enum Heading {
    /// `#### title` under a topic subsection.
    Grouped,
    /// `### n. title[^n]` with a footnote citation.
    Numbered(usize),
}

/// The articles block for a profile, or `None` when it has nothing to show.
pub fn articles_block(
    profile: &FormatProfile,
    entries: &[ArticleEntry],
    sort_groups_by_confidence: bool,
) -> Option<String> {
    if !profile.include_individual_articles || entries.is_empty() {
        return None;
    }

    let body = if profile.format == DigestFormat::Scannable {
        scannable_view(profile, entries)
    } else if profile.include_topic_clustering {
        grouped_view(profile, entries, sort_groups_by_confidence)
    } else {
        flat_view(profile, entries)
    };

    Some(body)
}

fn grouped_view(profile: &FormatProfile, entries: &[ArticleEntry], sort: bool) -> String {
    let sections: Vec<String> = group_by_topic(entries, sort)
        .into_iter()
        .map(|group| {
            let articles = group
                .articles
                .iter()
                .map(|entry| render_article(profile, entry, Heading::Grouped))
                .collect::<Vec<_>>()
                .join(profile.section_separator);
            format!("### {}\n\n{articles}", group.topic_cluster)
        })
        .collect();

    format!("## 📰 Articles by Topic\n\n{}", sections.join("\n\n"))
}

fn flat_view(profile: &FormatProfile, entries: &[ArticleEntry]) -> String {
    let articles = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| render_article(profile, entry, Heading::Numbered(i + 1)))
        .collect::<Vec<_>>()
        .join(profile.section_separator);

    format!("## 📰 Articles\n\n{articles}")
}

/// Render one article entry.
fn render_article(profile: &FormatProfile, entry: &ArticleEntry, heading: Heading) -> String {
    let mut lines: Vec<String> = Vec::new();

    let icon = entry_icon(entry);
    let mood = entry_sentiment_emoji(entry)
        .map(|e| format!(" {e}"))
        .unwrap_or_default();
    lines.push(match heading {
        Heading::Grouped => format!("#### {icon} {}{mood}", entry.title),
        Heading::Numbered(n) => format!("### {n}. {icon} {}{mood}[^{n}]", entry.title),
    });

    if let Some(meta) = content_meta_line(entry) {
        lines.push(meta);
    }

    if entry.topic_confidence > RELEVANCE_THRESHOLD {
        let pct = (entry.topic_confidence * 100.0).round() as u32;
        lines.push(format!("🎯 Topic relevance: {pct}%"));
    }

    if entry.has_alert() {
        if entry.alert_conditions.is_empty() {
            lines.push("🚨 **Alert triggered**".to_string());
        } else {
            lines.push(format!(
                "🚨 **Alert:** {}",
                entry.alert_conditions.join(", ")
            ));
        }
    }

    if profile.include_summaries {
        if let Some(summary) = non_empty(Some(&entry.summary_text)) {
            lines.push(truncate_to_word_limit(summary, profile.max_summary_words));
        }
    }

    if let Some(callout) = insight_callout(profile, entry) {
        lines.push(callout);
    }

    if profile.include_source_links {
        lines.push(format!("[Read more →]({})", entry.url));
    }

    let mut md = lines.join("\n\n");
    if let Heading::Numbered(n) = heading {
        let _ = write!(md, "\n\n[^{n}]: {}", entry.url);
    }
    md
}

/// Upstream icon, or one picked from content type and title.
pub fn entry_icon(entry: &ArticleEntry) -> &str {
    non_empty(Some(&entry.content_icon))
        .unwrap_or_else(|| content_type_emoji(&entry.content_type, &entry.title))
}

fn entry_sentiment_emoji(entry: &ArticleEntry) -> Option<&str> {
    if let Some(emoji) = non_empty(Some(&entry.sentiment_emoji)) {
        return Some(emoji);
    }
    non_empty(Some(&entry.sentiment_label)).map(sentiment_emoji)
}

/// Duration/channel or page count line for videos and PDFs.
pub fn content_meta_line(entry: &ArticleEntry) -> Option<String> {
    let label = non_empty(Some(&entry.content_label));
    match entry.content_kind() {
        ContentKind::Youtube => {
            let mut parts = vec![label.unwrap_or("🎥 Video").to_string()];
            if let Some(secs) = entry.duration.filter(|s| *s > 0) {
                parts.push(format!("⏱️ {}", format_duration(secs)));
            }
            if let Some(channel) = non_empty(entry.channel.as_deref()) {
                parts.push(format!("📺 {channel}"));
            }
            Some(format!("*{}*", parts.join(" • ")))
        }
        ContentKind::Pdf => {
            let mut parts = vec![label.unwrap_or("📄 PDF").to_string()];
            if let Some(pages) = entry.page_count.filter(|p| *p > 0) {
                parts.push(format!("{pages} pages"));
            }
            Some(format!("*{}*", parts.join(" • ")))
        }
        ContentKind::Html | ContentKind::Unknown => None,
    }
}

/// Key insight from the take, else a "why it matters" line when the
/// profile carries insights.
fn insight_callout(profile: &FormatProfile, entry: &ArticleEntry) -> Option<String> {
    if let Some(insight) = entry.take_insight() {
        return Some(format!("💡 **Key insight:** {insight}"));
    }
    if profile.include_key_insights {
        return Some(format!("💡 **Why it matters:** {}", why_it_matters(entry)));
    }
    None
}

fn scannable_view(profile: &FormatProfile, entries: &[ArticleEntry]) -> String {
    let any_categorized = entries.iter().any(|e| e.categorized_take().is_some());
    if !any_categorized {
        let items = entries
            .iter()
            .map(|e| scannable_line(e, &e.summary_text, profile))
            .collect::<Vec<_>>()
            .join(profile.section_separator);
        return format!("## ⚡ Quick Scan\n\n{items}");
    }

    let mut buckets: Vec<(ScannableCategory, Vec<String>)> = ScannableCategory::all()
        .iter()
        .map(|c| (*c, Vec::new()))
        .collect();
    let mut remainder: Vec<String> = Vec::new();

    for entry in entries {
        let placed = entry.categorized_take().and_then(|(token, insight)| {
            let category = ScannableCategory::parse(token)?;
            Some((category, insight))
        });
        match placed {
            Some((category, insight)) => {
                if let Some((_, lines)) = buckets.iter_mut().find(|(c, _)| *c == category) {
                    lines.push(scannable_line(entry, insight, profile));
                }
            }
            None => remainder.push(scannable_line(entry, &entry.summary_text, profile)),
        }
    }

    let mut sections: Vec<String> = buckets
        .into_iter()
        .filter(|(_, lines)| !lines.is_empty())
        .map(|(category, lines)| {
            format!(
                "### {} {}\n\n{}",
                category.emoji(),
                category.title(),
                lines.join(profile.section_separator)
            )
        })
        .collect();

    if !remainder.is_empty() {
        sections.push(format!(
            "### 📌 {ADDITIONAL_ITEMS}\n\n{}",
            remainder.join(profile.section_separator)
        ));
    }

    format!("## ⚡ Quick Scan\n\n{}", sections.join("\n\n"))
}

fn scannable_line(entry: &ArticleEntry, text: &str, profile: &FormatProfile) -> String {
    let mut line = format!("- {} **[{}]({})**", entry_icon(entry), entry.title, entry.url);
    if profile.include_summaries {
        if let Some(text) = non_empty(Some(text)) {
            let _ = write!(
                line,
                ": {}",
                truncate_to_complete_sentence(text, profile.max_summary_words)
            );
        }
    }
    line
}

/// Compact per-category overview of linked titles.
pub fn category_overview_block(
    profile: &FormatProfile,
    entries: &[ArticleEntry],
) -> Option<String> {
    if !profile.include_category_overview || entries.is_empty() {
        return None;
    }

    let sections: Vec<String> = categorize_articles_for_brief(entries)
        .into_iter()
        .filter(|(_, members)| !members.is_empty())
        .map(|(category, members)| {
            let items = members
                .iter()
                .map(|e| {
                    let mut item = format!("- [{}]({})", e.title, e.url);
                    if profile.include_summaries {
                        if let Some(summary) = non_empty(Some(&e.summary_text)) {
                            let _ = write!(
                                item,
                                ": {}",
                                truncate_to_word_limit(summary, profile.max_summary_words)
                            );
                        }
                    }
                    item
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("### {} {category}\n\n{items}", category.emoji())
        })
        .collect();

    Some(format!("## 🗂️ At a Glance\n\n{}", sections.join("\n\n")))
}
