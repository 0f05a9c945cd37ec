//! HTML email adapter.
//!
//! Builds a complete HTML document: a themed stylesheet rendered from a
//! handlebars template, a title/date header, and body sections mirroring the
//! Markdown digest. Topic sections follow the theme rather than the format
//! profile.
//!
//! Templates render without handlebars escaping; user text is escaped with
//! [`html_escape`] before it reaches them.

use std::fmt::Write;

use chrono::NaiveDate;
use handlebars::Handlebars;
use serde_json::json;

use super::theme::EmailTheme;
use crate::compose::{
    action_lines, content_meta_line, dedup_suggestions, entry_icon, sentiment_distribution,
    DigestRequest, EXECUTIVE_SUMMARY_MAX_WORDS, RELEVANCE_THRESHOLD,
};
use crate::decorate::sentiment_emoji;
use crate::error::Result;
use crate::format::FormatProfile;
use crate::grouping::group_by_topic;
use crate::model::{non_empty, ArticleEntry, DigestInput};
use crate::text::{html_escape, truncate_to_word_limit};

/// Subject used when no template is configured.
pub const DEFAULT_SUBJECT_TEMPLATE: &str = "{Title} — {Date}";

const STYLESHEET_TEMPLATE: &str = r#"body {
    font-family: {{font_family}};
    line-height: 1.6;
    color: {{text_color}};
    background-color: {{background_color}};
    margin: 0;
    padding: 20px;
}
.container {
    max-width: {{max_width}};
    margin: 0 auto;
    background: #ffffff;
    border: 1px solid {{border_color}};
    border-radius: 8px;
    overflow: hidden;
}
.header {
    background: {{header_color}};
    color: #ffffff;
    padding: 24px;
}
.header h1 {
    margin: 0 0 6px 0;
    font-size: 24px;
}
.header .date {
    opacity: 0.9;
    font-size: 14px;
}
.content {
    padding: 24px;
}
.section {
    margin-bottom: 24px;
}
.section-title {
    font-size: 18px;
    margin: 0 0 12px 0;
    padding-bottom: 6px;
    border-bottom: 1px solid {{border_color}};
}
.topic-title {
    font-size: 16px;
    margin: 16px 0 8px 0;
}
.article {
    border: 1px solid {{border_color}};
    border-radius: 6px;
    padding: 12px 14px;
    margin-bottom: 10px;
}
.article h4 {
    margin: 0 0 6px 0;
    font-size: 15px;
}
.meta {
    font-size: 12px;
    opacity: 0.8;
}
.insight {
    border-left: 3px solid {{header_color}};
    padding: 6px 12px;
    font-size: 14px;
}
.alert {
    border-left: 3px solid #dc2626;
    padding: 6px 12px;
}
a {
    color: {{link_color}};
}
.banner img {
    width: 100%;
    border-radius: 6px;
}
.footer {
    padding: 16px 24px;
    text-align: center;
    font-size: 12px;
    opacity: 0.7;
    border-top: 1px solid {{border_color}};
}"#;

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
{{#if css}}
    <style>
{{{css}}}
    </style>
{{/if}}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{{title}}</h1>
            <div class="date">{{date}}</div>
        </div>
        <div class="content">
{{{body}}}
        </div>
        <div class="footer">{{footer}}</div>
    </div>
</body>
</html>
"#;

const FOOTER: &str = "You are receiving this digest because you subscribed to it.";

/// Rendered email: subject and HTML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDocument {
    pub subject: String,
    pub html: String,
}

/// Renders digests as themed HTML email.
pub struct EmailRenderer {
    theme: &'static EmailTheme,
    include_css: bool,
    sort_groups_by_confidence: bool,
    subject_template: String,
    handlebars: Handlebars<'static>,
}

impl EmailRenderer {
    /// Create a renderer for a theme.
    pub fn new(theme: &'static EmailTheme) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);
        handlebars.register_template_string("stylesheet", STYLESHEET_TEMPLATE)?;
        handlebars.register_template_string("document", DOCUMENT_TEMPLATE)?;

        Ok(Self {
            theme,
            include_css: true,
            sort_groups_by_confidence: true,
            subject_template: DEFAULT_SUBJECT_TEMPLATE.to_string(),
            handlebars,
        })
    }

    /// Toggle the inline `<style>` block.
    #[must_use]
    pub fn with_css(mut self, include_css: bool) -> Self {
        self.include_css = include_css;
        self
    }

    /// Order topic sections by descending confidence or first appearance.
    #[must_use]
    pub fn with_group_sorting(mut self, sort_by_confidence: bool) -> Self {
        self.sort_groups_by_confidence = sort_by_confidence;
        self
    }

    /// Subject template with `{Title}` and `{Date}` placeholders.
    #[must_use]
    pub fn with_subject_template(mut self, template: impl Into<String>) -> Self {
        self.subject_template = template.into();
        self
    }

    /// The active theme.
    pub fn theme(&self) -> &'static EmailTheme {
        self.theme
    }

    /// Render the stylesheet for the active theme.
    pub fn stylesheet(&self) -> Result<String> {
        Ok(self.handlebars.render("stylesheet", self.theme)?)
    }

    /// Render the full email.
    pub fn render(&self, request: &DigestRequest) -> Result<EmailDocument> {
        let profile = request.profile();
        let title = non_empty(request.custom_title.as_deref())
            .unwrap_or(profile.title)
            .to_string();
        let date = format_date(request.date);

        let css = if self.include_css {
            self.stylesheet()?
        } else {
            String::new()
        };

        let html = self.handlebars.render(
            "document",
            &json!({
                "title": html_escape(&title),
                "date": html_escape(&date),
                "css": css,
                "body": self.body(profile, &request.input),
                "footer": FOOTER,
            }),
        )?;

        tracing::debug!(
            theme = %self.theme.name,
            entries = request.input.entries.len(),
            bytes = html.len(),
            "Rendered email digest"
        );

        Ok(EmailDocument {
            subject: subject_line(&self.subject_template, &title, request.date),
            html,
        })
    }

    fn body(&self, profile: &FormatProfile, input: &DigestInput) -> String {
        let mut html = String::new();

        if profile.include_banner {
            if let Some(banner) = input.banner.as_ref().filter(|b| !b.image_url.trim().is_empty()) {
                let _ = write!(
                    html,
                    r#"<div class="section banner"><img src="{src}" alt="{alt}"></div>
"#,
                    src = html_escape(banner.image_url.trim()),
                    alt = html_escape(banner.alt_text.trim()),
                );
            }
        }

        if let Some(intro) = non_empty(Some(profile.intro_text)) {
            let _ = writeln!(html, r#"<p class="section">{}</p>"#, html_escape(intro));
        }

        if let Some(summary) = non_empty(input.digest_summary.as_deref()) {
            let summary = if profile.enforces_digest_budget() {
                truncate_to_word_limit(summary, EXECUTIVE_SUMMARY_MAX_WORDS)
            } else {
                summary.to_string()
            };
            section(&mut html, "📋 Executive Summary", &paragraph(&summary));
        }

        if let Some(alerts) = alerts_html(input) {
            section(&mut html, "⚠️ Alerts", &alerts);
        }

        if self.theme.show_insights && profile.shows_insights() {
            if let Some(insights) = insights_html(input) {
                section(&mut html, "📊 Key Insights", &insights);
            }
        }

        if profile.include_action_items {
            if let Some(actions) = actions_html(&input.entries) {
                section(&mut html, "✅ Action Items", &actions);
            }
        }

        if !input.entries.is_empty() {
            let articles = if self.theme.show_topic_clusters {
                self.grouped_articles_html(profile, &input.entries)
            } else {
                input
                    .entries
                    .iter()
                    .map(|e| article_html(profile, e))
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            section(&mut html, "📰 Articles", &articles);
        }

        if let Some(take) = non_empty(input.my_take.as_deref()) {
            section(&mut html, "💭 My Take", &paragraph(take));
        }

        if let Some(conclusion) = non_empty(Some(profile.conclusion_text)) {
            let _ = writeln!(html, r#"<p class="section">{}</p>"#, html_escape(conclusion));
        }

        html
    }

    fn grouped_articles_html(&self, profile: &FormatProfile, entries: &[ArticleEntry]) -> String {
        group_by_topic(entries, self.sort_groups_by_confidence)
            .into_iter()
            .map(|group| {
                let articles = group
                    .articles
                    .iter()
                    .map(|e| article_html(profile, e))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    r#"<h3 class="topic-title">{name} <span class="meta">({count})</span></h3>
{articles}"#,
                    name = html_escape(&group.topic_cluster),
                    count = group.articles.len(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Fill `{Title}` and `{Date}` in a subject template.
pub fn subject_line(template: &str, title: &str, date: NaiveDate) -> String {
    template
        .replace("{Title}", title)
        .replace("{Date}", &format_date(date))
}

fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn section(html: &mut String, title: &str, inner: &str) {
    let _ = write!(
        html,
        r#"<div class="section">
<h2 class="section-title">{title}</h2>
{inner}
</div>
"#
    );
}

fn paragraph(text: &str) -> String {
    format!("<p>{}</p>", html_escape(text))
}

fn alerts_html(input: &DigestInput) -> Option<String> {
    if let Some(summary) = non_empty(input.alerts_summary.as_deref()) {
        return Some(format!(r#"<div class="alert">{}</div>"#, html_escape(summary)));
    }

    let flagged: Vec<&ArticleEntry> = input.entries.iter().filter(|e| e.has_alert()).collect();
    if flagged.is_empty() {
        return None;
    }

    let items = flagged
        .iter()
        .map(|e| format!("<li>{}</li>", html_escape(&e.title)))
        .collect::<String>();
    Some(format!(
        r#"<div class="alert">🔔 Alert monitoring is active: {} of {} articles matched watch conditions.</div>
<ul>{items}</ul>"#,
        flagged.len(),
        input.entries.len()
    ))
}

fn insights_html(input: &DigestInput) -> Option<String> {
    let mut html = String::new();

    let distribution = sentiment_distribution(&input.entries);
    if !distribution.is_empty() {
        let line = distribution
            .iter()
            .map(|(label, count)| format!("{} {} ({count})", sentiment_emoji(label), html_escape(label)))
            .collect::<Vec<_>>()
            .join(" &bull; ");
        let _ = writeln!(html, "<p><strong>Sentiment:</strong> {line}</p>");
    }

    if let Some(trend) = non_empty(input.trend_summary.as_deref()) {
        let _ = writeln!(html, "<p><strong>Trends:</strong> {}</p>", html_escape(trend));
    }

    let suggestions = dedup_suggestions(&input.research_suggestions);
    if !suggestions.is_empty() {
        let items = suggestions
            .iter()
            .map(|s| format!("<li>{}</li>", html_escape(s)))
            .collect::<String>();
        let _ = writeln!(html, "<p><strong>Research suggestions:</strong></p><ul>{items}</ul>");
    }

    (!html.is_empty()).then_some(html)
}

fn actions_html(entries: &[ArticleEntry]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }

    let items: Vec<String> = action_lines(entries)
        .iter()
        .map(|line| match line.title {
            Some(title) => format!(
                "<li><strong>{}</strong>: {}</li>",
                html_escape(title),
                html_escape(&line.text)
            ),
            None => format!("<li>{}</li>", html_escape(&line.text)),
        })
        .collect();

    if items.is_empty() {
        return None;
    }
    Some(format!("<ol>{}</ol>", items.join("")))
}

fn article_html(profile: &FormatProfile, entry: &ArticleEntry) -> String {
    let mut html = String::from(r#"<div class="article">"#);

    let _ = write!(
        html,
        r#"<h4>{icon} <a href="{url}">{title}</a></h4>"#,
        icon = entry_icon(entry),
        url = html_escape(&entry.url),
        title = html_escape(&entry.title),
    );

    if let Some(meta) = content_meta_line(entry) {
        let _ = write!(
            html,
            r#"<div class="meta">{}</div>"#,
            html_escape(meta.trim_matches('*'))
        );
    }

    if entry.topic_confidence > RELEVANCE_THRESHOLD {
        let pct = (entry.topic_confidence * 100.0).round() as u32;
        let _ = write!(html, r#"<div class="meta">🎯 Topic relevance: {pct}%</div>"#);
    }

    if entry.has_alert() {
        if entry.alert_conditions.is_empty() {
            html.push_str(r#"<div class="alert">🚨 <strong>Alert triggered</strong></div>"#);
        } else {
            let _ = write!(
                html,
                r#"<div class="alert">🚨 <strong>Alert:</strong> {}</div>"#,
                html_escape(&entry.alert_conditions.join(", "))
            );
        }
    }

    if profile.include_summaries {
        if let Some(summary) = non_empty(Some(&entry.summary_text)) {
            let _ = write!(
                html,
                "<p>{}</p>",
                html_escape(&truncate_to_word_limit(summary, profile.max_summary_words))
            );
        }
    }

    if let Some(insight) = entry.take_insight() {
        let _ = write!(
            html,
            r#"<div class="insight">💡 {}</div>"#,
            html_escape(insight)
        );
    }

    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DigestFormat;
    use crate::output::theme::{DEFAULT_THEME, MINIMAL_THEME};

    fn request() -> DigestRequest {
        let entries = vec![
            ArticleEntry::new("Low <b>", "https://low", "Low summary").with_topic("Low", 0.2),
            ArticleEntry::new("High", "https://high", "High summary").with_topic("High", 0.9),
        ];
        DigestRequest::new(
            DigestInput::from_entries(entries),
            DigestFormat::Email,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
    }

    #[test]
    fn test_subject_line() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            subject_line(DEFAULT_SUBJECT_TEMPLATE, "Tech Digest", date),
            "Tech Digest — June 1, 2024"
        );
        assert_eq!(subject_line("Weekly: {Title}", "Reads", date), "Weekly: Reads");
    }

    #[test]
    fn test_document_has_theme_css_and_header() {
        let email = EmailRenderer::new(&DEFAULT_THEME).unwrap().render(&request()).unwrap();
        assert!(email.html.starts_with("<!DOCTYPE html>"));
        assert!(email.html.contains("background: #2563eb;"));
        assert!(email.html.contains("<h1>Tech Digest</h1>"));
        assert!(email.html.contains("June 1, 2024"));
        assert_eq!(email.subject, "Tech Digest — June 1, 2024");
    }

    #[test]
    fn test_css_can_be_omitted() {
        let email = EmailRenderer::new(&DEFAULT_THEME)
            .unwrap()
            .with_css(false)
            .render(&request())
            .unwrap();
        assert!(!email.html.contains("<style>"));
    }

    #[test]
    fn test_topic_sections_follow_theme() {
        let html = EmailRenderer::new(&DEFAULT_THEME)
            .unwrap()
            .render(&request())
            .unwrap()
            .html;
        let high = html.find(r#"<h3 class="topic-title">High"#).unwrap();
        let low = html.find(r#"<h3 class="topic-title">Low"#).unwrap();
        assert!(high < low);

        let html = EmailRenderer::new(&DEFAULT_THEME)
            .unwrap()
            .with_group_sorting(false)
            .render(&request())
            .unwrap()
            .html;
        let high = html.find(r#"<h3 class="topic-title">High"#).unwrap();
        let low = html.find(r#"<h3 class="topic-title">Low"#).unwrap();
        assert!(low < high);

        let html = EmailRenderer::new(&MINIMAL_THEME)
            .unwrap()
            .render(&request())
            .unwrap()
            .html;
        assert!(!html.contains("topic-title\">"));
    }

    #[test]
    fn test_user_content_is_escaped() {
        let html = EmailRenderer::new(&DEFAULT_THEME)
            .unwrap()
            .render(&request())
            .unwrap()
            .html;
        assert!(html.contains("Low &lt;b&gt;"));
        assert!(!html.contains("Low <b>"));
    }

    #[test]
    fn test_empty_entries_still_render() {
        let mut request = request();
        request.input.entries.clear();
        let html = EmailRenderer::new(&DEFAULT_THEME)
            .unwrap()
            .render(&request)
            .unwrap()
            .html;
        assert!(html.contains("<h1>Tech Digest</h1>"));
        assert!(html.contains("Until next time, keep building."));
        assert!(!html.contains("📰 Articles"));
        assert!(!html.contains("✅ Action Items"));
    }

    #[test]
    fn test_actions_and_alert_line_match_markdown() {
        let mut entry = ArticleEntry::new("On typography", "https://t", "Letters and spacing.");
        entry.alert_triggered = true;
        let flagged = ArticleEntry::new("Parser CVE", "https://cve", "Patch now.")
            .with_alerts(vec!["security".to_string(), "cve".to_string()]);
        let request = DigestRequest::new(
            DigestInput::from_entries(vec![entry, flagged]),
            DigestFormat::Email,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );

        let html = EmailRenderer::new(&DEFAULT_THEME)
            .unwrap()
            .render(&request)
            .unwrap()
            .html;
        assert!(html.contains("✅ Action Items"));
        assert!(html.contains("<li><strong>On typography</strong>: Research typography further"));
        assert!(html.contains(r#"<div class="alert">🚨 <strong>Alert triggered</strong></div>"#));
        assert!(html.contains(r#"<div class="alert">🚨 <strong>Alert:</strong> security, cve</div>"#));
    }
}
