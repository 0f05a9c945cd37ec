//! Input records consumed by the digest engine.

use serde::{Deserialize, Serialize};

/// Topic label used when upstream clustering left an entry unlabeled.
pub const DEFAULT_TOPIC: &str = "General";

/// Physical kind of the source behind an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Regular web page.
    Html,
    /// PDF document.
    Pdf,
    /// YouTube video.
    Youtube,
    /// Not reported upstream.
    Unknown,
}

impl ContentKind {
    /// Parse the upstream content type string.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "html" => Self::Html,
            "pdf" => Self::Pdf,
            "youtube" => Self::Youtube,
            _ => Self::Unknown,
        }
    }
}

/// One article as it arrives from upstream analysis.
///
/// Read-only inside the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleEntry {
    pub title: String,
    pub url: String,
    #[serde(alias = "summary")]
    pub summary_text: String,
    /// Free-form take, sometimes `"<category> | <insight>"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_take: Option<String>,
    pub topic_cluster: String,
    pub topic_confidence: f64,
    pub sentiment_label: String,
    pub sentiment_emoji: String,
    pub alert_triggered: bool,
    pub alert_conditions: Vec<String>,
    /// `html`, `pdf`, `youtube` or empty.
    pub content_type: String,
    pub content_icon: String,
    pub content_label: String,
    /// Video length in seconds (YouTube only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    /// Channel name (YouTube only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Page count (PDF only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
}

impl ArticleEntry {
    /// Create an entry with the three required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            summary_text: summary.into(),
            ..Default::default()
        }
    }

    /// Set the topic cluster and confidence.
    #[must_use]
    pub fn with_topic(mut self, cluster: impl Into<String>, confidence: f64) -> Self {
        self.topic_cluster = cluster.into();
        self.topic_confidence = confidence;
        self
    }

    /// Set the sentiment label.
    #[must_use]
    pub fn with_sentiment(mut self, label: impl Into<String>) -> Self {
        self.sentiment_label = label.into();
        self
    }

    /// Set the per-article take.
    #[must_use]
    pub fn with_take(mut self, take: impl Into<String>) -> Self {
        self.my_take = Some(take.into());
        self
    }

    /// Mark the entry as having triggered alerts.
    #[must_use]
    pub fn with_alerts(mut self, conditions: Vec<String>) -> Self {
        self.alert_triggered = true;
        self.alert_conditions = conditions;
        self
    }

    /// Set the content type string.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Topic cluster, defaulted to [`DEFAULT_TOPIC`] when empty.
    pub fn cluster_name(&self) -> &str {
        let cluster = self.topic_cluster.trim();
        if cluster.is_empty() {
            DEFAULT_TOPIC
        } else {
            cluster
        }
    }

    /// Parsed content kind.
    pub fn content_kind(&self) -> ContentKind {
        ContentKind::parse(&self.content_type)
    }

    /// Whether this entry should show up in the alerts block.
    pub fn has_alert(&self) -> bool {
        self.alert_triggered || !self.alert_conditions.is_empty()
    }

    /// Split a `"<category> | <insight>"` take into its two halves.
    ///
    /// Returns `None` when there is no take or it lacks the separator.
    pub fn categorized_take(&self) -> Option<(&str, &str)> {
        let take = self.my_take.as_deref()?;
        let (category, insight) = take.split_once('|')?;
        let category = category.trim();
        let insight = insight.trim();
        if category.is_empty() || insight.is_empty() {
            return None;
        }
        Some((category, insight))
    }

    /// The insight text of the take, whether or not it carries a category.
    pub fn take_insight(&self) -> Option<&str> {
        if let Some((_, insight)) = self.categorized_take() {
            return Some(insight);
        }
        self.my_take
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Optional illustrative image attached to a digest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerArtifact {
    #[serde(rename = "imageURL", alias = "imageUrl")]
    pub image_url: String,
    pub alt_text: String,
    pub themes: Vec<String>,
}

/// Everything upstream hands to one render call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DigestInput {
    pub entries: Vec<ArticleEntry>,
    /// Synthesized executive summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest_summary: Option<String>,
    /// Explicit alerts summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alerts_summary: Option<String>,
    /// Trend narrative for the insights block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_summary: Option<String>,
    pub research_suggestions: Vec<String>,
    /// Digest-level take.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_take: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<BannerArtifact>,
}

impl DigestInput {
    /// Input with entries only.
    #[must_use]
    pub fn from_entries(entries: Vec<ArticleEntry>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }
}

/// Return the trimmed text if it has any content.
pub(crate) fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_defaults_to_general() {
        let entry = ArticleEntry::new("A", "https://a", "s");
        assert_eq!(entry.cluster_name(), "General");

        let entry = entry.with_topic("Rust", 0.9);
        assert_eq!(entry.cluster_name(), "Rust");
    }

    #[test]
    fn test_categorized_take() {
        let entry = ArticleEntry::new("A", "https://a", "s")
            .with_take("Product Updates | New release ships faster builds");
        assert_eq!(
            entry.categorized_take(),
            Some(("Product Updates", "New release ships faster builds"))
        );

        let plain = ArticleEntry::new("A", "https://a", "s").with_take("Just a thought");
        assert_eq!(plain.categorized_take(), None);
        assert_eq!(plain.take_insight(), Some("Just a thought"));
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let json = r#"{
            "title": "Video",
            "url": "https://youtube.com/watch?v=1",
            "summaryText": "A talk",
            "topicConfidence": 0.8,
            "contentType": "youtube",
            "duration": 754
        }"#;
        let entry: ArticleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.content_kind(), ContentKind::Youtube);
        assert_eq!(entry.duration, Some(754));
        assert!(entry.alert_conditions.is_empty());
        assert_eq!(entry.cluster_name(), DEFAULT_TOPIC);
    }

    #[test]
    fn test_has_alert() {
        let mut entry = ArticleEntry::new("A", "https://a", "s");
        assert!(!entry.has_alert());
        entry.alert_conditions.push("keyword: breach".to_string());
        assert!(entry.has_alert());
    }
}
