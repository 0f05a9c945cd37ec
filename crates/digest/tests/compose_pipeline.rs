//! End-to-end composition across formats and outputs.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use digest_composer::{
    ArticleEntry, BlockKind, DigestComposer, DigestError, DigestFormat, DigestInput,
    DigestRequest, EmailRenderer, FileSink, PromptCornerGenerator, ThemeName,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn entries() -> Vec<ArticleEntry> {
    vec![
        ArticleEntry::new(
            "Browser engines adopt new CSS nesting",
            "https://example.com/css",
            "Nesting ships in every major engine. Migration is straightforward.",
        )
        .with_topic("Web Platform", 0.5),
        ArticleEntry::new(
            "New open model beats benchmarks",
            "https://example.com/model",
            "A new open-weight model tops the leaderboard. Weights are on the hub.",
        )
        .with_topic("AI Research", 0.9)
        .with_sentiment("positive"),
        ArticleEntry::new(
            "Critical vulnerability in image parser",
            "https://example.com/cve",
            "A heap overflow affects several releases. Patch now.",
        )
        .with_topic("AI Research", 0.8)
        .with_alerts(vec!["security".to_string()]),
    ]
}

fn request(format: DigestFormat) -> DigestRequest {
    DigestRequest::new(DigestInput::from_entries(entries()), format, date())
}

struct Failing;

#[async_trait]
impl PromptCornerGenerator for Failing {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn generate(&self, _summary: &str) -> digest_composer::Result<String> {
        Err(DigestError::PromptCorner("model unavailable".to_string()))
    }
}

struct Echo;

#[async_trait]
impl PromptCornerGenerator for Echo {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn generate(&self, summary: &str) -> digest_composer::Result<String> {
        Ok(format!("1. Summarize: {}", summary.lines().count()))
    }
}

#[tokio::test]
async fn test_empty_input_still_renders_document_frame() {
    let request = DigestRequest::new(DigestInput::default(), DigestFormat::Standard, date());
    let digest = DigestComposer::new().compose(&request).await;

    assert_eq!(digest.kinds()[0], BlockKind::Title);
    assert!(digest.is_emitted(BlockKind::Intro));
    assert!(digest.is_emitted(BlockKind::Conclusion));
    assert!(!digest.is_emitted(BlockKind::Articles));
    assert!(!digest.is_emitted(BlockKind::References));

    let markdown = digest.to_markdown();
    assert!(markdown.starts_with("# Tech Digest — June 1, 2024"));
    assert!(markdown.ends_with('\n'));
}

#[tokio::test]
async fn test_word_count_follows_title_for_budgeted_formats() {
    let digest = DigestComposer::new()
        .compose(&request(DigestFormat::Brief))
        .await;
    assert_eq!(digest.kinds()[1], BlockKind::WordCount);

    let detailed = DigestComposer::new()
        .compose(&request(DigestFormat::Detailed))
        .await;
    assert!(!detailed.is_emitted(BlockKind::WordCount));
}

#[tokio::test]
async fn test_scannable_skips_alerts() {
    let digest = DigestComposer::new()
        .compose(&request(DigestFormat::Scannable))
        .await;
    assert!(!digest.is_emitted(BlockKind::Alerts));
    assert!(digest.to_markdown().contains("## ⚡ Quick Scan"));

    let standard = DigestComposer::new()
        .compose(&request(DigestFormat::Standard))
        .await;
    let alerts = standard.block(BlockKind::Alerts).unwrap();
    assert!(alerts.text.contains("1 of 3 articles"));
}

#[tokio::test]
async fn test_groups_sorted_by_confidence_unless_disabled() {
    let sorted = DigestComposer::new()
        .compose(&request(DigestFormat::Standard))
        .await
        .to_markdown();
    let ai = sorted.find("### AI Research").unwrap();
    let web = sorted.find("### Web Platform").unwrap();
    assert!(ai < web);

    let unsorted = DigestComposer::new()
        .with_group_sorting(false)
        .compose(&request(DigestFormat::Standard))
        .await
        .to_markdown();
    let ai = unsorted.find("### AI Research").unwrap();
    let web = unsorted.find("### Web Platform").unwrap();
    assert!(web < ai);
}

#[tokio::test]
async fn test_prompt_corner_failure_is_omitted() {
    let digest = DigestComposer::new()
        .with_prompt_corner(Arc::new(Failing))
        .compose(&request(DigestFormat::Detailed))
        .await;
    assert!(!digest.is_emitted(BlockKind::PromptCorner));
    assert!(digest.is_emitted(BlockKind::Conclusion));
}

#[tokio::test]
async fn test_prompt_corner_uses_entry_list_without_summary() {
    let digest = DigestComposer::new()
        .with_prompt_corner(Arc::new(Echo))
        .with_prompt_timeout(Duration::from_secs(5))
        .compose(&request(DigestFormat::Newsletter))
        .await;
    let block = digest.block(BlockKind::PromptCorner).unwrap();
    assert!(block.text.starts_with("## 🧠 Prompt Corner"));
    assert!(block.text.contains("Summarize: 3"));
}

#[test]
fn test_compose_from_blocking_context() {
    let digest = tokio_test::block_on(DigestComposer::new().compose(&request(DigestFormat::Brief)));
    assert!(digest
        .to_markdown()
        .starts_with("# Daily Brief — June 1, 2024"));
}

#[tokio::test]
async fn test_written_digest_lands_under_generated_name() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileSink::new(dir.path().join("digests"));

    let markdown = DigestComposer::new()
        .compose(&request(DigestFormat::Standard))
        .await
        .to_markdown();
    let path = sink
        .write_digest(DigestFormat::Standard, date(), &markdown)
        .await
        .unwrap();

    assert!(path.ends_with("digests/digest_standard_2024-06-01.md"));
    let written = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(written, markdown);
}

#[test]
fn test_minimal_email_theme_lists_articles_flat() {
    let renderer = EmailRenderer::new(ThemeName::Minimal.theme()).unwrap();
    let email = renderer
        .render(&request(DigestFormat::Email).with_title("Friday <Picks>"))
        .unwrap();

    assert_eq!(email.subject, "Friday <Picks> — June 1, 2024");
    assert!(email.html.contains("<h1>Friday &lt;Picks&gt;</h1>"));
    assert!(!email.html.contains(r#"class="topic-title""#));
    assert!(!email.html.contains("Key Insights"));
    assert!(email.html.contains("https://example.com/cve"));
}

#[tokio::test]
async fn test_email_mirrors_markdown_actions_and_alert_line() {
    let mut entry = ArticleEntry::new("On typography", "https://example.com/type", "Letters.");
    entry.alert_triggered = true;
    let request = DigestRequest::new(
        DigestInput::from_entries(vec![entry]),
        DigestFormat::Email,
        date(),
    );

    let digest = DigestComposer::new().compose(&request).await;
    assert!(digest.is_emitted(BlockKind::Actions));

    let html = EmailRenderer::new(ThemeName::Default.theme())
        .unwrap()
        .render(&request)
        .unwrap()
        .html;
    assert!(html.contains("✅ Action Items"));
    assert!(html.contains("<li><strong>On typography</strong>:"));
    assert!(html.contains("🚨 <strong>Alert triggered</strong>"));
}
