//! Ordered content blocks produced by the composer.

use std::fmt;

use crate::format::DigestFormat;

/// Named slot in the digest pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Title,
    WordCount,
    Banner,
    Intro,
    ExecutiveSummary,
    Alerts,
    Insights,
    Actions,
    CategoryOverview,
    Articles,
    Conclusion,
    PromptCorner,
    MyTake,
    References,
}

impl BlockKind {
    /// Stable snake_case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::WordCount => "word_count",
            Self::Banner => "banner",
            Self::Intro => "intro",
            Self::ExecutiveSummary => "executive_summary",
            Self::Alerts => "alerts",
            Self::Insights => "insights",
            Self::Actions => "actions",
            Self::CategoryOverview => "category_overview",
            Self::Articles => "articles",
            Self::Conclusion => "conclusion",
            Self::PromptCorner => "prompt_corner",
            Self::MyTake => "my_take",
            Self::References => "references",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One rendered block of Markdown text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub kind: BlockKind,
    pub text: String,
}

/// The composed digest: emitted blocks in document order.
///
/// Blocks without content are never stored.
#[derive(Debug, Clone)]
pub struct ComposedDigest {
    pub format: DigestFormat,
    blocks: Vec<ContentBlock>,
}

impl ComposedDigest {
    /// Start an empty digest for a format.
    #[must_use]
    pub fn new(format: DigestFormat) -> Self {
        Self {
            format,
            blocks: Vec::new(),
        }
    }

    /// Append a block; `None` or blank text is dropped.
    pub fn push(&mut self, kind: BlockKind, text: Option<String>) {
        if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
            self.blocks.push(ContentBlock { kind, text });
        }
    }

    /// Insert a block directly after the title block (or first, if there is
    /// no title).
    pub fn insert_after_title(&mut self, kind: BlockKind, text: String) {
        let at = self
            .blocks
            .iter()
            .position(|b| b.kind == BlockKind::Title)
            .map_or(0, |i| i + 1);
        self.blocks.insert(at, ContentBlock { kind, text });
    }

    /// Emitted blocks in order.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// The block of a given kind, if emitted.
    pub fn block(&self, kind: BlockKind) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.kind == kind)
    }

    /// Whether a block of this kind was emitted.
    pub fn is_emitted(&self, kind: BlockKind) -> bool {
        self.block(kind).is_some()
    }

    /// Kinds of emitted blocks, in order.
    pub fn kinds(&self) -> Vec<BlockKind> {
        self.blocks.iter().map(|b| b.kind).collect()
    }

    /// Render as a Markdown document.
    pub fn to_markdown(&self) -> String {
        crate::output::markdown::render(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_skips_empty() {
        let mut digest = ComposedDigest::new(DigestFormat::Standard);
        digest.push(BlockKind::Title, Some("# T".to_string()));
        digest.push(BlockKind::Intro, Some("   ".to_string()));
        digest.push(BlockKind::Conclusion, None);
        assert_eq!(digest.kinds(), vec![BlockKind::Title]);
    }

    #[test]
    fn test_insert_after_title() {
        let mut digest = ComposedDigest::new(DigestFormat::Brief);
        digest.push(BlockKind::Title, Some("# T".to_string()));
        digest.push(BlockKind::Intro, Some("Hello".to_string()));
        digest.insert_after_title(BlockKind::WordCount, "2 words".to_string());
        assert_eq!(
            digest.kinds(),
            vec![BlockKind::Title, BlockKind::WordCount, BlockKind::Intro]
        );
    }
}
