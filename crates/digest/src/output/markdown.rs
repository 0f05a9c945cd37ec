//! Markdown adapter.

use crate::compose::{BlockKind, ComposedDigest};

/// Divider placed between major blocks.
pub const BLOCK_DIVIDER: &str = "\n\n---\n\n";

/// Render a composed digest as a Markdown document.
///
/// The word-count line sits directly under the title without a divider.
/// Article entries inside the articles block were already joined with the
/// profile's section separator by the composer.
pub fn render(digest: &ComposedDigest) -> String {
    let mut out = String::new();

    for (i, block) in digest.blocks().iter().enumerate() {
        if i > 0 {
            if block.kind == BlockKind::WordCount {
                out.push_str("\n\n");
            } else {
                out.push_str(BLOCK_DIVIDER);
            }
        }
        out.push_str(block.text.trim_end());
    }

    if !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DigestFormat;

    #[test]
    fn test_dividers_between_blocks() {
        let mut digest = ComposedDigest::new(DigestFormat::Brief);
        digest.push(BlockKind::Title, Some("# Daily Brief — June 1, 2024".to_string()));
        digest.push(BlockKind::Intro, Some("Hello.".to_string()));
        digest.push(BlockKind::Conclusion, Some("Bye.\n\n".to_string()));
        digest.insert_after_title(BlockKind::WordCount, "7 words • <1m read".to_string());

        assert_eq!(
            render(&digest),
            "# Daily Brief — June 1, 2024\n\n7 words • <1m read\n\n---\n\nHello.\n\n---\n\nBye.\n"
        );
    }

    #[test]
    fn test_empty_digest_renders_empty() {
        let digest = ComposedDigest::new(DigestFormat::Standard);
        assert_eq!(render(&digest), "");
    }
}
