//! Bridge from digest entries to chat messages.

use notify::{ChatItem, ChatMessage, MessageStyle};

use crate::model::ArticleEntry;

impl From<&ArticleEntry> for ChatItem {
    fn from(entry: &ArticleEntry) -> Self {
        ChatItem::new(
            entry.title.trim(),
            entry.url.trim(),
            entry.summary_text.trim(),
        )
    }
}

/// Build a chat message from entries in input order.
///
/// The style decides how many entries are shown.
pub fn chat_message(
    title: impl Into<String>,
    entries: &[ArticleEntry],
    style: MessageStyle,
) -> ChatMessage {
    let items = entries.iter().map(ChatItem::from).collect();
    ChatMessage::new(title, items, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_to_chat_item() {
        let entry = ArticleEntry::new(" Rust 1.80 ", "https://r", "Faster builds. ");
        let item = ChatItem::from(&entry);
        assert_eq!(item, ChatItem::new("Rust 1.80", "https://r", "Faster builds."));
    }

    #[test]
    fn test_chat_message_caps_by_style() {
        let entries: Vec<ArticleEntry> = (0..8)
            .map(|i| ArticleEntry::new(format!("A{i}"), format!("https://a/{i}"), "s"))
            .collect();
        let message = chat_message("Tech Digest", &entries, MessageStyle::Highlights);
        assert_eq!(message.items.len(), 8);
        assert_eq!(message.visible_items().len(), 5);
        assert_eq!(message.visible_items()[0].title, "A0");
    }
}
