//! Word counting, read-time estimation and truncation helpers.

/// Words per minute used for read-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Count whitespace-separated words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimate read time as `"{n}m"`, or `"<1m"` below one minute.
pub fn estimate_read_time(word_count: usize) -> String {
    let minutes = word_count / WORDS_PER_MINUTE;
    if minutes == 0 {
        "<1m".to_string()
    } else {
        format!("{minutes}m")
    }
}

/// Keep the first `max_words` words and append `"..."`.
///
/// A limit of 0 means unlimited. Text within the limit is returned verbatim.
pub fn truncate_to_word_limit(text: &str, max_words: usize) -> String {
    if max_words == 0 || count_words(text) <= max_words {
        return text.to_string();
    }

    let kept: Vec<&str> = text.split_whitespace().take(max_words).collect();
    format!("{}...", kept.join(" "))
}

/// Truncate to the word limit, then keep only the first sentence.
///
/// Only the first sentence of the truncated text survives, even when later
/// sentences would fit. Without any `.`, `!` or `?` in the truncated text
/// this falls back to [`truncate_to_word_limit`].
pub fn truncate_to_complete_sentence(text: &str, max_words: usize) -> String {
    if max_words == 0 || count_words(text) <= max_words {
        return text.to_string();
    }

    let truncated = text
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ");

    if !truncated.contains(['.', '!', '?']) {
        return format!("{truncated}...");
    }

    match truncated
        .split(['.', '!', '?'])
        .map(str::trim)
        .find(|s| !s.is_empty())
    {
        Some(first) => format!("{first}."),
        None => format!("{truncated}..."),
    }
}

/// Simple HTML escaping for user content.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Format seconds as `m:ss` or `h:mm:ss`.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let rem = secs % 60;
    if hours > 0 {
        format!("{hours}:{mins:02}:{rem:02}")
    } else {
        format!("{mins}:{rem:02}")
    }
}
