//! Email themes.

use std::fmt;

use serde::Serialize;

/// Named email theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeName {
    #[default]
    Default,
    Newsletter,
    Minimal,
}

impl ThemeName {
    /// Get all themes.
    #[must_use]
    pub fn all() -> &'static [ThemeName] {
        &[ThemeName::Default, ThemeName::Newsletter, ThemeName::Minimal]
    }

    /// Parse a theme name. Unknown names fall back to `Default`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "newsletter" => ThemeName::Newsletter,
            "minimal" => ThemeName::Minimal,
            _ => ThemeName::Default,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Default => "default",
            ThemeName::Newsletter => "newsletter",
            ThemeName::Minimal => "minimal",
        }
    }

    /// Palette for this theme.
    #[must_use]
    pub fn theme(&self) -> &'static EmailTheme {
        match self {
            ThemeName::Default => &DEFAULT_THEME,
            ThemeName::Newsletter => &NEWSLETTER_THEME,
            ThemeName::Minimal => &MINIMAL_THEME,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static palette and section switches for the HTML email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailTheme {
    #[serde(skip)]
    pub name: ThemeName,
    pub header_color: &'static str,
    pub background_color: &'static str,
    pub text_color: &'static str,
    pub link_color: &'static str,
    pub border_color: &'static str,
    pub max_width: &'static str,
    pub font_family: &'static str,
    #[serde(skip)]
    pub show_topic_clusters: bool,
    #[serde(skip)]
    pub show_insights: bool,
}

impl EmailTheme {
    /// Look up a theme by name, falling back to `default`.
    pub fn lookup(name: &str) -> &'static EmailTheme {
        ThemeName::parse(name).theme()
    }
}

pub const DEFAULT_THEME: EmailTheme = EmailTheme {
    name: ThemeName::Default,
    header_color: "#2563eb",
    background_color: "#f8fafc",
    text_color: "#1f2937",
    link_color: "#2563eb",
    border_color: "#e5e7eb",
    max_width: "680px",
    font_family: "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif",
    show_topic_clusters: true,
    show_insights: true,
};

pub const NEWSLETTER_THEME: EmailTheme = EmailTheme {
    name: ThemeName::Newsletter,
    header_color: "#0f766e",
    background_color: "#fefce8",
    text_color: "#292524",
    link_color: "#0d9488",
    border_color: "#e7e5e4",
    max_width: "640px",
    font_family: "Georgia, 'Times New Roman', serif",
    show_topic_clusters: true,
    show_insights: true,
};

pub const MINIMAL_THEME: EmailTheme = EmailTheme {
    name: ThemeName::Minimal,
    header_color: "#111827",
    background_color: "#ffffff",
    text_color: "#111827",
    link_color: "#111827",
    border_color: "#d1d5db",
    max_width: "600px",
    font_family: "Helvetica, Arial, sans-serif",
    show_topic_clusters: false,
    show_insights: false,
};
