//! Output adapters for composed digests.
//!
//! Chat payloads live in the `notify` crate.

pub mod email;
pub mod markdown;
pub mod theme;

pub use email::{subject_line, EmailDocument, EmailRenderer, DEFAULT_SUBJECT_TEMPLATE};
pub use theme::{EmailTheme, ThemeName, DEFAULT_THEME, MINIMAL_THEME, NEWSLETTER_THEME};
