//! Writing rendered digests to disk.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{DigestError, Result};
use crate::format::DigestFormat;

/// `digest_{format}_{date}.md`
pub fn digest_filename(format: DigestFormat, date: NaiveDate) -> String {
    format!("digest_{}_{}.md", format.as_str(), date.format("%Y-%m-%d"))
}

/// `digest_email_{date}.html`
pub fn email_filename(date: NaiveDate) -> String {
    format!("digest_email_{}.html", date.format("%Y-%m-%d"))
}

/// Writes rendered output under a base directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    base_path: PathBuf,
}

impl FileSink {
    /// Create a sink rooted at `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Write `contents` to `file_name`, creating directories as needed.
    pub async fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.base_path.join(file_name);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DigestError::io(parent, e))?;
        }

        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| DigestError::io(&path, e))?;

        tracing::info!(path = %path.display(), bytes = contents.len(), "Wrote digest");
        Ok(path)
    }

    /// Write a Markdown digest under its generated name.
    pub async fn write_digest(
        &self,
        format: DigestFormat,
        date: NaiveDate,
        markdown: &str,
    ) -> Result<PathBuf> {
        self.write(&digest_filename(format, date), markdown).await
    }

    /// Write an HTML email under its generated name.
    pub async fn write_email(&self, date: NaiveDate, html: &str) -> Result<PathBuf> {
        self.write(&email_filename(date), html).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_filenames() {
        assert_eq!(
            digest_filename(DigestFormat::Newsletter, date()),
            "digest_newsletter_2024-06-01.md"
        );
        assert_eq!(email_filename(date()), "digest_email_2024-06-01.html");
    }

    #[tokio::test]
    async fn test_write_creates_directories() {
        let temp = TempDir::new().unwrap();
        let sink = FileSink::new(temp.path().join("nested").join("out"));

        let path = sink
            .write_digest(DigestFormat::Brief, date(), "# Daily Brief\n")
            .await
            .unwrap();

        assert!(path.ends_with("digest_brief_2024-06-01.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Daily Brief\n");
    }

    #[tokio::test]
    async fn test_write_failure_reports_path() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let sink = FileSink::new(blocker.join("sub"));
        let err = sink.write_email(date(), "<html></html>").await.unwrap_err();
        assert!(matches!(err, DigestError::Io { .. }));
    }
}
