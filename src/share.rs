//! Sharing an article link, natively when possible, via clipboard otherwise.

use thiserror::Error;

use crate::storage::Article;
use crate::util::{validate_article_url, UrlValidationError};

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Article link cannot be shared: {0}")]
    InvalidUrl(#[from] UrlValidationError),
    #[error("Share target failed: {0}")]
    Target(String),
}

/// What a share target receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    /// Article description, or empty.
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            text: article.description.clone().unwrap_or_default(),
            url: article.url.clone(),
        }
    }
}

/// Platform share sheet.
pub trait NativeShare: Send + Sync {
    fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;
}

/// Clipboard-like sink that accepts plain text.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ShareError>;
}

/// Which path a share took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
}

/// Share `article` through `native` if one is available, otherwise copy its
/// URL to `clipboard`.
pub fn share_article(
    article: &Article,
    native: Option<&dyn NativeShare>,
    clipboard: &dyn Clipboard,
) -> Result<ShareOutcome, ShareError> {
    validate_article_url(&article.url)?;

    match native {
        Some(target) => {
            target.share(&SharePayload::from_article(article))?;
            tracing::debug!(url = %article.url, "Shared article");
            Ok(ShareOutcome::Shared)
        }
        None => {
            clipboard.write_text(&article.url)?;
            tracing::debug!(url = %article.url, "Copied article link");
            Ok(ShareOutcome::Copied)
        }
    }
}

/// Clipboard that prints the link to stdout, for terminal use.
#[derive(Debug, Default)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&self, text: &str) -> Result<(), ShareError> {
        use std::io::Write;
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", text).map_err(|e| ShareError::Target(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Category;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemClipboard(Mutex<Vec<String>>);

    impl Clipboard for MemClipboard {
        fn write_text(&self, text: &str) -> Result<(), ShareError> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemShare(Mutex<Vec<SharePayload>>);

    impl NativeShare for MemShare {
        fn share(&self, payload: &SharePayload) -> Result<(), ShareError> {
            self.0.lock().unwrap().push(payload.clone());
            Ok(())
        }
    }

    fn article(url: &str) -> Article {
        Article::new("Title", url, "Source", Category::Health, Utc::now())
    }

    #[test]
    fn test_native_share_preferred() {
        let native = MemShare::default();
        let clip = MemClipboard::default();
        let outcome =
            share_article(&article("https://example.com/a"), Some(&native), &clip).unwrap();
        assert_eq!(outcome, ShareOutcome::Shared);
        let shared = native.0.lock().unwrap();
        assert_eq!(shared[0].url, "https://example.com/a");
        assert_eq!(shared[0].text, "");
        assert!(clip.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_clipboard_fallback() {
        let clip = MemClipboard::default();
        let outcome = share_article(&article("https://example.com/a"), None, &clip).unwrap();
        assert_eq!(outcome, ShareOutcome::Copied);
        assert_eq!(*clip.0.lock().unwrap(), vec!["https://example.com/a"]);
    }

    #[test]
    fn test_unsafe_url_not_shared() {
        let clip = MemClipboard::default();
        let result = share_article(&article("javascript:alert(1)"), None, &clip);
        assert!(matches!(result, Err(ShareError::InvalidUrl(_))));
        assert!(clip.0.lock().unwrap().is_empty());
    }
}
