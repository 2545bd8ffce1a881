use thiserror::Error;
use url::Url;

/// Errors that can occur during article URL validation.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
}

/// Validates a URL string for use as an article identity or share link.
///
/// Rejects anything that is not an absolute `http`/`https` URL with a host,
/// which keeps `javascript:`, `data:` and `file:` links out of the store and
/// out of the clipboard.
///
/// # Examples
///
/// ```
/// use headline::util::validate_article_url;
///
/// let url = validate_article_url("https://example.com/story").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(validate_article_url("javascript:alert(1)").is_err());
/// assert!(validate_article_url("/relative/path").is_err());
/// ```
pub fn validate_article_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}
