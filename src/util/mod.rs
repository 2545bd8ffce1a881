//! Utility functions shared by the engine and the CLI.
//!
//! - **URL validation**: articles are identified by URL, so only absolute
//!   http(s) links are accepted into the store or handed to a share target
//! - **Text**: Unicode-aware width calculation, truncation and line flattening
//! - **Formatting**: relative ages, compact share counts, credibility bands

mod format;
mod text;
mod url_validator;

pub use format::{compact_count, time_ago, CredibilityTier};
pub use text::{display_width, single_line, truncate_to_width};
pub use url_validator::{validate_article_url, UrlValidationError};
