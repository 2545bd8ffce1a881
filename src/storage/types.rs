use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// A category name that is neither a known category nor the "all" sentinel.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown category: {0}")]
pub struct CategoryParseError(pub String);

// ============================================================================
// Enumerations
// ============================================================================

/// Topical section an article belongs to.
///
/// "all" is deliberately not a variant: a category *selection* is
/// `Option<Category>`, with `None` meaning every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Business,
    Sports,
    Health,
    Entertainment,
    Politics,
}

impl Category {
    /// Sentinel used by callers that address every category at once.
    pub const ALL: &'static str = "all";

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Sports => "sports",
            Category::Health => "health",
            Category::Entertainment => "entertainment",
            Category::Politics => "politics",
        }
    }

    /// Parse a selection string where "all" (any case) means no restriction.
    ///
    /// ```
    /// use headline::storage::Category;
    ///
    /// assert_eq!(Category::parse_selection("all").unwrap(), None);
    /// assert_eq!(
    ///     Category::parse_selection("Sports").unwrap(),
    ///     Some(Category::Sports)
    /// );
    /// assert!(Category::parse_selection("weather").is_err());
    /// ```
    pub fn parse_selection(s: &str) -> Result<Option<Category>, CategoryParseError> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(Self::ALL) {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "technology" => Ok(Category::Technology),
            "business" => Ok(Category::Business),
            "sports" => Ok(Category::Sports),
            "health" => Ok(Category::Health),
            "entertainment" => Ok(Category::Entertainment),
            "politics" => Ok(Category::Politics),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

/// Editorial tone of an article or trending topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How pressing a breaking-news item is. Ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }
}

/// Direction a trending topic is moving in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Single-glyph marker for plain-text listings.
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Stable => "→",
        }
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A single news item.
///
/// `url` is the identity: it is used for deduplication, saved-state lookup,
/// and as the stable key when listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "urlToImage")]
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Estimated reading time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    /// 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credibility_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_shares: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_articles: Vec<String>,
}

impl Article {
    /// Reading time assumed for articles that do not carry an estimate.
    pub const DEFAULT_READING_TIME: u32 = 5;

    /// Minimal article with every optional field unset.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
        category: Category,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            url: url.into(),
            image_url: None,
            published_at,
            source: source.into(),
            category,
            content: None,
            author: None,
            reading_time: None,
            sentiment: None,
            credibility_score: None,
            social_shares: None,
            related_articles: Vec::new(),
        }
    }

    pub fn reading_time_or_default(&self) -> u32 {
        self.reading_time.unwrap_or(Self::DEFAULT_READING_TIME)
    }

    /// Case-insensitive substring match against title, description, or source.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle_lower))
            || self.source.to_lowercase().contains(needle_lower)
    }
}

/// Short urgent headline shown in the breaking-news banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakingNews {
    pub id: String,
    pub title: String,
    pub urgency: Urgency,
    pub timestamp: DateTime<Utc>,
    pub category: Category,
}

/// Keyword currently drawing coverage, shown in the trending sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub keyword: String,
    #[serde(rename = "count")]
    pub article_count: u32,
    pub sentiment: Sentiment,
    pub trend: Trend,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        let mut a = Article::new(
            "Breakthrough in Quantum Computing",
            "https://example.com/quantum",
            "TechNews Daily",
            Category::Technology,
            Utc::now(),
        );
        a.description = Some("Encryption may never be the same".to_string());
        a
    }

    #[test]
    fn test_category_round_trip_through_str() {
        for name in [
            "technology",
            "business",
            "sports",
            "health",
            "entertainment",
            "politics",
        ] {
            let cat: Category = name.parse().unwrap();
            assert_eq!(cat.as_str(), name);
        }
    }

    #[test]
    fn test_category_all_is_not_a_category() {
        assert!("all".parse::<Category>().is_err());
        assert_eq!(Category::parse_selection(" ALL ").unwrap(), None);
    }

    #[test]
    fn test_category_parse_error_names_input() {
        let err = Category::parse_selection("weather").unwrap_err();
        assert_eq!(err.to_string(), "Unknown category: weather");
    }

    #[test]
    fn test_matches_text_checks_each_field() {
        let a = article();
        assert!(a.matches_text("quantum"));
        assert!(a.matches_text("encryption"));
        assert!(a.matches_text("technews"));
        assert!(!a.matches_text("sports"));
    }

    #[test]
    fn test_matches_text_without_description() {
        let mut a = article();
        a.description = None;
        assert!(!a.matches_text("encryption"));
        assert!(a.matches_text("daily"));
    }

    #[test]
    fn test_reading_time_default() {
        let mut a = article();
        assert_eq!(a.reading_time_or_default(), 5);
        a.reading_time = Some(9);
        assert_eq!(a.reading_time_or_default(), 9);
    }

    #[test]
    fn test_article_serializes_camel_case() {
        let a = article();
        let json = serde_json::to_value(&a).unwrap();
        assert!(json.get("publishedAt").is_some());
        assert!(json.get("urlToImage").is_some());
        assert_eq!(json["category"], "technology");
        assert!(json.get("credibilityScore").is_none());
    }

    #[test]
    fn test_urgency_ordering() {
        assert!(Urgency::Critical > Urgency::High);
        assert!(Urgency::Low < Urgency::Medium);
    }
}
