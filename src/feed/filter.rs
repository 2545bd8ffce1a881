//! Advanced filter and sort pipeline over an in-memory article list.
//!
//! [`apply_filters`] is pure: it never mutates its input and returns a new,
//! possibly shorter, possibly reordered list. Predicates are conjunctive;
//! sorting always runs last and is stable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::storage::{Article, Category, Sentiment};

// ============================================================================
// Error Types
// ============================================================================

/// Rejected filter option value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown date range: {0} (expected today, week, month, year, all)")]
    DateRange(String),
    #[error("Unknown sort key: {0} (expected relevance, date, popularity, credibility)")]
    SortBy(String),
    #[error("Unknown sentiment: {0} (expected all, positive, negative, neutral)")]
    Sentiment(String),
    #[error("Credibility threshold must be within 0-100, got {0}")]
    Credibility(u32),
    #[error("Invalid reading time range: {0}")]
    ReadingTime(String),
}

// ============================================================================
// Filter Options
// ============================================================================

/// Publication window selected in the advanced search form.
///
/// Carried with the filter and counted as an active filter, but not used to
/// narrow results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    Today,
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl FromStr for DateRange {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(DateRange::Today),
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            "year" => Ok(DateRange::Year),
            "all" => Ok(DateRange::All),
            _ => Err(FilterError::DateRange(s.to_string())),
        }
    }
}

/// Ordering applied after all predicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Keep the incoming order.
    #[default]
    Relevance,
    /// Newest first.
    Date,
    /// Most shared first.
    Popularity,
    /// Most credible first.
    Credibility,
}

impl FromStr for SortBy {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortBy::Relevance),
            "date" => Ok(SortBy::Date),
            "popularity" => Ok(SortBy::Popularity),
            "credibility" => Ok(SortBy::Credibility),
            _ => Err(FilterError::SortBy(s.to_string())),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortBy::Relevance => "relevance",
            SortBy::Date => "date",
            SortBy::Popularity => "popularity",
            SortBy::Credibility => "credibility",
        };
        f.write_str(s)
    }
}

/// Sentiment restriction; `All` disables the predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentFilter {
    #[default]
    All,
    Positive,
    Negative,
    Neutral,
}

impl SentimentFilter {
    /// Articles with no sentiment only pass when the filter is `All`.
    pub fn matches(&self, sentiment: Option<Sentiment>) -> bool {
        match self {
            SentimentFilter::All => true,
            SentimentFilter::Positive => sentiment == Some(Sentiment::Positive),
            SentimentFilter::Negative => sentiment == Some(Sentiment::Negative),
            SentimentFilter::Neutral => sentiment == Some(Sentiment::Neutral),
        }
    }
}

impl FromStr for SentimentFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(SentimentFilter::All),
            "positive" => Ok(SentimentFilter::Positive),
            "negative" => Ok(SentimentFilter::Negative),
            "neutral" => Ok(SentimentFilter::Neutral),
            _ => Err(FilterError::Sentiment(s.to_string())),
        }
    }
}

/// Parse an inclusive `MIN-MAX` minute range such as `"2-6"`.
pub fn parse_reading_time(s: &str) -> Result<(u32, u32), FilterError> {
    let invalid = || FilterError::ReadingTime(s.to_string());
    let (min, max) = s.split_once('-').ok_or_else(invalid)?;
    let min: u32 = min.trim().parse().map_err(|_| invalid())?;
    let max: u32 = max.trim().parse().map_err(|_| invalid())?;
    if min > max {
        return Err(invalid());
    }
    Ok((min, max))
}

// ============================================================================
// Filter Specification
// ============================================================================

/// User-constructed query narrowing and ordering an article collection.
///
/// Built fresh for each advanced search and treated as immutable once handed
/// to [`apply_filters`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    pub query: String,
    pub categories: Vec<Category>,
    pub date_range: DateRange,
    pub sort_by: SortBy,
    pub sentiment: SentimentFilter,
    /// 0-100.
    pub min_credibility: u8,
    /// Inclusive bounds in minutes.
    pub reading_time: (u32, u32),
    pub has_image: bool,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: Vec::new(),
            date_range: DateRange::All,
            sort_by: SortBy::Relevance,
            sentiment: SentimentFilter::All,
            min_credibility: 0,
            reading_time: (1, 10),
            has_image: false,
        }
    }
}

impl FilterSpec {
    /// Set the credibility threshold, rejecting values above 100.
    pub fn with_min_credibility(mut self, value: u32) -> Result<Self, FilterError> {
        self.min_credibility = u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .ok_or(FilterError::Credibility(value))?;
        Ok(self)
    }

    /// Number of options that differ from their neutral setting.
    ///
    /// Reading-time bounds and sort order are not counted.
    pub fn active_filter_count(&self) -> usize {
        [
            !self.query.is_empty(),
            !self.categories.is_empty(),
            self.date_range != DateRange::All,
            self.sentiment != SentimentFilter::All,
            self.min_credibility > 0,
            self.has_image,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Restore every option to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn matches(&self, article: &Article, query_lower: Option<&str>) -> bool {
        if let Some(q) = query_lower {
            if !article.matches_text(q) {
                return false;
            }
        }

        if !self.categories.is_empty() && !self.categories.contains(&article.category) {
            return false;
        }

        if !self.sentiment.matches(article.sentiment) {
            return false;
        }

        if article.credibility_score.unwrap_or(0) < self.min_credibility {
            return false;
        }

        let (min, max) = self.reading_time;
        let minutes = article.reading_time_or_default();
        if minutes < min || minutes > max {
            return false;
        }

        !(self.has_image && article.image_url.is_none())
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Apply `spec` to `articles`, returning a new list.
///
/// Predicates, all of which must hold:
/// 1. query: case-insensitive substring of title, description, or source
/// 2. category: spec categories empty, or article category listed
/// 3. sentiment: `All`, or equal to the article's sentiment
/// 4. credibility: score (missing = 0) at least `min_credibility`
/// 5. reading time (missing = 5) within the inclusive bounds
/// 6. image: present when `has_image` is set
///
/// Then a stable sort by `sort_by`; `Relevance` keeps the incoming order.
/// An empty input or a spec that matches nothing yields an empty list.
pub fn apply_filters(articles: &[Article], spec: &FilterSpec) -> Vec<Article> {
    let query_lower = spec.query.to_lowercase();
    let query = (!query_lower.is_empty()).then_some(query_lower.as_str());

    let mut out: Vec<Article> = articles
        .iter()
        .filter(|a| spec.matches(a, query))
        .cloned()
        .collect();

    sort_articles(&mut out, spec.sort_by);

    tracing::debug!(
        input = articles.len(),
        output = out.len(),
        sort = %spec.sort_by,
        active = spec.active_filter_count(),
        "Applied article filters"
    );
    out
}

/// Stable, descending sort by the requested key.
pub fn sort_articles(articles: &mut [Article], sort_by: SortBy) {
    match sort_by {
        SortBy::Relevance => {}
        SortBy::Date => articles.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        SortBy::Popularity => articles.sort_by(|a, b| {
            b.social_shares
                .unwrap_or(0)
                .cmp(&a.social_shares.unwrap_or(0))
        }),
        SortBy::Credibility => articles.sort_by(|a, b| {
            b.credibility_score
                .unwrap_or(0)
                .cmp(&a.credibility_score.unwrap_or(0))
        }),
    }
}

/// Free-text search: articles whose title, description, or source contain
/// `query` (case-insensitive). A blank query returns everything.
pub fn search_articles(articles: &[Article], query: &str) -> Vec<Article> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return articles.to_vec();
    }
    articles
        .iter()
        .filter(|a| a.matches_text(&needle))
        .cloned()
        .collect()
}
