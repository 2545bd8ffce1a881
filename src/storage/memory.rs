use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::seed;
use super::types::Article;
use crate::util::validate_article_url;

/// Read-only source of articles.
///
/// The retrieval service only ever asks for the full collection; anything
/// that can produce a list of articles (bundled data, a cache, a provider
/// snapshot) can stand behind it.
pub trait ArticleSource: Send + Sync {
    fn list(&self) -> Vec<Article>;
}

/// Fixed in-memory article collection.
///
/// Articles are held behind an `Arc` so the store can be shared between the
/// service and tests without copying. Construction enforces URL identity:
/// entries with an invalid URL or a URL already seen are dropped.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    articles: Arc<Vec<Article>>,
}

impl MemoryStore {
    pub fn new(articles: Vec<Article>) -> Self {
        let mut seen: HashSet<String> = HashSet::with_capacity(articles.len());
        let mut kept = Vec::with_capacity(articles.len());

        for article in articles {
            if let Err(e) = validate_article_url(&article.url) {
                tracing::warn!(url = %article.url, error = %e, "Dropping article with invalid URL");
                continue;
            }
            if !seen.insert(article.url.clone()) {
                tracing::warn!(url = %article.url, "Dropping duplicate article URL");
                continue;
            }
            kept.push(article);
        }

        tracing::debug!(count = kept.len(), "Article store initialised");
        Self {
            articles: Arc::new(kept),
        }
    }

    /// Store populated with the bundled headlines.
    pub fn bundled(now: DateTime<Utc>) -> Self {
        Self::new(seed::default_articles(now))
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl ArticleSource for MemoryStore {
    fn list(&self) -> Vec<Article> {
        self.articles.as_ref().clone()
    }
}
