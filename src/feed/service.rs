use async_trait::async_trait;
use chrono::Utc;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::storage::{
    seed, Article, ArticleSource, BreakingNews, Category, MemoryStore, TrendingTopic,
};

/// Errors that can occur while retrieving articles or sidebar metadata.
///
/// None of these are fatal: the controller answers a failed article fetch by
/// showing the fallback dataset, and a failed sidebar fetch by keeping what it
/// already has.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider could not be reached or refused the request.
    #[error("News service unavailable: {0}")]
    Unavailable(String),
    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    /// The provider answered with something that could not be used.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Asynchronous retrieval of articles and the auxiliary sidebar collections.
///
/// Each call is independent; none of them depend on another having run.
#[async_trait]
pub trait NewsService: Send + Sync {
    /// Articles for one category, or for every category when `None`.
    async fn fetch_articles(&self, category: Option<Category>) -> Result<Vec<Article>, FetchError>;

    async fn fetch_breaking_news(&self) -> Result<Vec<BreakingNews>, FetchError>;

    async fn fetch_trending_topics(&self) -> Result<Vec<TrendingTopic>, FetchError>;
}

/// Artificial response times for [`SimulatedNewsService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub articles: Duration,
    pub breaking: Duration,
    pub trending: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            articles: Duration::from_millis(800),
            breaking: Duration::from_millis(300),
            trending: Duration::from_millis(400),
        }
    }
}

impl Latency {
    /// Respond immediately.
    pub fn none() -> Self {
        Self {
            articles: Duration::ZERO,
            breaking: Duration::ZERO,
            trending: Duration::ZERO,
        }
    }
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Stand-in for a live news provider.
///
/// Serves articles from an [`ArticleSource`] in random order after a fixed
/// delay, the way a headline API returns a freshly ranked page per request.
pub struct SimulatedNewsService {
    source: Arc<dyn ArticleSource>,
    breaking: Vec<BreakingNews>,
    trending: Vec<TrendingTopic>,
    latency: Latency,
}

impl SimulatedNewsService {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        breaking: Vec<BreakingNews>,
        trending: Vec<TrendingTopic>,
        latency: Latency,
    ) -> Self {
        Self {
            source,
            breaking,
            trending,
            latency,
        }
    }

    /// Service over the bundled headlines, breaking news and trending topics.
    pub fn bundled(latency: Latency) -> Self {
        let now = Utc::now();
        Self::new(
            Arc::new(MemoryStore::bundled(now)),
            seed::breaking_news(now),
            seed::trending_topics(),
            latency,
        )
    }
}

#[async_trait]
impl NewsService for SimulatedNewsService {
    async fn fetch_articles(&self, category: Option<Category>) -> Result<Vec<Article>, FetchError> {
        simulate(self.latency.articles).await;

        let mut articles = self.source.list();
        articles.shuffle(&mut rand::rng());
        if let Some(category) = category {
            articles.retain(|a| a.category == category);
        }

        tracing::debug!(
            category = category.map(|c| c.as_str()).unwrap_or(Category::ALL),
            count = articles.len(),
            "Served articles"
        );
        Ok(articles)
    }

    async fn fetch_breaking_news(&self) -> Result<Vec<BreakingNews>, FetchError> {
        simulate(self.latency.breaking).await;
        Ok(self.breaking.clone())
    }

    async fn fetch_trending_topics(&self) -> Result<Vec<TrendingTopic>, FetchError> {
        simulate(self.latency.trending).await;
        Ok(self.trending.clone())
    }
}

/// Breaking news and trending topics, fetched concurrently.
///
/// Total latency is that of the slower call, not their sum. Each half keeps
/// its own result so one failing does not discard the other.
pub async fn fetch_sidebars(
    service: &dyn NewsService,
) -> (
    Result<Vec<BreakingNews>, FetchError>,
    Result<Vec<TrendingTopic>, FetchError>,
) {
    futures::future::join(service.fetch_breaking_news(), service.fetch_trending_topics()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn service(latency: Latency) -> SimulatedNewsService {
        SimulatedNewsService::bundled(latency)
    }

    #[tokio::test]
    async fn test_fetch_all_returns_every_article() {
        let svc = service(Latency::none());
        let all = svc.fetch_articles(None).await.unwrap();
        assert_eq!(all.len(), seed::default_articles(Utc::now()).len());
    }

    #[tokio::test]
    async fn test_fetch_category_filters() {
        let svc = service(Latency::none());
        let business = svc.fetch_articles(Some(Category::Business)).await.unwrap();
        assert!(!business.is_empty());
        assert!(business.iter().all(|a| a.category == Category::Business));
    }

    #[tokio::test]
    async fn test_fetch_is_a_permutation_of_the_store() {
        let svc = service(Latency::none());
        let a: HashSet<String> = svc
            .fetch_articles(None)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.url)
            .collect();
        let b: HashSet<String> = svc
            .fetch_articles(None)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.url)
            .collect();
        assert_eq!(a, b);
    }

    #[tokio::test(start_paused = true)]
    async fn test_article_latency_is_simulated() {
        let svc = service(Latency::default());
        let start = tokio::time::Instant::now();
        svc.fetch_articles(None).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sidebars_fetched_concurrently() {
        let svc = service(Latency::default());
        let start = tokio::time::Instant::now();
        let (breaking, trending) = fetch_sidebars(&svc).await;
        let elapsed = start.elapsed();

        assert_eq!(breaking.unwrap().len(), 2);
        assert_eq!(trending.unwrap().len(), 6);
        // Slower of 300ms and 400ms, not their 700ms sum.
        assert!(elapsed >= Duration::from_millis(400));
        assert!(elapsed < Duration::from_millis(700));
    }
}
