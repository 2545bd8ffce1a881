//! Integration tests for the feed controller: retrieval, search, periodic
//! refresh, and failure fallback.
//!
//! Tests run on a paused clock, so simulated latency and the five-minute
//! refresh period complete instantly while keeping their ordering.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use headline::app::{App, AppEvent, Settings};
use headline::feed::{
    FetchError, FilterSpec, Latency, NewsService, SimulatedNewsService, SortBy,
};
use headline::notify::RecordingNotifier;
use headline::storage::{seed, Article, BreakingNews, Category, MemoryStore, TrendingTopic};
use headline::ui::{handle_app_event, run_until_idle};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const REFRESH: Duration = Duration::from_secs(5 * 60);

fn five_articles() -> Vec<Article> {
    let at = |h: i64| Utc.timestamp_opt(1_700_000_000 + h * 3600, 0).unwrap();
    let mut out = vec![
        Article::new("Chip output doubles", "https://example.com/chips", "Wire", Category::Technology, at(1)),
        Article::new("Markets steady", "https://example.com/markets", "Ledger", Category::Business, at(2)),
        Article::new("Open source AI model", "https://example.com/ai", "Wire", Category::Technology, at(3)),
        Article::new("Cup final tonight", "https://example.com/cup", "Sportsdesk", Category::Sports, at(4)),
        Article::new("Clinic hours extended", "https://example.com/clinic", "Health Daily", Category::Health, at(5)),
    ];
    out[1].social_shares = Some(900);
    out[2].social_shares = Some(4_000);
    out[4].social_shares = Some(10);
    out
}

/// Service with per-category delays, a failure switch, and call counters.
struct ScriptedService {
    articles: Vec<Article>,
    slow: Option<(Category, Duration)>,
    fail: AtomicBool,
    article_calls: AtomicUsize,
    breaking_calls: AtomicUsize,
}

impl ScriptedService {
    fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            slow: None,
            fail: AtomicBool::new(false),
            article_calls: AtomicUsize::new(0),
            breaking_calls: AtomicUsize::new(0),
        }
    }

    fn slow(mut self, category: Category, delay: Duration) -> Self {
        self.slow = Some((category, delay));
        self
    }

    fn articles(&self) -> usize {
        self.article_calls.load(Ordering::SeqCst)
    }

    fn sidebars(&self) -> usize {
        self.breaking_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsService for ScriptedService {
    async fn fetch_articles(&self, category: Option<Category>) -> Result<Vec<Article>, FetchError> {
        self.article_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((slow, delay)) = self.slow {
            if category == Some(slow) {
                tokio::time::sleep(delay).await;
            }
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(FetchError::Unavailable("scripted outage".to_string()));
        }
        Ok(self
            .articles
            .iter()
            .filter(|a| category.is_none() || category == Some(a.category))
            .cloned()
            .collect())
    }

    async fn fetch_breaking_news(&self) -> Result<Vec<BreakingNews>, FetchError> {
        self.breaking_calls.fetch_add(1, Ordering::SeqCst);
        Ok(seed::breaking_news(Utc::now()))
    }

    async fn fetch_trending_topics(&self) -> Result<Vec<TrendingTopic>, FetchError> {
        Ok(seed::trending_topics())
    }
}

struct Harness {
    app: App,
    rx: mpsc::Receiver<AppEvent>,
    notices: Arc<RecordingNotifier>,
}

impl Harness {
    fn new(service: Arc<dyn NewsService>, settings: Settings) -> Self {
        let (tx, rx) = mpsc::channel(16);
        let notices = Arc::new(RecordingNotifier::new());
        let app = App::new(service, notices.clone(), settings, tx);
        Self { app, rx, notices }
    }

    async fn settle(&mut self) {
        run_until_idle(&mut self.app, &mut self.rx).await.unwrap();
    }

    fn visible_urls(&self) -> HashSet<String> {
        self.app.articles.iter().map(|a| a.url.clone()).collect()
    }

    fn notice_titles(&self) -> Vec<String> {
        self.notices
            .take()
            .into_iter()
            .map(|n| n.title.into_owned())
            .collect()
    }
}

fn no_refresh() -> Settings {
    Settings {
        refresh_interval: None,
        ..Settings::default()
    }
}

fn url_set(urls: &[&str]) -> HashSet<String> {
    urls.iter().map(|u| u.to_string()).collect()
}

// ============================================================================
// Retrieval
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_technology_retrieval_returns_exactly_technology() {
    let store = Arc::new(MemoryStore::new(five_articles()));
    let service = Arc::new(SimulatedNewsService::new(
        store,
        Vec::new(),
        Vec::new(),
        Latency::default(),
    ));
    let mut h = Harness::new(service, no_refresh());

    h.app.select_category(Some(Category::Technology));
    assert!(h.app.loading);
    h.settle().await;

    assert!(!h.app.loading);
    assert_eq!(
        h.visible_urls(),
        url_set(&["https://example.com/chips", "https://example.com/ai"])
    );
}

#[tokio::test(start_paused = true)]
async fn test_mount_loads_feed_and_sidebars() {
    let service = Arc::new(SimulatedNewsService::bundled(Latency::default()));
    let mut h = Harness::new(service, no_refresh());

    h.app.mount();
    h.settle().await;

    assert_eq!(h.app.articles.len(), seed::default_articles(Utc::now()).len());
    assert_eq!(h.app.breaking_news.len(), 2);
    assert_eq!(h.app.trending_topics.len(), 6);
    assert!(!h.app.error);
}

#[tokio::test(start_paused = true)]
async fn test_later_category_wins() {
    let service = Arc::new(
        ScriptedService::new(five_articles()).slow(Category::Technology, Duration::from_secs(3)),
    );
    let mut h = Harness::new(service, no_refresh());

    h.app.select_category(Some(Category::Technology));
    h.app.select_category(Some(Category::Business));
    h.settle().await;
    assert_eq!(h.visible_urls(), url_set(&["https://example.com/markets"]));

    // The superseded request never lands.
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(h.rx.try_recv().is_err());
    assert_eq!(h.app.category, Some(Category::Business));
}

// ============================================================================
// Failure fallback
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_failure_shows_fallback_and_notifies() {
    let service = Arc::new(ScriptedService::new(five_articles()));
    service.fail.store(true, Ordering::SeqCst);
    let fallback = seed::enhanced_articles(Utc::now());
    let expected: HashSet<String> = fallback.iter().map(|a| a.url.clone()).collect();

    let mut h = Harness::new(service.clone(), no_refresh());
    h.app = h.app.with_fallback(fallback);
    h.app.mount();
    h.settle().await;

    assert!(h.app.error);
    assert_eq!(h.visible_urls(), expected);
    assert!(h.notice_titles().contains(&"Showing offline headlines".to_string()));

    service.fail.store(false, Ordering::SeqCst);
    h.app.select_category(None);
    h.settle().await;
    assert!(!h.app.error);
    assert_eq!(h.app.articles.len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_slow_retrieval_times_out_to_fallback() {
    let service = Arc::new(
        ScriptedService::new(five_articles()).slow(Category::Sports, Duration::from_secs(60)),
    );
    let settings = Settings {
        request_timeout: Duration::from_secs(10),
        refresh_interval: None,
    };
    let mut h = Harness::new(service, settings);

    let start = tokio::time::Instant::now();
    h.app.select_category(Some(Category::Sports));
    h.settle().await;

    assert!(start.elapsed() < Duration::from_secs(60));
    assert!(h.app.error);
    assert!(!h.app.articles.is_empty());
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_free_text_search_filters_loaded_without_refetch() {
    let service = Arc::new(ScriptedService::new(five_articles()));
    let mut h = Harness::new(service.clone(), no_refresh());
    h.app.mount();
    h.settle().await;
    assert_eq!(service.articles(), 1);

    h.app.search("wire");
    assert_eq!(service.articles(), 1);
    assert!(h.app.is_idle());
    assert_eq!(
        h.visible_urls(),
        url_set(&["https://example.com/chips", "https://example.com/ai"])
    );
    assert_eq!(h.app.loaded.len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_query_reapplied_when_fetch_lands() {
    let service = Arc::new(SimulatedNewsService::bundled(Latency::default()));
    let mut h = Harness::new(service, no_refresh());

    h.app.mount();
    h.app.search("quantum");
    h.settle().await;

    assert_eq!(h.app.articles.len(), 1);
    assert!(h.app.articles[0].title.contains("Quantum Computing"));
}

#[tokio::test(start_paused = true)]
async fn test_advanced_search_filters_and_sorts_retrieval() {
    let service = Arc::new(ScriptedService::new(five_articles()));
    let mut h = Harness::new(service.clone(), no_refresh());
    h.app.mount();
    h.settle().await;

    h.app.advanced_search(FilterSpec {
        categories: vec![Category::Business, Category::Technology],
        sort_by: SortBy::Popularity,
        ..FilterSpec::default()
    });
    assert!(h.app.loading);
    h.settle().await;

    assert_eq!(service.articles(), 2);
    let order: Vec<&str> = h.app.articles.iter().map(|a| a.url.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "https://example.com/ai",
            "https://example.com/markets",
            "https://example.com/chips",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_blank_search_refetches_with_active_filters() {
    let service = Arc::new(ScriptedService::new(five_articles()));
    let mut h = Harness::new(service.clone(), no_refresh());
    h.app.mount();
    h.settle().await;

    h.app.advanced_search(FilterSpec {
        categories: vec![Category::Health],
        ..FilterSpec::default()
    });
    h.settle().await;
    h.app.search("markets");
    assert!(h.app.articles.is_empty());

    h.app.search("   ");
    assert!(h.app.loading);
    h.settle().await;
    assert_eq!(service.articles(), 3);
    assert_eq!(h.visible_urls(), url_set(&["https://example.com/clinic"]));
}

#[tokio::test(start_paused = true)]
async fn test_category_change_clears_search_context() {
    let service = Arc::new(ScriptedService::new(five_articles()));
    let mut h = Harness::new(service, no_refresh());
    h.app.mount();
    h.settle().await;

    h.app.advanced_search(FilterSpec {
        query: "cup".to_string(),
        ..FilterSpec::default()
    });
    h.settle().await;
    assert_eq!(h.app.query, "cup");
    assert_eq!(h.app.articles.len(), 1);

    h.app.select_category(Some(Category::Technology));
    assert_eq!(h.app.query, "");
    assert!(h.app.active_filters.is_none());
    h.settle().await;
    assert_eq!(h.app.articles.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_trending_topic_search() {
    let service = Arc::new(SimulatedNewsService::bundled(Latency::none()));
    let mut h = Harness::new(service, no_refresh());
    h.app.mount();
    h.settle().await;

    let topic = h.app.trending_topics[0].clone();
    h.app.search_topic(&topic);
    assert_eq!(h.app.query, topic.keyword);
}

// ============================================================================
// Periodic refresh
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_tick_refreshes_everything_without_search() {
    let service = Arc::new(ScriptedService::new(five_articles()));
    let mut h = Harness::new(
        service.clone(),
        Settings {
            refresh_interval: Some(REFRESH),
            ..Settings::default()
        },
    );
    let start = tokio::time::Instant::now();
    h.app.mount();
    h.settle().await;
    assert_eq!((service.articles(), service.sidebars()), (1, 1));

    let event = h.rx.recv().await.unwrap();
    assert!(matches!(event, AppEvent::Tick));
    assert!(start.elapsed() >= REFRESH);
    handle_app_event(&mut h.app, event);
    h.settle().await;

    assert_eq!((service.articles(), service.sidebars()), (2, 2));
}

#[tokio::test(start_paused = true)]
async fn test_tick_keeps_search_results() {
    let service = Arc::new(ScriptedService::new(five_articles()));
    let mut h = Harness::new(
        service.clone(),
        Settings {
            refresh_interval: Some(REFRESH),
            ..Settings::default()
        },
    );
    h.app.mount();
    h.settle().await;

    h.app.search("clinic");
    let event = h.rx.recv().await.unwrap();
    handle_app_event(&mut h.app, event);
    h.settle().await;

    assert_eq!((service.articles(), service.sidebars()), (1, 2));
    assert_eq!(h.visible_urls(), url_set(&["https://example.com/clinic"]));

    h.app.advanced_search(FilterSpec {
        sort_by: SortBy::Date,
        ..FilterSpec::default()
    });
    h.app.search("");
    h.settle().await;
    let articles_before_tick = service.articles();

    let event = h.rx.recv().await.unwrap();
    handle_app_event(&mut h.app, event);
    h.settle().await;
    assert_eq!(service.articles(), articles_before_tick);
    assert_eq!(service.sidebars(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_stops_refresh() {
    let service = Arc::new(ScriptedService::new(five_articles()));
    let mut h = Harness::new(
        service.clone(),
        Settings {
            refresh_interval: Some(REFRESH),
            ..Settings::default()
        },
    );
    h.app.mount();
    h.settle().await;
    h.app.unmount();

    tokio::time::sleep(REFRESH * 3).await;
    assert!(h.rx.try_recv().is_err());

    // Remounting starts exactly one new timer.
    h.app.mount();
    h.app.mount();
    h.settle().await;
    tokio::time::sleep(REFRESH + Duration::from_secs(1)).await;
    let mut ticks = 0;
    while let Ok(event) = h.rx.try_recv() {
        if matches!(event, AppEvent::Tick) {
            ticks += 1;
        }
    }
    assert_eq!(ticks, 1);
}

#[tokio::test(start_paused = true)]
async fn test_events_queued_before_unmount_are_inert() {
    let service = Arc::new(ScriptedService::new(five_articles()));
    let mut h = Harness::new(
        service.clone(),
        Settings {
            refresh_interval: Some(REFRESH),
            ..Settings::default()
        },
    );
    h.app.mount();
    h.settle().await;
    assert_eq!(h.app.articles.len(), 5);

    // A finished retrieval and a tick both sit in the channel at teardown.
    h.app.select_category(Some(Category::Health));
    tokio::time::sleep(REFRESH + Duration::from_secs(1)).await;
    let generation = h.app.fetch_generation;
    let calls = (service.articles(), service.sidebars());
    h.app.unmount();

    let mut drained = 0;
    while let Ok(event) = h.rx.try_recv() {
        handle_app_event(&mut h.app, event);
        drained += 1;
    }
    assert!(drained >= 2);
    assert!(h.app.is_idle());
    assert_eq!(h.app.fetch_generation, generation + 1);
    assert_eq!((service.articles(), service.sidebars()), calls);
    assert_eq!(h.app.articles.len(), 5);
}
