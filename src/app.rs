use crate::auth::{AuthError, AuthForm, MockAuthenticator, Session};
use crate::config::Config;
use crate::feed::{fetch_sidebars, search_articles, FetchError, FilterSpec, NewsService};
use crate::notify::{Notice, Notifier};
use crate::share::{share_article, Clipboard, NativeShare, ShareError, ShareOutcome};
use crate::storage::{
    seed, Article, BreakingNews, Category, SaveOutcome, SavedArticles, TrendingTopic,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

// ============================================================================
// Settings
// ============================================================================

/// Timing knobs for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Upper bound on one article retrieval.
    pub request_timeout: Duration,
    /// Background refresh period; `None` disables the timer.
    pub refresh_interval: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            refresh_interval: Some(Duration::from_secs(5 * 60)),
        }
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            refresh_interval: config.refresh_interval(),
        }
    }
}

// ============================================================================
// Events
// ============================================================================

/// Results from background tasks, applied to [`App`] by
/// [`crate::ui::handle_app_event`].
pub enum AppEvent {
    /// An article retrieval finished.
    ///
    /// Fields:
    /// - `generation`: value of `fetch_generation` when the retrieval started
    /// - `filters`: advanced filters to run over the result, if any
    /// - `result`: articles as served, or the retrieval error
    ArticlesLoaded {
        generation: u64,
        filters: Option<Arc<FilterSpec>>,
        result: Result<Vec<Article>, FetchError>,
    },
    /// Breaking news and trending topics finished (fetched together).
    SidebarsLoaded {
        generation: u64,
        breaking: Result<Vec<BreakingNews>, FetchError>,
        trending: Result<Vec<TrendingTopic>, FetchError>,
    },
    /// The refresh timer fired.
    Tick,
}

// ============================================================================
// Refresh Timer
// ============================================================================

/// Periodic [`AppEvent::Tick`] source.
///
/// The first tick fires one full period after start. Dropping the timer
/// cancels it.
pub struct RefreshTimer {
    period: Duration,
    handle: JoinHandle<()>,
}

impl RefreshTimer {
    pub fn start(period: Duration, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if event_tx.send(AppEvent::Tick).await.is_err() {
                    tracing::debug!("Refresh timer stopping (receiver dropped)");
                    break;
                }
            }
        });
        tracing::debug!(period_secs = period.as_secs(), "Refresh timer started");
        Self { period, handle }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!("Refresh timer cancelled");
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Serializable view of what the feed currently shows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot<'a> {
    pub category: &'static str,
    pub query: &'a str,
    pub active_filters: Option<&'a FilterSpec>,
    pub error: bool,
    pub articles: &'a [Article],
    pub saved: Vec<&'a str>,
    pub breaking_news: &'a [BreakingNews],
    pub trending_topics: &'a [TrendingTopic],
}

// ============================================================================
// Application State
// ============================================================================

/// Feed controller: session state plus the sequencing of retrieval and
/// filtering.
///
/// All mutation happens on the task that owns the `App`. Background work
/// reports back through [`AppEvent`]s. Collections are `Arc`-wrapped and
/// replaced wholesale, never edited in place.
pub struct App {
    pub(crate) service: Arc<dyn NewsService>,
    pub(crate) notifier: Arc<dyn Notifier>,
    event_tx: mpsc::Sender<AppEvent>,
    settings: Settings,

    // Selection
    /// Selected category; `None` is "all".
    pub category: Option<Category>,
    /// Free-text query as typed.
    pub query: String,
    /// Filters from the last advanced search, until the category changes.
    pub active_filters: Option<Arc<FilterSpec>>,

    // Status
    pub loading: bool,
    /// The last retrieval failed and the fallback dataset is showing.
    pub error: bool,

    // Data
    /// Latest retrieval result, after advanced filters.
    pub loaded: Arc<Vec<Article>>,
    /// What is shown: `loaded`, narrowed by `query` when one is set.
    pub articles: Arc<Vec<Article>>,
    pub breaking_news: Arc<Vec<BreakingNews>>,
    pub trending_topics: Arc<Vec<TrendingTopic>>,
    pub saved: SavedArticles,
    pub session: Option<Session>,

    /// Shown in place of a failed retrieval.
    pub(crate) fallback: Arc<Vec<Article>>,

    /// Generation counter for article retrieval.
    ///
    /// Incremented each time a retrieval is spawned. Results carrying an older
    /// generation are discarded, so a slow response to an earlier request can
    /// never overwrite a newer one.
    pub fetch_generation: u64,
    pub(crate) fetch_handle: Option<JoinHandle<()>>,

    /// Generation counter for sidebar retrieval (same scheme as articles).
    pub sidebar_generation: u64,
    pub(crate) sidebar_handle: Option<JoinHandle<()>>,
    pub(crate) sidebars_pending: bool,

    mounted: bool,
    refresh_timer: Option<RefreshTimer>,
}

impl App {
    pub fn new(
        service: Arc<dyn NewsService>,
        notifier: Arc<dyn Notifier>,
        settings: Settings,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            service,
            notifier,
            event_tx,
            settings,
            category: None,
            query: String::new(),
            active_filters: None,
            loading: false,
            error: false,
            loaded: Arc::new(Vec::new()),
            articles: Arc::new(Vec::new()),
            breaking_news: Arc::new(Vec::new()),
            trending_topics: Arc::new(Vec::new()),
            saved: SavedArticles::new(),
            session: None,
            fallback: Arc::new(seed::enhanced_articles(Utc::now())),
            fetch_generation: 0,
            fetch_handle: None,
            sidebar_generation: 0,
            sidebar_handle: None,
            sidebars_pending: false,
            mounted: false,
            refresh_timer: None,
        }
    }

    /// Start on `category` instead of "all". Takes effect at [`App::mount`].
    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Replace the dataset shown when retrieval fails.
    pub fn with_fallback(mut self, fallback: Vec<Article>) -> Self {
        self.fallback = Arc::new(fallback);
        self
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Load the feed and sidebars and start the refresh timer.
    ///
    /// Calling this again while mounted does nothing, so remounting never
    /// stacks timers.
    pub fn mount(&mut self) {
        if self.is_mounted() {
            tracing::debug!("mount() called while already mounted");
            return;
        }

        self.spawn_fetch();
        self.spawn_sidebars();

        if let Some(period) = self.settings.refresh_interval {
            self.refresh_timer = Some(RefreshTimer::start(period, self.event_tx.clone()));
        }
        self.mounted = true;
    }

    /// Cancel the refresh timer and anything in flight.
    ///
    /// Results already queued on the channel carry an old generation and are
    /// dropped when they arrive.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.refresh_timer = None;
        self.abort_tasks();
        self.fetch_generation = self.fetch_generation.wrapping_add(1);
        self.sidebar_generation = self.sidebar_generation.wrapping_add(1);
        self.loading = false;
        self.sidebars_pending = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether periodic refresh is running.
    pub fn is_refreshing(&self) -> bool {
        self.refresh_timer.is_some()
    }

    /// Nothing is loading.
    pub fn is_idle(&self) -> bool {
        !self.loading && !self.sidebars_pending
    }

    fn abort_tasks(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
            tracing::debug!("Aborted article retrieval task");
        }
        if let Some(handle) = self.sidebar_handle.take() {
            handle.abort();
            tracing::debug!("Aborted sidebar retrieval task");
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Switch category. Clears the query and any advanced filters.
    pub fn select_category(&mut self, category: Option<Category>) {
        tracing::debug!(
            category = category.map(|c| c.as_str()).unwrap_or(Category::ALL),
            "Category selected"
        );
        self.category = category;
        self.query.clear();
        self.active_filters = None;
        self.spawn_fetch();
    }

    /// Free-text search.
    ///
    /// A non-blank query narrows the already loaded articles without
    /// re-fetching. A blank query re-fetches, keeping any advanced filters.
    pub fn search(&mut self, input: &str) {
        self.query = input.to_string();

        if input.trim().is_empty() {
            tracing::debug!("Search cleared, reloading articles");
            self.spawn_fetch();
            return;
        }

        self.refresh_visible();
        tracing::debug!(
            query = %input,
            matches = self.articles.len(),
            "Filtered loaded articles"
        );
    }

    /// Search for a trending topic's keyword.
    pub fn search_topic(&mut self, topic: &TrendingTopic) {
        let keyword = topic.keyword.clone();
        self.search(&keyword);
    }

    /// Run an advanced search: store `spec`, adopt its query, re-fetch, and
    /// filter the result through it.
    pub fn advanced_search(&mut self, spec: FilterSpec) {
        tracing::debug!(
            active = spec.active_filter_count(),
            sort = %spec.sort_by,
            "Advanced search submitted"
        );
        self.query = spec.query.clone();
        self.active_filters = Some(Arc::new(spec));
        self.spawn_fetch();
    }

    /// Periodic refresh.
    ///
    /// Sidebars always refresh. Articles refresh only when no search is in
    /// effect, so a user's results are not replaced under them.
    pub fn handle_tick(&mut self) {
        // A tick queued before unmount can still be delivered.
        if !self.mounted {
            tracing::debug!("Ignoring refresh tick while unmounted");
            return;
        }

        self.spawn_sidebars();

        if self.active_filters.is_none() && self.query.trim().is_empty() {
            self.spawn_fetch();
        } else {
            tracing::debug!(
                query = %self.query,
                filtered = self.active_filters.is_some(),
                "Skipping article refresh while a search is active"
            );
        }
    }

    /// Recompute `articles` from `loaded` and `query`.
    pub(crate) fn refresh_visible(&mut self) {
        self.articles = if self.query.trim().is_empty() {
            Arc::clone(&self.loaded)
        } else {
            Arc::new(search_articles(&self.loaded, &self.query))
        };
    }

    // ========================================================================
    // Background Tasks
    // ========================================================================

    fn spawn_fetch(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
            tracing::debug!("Aborted previous article retrieval");
        }

        self.fetch_generation = self.fetch_generation.wrapping_add(1);
        let generation = self.fetch_generation;
        self.loading = true;

        let service = Arc::clone(&self.service);
        let tx = self.event_tx.clone();
        let category = self.category;
        let filters = self.active_filters.clone();
        let timeout = self.settings.request_timeout;

        tracing::debug!(generation, "Spawning article retrieval");

        self.fetch_handle = Some(tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, service.fetch_articles(category)).await
            {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout(timeout)),
            };
            let event = AppEvent::ArticlesLoaded {
                generation,
                filters,
                result,
            };
            if let Err(e) = tx.send(event).await {
                tracing::warn!(error = %e, "Failed to send articles (receiver dropped)");
            }
        }));
    }

    fn spawn_sidebars(&mut self) {
        if let Some(handle) = self.sidebar_handle.take() {
            handle.abort();
        }

        self.sidebar_generation = self.sidebar_generation.wrapping_add(1);
        let generation = self.sidebar_generation;
        self.sidebars_pending = true;

        let service = Arc::clone(&self.service);
        let tx = self.event_tx.clone();

        self.sidebar_handle = Some(tokio::spawn(async move {
            let (breaking, trending) = fetch_sidebars(service.as_ref()).await;
            let event = AppEvent::SidebarsLoaded {
                generation,
                breaking,
                trending,
            };
            if let Err(e) = tx.send(event).await {
                tracing::warn!(error = %e, "Failed to send sidebars (receiver dropped)");
            }
        }));
    }

    // ========================================================================
    // User Actions
    // ========================================================================

    /// Save or unsave an article, notifying either way.
    pub fn toggle_saved(&mut self, article: &Article) -> SaveOutcome {
        let outcome = self.saved.toggle(&article.url);
        self.notifier.notify(save_notice(outcome));
        outcome
    }

    pub fn is_saved(&self, url: &str) -> bool {
        self.saved.contains(url)
    }

    /// Share through `native` when available, else copy the link.
    pub fn share(
        &self,
        article: &Article,
        native: Option<&dyn NativeShare>,
        clipboard: &dyn Clipboard,
    ) -> Result<ShareOutcome, ShareError> {
        match share_article(article, native, clipboard) {
            Ok(ShareOutcome::Copied) => {
                self.notifier.notify(Notice::info(
                    "Link copied",
                    "Article link copied to clipboard.",
                ));
                Ok(ShareOutcome::Copied)
            }
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                tracing::warn!(url = %article.url, error = %e, "Share failed");
                self.notifier
                    .notify(Notice::destructive("Couldn't share article", e.to_string()));
                Err(e)
            }
        }
    }

    /// Submit the auth form. A rejected form leaves the session untouched.
    pub async fn sign_in(
        &mut self,
        authenticator: &MockAuthenticator,
        form: &AuthForm,
    ) -> Result<(), AuthError> {
        match authenticator.submit(form).await {
            Ok((session, notice)) => {
                self.session = Some(session);
                self.notifier.notify(notice);
                Ok(())
            }
            Err(e) => {
                self.notifier.notify(e.notice());
                Err(e)
            }
        }
    }

    pub fn sign_out(&mut self) {
        self.session = None;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn breaking_news_by_id(&self, id: &str) -> Option<&BreakingNews> {
        self.breaking_news.iter().find(|n| n.id == id)
    }

    /// Saved articles among those shown, in feed order.
    ///
    /// An active free-text query narrows this list the same way it narrows
    /// the feed.
    pub fn saved_articles(&self) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| self.saved.contains(&a.url))
            .collect()
    }

    pub fn snapshot(&self) -> FeedSnapshot<'_> {
        let saved = self
            .saved_articles()
            .into_iter()
            .map(|a| a.url.as_str())
            .collect();
        FeedSnapshot {
            category: self.category.map(|c| c.as_str()).unwrap_or(Category::ALL),
            query: &self.query,
            active_filters: self.active_filters.as_deref(),
            error: self.error,
            articles: &self.articles,
            saved,
            breaking_news: &self.breaking_news,
            trending_topics: &self.trending_topics,
        }
    }
}

/// Notice for a save toggle.
pub fn save_notice(outcome: SaveOutcome) -> Notice {
    match outcome {
        SaveOutcome::Saved => Notice::info("Article saved", "Article added to your saved list."),
        SaveOutcome::Removed => {
            Notice::info("Article removed", "Article removed from your saved list.")
        }
    }
}

// ============================================================================
// Resource Cleanup
// ============================================================================

/// Abort in-flight tasks on drop so nothing outlives the controller.
impl Drop for App {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}
