//! Applying background task results to [`App`].

use crate::app::{App, AppEvent};
use crate::feed::{apply_filters, FetchError, FilterSpec};
use crate::notify::Notice;
use crate::storage::{Article, BreakingNews, TrendingTopic};
use std::sync::Arc;

/// Handle an event from a background task or the refresh timer.
pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::ArticlesLoaded {
            generation,
            filters,
            result,
        } => {
            handle_articles_loaded(app, generation, filters, result);
        }
        AppEvent::SidebarsLoaded {
            generation,
            breaking,
            trending,
        } => {
            handle_sidebars_loaded(app, generation, breaking, trending);
        }
        AppEvent::Tick => {
            tracing::debug!("Refresh tick");
            app.handle_tick();
        }
    }
}

fn handle_articles_loaded(
    app: &mut App,
    generation: u64,
    filters: Option<Arc<FilterSpec>>,
    result: Result<Vec<Article>, FetchError>,
) {
    // Last request wins: anything older than the latest spawn is dropped.
    if generation != app.fetch_generation {
        tracing::debug!(
            expected = app.fetch_generation,
            got = generation,
            "Ignoring stale article retrieval (generation mismatch)"
        );
        return;
    }

    app.fetch_handle = None;
    app.loading = false;

    match result {
        Ok(articles) => {
            let fetched = articles.len();
            let articles = match filters.as_deref() {
                Some(spec) => apply_filters(&articles, spec),
                None => articles,
            };
            tracing::debug!(fetched, kept = articles.len(), "Articles loaded");
            app.error = false;
            app.loaded = Arc::new(articles);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Article retrieval failed, showing fallback");
            app.error = true;
            app.loaded = Arc::clone(&app.fallback);
            app.notifier.notify(Notice::info(
                "Showing offline headlines",
                "Couldn't reach the news service. Showing sample headlines instead.",
            ));
        }
    }

    app.refresh_visible();
}

fn handle_sidebars_loaded(
    app: &mut App,
    generation: u64,
    breaking: Result<Vec<BreakingNews>, FetchError>,
    trending: Result<Vec<TrendingTopic>, FetchError>,
) {
    if generation != app.sidebar_generation {
        tracing::debug!(
            expected = app.sidebar_generation,
            got = generation,
            "Ignoring stale sidebar retrieval (generation mismatch)"
        );
        return;
    }

    app.sidebar_handle = None;
    app.sidebars_pending = false;

    // A failed half keeps whatever was shown before.
    match breaking {
        Ok(items) => app.breaking_news = Arc::new(items),
        Err(e) => tracing::warn!(error = %e, "Breaking news retrieval failed"),
    }
    match trending {
        Ok(items) => app.trending_topics = Arc::new(items),
        Err(e) => tracing::warn!(error = %e, "Trending topics retrieval failed"),
    }
}
