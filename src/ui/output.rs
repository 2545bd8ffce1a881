//! Plain-text and JSON rendering of the feed.

use crate::app::App;
use crate::feed::category_info;
use crate::storage::{Article, BreakingNews, TrendingTopic};
use crate::util::{compact_count, single_line, time_ago, truncate_to_width, CredibilityTier};
use chrono::{DateTime, Utc};
use std::io::{self, Write};

/// Minimum width the text layout degrades to.
const MIN_WIDTH: usize = 40;

pub const EMPTY_FEED_MESSAGE: &str =
    "No articles found. Try adjusting your search or category filters.";

/// Write the feed as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, app: &App) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &app.snapshot())?;
    writeln!(out)?;
    Ok(())
}

/// Write the feed as text, `width` columns wide.
pub fn write_text<W: Write>(
    out: &mut W,
    app: &App,
    now: DateTime<Utc>,
    width: usize,
) -> io::Result<()> {
    let width = width.max(MIN_WIDTH);

    write_header(out, app)?;

    if !app.breaking_news.is_empty() {
        writeln!(out)?;
        writeln!(out, "BREAKING")?;
        for item in app.breaking_news.iter() {
            writeln!(out, "{}", breaking_line(item, now, width))?;
        }
    }

    writeln!(out)?;
    if app.articles.is_empty() {
        writeln!(out, "{}", EMPTY_FEED_MESSAGE)?;
    } else {
        for (i, article) in app.articles.iter().enumerate() {
            write_article(out, i + 1, article, app.is_saved(&article.url), now, width)?;
        }
    }

    if !app.trending_topics.is_empty() {
        writeln!(out)?;
        writeln!(out, "TRENDING")?;
        for topic in app.trending_topics.iter() {
            writeln!(out, "{}", trending_line(topic))?;
        }
    }

    Ok(())
}

fn write_header<W: Write>(out: &mut W, app: &App) -> io::Result<()> {
    let info = category_info(app.category);
    write!(out, "{} ({} articles)", info.name, app.articles.len())?;

    if !app.query.trim().is_empty() {
        write!(out, "  search: \"{}\"", single_line(app.query.trim()))?;
    }
    if let Some(spec) = app.active_filters.as_deref() {
        let count = spec.active_filter_count();
        if count > 0 {
            write!(out, "  [{} filter{}]", count, if count == 1 { "" } else { "s" })?;
        }
    }
    if app.error {
        write!(out, "  (offline headlines)")?;
    }
    writeln!(out)
}

fn write_article<W: Write>(
    out: &mut W,
    index: usize,
    article: &Article,
    saved: bool,
    now: DateTime<Utc>,
    width: usize,
) -> io::Result<()> {
    let marker = if saved { "*" } else { " " };
    let prefix = format!("{}{:>3}. ", marker, index);
    let title = single_line(&article.title);
    writeln!(
        out,
        "{}{}",
        prefix,
        truncate_to_width(&title, width.saturating_sub(prefix.len()))
    )?;

    let indent = " ".repeat(prefix.len());
    let mut meta = format!(
        "{} | {} | {} | {} min read",
        single_line(&article.source),
        article.category,
        time_ago(article.published_at, now),
        article.reading_time_or_default(),
    );
    let tier = CredibilityTier::from_score(article.credibility_score);
    if tier != CredibilityTier::Unknown {
        meta.push_str(&format!(" | {} credibility", tier.label()));
    }
    if article.social_shares.is_some() {
        meta.push_str(&format!(" | {} shares", compact_count(article.social_shares)));
    }
    writeln!(
        out,
        "{}{}",
        indent,
        truncate_to_width(&meta, width.saturating_sub(indent.len()))
    )?;

    if let Some(description) = article.description.as_deref() {
        let description = single_line(description);
        if !description.trim().is_empty() {
            writeln!(
                out,
                "{}{}",
                indent,
                truncate_to_width(description.trim(), width.saturating_sub(indent.len()))
            )?;
        }
    }
    Ok(())
}

fn breaking_line(item: &BreakingNews, now: DateTime<Utc>, width: usize) -> String {
    let line = format!(
        "[{}] {} ({})",
        item.urgency.as_str().to_uppercase(),
        single_line(&item.title),
        time_ago(item.timestamp, now)
    );
    truncate_to_width(&line, width).into_owned()
}

fn trending_line(topic: &TrendingTopic) -> String {
    format!(
        "{} {}  {} articles",
        topic.trend.arrow(),
        single_line(&topic.keyword),
        topic.article_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Category, Trend, Urgency};

    #[test]
    fn test_trending_line() {
        let topic = TrendingTopic {
            keyword: "AI Regulation".to_string(),
            article_count: 45,
            sentiment: crate::storage::Sentiment::Neutral,
            trend: Trend::Up,
        };
        let line = trending_line(&topic);
        assert!(line.contains("AI Regulation"));
        assert!(line.contains("45 articles"));
        assert!(line.starts_with(Trend::Up.arrow()));
    }

    #[test]
    fn test_breaking_line_truncates() {
        let now = Utc::now();
        let item = BreakingNews {
            id: "1".to_string(),
            title: "x".repeat(200),
            urgency: Urgency::High,
            timestamp: now,
            category: Category::Politics,
        };
        let line = breaking_line(&item, now, 50);
        assert!(crate::util::display_width(&line) <= 50);
        assert!(line.ends_with("..."));
    }
}
