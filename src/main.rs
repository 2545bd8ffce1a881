use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use headline::app::{App, AppEvent, Settings};
use headline::config::Config;
use headline::feed::{
    parse_reading_time, DateRange, FilterSpec, NewsService, SentimentFilter,
    SimulatedNewsService, SortBy,
};
use headline::notify::LogNotifier;
use headline::share::StdoutClipboard;
use headline::storage::Category;
use headline::ui;

/// Channel capacity for background task events.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Get the config directory path (~/.config/headline/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("headline"))
}

#[derive(Parser, Debug)]
#[command(name = "headline", about = "News feed with search and advanced filters")]
struct Args {
    /// Category to browse: all, technology, business, sports, health,
    /// entertainment, politics
    #[arg(long)]
    category: Option<String>,

    /// Free-text search over title, description, and source
    #[arg(long)]
    query: Option<String>,

    /// Restrict an advanced search to these categories (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "CATEGORY")]
    categories: Vec<String>,

    /// Sort order: relevance, date, popularity, credibility
    #[arg(long)]
    sort: Option<SortBy>,

    /// Sentiment filter: all, positive, negative, neutral
    #[arg(long)]
    sentiment: Option<SentimentFilter>,

    /// Minimum credibility score (0-100)
    #[arg(long, value_name = "SCORE")]
    min_credibility: Option<u32>,

    /// Reading time bounds in minutes, e.g. 2-10
    #[arg(long, value_name = "MIN-MAX", value_parser = parse_reading_time)]
    reading_time: Option<(u32, u32)>,

    /// Only articles with an image
    #[arg(long)]
    has_image: bool,

    /// Date range: today, week, month, year, all
    #[arg(long)]
    date_range: Option<DateRange>,

    /// Copy the link of the Nth listed article (1-based) instead of listing
    #[arg(long, value_name = "N")]
    share: Option<usize>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Keep running and reprint on every refresh
    #[arg(long)]
    watch: bool,

    /// Text output width in columns
    #[arg(long, default_value_t = 100)]
    width: usize,

    /// Config file (default: ~/.config/headline/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Args {
    fn is_advanced(&self) -> bool {
        !self.categories.is_empty()
            || self.sort.is_some()
            || self.sentiment.is_some()
            || self.min_credibility.is_some()
            || self.reading_time.is_some()
            || self.has_image
            || self.date_range.is_some()
    }

    fn filter_spec(&self) -> Result<FilterSpec> {
        let mut spec = FilterSpec {
            query: self.query.clone().unwrap_or_default(),
            categories: self
                .categories
                .iter()
                .map(|c| c.parse::<Category>())
                .collect::<Result<_, _>>()?,
            has_image: self.has_image,
            ..FilterSpec::default()
        };
        if let Some(sort) = self.sort {
            spec.sort_by = sort;
        }
        if let Some(sentiment) = self.sentiment {
            spec.sentiment = sentiment;
        }
        if let Some(range) = self.date_range {
            spec.date_range = range;
        }
        if let Some(bounds) = self.reading_time {
            spec.reading_time = bounds;
        }
        if let Some(score) = self.min_credibility {
            spec = spec.with_min_credibility(score)?;
        }
        Ok(spec)
    }
}

fn print_feed(app: &App, json: bool, width: usize) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        ui::write_json(&mut out, app)?;
    } else {
        ui::write_text(&mut out, app, Utc::now(), width)?;
    }
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the feed.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    tracing::debug!(?config, "Configuration");

    if config.resolved_api_key().is_some() {
        tracing::info!(
            base_url = %config.api_base_url,
            "API key configured; live provider not enabled, using bundled headlines"
        );
    }

    let selection = match &args.category {
        Some(raw) => Category::parse_selection(raw)?,
        None => config.default_selection()?,
    };
    // Validate advanced options before any work starts.
    let spec = if args.is_advanced() {
        Some(args.filter_spec()?)
    } else {
        None
    };

    let mut settings = Settings::from(&config);
    if !args.watch {
        settings.refresh_interval = None;
    }

    let service: Arc<dyn NewsService> =
        Arc::new(SimulatedNewsService::bundled(config.latency.to_latency()));
    let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(EVENT_CHANNEL_CAPACITY);
    let mut app = App::new(service, Arc::new(LogNotifier), settings, event_tx)
        .with_category(selection);

    app.mount();
    ui::run_until_idle(&mut app, &mut event_rx).await?;

    match spec {
        Some(spec) => {
            app.advanced_search(spec);
            ui::run_until_idle(&mut app, &mut event_rx).await?;
        }
        None => {
            if let Some(query) = args.query.as_deref() {
                app.search(query);
                ui::run_until_idle(&mut app, &mut event_rx).await?;
            }
        }
    }

    if let Some(n) = args.share {
        let article = n
            .checked_sub(1)
            .and_then(|i| app.articles.get(i))
            .with_context(|| format!("No article #{} in a feed of {}", n, app.articles.len()))?;
        app.share(article, None, &StdoutClipboard)?;
        app.unmount();
        return Ok(());
    }

    print_feed(&app, args.json, args.width)?;

    if args.watch {
        let (json, width) = (args.json, args.width);
        ui::run(&mut app, event_rx, |app| print_feed(app, json, width)).await?;
    } else {
        app.unmount();
    }

    Ok(())
}
