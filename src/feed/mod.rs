//! Article retrieval and the filter/sort pipeline.
//!
//! - [`service`] - the [`NewsService`] abstraction and its simulated
//!   implementation with configurable latency
//! - [`filter`] - [`FilterSpec`] and the pure [`apply_filters`] pipeline
//! - [`categories`] - metadata for the category bar
//!
//! # Example
//!
//! ```ignore
//! use headline::feed::{apply_filters, FilterSpec, Latency, NewsService, SimulatedNewsService, SortBy};
//!
//! let service = SimulatedNewsService::bundled(Latency::default());
//! let articles = service.fetch_articles(None).await?;
//! let spec = FilterSpec { sort_by: SortBy::Date, ..FilterSpec::default() };
//! let newest_first = apply_filters(&articles, &spec);
//! ```

mod categories;
mod filter;
mod service;

pub use categories::{category_info, CategoryInfo, CATEGORIES};
pub use filter::{
    apply_filters, parse_reading_time, search_articles, sort_articles, DateRange, FilterError,
    FilterSpec, SentimentFilter, SortBy,
};
pub use service::{fetch_sidebars, FetchError, Latency, NewsService, SimulatedNewsService};
