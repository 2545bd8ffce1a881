mod memory;
mod saved;
pub mod seed;
mod types;

pub use memory::{ArticleSource, MemoryStore};
pub use saved::{SaveOutcome, SavedArticles};
pub use types::{
    Article, BreakingNews, Category, CategoryParseError, Sentiment, Trend, TrendingTopic, Urgency,
};
