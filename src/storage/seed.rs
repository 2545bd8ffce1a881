//! Bundled headlines served when no live news provider is configured.
//!
//! Timestamps are expressed relative to a caller-supplied `now` so that the
//! data always looks fresh and tests can pin the clock.

use chrono::{DateTime, Duration, Utc};

use super::types::{
    Article, BreakingNews, Category, Sentiment, Trend, TrendingTopic, Urgency,
};

#[allow(clippy::too_many_arguments)]
fn enhanced(
    now: DateTime<Utc>,
    minutes_ago: i64,
    title: &str,
    description: &str,
    slug: &str,
    image: &str,
    source: &str,
    category: Category,
    author: &str,
    reading_time: u32,
    sentiment: Sentiment,
    credibility: u8,
    shares: u64,
    related: &[&str],
) -> Article {
    let mut article = Article::new(
        title,
        format!("https://example.com/{slug}"),
        source,
        category,
        now - Duration::minutes(minutes_ago),
    );
    article.description = Some(description.to_string());
    article.image_url = Some(format!("https://images.unsplash.com/{image}?w=600"));
    article.author = Some(author.to_string());
    article.reading_time = Some(reading_time);
    article.sentiment = Some(sentiment);
    article.credibility_score = Some(credibility);
    article.social_shares = Some(shares);
    article.related_articles = related.iter().map(|s| s.to_string()).collect();
    article
}

#[allow(clippy::too_many_arguments)]
fn plain(
    now: DateTime<Utc>,
    hours_ago: i64,
    title: &str,
    description: &str,
    slug: &str,
    image: &str,
    source: &str,
    category: Category,
    author: &str,
) -> Article {
    let mut article = Article::new(
        title,
        format!("https://example.com/{slug}"),
        source,
        category,
        now - Duration::hours(hours_ago),
    );
    article.description = Some(description.to_string());
    article.image_url = Some(format!("https://images.unsplash.com/{image}?w=400"));
    article.author = Some(author.to_string());
    article
}

/// Five richly annotated headlines. Also the fixed fallback dataset shown
/// when retrieval fails.
pub fn enhanced_articles(now: DateTime<Utc>) -> Vec<Article> {
    vec![
        enhanced(
            now,
            30,
            "OpenAI Announces Revolutionary GPT-5 with Real-Time Reasoning Capabilities",
            "The latest AI model demonstrates unprecedented reasoning abilities and real-time learning, marking a significant leap in artificial intelligence development.",
            "openai-gpt5",
            "photo-1677442136019-21780ecad995",
            "AI Weekly",
            Category::Technology,
            "Dr. Sarah Chen",
            4,
            Sentiment::Positive,
            95,
            2847,
            &["ai-breakthrough-2024", "machine-learning-trends"],
        ),
        enhanced(
            now,
            45,
            "Tesla Stock Surges 15% Following Autonomous Vehicle Fleet Approval",
            "Regulatory approval for Tesla's fully autonomous vehicle fleet sends stock prices soaring as investors anticipate revolutionary changes in transportation.",
            "tesla-autonomous",
            "photo-1560958089-b8a1929cea89",
            "Financial Herald",
            Category::Business,
            "Michael Rodriguez",
            3,
            Sentiment::Positive,
            92,
            1523,
            &["autonomous-vehicles-future", "tesla-innovations"],
        ),
        enhanced(
            now,
            120,
            "Climate Summit Reaches Historic Agreement on Carbon Neutrality",
            "World leaders unite in landmark climate agreement, setting ambitious targets for global carbon neutrality by 2035, surpassing previous commitments.",
            "climate-summit",
            "photo-1569163139394-de4e4e84d43d",
            "Global Environment Today",
            Category::Politics,
            "Dr. Elena Martinez",
            6,
            Sentiment::Positive,
            98,
            3421,
            &["climate-change-solutions", "green-energy-future"],
        ),
        enhanced(
            now,
            180,
            "Revolutionary Cancer Treatment Shows 94% Success Rate in Clinical Trials",
            "Breakthrough immunotherapy treatment demonstrates remarkable success in treating advanced-stage cancers, offering new hope for patients worldwide.",
            "cancer-breakthrough",
            "photo-1579154204601-01588f351e67",
            "Medical Breakthroughs Journal",
            Category::Health,
            "Dr. Amanda Kim",
            5,
            Sentiment::Positive,
            96,
            4567,
            &["cancer-research-2024", "immunotherapy-advances"],
        ),
        enhanced(
            now,
            240,
            "Cryptocurrency Market Experiences Major Volatility Amid Regulation News",
            "Digital currencies see significant price fluctuations following announcements of new regulatory frameworks from major economic powers.",
            "crypto-volatility",
            "photo-1621761191319-c6fb62004040",
            "Crypto Finance News",
            Category::Business,
            "Robert Chen",
            4,
            Sentiment::Neutral,
            88,
            2156,
            &["cryptocurrency-regulations", "digital-finance-trends"],
        ),
    ]
}

/// Nine plain headlines with no reading time, sentiment, or engagement data.
pub fn catalog_articles(now: DateTime<Utc>) -> Vec<Article> {
    vec![
        plain(
            now,
            2,
            "Breakthrough in Quantum Computing Achieved by Tech Giants",
            "Major technology companies announce significant advancement in quantum computing capabilities, potentially revolutionizing data processing and encryption.",
            "quantum-breakthrough",
            "photo-1635070041078-e363dbe005cb",
            "TechNews Daily",
            Category::Technology,
            "Dr. Sarah Chen",
        ),
        plain(
            now,
            4,
            "Global Markets React to Central Bank Policy Changes",
            "International stock markets show mixed reactions following central bank announcements regarding interest rate adjustments and monetary policy shifts.",
            "market-reaction",
            "photo-1611974789855-9c2a0a7236a3",
            "Financial Times",
            Category::Business,
            "Michael Rodriguez",
        ),
        plain(
            now,
            6,
            "Championship Final Draws Record Television Audience",
            "The highly anticipated championship game breaks viewership records, with millions of fans tuning in worldwide to witness the historic match.",
            "championship-record",
            "photo-1431324155629-1a6deb1dec8d",
            "Sports Network",
            Category::Sports,
            "James Wilson",
        ),
        plain(
            now,
            8,
            "New Study Reveals Surprising Health Benefits of Mediterranean Diet",
            "Researchers publish comprehensive study showing additional health benefits of Mediterranean diet beyond previously known cardiovascular advantages.",
            "mediterranean-study",
            "photo-1490645935967-10de6ba17061",
            "Health & Science Journal",
            Category::Health,
            "Dr. Elena Martinez",
        ),
        plain(
            now,
            10,
            "Blockbuster Movie Sequel Dominates Global Box Office",
            "The latest installment in the popular franchise sets new opening weekend records across international markets, exceeding industry expectations.",
            "blockbuster-sequel",
            "photo-1489599363747-d65a2fb5c1e5",
            "Entertainment Weekly",
            Category::Entertainment,
            "Lisa Thompson",
        ),
        plain(
            now,
            12,
            "Congressional Committee Announces Infrastructure Investigation",
            "Bipartisan committee launches comprehensive investigation into national infrastructure spending and efficiency across multiple government departments.",
            "infrastructure-investigation",
            "photo-1563736418-62a7b3171b7c",
            "Political Tribune",
            Category::Politics,
            "Robert Anderson",
        ),
        plain(
            now,
            14,
            "AI Innovation Transforms Medical Diagnosis Accuracy",
            "Artificial intelligence systems demonstrate unprecedented accuracy in medical imaging analysis, promising to revolutionize diagnostic procedures.",
            "ai-medical-diagnosis",
            "photo-1576091160399-112ba8d25d1f",
            "Medical Innovation Today",
            Category::Technology,
            "Dr. Amanda Kim",
        ),
        plain(
            now,
            16,
            "Renewable Energy Sector Posts Record Growth Numbers",
            "Solar and wind energy industries report unprecedented growth figures for the quarter, surpassing fossil fuel investments for the first time.",
            "renewable-growth",
            "photo-1466611653911-95081537e5b7",
            "Energy Business Review",
            Category::Business,
            "Thomas Green",
        ),
        plain(
            now,
            18,
            "Olympic Training Facility Reveals Advanced Technology Integration",
            "State-of-the-art training center showcases cutting-edge technology designed to enhance athlete performance and reduce injury risk.",
            "olympic-technology",
            "photo-1571019613454-1cb2f99b2d8b",
            "Olympic News Network",
            Category::Sports,
            "Maria Garcia",
        ),
    ]
}

/// Enhanced headlines followed by the catalog: the default article store.
pub fn default_articles(now: DateTime<Utc>) -> Vec<Article> {
    let mut articles = enhanced_articles(now);
    articles.extend(catalog_articles(now));
    articles
}

pub fn breaking_news(now: DateTime<Utc>) -> Vec<BreakingNews> {
    vec![
        BreakingNews {
            id: "1".to_string(),
            title: "BREAKING: Major Tech Companies Form AI Safety Alliance".to_string(),
            urgency: Urgency::High,
            timestamp: now - Duration::minutes(10),
            category: Category::Technology,
        },
        BreakingNews {
            id: "2".to_string(),
            title: "Global Markets Open Higher Following Economic Data Release".to_string(),
            urgency: Urgency::Medium,
            timestamp: now - Duration::minutes(25),
            category: Category::Business,
        },
    ]
}

pub fn trending_topics() -> Vec<TrendingTopic> {
    [
        ("Artificial Intelligence", 156, Sentiment::Positive, Trend::Up),
        ("Climate Change", 134, Sentiment::Neutral, Trend::Up),
        ("Cryptocurrency", 98, Sentiment::Neutral, Trend::Down),
        ("Space Exploration", 87, Sentiment::Positive, Trend::Up),
        ("Renewable Energy", 76, Sentiment::Positive, Trend::Stable),
        ("Electric Vehicles", 65, Sentiment::Positive, Trend::Up),
    ]
    .into_iter()
    .map(|(keyword, article_count, sentiment, trend)| TrendingTopic {
        keyword: keyword.to_string(),
        article_count,
        sentiment,
        trend,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_articles_have_unique_urls() {
        let articles = default_articles(Utc::now());
        let urls: HashSet<_> = articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls.len(), articles.len());
        assert_eq!(articles.len(), 14);
    }

    #[test]
    fn test_enhanced_articles_fully_annotated() {
        for article in enhanced_articles(Utc::now()) {
            assert!(article.credibility_score.is_some(), "{}", article.title);
            assert!(article.reading_time.is_some(), "{}", article.title);
            assert!(article.sentiment.is_some(), "{}", article.title);
            assert!(article.social_shares.is_some(), "{}", article.title);
        }
    }

    #[test]
    fn test_timestamps_relative_to_now() {
        let now = Utc::now();
        let articles = enhanced_articles(now);
        assert_eq!(articles[0].published_at, now - Duration::minutes(30));
        let news = breaking_news(now);
        assert_eq!(news[1].timestamp, now - Duration::minutes(25));
    }

    #[test]
    fn test_trending_topics_sorted_by_count() {
        let topics = trending_topics();
        assert_eq!(topics.len(), 6);
        assert!(topics
            .windows(2)
            .all(|w| w[0].article_count >= w[1].article_count));
    }
}
