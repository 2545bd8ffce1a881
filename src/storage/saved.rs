use std::collections::HashSet;
use std::sync::Arc;

/// Result of toggling an article's saved state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Removed,
}

/// Session-scoped set of saved article URLs.
///
/// Every mutation replaces the inner set wholesale, so a snapshot taken via
/// [`SavedArticles::snapshot`] never changes underneath its holder.
#[derive(Debug, Clone, Default)]
pub struct SavedArticles {
    urls: Arc<HashSet<String>>,
}

impl SavedArticles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the URL if absent, remove it if present.
    pub fn toggle(&mut self, url: &str) -> SaveOutcome {
        let mut next = self.urls.as_ref().clone();
        let outcome = if next.remove(url) {
            SaveOutcome::Removed
        } else {
            next.insert(url.to_string());
            SaveOutcome::Saved
        };
        self.urls = Arc::new(next);
        outcome
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn snapshot(&self) -> Arc<HashSet<String>> {
        Arc::clone(&self.urls)
    }
}
