use serde::Serialize;

use crate::storage::{Category, CategoryParseError};

/// Display metadata for one entry in the category bar.
///
/// `icon` is an opaque identifier; resolving it to an actual glyph or asset is
/// left to whatever renders the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    /// `"all"` or a [`Category`] name.
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    /// Nominal article count shown as a badge.
    pub count: u32,
}

impl CategoryInfo {
    /// The selection this entry stands for (`None` for "all").
    pub fn selection(&self) -> Result<Option<Category>, CategoryParseError> {
        Category::parse_selection(self.id)
    }
}

/// Category bar entries, in display order.
pub const CATEGORIES: [CategoryInfo; 7] = [
    CategoryInfo {
        id: Category::ALL,
        name: "All News",
        icon: "globe",
        count: 142,
    },
    CategoryInfo {
        id: "technology",
        name: "Technology",
        icon: "laptop",
        count: 28,
    },
    CategoryInfo {
        id: "business",
        name: "Business",
        icon: "trending-up",
        count: 34,
    },
    CategoryInfo {
        id: "sports",
        name: "Sports",
        icon: "trophy",
        count: 19,
    },
    CategoryInfo {
        id: "health",
        name: "Health",
        icon: "heart",
        count: 15,
    },
    CategoryInfo {
        id: "entertainment",
        name: "Entertainment",
        icon: "clapperboard",
        count: 22,
    },
    CategoryInfo {
        id: "politics",
        name: "Politics",
        icon: "vote",
        count: 24,
    },
];

/// Look up the bar entry for a selection.
pub fn category_info(selection: Option<Category>) -> &'static CategoryInfo {
    let id = selection.map(|c| c.as_str()).unwrap_or(Category::ALL);
    CATEGORIES
        .iter()
        .find(|info| info.id == id)
        .unwrap_or(&CATEGORIES[0])
}
