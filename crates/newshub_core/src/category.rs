use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The fixed set of upstream category identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Top,
    Business,
    Technology,
    Sports,
    Health,
    Entertainment,
    Science,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category {0:?}")]
pub struct UnknownCategory(pub String);

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 7] = [
        Category::Top,
        Category::Business,
        Category::Technology,
        Category::Sports,
        Category::Health,
        Category::Entertainment,
        Category::Science,
    ];

    /// Identifier sent upstream as the `category` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Sports => "sports",
            Category::Health => "health",
            Category::Entertainment => "entertainment",
            Category::Science => "science",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Top => "Top",
            Category::Business => "Business",
            Category::Technology => "Tech",
            Category::Sports => "Sports",
            Category::Health => "Health",
            Category::Entertainment => "Entertainment",
            Category::Science => "Science",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Top => "🔥",
            Category::Business => "💼",
            Category::Technology => "💻",
            Category::Sports => "⚽",
            Category::Health => "🏥",
            Category::Entertainment => "🎬",
            Category::Science => "🔬",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
