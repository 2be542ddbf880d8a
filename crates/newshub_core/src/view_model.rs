use crate::{ArticleId, Category, Cursor, Phase};

/// Shown in place of a missing article description.
pub const DESCRIPTION_FALLBACK: &str = "Click to read the full article.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub category: Category,
    pub search_text: String,
    pub articles: Vec<ArticleCard>,
    pub has_more: bool,
    pub next_cursor: Option<Cursor>,
    pub loading: bool,
    pub phase: Phase,
    /// Placeholder cards should be drawn: loading with nothing to show yet.
    pub show_skeleton: bool,
    pub headline: Option<HeadlineView>,
    pub last_failure: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCard {
    pub id: ArticleId,
    pub title: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineView {
    pub title: String,
    pub link: String,
    /// 1-based position in the rotation.
    pub position: usize,
    pub total: usize,
}
