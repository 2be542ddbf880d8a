use std::collections::HashSet;

use crate::{Article, ArticleId};

/// How a fetched page relates to the articles already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// No cursor was sent: the page replaces history.
    Fresh,
    /// A cursor was sent: the page is appended after history.
    Continuation,
}

/// Combine `accumulated` with a newly fetched `page`.
///
/// Identifiers are unique in the result and the first occurrence wins, so upstream
/// repeats across pages (or within one page) never produce duplicate rows.
pub fn merge_page(accumulated: Vec<Article>, page: Vec<Article>, mode: MergeMode) -> Vec<Article> {
    let mut merged = match mode {
        MergeMode::Fresh => Vec::with_capacity(page.len()),
        MergeMode::Continuation => accumulated,
    };
    let mut seen: HashSet<ArticleId> = merged.iter().map(|article| article.id.clone()).collect();
    merged.reserve(page.len());
    merged.extend(
        page.into_iter()
            .filter(|article| seen.insert(article.id.clone())),
    );
    merged
}
