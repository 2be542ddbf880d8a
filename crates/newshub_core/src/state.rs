use std::fmt;

use crate::merge::{merge_page, MergeMode};
use crate::view_model::{AppViewModel, ArticleCard, HeadlineView, DESCRIPTION_FALLBACK};
use crate::{Article, Category, Cursor, CursorTracker, Debouncer, HeadlineRotator, ResultPage};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Fetching,
    Error,
}

/// Query parameters a page fetch was issued with.
///
/// A completion is applied only while its tag is still the in-flight one; anything
/// else belongs to a superseded query and is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTag {
    pub request_id: RequestId,
    pub category: Category,
    pub search: String,
    pub cursor: Option<Cursor>,
}

impl FetchTag {
    pub fn mode(&self) -> MergeMode {
        if self.cursor.is_some() {
            MergeMode::Continuation
        } else {
            MergeMode::Fresh
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Network error, timeout or non-success status.
    Transport(String),
    /// Response without a well-formed `results` array.
    Malformed(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Transport(message) => write!(f, "transport failure: {message}"),
            FetchFailure::Malformed(message) => write!(f, "malformed payload: {message}"),
        }
    }
}

pub type FetchOutcome = Result<ResultPage, FetchFailure>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    category: Category,
    search_text: String,
    debounced_search: String,
    articles: Vec<Article>,
    cursor: CursorTracker,
    phase: Phase,
    in_flight: Option<FetchTag>,
    next_request_id: RequestId,
    debouncer: Debouncer,
    headlines: HeadlineRotator,
    rotation_started: bool,
    last_failure: Option<FetchFailure>,
    torn_down: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(category: Category) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let loading = self.is_loading();
        AppViewModel {
            category: self.category,
            search_text: self.search_text.clone(),
            articles: self.articles.iter().map(article_card).collect(),
            has_more: self.cursor.has_more(),
            next_cursor: self.cursor.current().cloned(),
            loading,
            phase: self.phase,
            show_skeleton: loading && self.articles.is_empty(),
            headline: self.headlines.current().map(|article| HeadlineView {
                title: article.title.clone(),
                link: article.link.clone(),
                position: self.headlines.index() + 1,
                total: self.headlines.len(),
            }),
            last_failure: self.last_failure.as_ref().map(ToString::to_string),
            dirty: self.dirty,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn debounced_search(&self) -> &str {
        &self.debounced_search
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.current()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Fetching
    }

    pub fn in_flight(&self) -> Option<&FetchTag> {
        self.in_flight.as_ref()
    }

    pub fn headlines(&self) -> &HeadlineRotator {
        &self.headlines
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_category(&mut self, category: Category) {
        self.category = category;
        self.mark_dirty();
    }

    pub(crate) fn set_search_text(&mut self, text: String) {
        self.search_text = text;
        self.mark_dirty();
    }

    pub(crate) fn set_debounced_search(&mut self, text: String) {
        self.debounced_search = text;
    }

    pub(crate) fn debouncer_mut(&mut self) -> &mut Debouncer {
        &mut self.debouncer
    }

    /// Clears history and cursor, then issues a first-page fetch.
    pub(crate) fn begin_fresh_query(&mut self) -> FetchTag {
        self.articles.clear();
        self.cursor.reset();
        self.issue(None)
    }

    pub(crate) fn begin_continuation(&mut self, cursor: Cursor) -> FetchTag {
        self.issue(Some(cursor))
    }

    fn issue(&mut self, cursor: Option<Cursor>) -> FetchTag {
        self.next_request_id += 1;
        let tag = FetchTag {
            request_id: self.next_request_id,
            category: self.category,
            search: self.debounced_search.clone(),
            cursor,
        };
        self.in_flight = Some(tag.clone());
        self.phase = Phase::Fetching;
        self.mark_dirty();
        tag
    }

    pub(crate) fn is_current(&self, tag: &FetchTag) -> bool {
        self.phase == Phase::Fetching && self.in_flight.as_ref() == Some(tag)
    }

    pub(crate) fn apply_page(&mut self, tag: &FetchTag, page: ResultPage) {
        let previous = std::mem::take(&mut self.articles);
        self.articles = merge_page(previous, page.articles, tag.mode());
        self.cursor.record(page.next_cursor);
        self.finish(Phase::Idle);
        self.last_failure = None;
    }

    /// Recovers from a failed fetch as if an empty page had arrived.
    ///
    /// A malformed payload also drops the cursor; a transport failure keeps it so
    /// the same continuation can be requested again.
    pub(crate) fn apply_failure(&mut self, tag: &FetchTag, failure: FetchFailure) {
        let previous = std::mem::take(&mut self.articles);
        self.articles = merge_page(previous, Vec::new(), tag.mode());
        if matches!(failure, FetchFailure::Malformed(_)) {
            self.cursor.reset();
        }
        self.last_failure = Some(failure);
        self.finish(Phase::Error);
    }

    fn finish(&mut self, phase: Phase) {
        self.in_flight = None;
        self.phase = phase;
        self.mark_dirty();
    }

    /// Returns true the first time headlines become available, i.e. when the
    /// rotation timer has to be started.
    pub(crate) fn load_headlines(&mut self, articles: Vec<Article>) -> bool {
        let has_headlines = self.headlines.load(articles);
        self.mark_dirty();
        if has_headlines && !self.rotation_started {
            self.rotation_started = true;
            true
        } else {
            false
        }
    }

    pub(crate) fn rotate_headline(&mut self) {
        if !self.headlines.is_empty() {
            self.headlines.rotate();
            self.mark_dirty();
        }
    }

    pub(crate) fn tear_down(&mut self) {
        self.torn_down = true;
        self.debouncer.cancel();
        self.in_flight = None;
        self.phase = Phase::Idle;
    }
}

fn article_card(article: &Article) -> ArticleCard {
    ArticleCard {
        id: article.id.clone(),
        title: article.title.clone(),
        summary: article
            .description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(DESCRIPTION_FALLBACK)
            .to_string(),
        image_url: article.image_url.clone(),
        link: article.link.clone(),
    }
}
