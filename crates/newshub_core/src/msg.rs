use crate::{Category, Cursor, FetchOutcome, FetchTag, Millis, TimerKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The view became visible: start the first query and the headline fetch.
    Mounted,
    /// The view is going away: cancel timers and ignore everything afterwards.
    Unmounted,
    /// User picked a category.
    CategorySelected(Category),
    /// Category requested by identifier, e.g. from a deep link.
    CategoryRequested(String),
    /// User edited the search box (raw, not yet debounced).
    SearchEdited { text: String, now: Millis },
    /// Run a fresh query immediately, bypassing the debounce.
    RunQuery { category: Category, search: String },
    /// Re-run the current query from the first page.
    Refresh,
    /// User asked for the page behind `cursor`.
    LoadMore { cursor: Cursor },
    /// A scheduled timer elapsed.
    TimerFired { timer: TimerKind, now: Millis },
    /// Completion of an `Effect::FetchPage`.
    PageFetched { tag: FetchTag, outcome: FetchOutcome },
    /// Completion of an `Effect::FetchHeadlines`.
    HeadlinesFetched(FetchOutcome),
    /// Fallback for placeholder wiring.
    NoOp,
}
