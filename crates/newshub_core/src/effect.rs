use crate::{FetchTag, Millis};

/// Scheduled callbacks owned by the view; all of them are cancelled on unmount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    SearchDebounce,
    HeadlineRotation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one page; the tag must come back unchanged with the result.
    FetchPage { tag: FetchTag },
    /// Fetch the breaking headlines (`top`, no search, first page).
    FetchHeadlines,
    /// Single-shot timer. Re-scheduling the same kind cancels the previous one.
    ScheduleOnce { timer: TimerKind, delay_ms: Millis },
    /// Repeating timer.
    ScheduleEvery { timer: TimerKind, period_ms: Millis },
    CancelTimers,
}
