use newshub_logging::{news_debug, news_info, news_warn};

use crate::{
    AppState, Category, Effect, FetchOutcome, FetchTag, Millis, Msg, Phase, TimerKind,
    HEADLINE_PERIOD_MS,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_torn_down() {
        news_debug!("Ignoring {:?} after unmount", msg);
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Mounted => {
            let tag = state.begin_fresh_query();
            vec![Effect::FetchHeadlines, Effect::FetchPage { tag }]
        }
        Msg::Unmounted => {
            state.tear_down();
            vec![Effect::CancelTimers]
        }
        Msg::CategorySelected(category) => select_category(&mut state, category),
        Msg::CategoryRequested(raw) => match raw.parse::<Category>() {
            Ok(category) => select_category(&mut state, category),
            Err(err) => {
                news_warn!("Ignoring category request: {}", err);
                Vec::new()
            }
        },
        Msg::SearchEdited { text, now } => {
            state.set_search_text(text.clone());
            let debouncer = state.debouncer_mut();
            debouncer.edit(text, now);
            vec![Effect::ScheduleOnce {
                timer: TimerKind::SearchDebounce,
                delay_ms: debouncer.quiet_ms(),
            }]
        }
        Msg::RunQuery { category, search } => {
            state.debouncer_mut().cancel();
            state.set_category(category);
            state.set_search_text(search.clone());
            state.set_debounced_search(search);
            fresh_query(&mut state)
        }
        Msg::Refresh => fresh_query(&mut state),
        Msg::LoadMore { cursor } => {
            if state.phase() == Phase::Fetching {
                news_debug!("Load more ignored: a fetch is already in flight");
                Vec::new()
            } else if state.cursor() != Some(&cursor) {
                news_debug!("Load more ignored: cursor {} is not current", cursor);
                Vec::new()
            } else {
                let tag = state.begin_continuation(cursor);
                vec![Effect::FetchPage { tag }]
            }
        }
        Msg::TimerFired {
            timer: TimerKind::SearchDebounce,
            now,
        } => debounce_elapsed(&mut state, now),
        Msg::TimerFired {
            timer: TimerKind::HeadlineRotation,
            ..
        } => {
            state.rotate_headline();
            Vec::new()
        }
        Msg::PageFetched { tag, outcome } => {
            page_fetched(&mut state, tag, outcome);
            Vec::new()
        }
        Msg::HeadlinesFetched(outcome) => match outcome {
            Ok(page) => {
                if state.load_headlines(page.articles) {
                    vec![Effect::ScheduleEvery {
                        timer: TimerKind::HeadlineRotation,
                        period_ms: HEADLINE_PERIOD_MS,
                    }]
                } else {
                    Vec::new()
                }
            }
            Err(failure) => {
                news_warn!("Breaking headlines unavailable: {}", failure);
                Vec::new()
            }
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn select_category(state: &mut AppState, category: Category) -> Vec<Effect> {
    if state.category() == category {
        return Vec::new();
    }
    state.set_category(category);
    fresh_query(state)
}

fn fresh_query(state: &mut AppState) -> Vec<Effect> {
    if let Some(superseded) = state.in_flight() {
        news_debug!("Superseding request {}", superseded.request_id);
    }
    let tag = state.begin_fresh_query();
    news_info!(
        "Fresh query request={} category={} search={:?}",
        tag.request_id,
        tag.category,
        tag.search
    );
    vec![Effect::FetchPage { tag }]
}

fn debounce_elapsed(state: &mut AppState, now: Millis) -> Vec<Effect> {
    let released = state.debouncer_mut().poll(now);
    match released {
        Some(value) if value != state.debounced_search() => {
            state.set_debounced_search(value);
            fresh_query(state)
        }
        Some(_) => Vec::new(),
        // The timer can race a newer edit; wait for whatever is still pending.
        None => match state.debouncer_mut().due_at() {
            Some(due_at) => vec![Effect::ScheduleOnce {
                timer: TimerKind::SearchDebounce,
                delay_ms: due_at - now,
            }],
            None => Vec::new(),
        },
    }
}

fn page_fetched(state: &mut AppState, tag: FetchTag, outcome: FetchOutcome) {
    if !state.is_current(&tag) {
        news_debug!(
            "Discarding stale response request={} category={}",
            tag.request_id,
            tag.category
        );
        return;
    }
    match outcome {
        Ok(page) => {
            news_debug!(
                "Request {} returned {} articles, next cursor {:?}",
                tag.request_id,
                page.articles.len(),
                page.next_cursor
            );
            state.apply_page(&tag, page);
        }
        Err(failure) => {
            news_warn!("Request {} failed: {}", tag.request_id, failure);
            state.apply_failure(&tag, failure);
        }
    }
}
