use std::collections::HashMap;
use std::sync::mpsc;
use std::time::Duration;

use newshub_core::TimerKind;
use newshub_logging::news_trace;
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::EngineEvent;

/// Cancellable scheduled callbacks, at most one per [`TimerKind`].
///
/// Scheduling a kind that is already active cancels the old task first. Every
/// task is cancelled when the set is dropped.
pub struct TimerSet {
    handle: Handle,
    events: mpsc::Sender<EngineEvent>,
    active: HashMap<TimerKind, CancellationToken>,
}

impl TimerSet {
    pub fn new(handle: Handle, events: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            handle,
            events,
            active: HashMap::new(),
        }
    }

    pub fn schedule_once(&mut self, timer: TimerKind, delay: Duration) {
        let token = self.replace(timer);
        let events = self.events.clone();
        self.handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = events.send(EngineEvent::TimerFired { timer });
                }
            }
        });
    }

    pub fn schedule_every(&mut self, timer: TimerKind, period: Duration) {
        let token = self.replace(timer);
        let events = self.events.clone();
        self.handle.spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticks.tick() => {
                        if events.send(EngineEvent::TimerFired { timer }).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }

    pub fn cancel(&mut self, timer: TimerKind) {
        if let Some(token) = self.active.remove(&timer) {
            token.cancel();
        }
    }

    pub fn cancel_all(&mut self) {
        for (timer, token) in self.active.drain() {
            news_trace!("Cancelling timer {:?}", timer);
            token.cancel();
        }
    }

    pub fn is_scheduled(&self, timer: TimerKind) -> bool {
        self.active
            .get(&timer)
            .is_some_and(|token| !token.is_cancelled())
    }

    fn replace(&mut self, timer: TimerKind) -> CancellationToken {
        self.cancel(timer);
        let token = CancellationToken::new();
        self.active.insert(timer, token.clone());
        token
    }
}

impl Drop for TimerSet {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
