use std::sync::{mpsc, Arc};
use std::thread;

use newshub_core::{Effect, FetchOutcome, Msg};
use newshub_engine::{EngineEvent, EngineEvents, EngineHandle, FetchError, NewsSource};
use newshub_logging::{news_debug, news_info, news_warn};

use super::app::{AppInput, Clock};

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn start(
        source: Arc<dyn NewsSource>,
        input_tx: mpsc::Sender<AppInput>,
        clock: Clock,
    ) -> std::io::Result<Self> {
        let (engine, events) = EngineHandle::start(source)?;
        spawn_event_loop(events, input_tx, clock)?;
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage { tag } => {
                    news_info!(
                        "FetchPage request={} category={} cursor={:?}",
                        tag.request_id,
                        tag.category,
                        tag.cursor
                    );
                    self.engine.fetch_page(tag);
                }
                Effect::FetchHeadlines => self.engine.fetch_headlines(),
                Effect::ScheduleOnce { timer, delay_ms } => {
                    news_debug!("ScheduleOnce {:?} in {} ms", timer, delay_ms);
                    self.engine.schedule_once(timer, delay_ms);
                }
                Effect::ScheduleEvery { timer, period_ms } => {
                    self.engine.schedule_every(timer, period_ms);
                }
                Effect::CancelTimers => self.engine.cancel_timers(),
            }
        }
    }
}

fn spawn_event_loop(
    events: EngineEvents,
    input_tx: mpsc::Sender<AppInput>,
    clock: Clock,
) -> std::io::Result<()> {
    thread::Builder::new()
        .name("newshub-events".to_string())
        .spawn(move || {
            while let Some(event) = events.recv() {
                let msg = match event {
                    EngineEvent::PageFetched { tag, result } => Msg::PageFetched {
                        tag,
                        outcome: to_outcome(result),
                    },
                    EngineEvent::HeadlinesFetched { result } => {
                        Msg::HeadlinesFetched(to_outcome(result))
                    }
                    EngineEvent::TimerFired { timer } => Msg::TimerFired {
                        timer,
                        now: clock.now(),
                    },
                };
                if input_tx.send(AppInput::Msg(msg)).is_err() {
                    break;
                }
            }
        })?;
    Ok(())
}

fn to_outcome(result: Result<newshub_core::ResultPage, FetchError>) -> FetchOutcome {
    result.map_err(|err| {
        news_warn!("Fetch failed: {}", err);
        err.to_failure()
    })
}
