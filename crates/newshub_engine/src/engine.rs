use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use newshub_core::{FetchTag, Millis, TimerKind};
use newshub_logging::{news_debug, news_info};

use crate::fetch::{NewsSource, PageRequest};
use crate::timers::TimerSet;
use crate::EngineEvent;

enum EngineCommand {
    FetchPage { tag: FetchTag },
    FetchHeadlines,
    ScheduleOnce { timer: TimerKind, delay: Duration },
    ScheduleEvery { timer: TimerKind, period: Duration },
    CancelTimers,
}

/// Command side of the engine. Cheap to clone; the engine thread exits once
/// every handle is dropped.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Event side of the engine: fetch completions and timer expirations.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    /// Starts the engine thread with its own tokio runtime.
    pub fn start(source: Arc<dyn NewsSource>) -> io::Result<(Self, EngineEvents)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("newshub-io")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("newshub-engine".to_string())
            .spawn(move || {
                let mut timers = TimerSet::new(runtime.handle().clone(), event_tx.clone());
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::ScheduleOnce { timer, delay } => {
                            timers.schedule_once(timer, delay)
                        }
                        EngineCommand::ScheduleEvery { timer, period } => {
                            timers.schedule_every(timer, period)
                        }
                        EngineCommand::CancelTimers => timers.cancel_all(),
                        command => {
                            let source = source.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                handle_fetch(source.as_ref(), command, event_tx).await;
                            });
                        }
                    }
                }
                drop(timers);
                runtime.shutdown_background();
                news_info!("Engine stopped");
            })?;

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn fetch_page(&self, tag: FetchTag) {
        self.send(EngineCommand::FetchPage { tag });
    }

    pub fn fetch_headlines(&self) {
        self.send(EngineCommand::FetchHeadlines);
    }

    pub fn schedule_once(&self, timer: TimerKind, delay_ms: Millis) {
        self.send(EngineCommand::ScheduleOnce {
            timer,
            delay: Duration::from_millis(delay_ms),
        });
    }

    pub fn schedule_every(&self, timer: TimerKind, period_ms: Millis) {
        self.send(EngineCommand::ScheduleEvery {
            timer,
            period: Duration::from_millis(period_ms),
        });
    }

    pub fn cancel_timers(&self) {
        self.send(EngineCommand::CancelTimers);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            news_debug!("Engine thread is gone; command dropped");
        }
    }
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Blocks until the next event; `None` once the engine has stopped.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

async fn handle_fetch(
    source: &dyn NewsSource,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchPage { tag } => {
            let result = source.fetch_page(&PageRequest::from(&tag)).await;
            EngineEvent::PageFetched { tag, result }
        }
        EngineCommand::FetchHeadlines => {
            let result = source.fetch_page(&PageRequest::headlines()).await;
            EngineEvent::HeadlinesFetched { result }
        }
        EngineCommand::ScheduleOnce { .. }
        | EngineCommand::ScheduleEvery { .. }
        | EngineCommand::CancelTimers => return,
    };
    let _ = event_tx.send(event);
}
