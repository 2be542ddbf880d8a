//! NewsHub engine: upstream news client, timers and effect execution.
mod engine;
mod fetch;
mod payload;
mod timers;
mod types;

pub use engine::{EngineEvents, EngineHandle};
pub use fetch::{NewsSource, PageRequest, ReqwestNewsSource, SourceSettings, DEFAULT_BASE_URL};
pub use payload::{decode_page, PayloadError};
pub use timers::TimerSet;
pub use types::{EngineEvent, FailureKind, FetchError};
