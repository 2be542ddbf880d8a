//! NewsHub core: pure query controller, result merging and pagination state.
mod article;
mod category;
mod cursor;
mod debounce;
mod effect;
mod headline;
mod merge;
mod msg;
mod state;
mod update;
mod view_model;

pub use article::{Article, ArticleId, ResultPage};
pub use category::{Category, UnknownCategory};
pub use cursor::{Cursor, CursorTracker};
pub use debounce::{Debouncer, Millis, SEARCH_QUIET_MS};
pub use effect::{Effect, TimerKind};
pub use headline::{HeadlineRotator, HEADLINE_LIMIT, HEADLINE_PERIOD_MS};
pub use merge::{merge_page, MergeMode};
pub use msg::Msg;
pub use state::{AppState, FetchFailure, FetchOutcome, FetchTag, Phase, RequestId};
pub use update::update;
pub use view_model::{AppViewModel, ArticleCard, HeadlineView, DESCRIPTION_FALLBACK};
