use std::fmt;

use newshub_core::{FetchFailure, FetchTag, ResultPage, TimerKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        tag: FetchTag,
        result: Result<ResultPage, FetchError>,
    },
    HeadlinesFetched {
        result: Result<ResultPage, FetchError>,
    },
    TimerFired {
        timer: TimerKind,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Collapse into the two recovery classes the controller distinguishes.
    pub fn to_failure(&self) -> FetchFailure {
        match self.kind {
            FailureKind::Malformed => FetchFailure::Malformed(self.message.clone()),
            _ => FetchFailure::Transport(self.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    Malformed,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Malformed => write!(f, "malformed payload"),
        }
    }
}
