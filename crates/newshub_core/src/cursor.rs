use std::fmt;

/// Opaque continuation token handed out by the upstream source.
///
/// The contents are never interpreted; the token is passed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    /// Wraps a raw token. Empty tokens mean "no more pages" and yield `None`.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Holds the cursor returned with the most recent page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CursorTracker {
    current: Option<Cursor>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_more(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Cursor> {
        self.current.as_ref()
    }

    /// Replace the stored cursor with the one returned alongside the latest page.
    pub fn record(&mut self, next: Option<Cursor>) {
        self.current = next;
    }

    /// Forget the cursor; called before a fresh query so stale tokens are never reused.
    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn matches(&self, cursor: &Cursor) -> bool {
        self.current.as_ref() == Some(cursor)
    }
}
