//! Quiet-period debouncing over a logical millisecond clock.
//!
//! Each edit cancels the previous deadline and schedules a new one; the value is
//! released once a poll observes a time at or past the latest deadline.

/// Milliseconds on the driver's monotonic clock.
pub type Millis = u64;

/// Quiet period after the last search keystroke.
pub const SEARCH_QUIET_MS: Millis = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    value: String,
    due_at: Millis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    quiet_ms: Millis,
    pending: Option<Pending>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_QUIET_MS)
    }
}

impl Debouncer {
    pub fn new(quiet_ms: Millis) -> Self {
        Self {
            quiet_ms,
            pending: None,
        }
    }

    pub fn quiet_ms(&self) -> Millis {
        self.quiet_ms
    }

    /// Record an edit at `now`, replacing any pending value. Returns the new deadline.
    pub fn edit(&mut self, value: impl Into<String>, now: Millis) -> Millis {
        let due_at = now.saturating_add(self.quiet_ms);
        self.pending = Some(Pending {
            value: value.into(),
            due_at,
        });
        due_at
    }

    /// Release the pending value if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Millis) -> Option<String> {
        match &self.pending {
            Some(pending) if pending.due_at <= now => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    pub fn due_at(&self) -> Option<Millis> {
        self.pending.as_ref().map(|p| p.due_at)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keystroke_burst_fires_once_with_final_value() {
        let edits = [(0, "b"), (100, "bi"), (200, "bit"), (600, "bitcoin")];
        let mut debouncer = Debouncer::default();
        let mut fired = Vec::new();

        for now in 0..=2_000 {
            if let Some((_, text)) = edits.iter().find(|(at, _)| *at == now) {
                debouncer.edit(*text, now);
            }
            if let Some(value) = debouncer.poll(now) {
                fired.push((now, value));
            }
        }

        assert_eq!(fired, vec![(1_100, "bitcoin".to_string())]);
    }

    #[test]
    fn poll_before_deadline_keeps_value() {
        let mut debouncer = Debouncer::new(500);
        assert_eq!(debouncer.edit("rust", 10), 510);
        assert_eq!(debouncer.poll(509), None);
        assert_eq!(debouncer.due_at(), Some(510));
        assert_eq!(debouncer.poll(510), Some("rust".to_string()));
        assert_eq!(debouncer.poll(2_000), None);
    }

    #[test]
    fn cancel_drops_pending_value() {
        let mut debouncer = Debouncer::default();
        debouncer.edit("x", 0);
        debouncer.cancel();
        assert_eq!(debouncer.poll(10_000), None);
    }
}
