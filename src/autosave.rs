//! Debounced autosave.
//!
//! At most one autosave is pending. Scheduling again inside the quiet window
//! replaces the pending draft and restarts the window, so only the latest
//! draft is ever written.

use crate::draft::Draft;

/// Quiet window before a scheduled draft is written.
pub const AUTOSAVE_DELAY_MS: u64 = 2_000;

#[derive(Debug, Clone)]
pub struct AutosaveTimer {
    delay_ms: u64,
    pending: Option<(Draft, u64)>,
}

impl AutosaveTimer {
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Cancel any pending draft and schedule `draft` from `now_ms`.
    pub fn schedule(&mut self, draft: Draft, now_ms: u64) {
        self.pending = Some((draft, now_ms));
    }

    /// Take the pending draft once its quiet window has elapsed.
    pub fn take_ready(&mut self, now_ms: u64) -> Option<Draft> {
        let queued_at = self.pending.as_ref()?.1;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending.take().map(|(draft, _)| draft)
        } else {
            None
        }
    }

    /// Take the pending draft regardless of the window.
    pub fn take_now(&mut self) -> Option<Draft> {
        self.pending.take().map(|(draft, _)| draft)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Milliseconds until the pending draft is due, if one is pending.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.pending
            .as_ref()
            .map(|(_, queued_at)| (queued_at + self.delay_ms).saturating_sub(now_ms))
    }
}

impl Default for AutosaveTimer {
    fn default() -> Self {
        Self::new(AUTOSAVE_DELAY_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> Draft {
        Draft {
            title: title.to_string(),
            ..Draft::default()
        }
    }

    #[test]
    fn test_not_ready_inside_window() {
        let mut timer = AutosaveTimer::default();
        timer.schedule(titled("a"), 1_000);
        assert!(timer.take_ready(2_999).is_none());
        assert!(timer.is_pending());
    }

    #[test]
    fn test_ready_after_window() {
        let mut timer = AutosaveTimer::default();
        timer.schedule(titled("a"), 1_000);
        assert_eq!(timer.take_ready(3_000).unwrap().title, "a");
        assert!(!timer.is_pending());
        assert!(timer.take_ready(10_000).is_none());
    }

    #[test]
    fn test_reschedule_replaces_and_restarts_window() {
        let mut timer = AutosaveTimer::default();
        timer.schedule(titled("first"), 0);
        timer.schedule(titled("second"), 1_500);
        assert!(timer.take_ready(2_000).is_none());
        assert_eq!(timer.take_ready(3_500).unwrap().title, "second");
        assert!(timer.take_ready(4_000).is_none());
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut timer = AutosaveTimer::default();
        timer.schedule(titled("a"), 0);
        timer.cancel();
        assert!(timer.take_ready(5_000).is_none());
    }

    #[test]
    fn test_remaining_ms() {
        let mut timer = AutosaveTimer::new(100);
        assert_eq!(timer.remaining_ms(0), None);
        timer.schedule(titled("a"), 50);
        assert_eq!(timer.remaining_ms(120), Some(30));
        assert_eq!(timer.remaining_ms(500), Some(0));
    }
}
