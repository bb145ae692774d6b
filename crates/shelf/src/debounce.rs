//! Trailing-edge debounce with an explicit clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due: Instant,
}

/// Holds at most one pending value, released after a quiet window.
///
/// Each [`schedule`](Self::schedule) cancels whatever was pending and restarts
/// the window. Time is supplied by the caller, so the debouncer never sleeps
/// or spawns anything.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Check if a value is waiting to be released.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Replaces the pending value, due one window after `now`.
    ///
    /// Returns the value that was cancelled.
    pub fn schedule(&mut self, value: T, now: Instant) -> Option<T> {
        let due = now + self.window;
        self.pending
            .replace(Pending { value, due })
            .map(|cancelled| cancelled.value)
    }

    /// Releases the pending value if its window has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.due <= now => self.cancel(),
            _ => None,
        }
    }

    /// Releases the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.cancel()
    }

    /// Drops the pending value without it ever becoming due.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn releases_after_quiet_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        assert!(debouncer.schedule("a", start).is_none());

        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll(start + WINDOW), Some("a"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + WINDOW * 2), None);
    }

    #[test]
    fn new_schedule_cancels_and_restarts() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule("b", start);
        let cancelled = debouncer.schedule("bl", start + Duration::from_millis(200));
        assert_eq!(cancelled, Some("b"));

        // The first window has elapsed but the second has not.
        assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);
        assert_eq!(
            debouncer.due_at(),
            Some(start + Duration::from_millis(500))
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), Some("bl"));
    }

    #[test]
    fn flush_and_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule(1, start);
        assert_eq!(debouncer.flush(), Some(1));
        assert_eq!(debouncer.flush(), None);

        debouncer.schedule(2, start);
        assert_eq!(debouncer.cancel(), Some(2));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn zero_window_is_due_immediately() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.schedule('x', start);
        assert_eq!(debouncer.poll(start), Some('x'));
    }
}
