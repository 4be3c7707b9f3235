use std::time::Duration;

/// Holds at most one pending value and the time it becomes due.
///
/// Scheduling replaces whatever was pending, so only the last value handed
/// in during a quiet period is ever released. Times are seconds on the
/// caller's clock (the egui input clock in the app).
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: f64,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    deadline: f64,
    value: T,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay: delay.as_secs_f64(),
            pending: None,
        }
    }

    /// Replaces any pending value with `value`, due `delay` after `now`.
    /// Returns `true` when an earlier value was superseded.
    pub fn schedule(&mut self, value: T, now: f64) -> bool {
        let superseded = self.pending.is_some();
        self.pending = Some(Pending {
            deadline: now + self.delay,
            value,
        });
        superseded
    }

    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the pending value regardless of its deadline.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }
}
