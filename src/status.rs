use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Whether the latest edits have reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Listening,
    Saved,
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStatus::Listening => f.write_str("Listening"),
            SaveStatus::Saved => f.write_str("Saved"),
        }
    }
}

/// Save status with its pending resets.
///
/// Every successful write shows `Saved` and queues its own reset for
/// `display` later. Resets are never cancelled, so the first one to fall due
/// returns the indicator to `Listening` even if another write happened in
/// between.
#[derive(Debug, Clone)]
pub struct SaveIndicator {
    status: SaveStatus,
    display: f64,
    resets: VecDeque<f64>,
}

impl SaveIndicator {
    pub fn new(display: Duration) -> Self {
        Self {
            status: SaveStatus::Listening,
            display: display.as_secs_f64(),
            resets: VecDeque::new(),
        }
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn mark_saved(&mut self, at: f64) {
        self.status = SaveStatus::Saved;
        self.resets.push_back(at + self.display);
    }

    /// Earliest queued reset.
    pub fn next_reset(&self) -> Option<f64> {
        self.resets.front().copied()
    }

    /// Applies the earliest reset if it is due by `now`.
    pub fn reset_due(&mut self, now: f64) -> bool {
        match self.resets.front() {
            Some(&at) if at <= now => {
                self.resets.pop_front();
                self.status = SaveStatus::Listening;
                true
            }
            _ => false,
        }
    }
}
