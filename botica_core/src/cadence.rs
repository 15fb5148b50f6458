//! Per-chat message counter that decides when an automatic joke is due.

use serde::{Deserialize, Serialize};

/// Inclusive message-count window in which the trigger fires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CadenceWindow {
    pub min: u32,
    pub max: u32,
}

impl Default for CadenceWindow {
    fn default() -> Self {
        Self { min: 3, max: 4 }
    }
}

impl CadenceWindow {
    #[must_use]
    pub const fn contains(&self, count: u32) -> bool {
        count >= self.min && count <= self.max
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.min > 0 && self.min <= self.max
    }
}

/// Counts freeform messages since the last fire or reset.
///
/// Counts above the window never fire. A chat whose fire attempts are all
/// rejected keeps climbing past `max` until the counter is reset.
#[derive(Debug, Clone, Copy)]
pub struct CadenceTrigger {
    count: u32,
    window: CadenceWindow,
}

impl CadenceTrigger {
    #[must_use]
    pub const fn new(window: CadenceWindow) -> Self {
        Self { count: 0, window }
    }

    pub const fn increment(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    #[must_use]
    pub const fn should_fire(&self, count: u32) -> bool {
        self.window.contains(count)
    }

    pub const fn reset(&mut self) {
        self.count = 0;
    }

    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }
}

impl Default for CadenceTrigger {
    fn default() -> Self {
        Self::new(CadenceWindow::default())
    }
}
