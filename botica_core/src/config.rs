//! Tunables for per-chat state, constructed once at startup and handed to
//! the dispatcher.

use serde::{Deserialize, Serialize};

use crate::cadence::CadenceWindow;

/// Bounds applied to every chat's context buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextLimits {
    /// Oldest entries are evicted past this count
    pub max_entries: usize,
    /// Upper bound on the rendered prompt, in characters
    pub max_chars: usize,
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self {
            max_entries: 10,
            max_chars: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatConfig {
    #[serde(default = "ChatConfig::default_context_max_entries")]
    pub context_max_entries: usize,
    #[serde(default = "ChatConfig::default_context_max_chars")]
    pub context_max_chars: usize,
    #[serde(default)]
    pub joke_window: CadenceWindow,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            context_max_entries: Self::default_context_max_entries(),
            context_max_chars: Self::default_context_max_chars(),
            joke_window: CadenceWindow::default(),
        }
    }
}

impl ChatConfig {
    const fn default_context_max_entries() -> usize {
        10
    }

    const fn default_context_max_chars() -> usize {
        1000
    }

    #[must_use]
    pub const fn context_limits(&self) -> ContextLimits {
        ContextLimits {
            max_entries: self.context_max_entries,
            max_chars: self.context_max_chars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_context_limits() {
        let config = ChatConfig::default();
        assert_eq!(config.context_limits(), ContextLimits::default());
        assert_eq!(config.joke_window, CadenceWindow { min: 3, max: 4 });
    }
}
