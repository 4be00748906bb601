// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{HISTORY_SIZE_MAX, Prompt};

/// Settings for [`crate::ReadEvaluatePrintLoop`] and the line editors.
///
/// ```
/// use r3bl_repl::ReplConfig;
///
/// let config = ReplConfig::default()
///     .with_prompt("$ ")
///     .with_max_history_line_count(50)
///     .with_exit_process_on_interrupt(false);
/// assert_eq!(config.prompt.plain(), "$ ");
/// assert_eq!(config.max_history_line_count, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    pub prompt: Prompt,
    /// Includes the live entry.
    pub max_history_line_count: usize,
    /// When `true`, Ctrl-C and handled signals restore the terminal and then exit the
    /// process with status 0. When `false`, they are returned from
    /// [`crate::ReadEvaluatePrintLoop::run`] instead.
    pub exit_process_on_interrupt: bool,
    /// Use the [`crate::BasicLineEditor`] when stdin or stdout is not a terminal,
    /// instead of failing with [`crate::ReplError::UnsupportedTerminal`].
    pub basic_fallback_when_not_a_terminal: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: Prompt::default(),
            max_history_line_count: HISTORY_SIZE_MAX,
            exit_process_on_interrupt: true,
            basic_fallback_when_not_a_terminal: false,
        }
    }
}

impl ReplConfig {
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<Prompt>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn with_max_history_line_count(mut self, count: usize) -> Self {
        self.max_history_line_count = count;
        self
    }

    #[must_use]
    pub fn with_exit_process_on_interrupt(mut self, value: bool) -> Self {
        self.exit_process_on_interrupt = value;
        self
    }

    #[must_use]
    pub fn with_basic_fallback_when_not_a_terminal(mut self, value: bool) -> Self {
        self.basic_fallback_when_not_a_terminal = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ReplConfig::default();
        assert_eq!(config.prompt.plain(), ">>> ");
        assert_eq!(config.max_history_line_count, 1_000);
        assert!(config.exit_process_on_interrupt);
        assert!(!config.basic_fallback_when_not_a_terminal);
    }

    #[test]
    fn test_builders() {
        let config = ReplConfig::default()
            .with_basic_fallback_when_not_a_terminal(true)
            .with_exit_process_on_interrupt(false);
        assert!(config.basic_fallback_when_not_a_terminal);
        assert!(!config.exit_process_on_interrupt);
    }
}
