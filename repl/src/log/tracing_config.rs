// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

/// Log file used when none is given.
pub const DEFAULT_LOG_FILE_NAME: &str = "r3bl_repl_log.log";

/// Where the logs go, and how verbose they are. Pass it to
/// [`crate::try_initialize_logging_global`].
///
/// While the [`crate::TerminalLineEditor`] runs, the terminal is in raw mode and any
/// output to stdout or stderr gets mixed into the prompt line. So the file writer is the
/// one to use for interactive sessions.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// The `String` is the log file path, eg: `/tmp/my_repl.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    #[must_use]
    pub fn new_file(file_path: Option<String>, level_filter: LevelFilter) -> Self {
        Self {
            writer_config: WriterConfig::File(
                file_path.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter,
        }
    }

    #[must_use]
    pub fn new_display(display_preference: DisplayPreference, level_filter: LevelFilter) -> Self {
        Self {
            writer_config: WriterConfig::Display(display_preference),
            level_filter,
        }
    }

    #[must_use]
    pub fn new_file_and_display(
        file_path: Option<String>,
        display_preference: DisplayPreference,
        level_filter: LevelFilter,
    ) -> Self {
        Self {
            writer_config: WriterConfig::DisplayAndFile(
                display_preference,
                file_path.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter,
        }
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

/// Logging is off by default.
impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            writer_config: WriterConfig::None,
            level_filter: LevelFilter::OFF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_constructors() {
        let it = TracingConfig::new_file(None, LevelFilter::DEBUG);
        assert_eq!(
            it.get_writer_config(),
            WriterConfig::File(DEFAULT_LOG_FILE_NAME.into())
        );
        assert_eq!(it.get_level_filter(), LevelFilter::DEBUG);

        let it = TracingConfig::new_file_and_display(
            Some("/tmp/x.log".into()),
            DisplayPreference::Stderr,
            LevelFilter::INFO,
        );
        assert_eq!(
            it.get_writer_config(),
            WriterConfig::DisplayAndFile(DisplayPreference::Stderr, "/tmp/x.log".into())
        );

        assert_eq!(TracingConfig::default().get_level_filter(), LevelFilter::OFF);
    }
}
