// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::IsTerminal;

/// Name of the environment variable that identifies the terminal type.
pub const TERM_ENV_VAR: &str = "TERM";

/// Value of [`TERM_ENV_VAR`] for terminals that can't handle cursor control.
pub const DUMB_TERMINAL: &str = "dumb";

/// What kind of console the process is attached to. This decides which
/// [`crate::LineEditor`] the [`crate::ReadEvaluatePrintLoop`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCapability {
    /// Both stdin and stdout are a TTY that understands cursor control.
    Interactive,
    /// `TERM=dumb`. Input can be read a line at a time, but no cursor control.
    Dumb,
    /// stdin or stdout is piped or redirected.
    NotATerminal,
}

impl ConsoleCapability {
    /// Probe the current process.
    #[must_use]
    pub fn probe() -> Self {
        Self::classify(
            std::env::var(TERM_ENV_VAR).ok().as_deref(),
            std::io::stdin().is_terminal(),
            std::io::stdout().is_terminal(),
        )
    }

    /// A dumb `TERM` wins over the TTY checks, since such a terminal can still be a
    /// TTY.
    #[must_use]
    pub fn classify(term: Option<&str>, stdin_is_tty: bool, stdout_is_tty: bool) -> Self {
        if term == Some(DUMB_TERMINAL) {
            return Self::Dumb;
        }
        if stdin_is_tty && stdout_is_tty {
            Self::Interactive
        } else {
            Self::NotATerminal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(Some("xterm-256color"), true, true, ConsoleCapability::Interactive)]
    #[test_case(None, true, true, ConsoleCapability::Interactive)]
    #[test_case(Some("dumb"), true, true, ConsoleCapability::Dumb)]
    #[test_case(Some("dumb"), false, false, ConsoleCapability::Dumb)]
    #[test_case(Some("xterm"), false, true, ConsoleCapability::NotATerminal)]
    #[test_case(Some("xterm"), true, false, ConsoleCapability::NotATerminal)]
    fn test_classify(
        term: Option<&str>,
        stdin_is_tty: bool,
        stdout_is_tty: bool,
        expected: ConsoleCapability,
    ) {
        assert_eq!(
            ConsoleCapability::classify(term, stdin_is_tty, stdout_is_tty),
            expected
        );
    }
}
