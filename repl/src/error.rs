// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::BoxedError;
use miette::Diagnostic;
use std::io;
use thiserror::Error;

/// Errors returned from [`crate::ReadEvaluatePrintLoop`] and the line editors. Each
/// variant maps to one way the loop can stop abnormally.
#[derive(Debug, Error, Diagnostic)]
pub enum ReplError {
    /// No usable console backend. Reported from construction, before the terminal is
    /// touched.
    #[error("terminal is not supported")]
    #[diagnostic(
        code(r3bl_repl::unsupported_terminal),
        help("run in an interactive terminal, set TERM=dumb, or enable the basic fallback")
    )]
    UnsupportedTerminal,

    /// The input source was closed (Ctrl-D, or the stream ended).
    #[error("end of input")]
    #[diagnostic(code(r3bl_repl::end_of_input))]
    EndOfInput,

    /// The user pressed Ctrl-C while the editor was reading.
    #[error("interrupted")]
    #[diagnostic(code(r3bl_repl::interrupted))]
    Interrupted,

    /// The evaluator finished a line with [`crate::LoopResult::Error`].
    #[error(transparent)]
    #[diagnostic(code(r3bl_repl::evaluation))]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    #[diagnostic(code(r3bl_repl::rendezvous))]
    Rendezvous(#[from] RendezvousError),

    /// An internal I/O error occurred.
    #[error(transparent)]
    #[diagnostic(code(r3bl_repl::io))]
    Io(#[from] io::Error),
}

/// Failure surfaced by an evaluation of one submitted line.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The evaluator reported an error of its own.
    #[error("evaluation failed: {0}")]
    Failed(#[source] BoxedError),

    /// The evaluator panicked before it delivered a result.
    #[error("evaluator panicked")]
    Panicked,

    /// The completion handle was dropped without a result.
    #[error("evaluator dropped its completion handle without a result")]
    Abandoned,
}

impl EvaluationError {
    /// Wrap any error type the evaluator produces.
    pub fn failed(error: impl Into<BoxedError>) -> Self { Self::Failed(error.into()) }
}

/// Misuse of the [`crate::EvaluationRendezvous`] protocol.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum RendezvousError {
    /// A second evaluation was dispatched while one is still outstanding.
    #[error("an evaluation is already outstanding")]
    AlreadyArmed,

    /// The reader waited without dispatching an evaluation first.
    #[error("no evaluation has been dispatched")]
    NotArmed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_evaluation_error_display() {
        let error = EvaluationError::failed("bad input");
        assert_eq!(error.to_string(), "evaluation failed: bad input");

        let repl_error: ReplError = error.into();
        assert!(matches!(repl_error, ReplError::Evaluation(EvaluationError::Failed(_))));
        assert_eq!(repl_error.to_string(), "evaluation failed: bad input");
    }

    #[test]
    fn test_diagnostic_codes() {
        let code = ReplError::UnsupportedTerminal.code().map(|it| it.to_string());
        assert_eq!(code.as_deref(), Some("r3bl_repl::unsupported_terminal"));
        assert!(ReplError::UnsupportedTerminal.help().is_some());
    }
}
