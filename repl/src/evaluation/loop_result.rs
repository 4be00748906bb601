// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::EvaluationError;

/// What the evaluator wants the loop to do after a line.
#[derive(Debug)]
pub enum LoopResult {
    /// Show a fresh prompt.
    Continue,
    /// Stop the loop normally.
    Break,
    /// Stop the loop, and surface the error from `run`.
    Error(EvaluationError),
}

impl LoopResult {
    /// Shorthand for [`LoopResult::Error`] with [`EvaluationError::Failed`].
    pub fn error(error: impl Into<crate::BoxedError>) -> Self {
        Self::Error(EvaluationError::failed(error))
    }

    #[must_use]
    pub fn is_continue(&self) -> bool { matches!(self, Self::Continue) }
}
