// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::Finish;
use std::sync::Arc;

/// The one thing an embedding application implements. It is called once per submitted
/// line, off the reader thread, and must eventually call [`Finish::finish`] with a
/// [`crate::LoopResult`]. The handle can be moved to any other thread or task first.
///
/// Any `Fn(String, Finish) + Send + Sync + 'static` closure is an evaluator.
pub trait Evaluator: Send + Sync + 'static {
    fn evaluate(&self, line: String, finish: Finish);
}

impl<F> Evaluator for F
where
    F: Fn(String, Finish) + Send + Sync + 'static,
{
    fn evaluate(&self, line: String, finish: Finish) { self(line, finish); }
}

/// Type alias for an evaluator that can be shared with the dispatched threads.
pub type SharedEvaluator = Arc<dyn Evaluator>;
