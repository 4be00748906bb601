// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Evaluator, Finish, SharedEvaluator, ok};
use std::{any::Any,
          io,
          panic::{AssertUnwindSafe, catch_unwind},
          thread};
use tokio::runtime::Handle;

/// Name given to OS threads that run an evaluation.
pub const EVALUATOR_THREAD_NAME: &str = "repl-evaluator";

/// Where evaluations run.
#[derive(Debug, Clone)]
pub enum DispatchContext {
    /// On the blocking pool of this tokio runtime.
    Runtime(Handle),
    /// On a new OS thread per evaluation.
    OsThread,
}

impl DispatchContext {
    /// Use the current tokio runtime if there is one.
    #[must_use]
    pub fn detect() -> Self { Handle::try_current().map_or(Self::OsThread, Self::Runtime) }
}

/// Runs the [`Evaluator`] for one submitted line away from the reader thread.
///
/// A panic in the evaluator is caught and logged here. The [`Finish`] handle is dropped
/// during the unwind, which delivers [`crate::EvaluationError::Panicked`] to the
/// waiting reader.
#[derive(Debug, Clone)]
pub struct EvaluationDispatcher {
    context: DispatchContext,
}

impl Default for EvaluationDispatcher {
    fn default() -> Self { Self::new(DispatchContext::detect()) }
}

impl EvaluationDispatcher {
    #[must_use]
    pub fn new(context: DispatchContext) -> Self { Self { context } }

    #[must_use]
    pub fn context(&self) -> &DispatchContext { &self.context }

    /// # Errors
    ///
    /// Returns an error if an evaluator thread can't be spawned. The handle is dropped in
    /// that case, so the rendezvous still receives a result.
    pub fn dispatch(
        &self,
        evaluator: &SharedEvaluator,
        line: String,
        finish: Finish,
    ) -> io::Result<()> {
        let evaluator = evaluator.clone();
        let job = move || evaluate_guarded(&*evaluator, line, finish);

        match &self.context {
            DispatchContext::Runtime(handle) => {
                // Detached, the result comes back through the rendezvous.
                drop(handle.spawn_blocking(job));
            }
            DispatchContext::OsThread => {
                thread::Builder::new()
                    .name(EVALUATOR_THREAD_NAME.into())
                    .spawn(job)?;
            }
        }

        ok!()
    }
}

fn evaluate_guarded(evaluator: &dyn Evaluator, line: String, finish: Finish) {
    let outcome = catch_unwind(AssertUnwindSafe(|| evaluator.evaluate(line, finish)));
    if let Err(payload) = outcome {
        tracing::error!(
            message = "Evaluator panicked",
            panic = %panic_message(payload.as_ref())
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(it) = payload.downcast_ref::<&str>() {
        (*it).to_string()
    } else if let Some(it) = payload.downcast_ref::<String>() {
        it.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
