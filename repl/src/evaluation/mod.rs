// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Running the evaluator off the reader thread, and handing its result back.
//!
//! 1. The reader arms an [`EvaluationRendezvous`], which yields a [`Finish`] handle.
//! 2. The [`EvaluationDispatcher`] runs the [`Evaluator`] with the submitted line and the
//!    handle, on the tokio blocking pool or a fresh OS thread.
//! 3. The reader blocks in [`EvaluationRendezvous::wait`] until the evaluator calls
//!    [`Finish::finish`] (or drops the handle, or panics).

// Attach.
pub mod evaluation_dispatcher;
pub mod evaluation_rendezvous;
pub mod evaluator;
pub mod loop_result;

// Re-export.
pub use evaluation_dispatcher::*;
pub use evaluation_rendezvous::*;
pub use evaluator::*;
pub use loop_result::*;
