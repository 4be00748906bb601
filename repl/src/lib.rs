// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

//! # r3bl_repl
//!
//! An interactive read-eval-print loop for terminal applications. You supply an
//! [`Evaluator`] and a signal handler, and this crate takes care of the rest:
//!
//! 1. Puts the terminal in raw mode and renders an editable prompt line.
//! 2. Tracks a logical edit buffer against the wrapped, multi-row display (see
//!    [`LineEditorState`]).
//! 3. Supports cursor navigation, history recall ([`CommandHistory`]) and tab completion
//!    ([`TextCompletion`]).
//! 4. Runs each submitted line on a thread other than the input reader, and waits for
//!    exactly one [`LoopResult`] via the [`EvaluationRendezvous`].
//! 5. Falls back to a line-at-a-time loop ([`BasicLineEditor`]) on dumb terminals.
//!
//! # Architecture
//!
//! ```text
//! raw bytes ─▶ InputReader ─▶ EscapeSequence / InputKey
//!                                   │
//!                                   ▼
//!                         TerminalLineEditor ──▶ Console (redraw)
//!                           │            │
//!              LineEditorState      CommandHistory
//!                           │
//!                  submit   ▼
//!          EvaluationDispatcher ──▶ Evaluator ──▶ Finish::finish(LoopResult)
//!                           ▲                              │
//!                           └──── EvaluationRendezvous ◀───┘
//! ```
//!
//! [`ReadEvaluatePrintLoop`] owns the chosen [`LineEditor`], runs it on a dedicated
//! `repl-reader` thread, and watches OS termination signals from a tokio control loop.
//!
//! # Example
//!
//! ```no_run
//! use r3bl_repl::{LoopResult, ReadEvaluatePrintLoop, ReplConfig, SignalKind};
//!
//! #[tokio::main]
//! async fn main() -> miette::Result<()> {
//!     let repl = ReadEvaluatePrintLoop::try_new(ReplConfig::default())?;
//!     repl.run(
//!         |line: String, finish: r3bl_repl::Finish| {
//!             if line == "quit" {
//!                 finish.finish(LoopResult::Break);
//!             } else {
//!                 println!("You entered: {line}");
//!                 finish.finish(LoopResult::Continue);
//!             }
//!         },
//!         |_kind: SignalKind| true,
//!     )
//!     .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! The terminal is in raw mode while the editor runs, so log to a file. See
//! [`TracingConfig`] and [`try_initialize_logging_global`].

// Enforce strict error handling in production library code only. Tests and examples are
// allowed to use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod common;
pub mod console;
pub mod error;
pub mod evaluation;
pub mod input;
pub mod lifecycle;
pub mod line_editor;
pub mod log;
#[cfg(any(test, doc))]
pub mod test_fixtures;

// Re-export.
pub use common::*;
pub use console::*;
pub use error::*;
pub use evaluation::*;
pub use input::*;
pub use lifecycle::*;
pub use line_editor::*;
pub use log::*;
