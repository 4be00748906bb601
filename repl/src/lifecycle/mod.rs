// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Wiring the line editor, the evaluator, and OS signals together.

// Attach.
pub mod read_evaluate_print_loop;
pub mod repl_config;
pub mod signal_kind;

// Re-export.
pub use read_evaluate_print_loop::*;
pub use repl_config::*;
pub use signal_kind::*;
