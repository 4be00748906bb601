// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`tracing`] setup: pick the writers with a [`TracingConfig`], then install it
//! globally ([`try_initialize_logging_global`]) or for the current thread
//! ([`try_initialize_logging_thread_local`]).

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
