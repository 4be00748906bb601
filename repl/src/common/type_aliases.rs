// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Disambiguate the type of `StdMutex` from stdlib and tokio to avoid conflicts.
pub type StdMutex<T> = std::sync::Mutex<T>;

/// Type alias for a `Send`-able, boxed error that an evaluator can surface.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Terminal size as `(height, width)`, measured in rows and columns.
pub type TerminalSize = (u16, u16);
