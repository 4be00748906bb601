// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The console capability consumed by the line editors.
//!
//! | Module               | Responsibility                                         |
//! |----------------------|--------------------------------------------------------|
//! | `console_api`        | [`Console`] trait, [`ConsoleOp`], [`ScreenPos`]        |
//! | `terminal_restorer`  | Run-once terminal cleanup shared across threads        |
//! | `crossterm_console`  | [`CrosstermConsole`] backend over stdin / stdout       |
//! | `console_capability` | Probing whether stdin / stdout are a usable terminal   |

// Attach.
pub mod console_api;
pub mod console_capability;
pub mod crossterm_console;
pub mod terminal_restorer;

// Re-export.
pub use console_api::*;
pub use console_capability::*;
pub use crossterm_console::*;
pub use terminal_restorer::*;
