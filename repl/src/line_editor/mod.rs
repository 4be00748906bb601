// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The line editors, and the state they are built from.
//!
//! - [`TerminalLineEditor`] is the raw mode editor. It is made up of a
//!   [`LineEditorState`] (buffer and wrap geometry), a [`CommandHistory`], an optional
//!   [`TextCompletion`], and a [`Prompt`].
//! - [`BasicLineEditor`] is the fallback for consoles without cursor control.
//! - [`LineEditor`] is whichever of the two was chosen.

// Attach.
pub mod basic_line_editor;
pub mod command_history;
pub mod line_editor_kind;
pub mod line_editor_state;
pub mod prompt;
pub mod terminal_line_editor;
pub mod text_completion;

#[cfg(test)]
mod terminal_line_editor_scenarios;

// Re-export.
pub use basic_line_editor::*;
pub use command_history::*;
pub use line_editor_kind::*;
pub use line_editor_state::*;
pub use prompt::*;
pub use terminal_line_editor::*;
pub use text_completion::*;
