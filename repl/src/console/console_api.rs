// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{TerminalRestorer, TerminalSize};
use std::{fmt::{Display, Formatter},
          io};

/// 1-based screen coordinates. Rows can go below 1 once the line being edited has
/// scrolled off the top of the window; backends clamp when they move the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPos {
    pub row: isize,
    pub col: isize,
}

impl ScreenPos {
    #[must_use]
    pub const fn new(row: isize, col: isize) -> Self { Self { row, col } }
}

impl Display for ScreenPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(row: {}, col: {})", self.row, self.col)
    }
}

/// Non-text output that a [`Console`] must be able to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOp {
    SetPosition(ScreenPos),
    ClearScreenFromCursor,
    /// Clear the whole window.
    ClearScreen,
    ClearLine,
    /// Carriage return. Needed after `\n` since raw mode does not translate it.
    ToLineStart,
    Bell,
}

/// Raw console primitives. The [`crate::TerminalLineEditor`] only talks to the terminal
/// through this trait, which allows a mock console to be injected in
/// tests.
///
/// # Errors
///
/// Every method surfaces the underlying [`io::Error`] of the backend.
pub trait Console: Send {
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    fn write_op(&mut self, op: ConsoleOp) -> io::Result<()>;

    /// Read one character. Returns `Ok(None)` once the input source is closed.
    fn read_input_unit(&mut self) -> io::Result<Option<char>>;

    fn cursor_position(&mut self) -> io::Result<ScreenPos>;

    /// Returns `(height, width)`.
    fn window_size(&mut self) -> io::Result<TerminalSize>;

    /// Undone by the [`TerminalRestorer`] of [`Console::terminal_restorer`], never
    /// directly.
    fn enable_raw_mode(&mut self) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    /// Handle that puts the terminal back in order. It is [`Send`] and [`Clone`] so the
    /// signal path of [`crate::ReadEvaluatePrintLoop`] can run it while the reader thread
    /// is blocked.
    fn terminal_restorer(&self) -> TerminalRestorer;
}

/// Boxed trait object used by the editors.
pub type BoxedConsole = Box<dyn Console>;

impl std::fmt::Debug for dyn Console {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "dyn Console") }
}
