// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The edit buffer of the line being typed, and where it sits on screen.
//!
//! # Wrap model
//!
//! The prompt starts at `start` (1-based `row`, `col`). Let `w` be the terminal width
//! and define the number of cells consumed up to buffer index `i` as:
//!
//! ```text
//! offset(i) = (start.col - 1) + prompt_len + i
//! ```
//!
//! Then:
//!
//! | Derived value          | Formula                                                  |
//! |------------------------|----------------------------------------------------------|
//! | cursor at index `i`    | `row = start.row + offset(i) / w`, `col = offset(i) % w + 1` |
//! | `end()`, `n = offset(len)` | `n == 0`: `(start.row, 1)`, else `(start.row + (n - 1) / w, (n - 1) % w + 2)` |
//! | `expanded_to_rows()`   | `offset(len) / w`                                        |
//!
//! `end()` is where the terminal leaves its cursor after printing the prompt and the
//! buffer, so its column can be `w + 1` (the terminal's "pending wrap" state). The
//! cursor column is always in `[1, w]`.
//!
//! For example, with a prompt of length 2 at column 1, width 5, and buffer `"abcdefgh"`,
//! `n = 10` and `end() == (start.row + 1, 6)`.
//!
//! The incremental operations ([`LineEditorState::insert`],
//! [`LineEditorState::move_left`], ...) keep `cursor == cursor_at(index)` at all times.

use crate::{Prompt, ScreenPos, TerminalSize};

fn as_isize(value: usize) -> isize { isize::try_from(value).unwrap_or(isize::MAX) }

/// Logical buffer plus the derived screen geometry. Constructed fresh for each input
/// line, mutated per keystroke by the [`crate::TerminalLineEditor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEditorState {
    buffer: Vec<char>,
    /// Cursor index into `buffer`, in `0..=buffer.len()`.
    index: usize,
    prompt_len: usize,
    start: ScreenPos,
    cursor: ScreenPos,
    /// `(height, width)`.
    terminal_size: TerminalSize,
}

impl LineEditorState {
    /// An empty buffer with the prompt printed at `start`.
    #[must_use]
    pub fn new(prompt: &Prompt, start: ScreenPos, terminal_size: TerminalSize) -> Self {
        let terminal_size = (terminal_size.0.max(1), terminal_size.1.max(1));
        let width = as_isize(usize::from(terminal_size.1));
        let start = ScreenPos::new(start.row, start.col.clamp(1, width));
        let mut it = Self {
            buffer: vec![],
            index: 0,
            prompt_len: prompt.plain_len(),
            start,
            cursor: start,
            terminal_size,
        };
        it.cursor = it.cursor_at(0);
        it
    }

    fn width(&self) -> isize { as_isize(usize::from(self.terminal_size.1)) }

    fn height(&self) -> isize { as_isize(usize::from(self.terminal_size.0)) }

    fn offset(&self, index: usize) -> isize {
        (self.start.col - 1) + as_isize(self.prompt_len) + as_isize(index)
    }

    /// Screen position of buffer index `index`, computed from scratch.
    #[must_use]
    pub fn cursor_at(&self, index: usize) -> ScreenPos {
        let offset = self.offset(index);
        ScreenPos::new(
            self.start.row + offset / self.width(),
            offset % self.width() + 1,
        )
    }

    /// Position right after the last drawn cell. Independent of the cursor.
    #[must_use]
    pub fn end(&self) -> ScreenPos {
        let n = self.offset(self.buffer.len());
        if n == 0 {
            ScreenPos::new(self.start.row, 1)
        } else {
            ScreenPos::new(
                self.start.row + (n - 1) / self.width(),
                (n - 1) % self.width() + 2,
            )
        }
    }

    /// Rows below the prompt row needed to hold the cursor at the end of the buffer.
    #[must_use]
    pub fn expanded_to_rows(&self) -> isize { self.offset(self.buffer.len()) / self.width() }

    #[must_use]
    pub fn input(&self) -> String { self.buffer.iter().collect() }

    #[must_use]
    pub fn index(&self) -> usize { self.index }

    #[must_use]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    #[must_use]
    pub fn is_at_end(&self) -> bool { self.index == self.buffer.len() }

    #[must_use]
    pub fn cursor(&self) -> ScreenPos { self.cursor }

    #[must_use]
    pub fn start(&self) -> ScreenPos { self.start }

    #[must_use]
    pub fn prompt_len(&self) -> usize { self.prompt_len }

    #[must_use]
    pub fn terminal_size(&self) -> TerminalSize { self.terminal_size }

    /// Picks up a new prompt length, eg: if the prompt changed between lines.
    pub fn set_prompt(&mut self, prompt: &Prompt) {
        self.prompt_len = prompt.plain_len();
        self.cursor = self.cursor_at(self.index);
    }

    /// Refresh the terminal size. On a change the cursor is recomputed from the wrap
    /// model.
    pub fn set_terminal_size(&mut self, terminal_size: TerminalSize) {
        let terminal_size = (terminal_size.0.max(1), terminal_size.1.max(1));
        if terminal_size != self.terminal_size {
            self.terminal_size = terminal_size;
            self.start.col = self.start.col.clamp(1, self.width());
            self.cursor = self.cursor_at(self.index);
        }
    }

    pub fn move_to_start(&mut self) {
        self.index = 0;
        self.cursor = self.cursor_at(self.index);
    }

    pub fn move_to_end(&mut self) {
        self.index = self.buffer.len();
        self.cursor = self.cursor_at(self.index);
    }

    /// Returns `false` (and does nothing) at the start of the buffer.
    pub fn move_left(&mut self) -> bool { self.move_left_with(|_, _| {}) }

    /// Moves left, then hands the buffer and the new index to `on_moved`. This is how
    /// backspace removes the character it moved over.
    pub fn move_left_with(&mut self, on_moved: impl FnOnce(&mut Vec<char>, usize)) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.cursor.col -= 1;
        if self.cursor.col < 1 {
            self.cursor.col = self.width();
            self.cursor.row -= 1;
        }
        on_moved(&mut self.buffer, self.index);
        true
    }

    /// Returns `false` (and does nothing) at the end of the buffer.
    pub fn move_right(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.index += 1;
        self.cursor.col += 1;
        if self.cursor.col > self.width() {
            self.cursor.col = 1;
            self.cursor.row += 1;
        }
        true
    }

    /// Insert `ch` at the cursor and advance. Returns `true` if the cursor wrapped to the
    /// next row, in which case the caller has to emit a newline so the terminal scrolls
    /// along with the model.
    pub fn insert(&mut self, ch: char) -> bool {
        self.buffer.insert(self.index, ch);
        self.index += 1;
        self.cursor.col += 1;
        if self.cursor.col > self.width() {
            self.cursor.row += 1;
            self.cursor.col = 1;
            true
        } else {
            false
        }
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        self.move_left_with(|buffer, index| {
            buffer.remove(index);
        })
    }

    /// Delete the character under the cursor. Returns `false` at the end of the buffer.
    pub fn delete_at_cursor(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.buffer.remove(self.index);
        true
    }

    pub fn kill_to_end(&mut self) { self.buffer.truncate(self.index); }

    /// Remove everything before the cursor, and move the cursor to the start.
    pub fn kill_to_start(&mut self) {
        self.buffer.drain(..self.index);
        self.move_to_start();
    }

    /// Replace the buffer, eg: with a history entry or a completion. `index` is clamped
    /// to the new length.
    pub fn set_buffer(&mut self, text: &str, index: usize) {
        self.buffer = text.chars().collect();
        self.index = index.min(self.buffer.len());
        self.cursor = self.cursor_at(self.index);
    }

    /// If the last row used by the line (its end, or the cursor) is below the window,
    /// shift `start` and the cursor up by the overflow, which is returned.
    pub fn compensate_scroll(&mut self) -> isize {
        let last_row = self.end().row.max(self.cursor.row);
        let overflow = last_row - self.height();
        if overflow > 0 {
            self.start.row -= overflow;
            self.cursor.row -= overflow;
            overflow
        } else {
            0
        }
    }
}
