// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Console, ConsoleOp, ScreenPos, StdMutex, TerminalRestorer, TerminalSize,
            lock_recover, ok};
use std::{collections::VecDeque,
          io,
          sync::{Arc, Condvar}};

/// Everything a [`MockConsole`] was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    Text(String),
    Op(ConsoleOp),
    RawMode(bool),
    Flush,
    /// The [`TerminalRestorer`] ran.
    Restored,
}

#[derive(Debug)]
pub struct MockConsoleState {
    pub input: VecDeque<char>,
    /// When `true`, reads wait for more input instead of reporting end of input.
    pub block_when_empty: bool,
    pub is_input_closed: bool,
    pub events: Vec<ConsoleEvent>,
    /// Simulated cursor. The column can be `width + 1` (pending wrap).
    pub cursor: ScreenPos,
    pub size: TerminalSize,
    pub is_raw_mode: bool,
}

/// In-memory [`Console`]. Clones share state, so a test can keep one handle while the
/// editor owns another.
///
/// Input is scripted with [`MockConsole::with_input`] or [`MockConsole::push_input`].
/// Output is recorded as [`ConsoleEvent`]s, and a simple cursor model (wrapping and
/// scrolling at the bottom row) answers [`Console::cursor_position`].
#[derive(Debug, Clone)]
pub struct MockConsole {
    pub state: Arc<(StdMutex<MockConsoleState>, Condvar)>,
    restorer: TerminalRestorer,
}

impl MockConsole {
    /// `size` is `(height, width)`. The cursor starts at the top left corner.
    #[must_use]
    pub fn new(size: TerminalSize) -> Self {
        let state = Arc::new((
            StdMutex::new(MockConsoleState {
                input: VecDeque::new(),
                block_when_empty: false,
                is_input_closed: false,
                events: vec![],
                cursor: ScreenPos::new(1, 1),
                size,
                is_raw_mode: false,
            }),
            Condvar::new(),
        ));

        let restorer = {
            let state = state.clone();
            TerminalRestorer::new(move || {
                let mut it = lock_recover!(state.0);
                it.is_raw_mode = false;
                it.events.push(ConsoleEvent::RawMode(false));
                it.apply_text("\n");
                it.cursor.col = 1;
                it.events.push(ConsoleEvent::Restored);
                ok!()
            })
        };

        Self { state, restorer }
    }

    #[must_use]
    pub fn with_input(self, input: &str) -> Self {
        self.push_input(input);
        self
    }

    #[must_use]
    pub fn with_cursor(self, cursor: ScreenPos) -> Self {
        lock_recover!(self.state.0).cursor = cursor;
        self
    }

    /// Reads block instead of reporting end of input, until
    /// [`MockConsole::close_input`] is called.
    #[must_use]
    pub fn with_blocking_input(self) -> Self {
        lock_recover!(self.state.0).block_when_empty = true;
        self
    }

    pub fn push_input(&self, input: &str) {
        lock_recover!(self.state.0).input.extend(input.chars());
        self.state.1.notify_all();
    }

    pub fn close_input(&self) {
        lock_recover!(self.state.0).is_input_closed = true;
        self.state.1.notify_all();
    }

    pub fn set_size(&self, size: TerminalSize) { lock_recover!(self.state.0).size = size; }

    #[must_use]
    pub fn events(&self) -> Vec<ConsoleEvent> { lock_recover!(self.state.0).events.clone() }

    /// Drain the recorded events.
    #[must_use]
    pub fn take_events(&self) -> Vec<ConsoleEvent> {
        std::mem::take(&mut lock_recover!(self.state.0).events)
    }

    /// All text written so far, concatenated.
    #[must_use]
    pub fn output_text(&self) -> String {
        lock_recover!(self.state.0)
            .events
            .iter()
            .filter_map(|it| match it {
                ConsoleEvent::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn count_ops(&self, op: ConsoleOp) -> usize {
        lock_recover!(self.state.0)
            .events
            .iter()
            .filter(|it| **it == ConsoleEvent::Op(op))
            .count()
    }

    #[must_use]
    pub fn bell_count(&self) -> usize { self.count_ops(ConsoleOp::Bell) }

    #[must_use]
    pub fn restore_count(&self) -> usize {
        lock_recover!(self.state.0)
            .events
            .iter()
            .filter(|it| **it == ConsoleEvent::Restored)
            .count()
    }

    #[must_use]
    pub fn is_raw_mode(&self) -> bool { lock_recover!(self.state.0).is_raw_mode }

    #[must_use]
    pub fn remaining_input(&self) -> String {
        lock_recover!(self.state.0).input.iter().collect()
    }
}

impl MockConsoleState {
    fn height(&self) -> isize { isize::try_from(self.size.0.max(1)).unwrap_or(isize::MAX) }

    fn width(&self) -> isize { isize::try_from(self.size.1.max(1)).unwrap_or(isize::MAX) }

    fn line_feed(&mut self) {
        // The bottom row stays put and the content scrolls up.
        self.cursor.row = (self.cursor.row + 1).min(self.height());
    }

    fn apply_text(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' => self.line_feed(),
                '\r' => self.cursor.col = 1,
                '\u{07}' => {}
                _ => {
                    if self.cursor.col > self.width() {
                        self.cursor.col = 1;
                        self.line_feed();
                    }
                    self.cursor.col += 1;
                }
            }
        }
    }

    fn apply_op(&mut self, op: ConsoleOp) {
        match op {
            ConsoleOp::SetPosition(pos) => {
                self.cursor = ScreenPos::new(
                    pos.row.clamp(1, self.height()),
                    pos.col.clamp(1, self.width()),
                );
            }
            ConsoleOp::ToLineStart => self.cursor.col = 1,
            ConsoleOp::ClearScreenFromCursor
            | ConsoleOp::ClearScreen
            | ConsoleOp::ClearLine
            | ConsoleOp::Bell => {}
        }
    }
}

impl Console for MockConsole {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        let mut it = lock_recover!(self.state.0);
        it.apply_text(text);
        it.events.push(ConsoleEvent::Text(text.to_string()));
        ok!()
    }

    fn write_op(&mut self, op: ConsoleOp) -> io::Result<()> {
        let mut it = lock_recover!(self.state.0);
        it.apply_op(op);
        it.events.push(ConsoleEvent::Op(op));
        ok!()
    }

    fn read_input_unit(&mut self) -> io::Result<Option<char>> {
        let (lock, condvar) = &*self.state;
        let mut it = lock_recover!(lock);
        loop {
            if let Some(ch) = it.input.pop_front() {
                return ok!(Some(ch));
            }
            if !it.block_when_empty || it.is_input_closed {
                return ok!(None);
            }
            it = condvar
                .wait(it)
                .unwrap_or_else(std::sync::PoisonError::into_inner);
        }
    }

    fn cursor_position(&mut self) -> io::Result<ScreenPos> {
        let it = lock_recover!(self.state.0);
        ok!(ScreenPos::new(it.cursor.row, it.cursor.col.min(it.width())))
    }

    fn window_size(&mut self) -> io::Result<TerminalSize> { ok!(lock_recover!(self.state.0).size) }

    fn enable_raw_mode(&mut self) -> io::Result<()> {
        let mut it = lock_recover!(self.state.0);
        it.is_raw_mode = true;
        it.events.push(ConsoleEvent::RawMode(true));
        ok!()
    }

    fn flush(&mut self) -> io::Result<()> {
        lock_recover!(self.state.0).events.push(ConsoleEvent::Flush);
        ok!()
    }

    fn terminal_restorer(&self) -> TerminalRestorer { self.restorer.clone() }
}
