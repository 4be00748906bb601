// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words DSR

use crate::{Console, ConsoleOp, ScreenPos, TerminalRestorer, TerminalSize, ok};
use crossterm::{QueueableCommand,
                cursor::{MoveTo, MoveToColumn},
                terminal::{self, Clear, ClearType}};
use std::{collections::VecDeque,
          io::{self, Read, Stdin, Stdout, Write}};

/// Device Status Report: asks the terminal to reply with `ESC [ row ; col R`.
pub const DSR_CURSOR_POSITION_QUERY: &str = "\x1b[6n";

/// Upper bound on bytes consumed while waiting for a cursor position reply.
const CURSOR_REPLY_MAX_BYTES: usize = 256;

const BELL: &str = "\x07";

/// [`Console`] backend for a real terminal. Raw mode and window size go through
/// [`crossterm::terminal`], cursor movement and clearing through [`crossterm`]
/// commands, and input is read as UTF-8 bytes straight from stdin.
///
/// Bytes that arrive while a cursor position reply is being awaited (typed ahead by the
/// user) are kept and handed out by later reads, in order.
#[derive(Debug)]
pub struct CrosstermConsole {
    stdin: Stdin,
    stdout: Stdout,
    pending_bytes: VecDeque<u8>,
    restorer: TerminalRestorer,
}

impl Default for CrosstermConsole {
    fn default() -> Self { Self::new() }
}

impl CrosstermConsole {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
            pending_bytes: VecDeque::new(),
            restorer: TerminalRestorer::new(restore_terminal),
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pending_bytes.pop_front() {
            return ok!(Some(byte));
        }
        self.read_byte_from_stdin()
    }

    fn read_byte_from_stdin(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0_u8; 1];
        loop {
            match self.stdin.read(&mut buf) {
                Ok(0) => return ok!(None),
                Ok(_) => return ok!(Some(buf[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}

impl Console for CrosstermConsole {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.stdout.write_all(text.as_bytes())
    }

    fn write_op(&mut self, op: ConsoleOp) -> io::Result<()> {
        match op {
            ConsoleOp::SetPosition(pos) => {
                self.stdout.queue(MoveTo(to_zero_based(pos.col), to_zero_based(pos.row)))?;
            }
            ConsoleOp::ClearScreenFromCursor => {
                self.stdout.queue(Clear(ClearType::FromCursorDown))?;
            }
            ConsoleOp::ClearScreen => {
                self.stdout.queue(Clear(ClearType::All))?;
            }
            ConsoleOp::ClearLine => {
                self.stdout.queue(Clear(ClearType::CurrentLine))?;
            }
            ConsoleOp::ToLineStart => {
                self.stdout.queue(MoveToColumn(0))?;
            }
            ConsoleOp::Bell => self.stdout.write_all(BELL.as_bytes())?,
        }
        ok!()
    }

    fn read_input_unit(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.read_byte()? else {
            return ok!(None);
        };

        let width = utf8_sequence_width(first);
        let mut bytes = vec![first];
        while bytes.len() < width {
            match self.read_byte()? {
                Some(byte) => bytes.push(byte),
                None => break,
            }
        }

        ok!(Some(
            std::str::from_utf8(&bytes)
                .ok()
                .and_then(|it| it.chars().next())
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        ))
    }

    fn cursor_position(&mut self) -> io::Result<ScreenPos> {
        self.stdout.write_all(DSR_CURSOR_POSITION_QUERY.as_bytes())?;
        self.stdout.flush()?;

        // Bytes typed ahead are read from stdin only, so they keep their order behind
        // anything already pending.
        let mut scratch: Vec<u8> = vec![];
        while scratch.len() < CURSOR_REPLY_MAX_BYTES {
            let Some(byte) = self.read_byte_from_stdin()? else {
                break;
            };
            scratch.push(byte);
            if byte != b'R' {
                continue;
            }
            if let Some((reply_start, pos)) = parse_cursor_position_reply(&scratch) {
                self.pending_bytes.extend(&scratch[..reply_start]);
                return ok!(pos);
            }
        }

        self.pending_bytes.extend(scratch);
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "terminal did not answer the cursor position query",
        ))
    }

    fn window_size(&mut self) -> io::Result<TerminalSize> {
        let (columns, rows) = terminal::size()?;
        ok!((rows, columns))
    }

    fn enable_raw_mode(&mut self) -> io::Result<()> { terminal::enable_raw_mode() }

    fn flush(&mut self) -> io::Result<()> { self.stdout.flush() }

    fn terminal_restorer(&self) -> TerminalRestorer { self.restorer.clone() }
}

fn restore_terminal() -> io::Result<()> {
    if let Err(err) = terminal::disable_raw_mode() {
        tracing::warn!(message = "Failed to reset terminal input mode", error = ?err);
    }
    let mut stdout = io::stdout();
    stdout.write_all(b"\n")?;
    stdout.queue(MoveToColumn(0))?;
    stdout.flush()
}

fn to_zero_based(value: isize) -> u16 {
    u16::try_from(value.saturating_sub(1).max(0)).unwrap_or(u16::MAX)
}

fn utf8_sequence_width(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Looks for `ESC [ row ; col R` at the end of `bytes`. Returns the index where the
/// reply starts along with the parsed position.
fn parse_cursor_position_reply(bytes: &[u8]) -> Option<(usize, ScreenPos)> {
    let reply_start = bytes.windows(2).rposition(|it| it == b"\x1b[")?;
    let body = std::str::from_utf8(&bytes[reply_start + 2..]).ok()?;
    let body = body.strip_suffix('R')?;
    let (row, col) = body.split_once(';')?;
    let row = row.parse::<isize>().ok()?;
    let col = col.parse::<isize>().ok()?;
    Some((reply_start, ScreenPos::new(row, col)))
}
