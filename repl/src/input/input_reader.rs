// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Console, ReplError};
use std::collections::VecDeque;

/// Hands out input characters one at a time. Characters that were read speculatively
/// (while decoding an escape sequence) can be pushed back, and are returned before
/// anything new is read from the [`Console`].
#[derive(Debug, Default)]
pub struct InputReader {
    put_back_buffer: VecDeque<char>,
}

impl InputReader {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// # Errors
    ///
    /// Returns [`ReplError::EndOfInput`] when the console has no more input, or
    /// [`ReplError::Io`] if the read fails.
    pub fn read_next(&mut self, console: &mut dyn Console) -> Result<char, ReplError> {
        if let Some(ch) = self.put_back_buffer.pop_front() {
            return Ok(ch);
        }
        console.read_input_unit()?.ok_or(ReplError::EndOfInput)
    }

    /// Prepend `chars` to the input stream, keeping their order.
    pub fn put_back(&mut self, chars: &[char]) {
        for ch in chars.iter().rev() {
            self.put_back_buffer.push_front(*ch);
        }
    }
}
