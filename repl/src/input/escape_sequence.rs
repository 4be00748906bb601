// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Console, InputReader, ReplError};
use strum_macros::Display;

/// Control Sequence Introducer that follows `ESC`.
pub const CSI_BRACKET: char = '[';

/// Navigation keys the [`crate::TerminalLineEditor`] understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EscapeSequence {
    /// `ESC [ A`
    Up,
    /// `ESC [ B`
    Down,
    /// `ESC [ D`
    Left,
    /// `ESC [ C`
    Right,
    /// `ESC [ 3 ~`
    Delete,
}

impl EscapeSequence {
    /// Decode the characters that follow an `ESC` that was already consumed.
    ///
    /// Returns `Ok(None)` for anything that is not one of the recognized sequences. In
    /// that case every character read here is pushed back onto `reader`, in its
    /// original order, so it is processed as ordinary input next.
    ///
    /// # Errors
    ///
    /// Returns [`ReplError::EndOfInput`] if the input ends in the middle of a sequence.
    pub fn decode(
        reader: &mut InputReader,
        console: &mut dyn Console,
    ) -> Result<Option<Self>, ReplError> {
        let first = reader.read_next(console)?;
        if first != CSI_BRACKET {
            reader.put_back(&[first]);
            return Ok(None);
        }

        let second = reader.read_next(console)?;
        let it = match second {
            'A' => Some(Self::Up),
            'B' => Some(Self::Down),
            'C' => Some(Self::Right),
            'D' => Some(Self::Left),
            '3' => {
                let third = reader.read_next(console)?;
                if third == '~' {
                    Some(Self::Delete)
                } else {
                    reader.put_back(&[first, second, third]);
                    None
                }
            }
            _ => {
                reader.put_back(&[first, second]);
                None
            }
        };

        Ok(it)
    }
}
