// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Control characters recognized by the [`crate::TerminalLineEditor`].
pub mod control_char {
    pub const CTRL_A: char = '\u{01}';
    pub const CTRL_C: char = '\u{03}';
    pub const CTRL_D: char = '\u{04}';
    pub const CTRL_E: char = '\u{05}';
    pub const BACKSPACE_CTRL_H: char = '\u{08}';
    pub const TAB: char = '\u{09}';
    pub const LINE_FEED: char = '\u{0A}';
    pub const CTRL_K: char = '\u{0B}';
    pub const CTRL_L: char = '\u{0C}';
    pub const CARRIAGE_RETURN: char = '\u{0D}';
    pub const CTRL_U: char = '\u{15}';
    pub const ESCAPE: char = '\u{1B}';
    pub const DELETE: char = '\u{7F}';
}

/// Logical classification of one input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Ctrl-D.
    EndOfInput,
    /// Ctrl-C.
    Interrupt,
    /// Ctrl-A.
    MoveToStart,
    /// Ctrl-E.
    MoveToEnd,
    /// Ctrl-K.
    KillToEnd,
    /// Ctrl-U.
    KillToStart,
    /// Ctrl-L.
    ClearScreen,
    Backspace,
    Submit,
    Tab,
    /// Introduces an escape sequence, see [`crate::EscapeSequence`].
    Escape,
    Printable(char),
    Unhandled(char),
}

impl From<char> for InputKey {
    fn from(ch: char) -> Self {
        use control_char::{BACKSPACE_CTRL_H, CARRIAGE_RETURN, CTRL_A, CTRL_C, CTRL_D,
                           CTRL_E, CTRL_K, CTRL_L, CTRL_U, DELETE, ESCAPE, LINE_FEED, TAB};
        match ch {
            CTRL_D => Self::EndOfInput,
            CTRL_C => Self::Interrupt,
            CTRL_A => Self::MoveToStart,
            CTRL_E => Self::MoveToEnd,
            CTRL_K => Self::KillToEnd,
            CTRL_U => Self::KillToStart,
            CTRL_L => Self::ClearScreen,
            DELETE | BACKSPACE_CTRL_H => Self::Backspace,
            LINE_FEED | CARRIAGE_RETURN => Self::Submit,
            TAB => Self::Tab,
            ESCAPE => Self::Escape,
            _ if ch.is_control() => Self::Unhandled(ch),
            _ => Self::Printable(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case('\u{01}', InputKey::MoveToStart)]
    #[test_case('\u{03}', InputKey::Interrupt)]
    #[test_case('\u{04}', InputKey::EndOfInput)]
    #[test_case('\u{05}', InputKey::MoveToEnd)]
    #[test_case('\u{0B}', InputKey::KillToEnd)]
    #[test_case('\u{0C}', InputKey::ClearScreen)]
    #[test_case('\u{15}', InputKey::KillToStart)]
    #[test_case('\u{7F}', InputKey::Backspace)]
    #[test_case('\u{08}', InputKey::Backspace)]
    #[test_case('\n', InputKey::Submit)]
    #[test_case('\r', InputKey::Submit)]
    #[test_case('\t', InputKey::Tab)]
    #[test_case('\u{1B}', InputKey::Escape)]
    #[test_case('a', InputKey::Printable('a'))]
    #[test_case(' ', InputKey::Printable(' '))]
    #[test_case('é', InputKey::Printable('é') ; "non ascii printable")]
    #[test_case('\u{02}', InputKey::Unhandled('\u{02}'))]
    #[test_case('\u{9B}', InputKey::Unhandled('\u{9B}'))]
    fn test_classify(ch: char, expected: InputKey) {
        assert_eq!(InputKey::from(ch), expected);
    }
}
