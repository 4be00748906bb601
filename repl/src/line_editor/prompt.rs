// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter};

pub const DEFAULT_PROMPT: &str = ">>> ";

/// Prompt text, which may contain ANSI styling. The plain length (character count with
/// the escape sequences stripped) is what the cursor math uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    styled: String,
    plain: String,
}

impl Prompt {
    pub fn new(styled: impl Into<String>) -> Self {
        let styled = styled.into();
        let plain = strip_ansi_escapes::strip_str(&styled);
        Self { styled, plain }
    }

    #[must_use]
    pub fn styled(&self) -> &str { &self.styled }

    /// Used where cursor control is unavailable, eg: [`crate::BasicLineEditor`].
    #[must_use]
    pub fn plain(&self) -> &str { &self.plain }

    #[must_use]
    pub fn plain_len(&self) -> usize { self.plain.chars().count() }
}

impl Default for Prompt {
    fn default() -> Self { Self::new(DEFAULT_PROMPT) }
}

impl From<&str> for Prompt {
    fn from(value: &str) -> Self { Self::new(value) }
}

impl From<String> for Prompt {
    fn from(value: String) -> Self { Self::new(value) }
}

impl Display for Prompt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.styled) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_len_ignores_ansi() {
        let prompt = Prompt::new("\x1b[1;32m>>>\x1b[0m ");
        assert_eq!(prompt.plain(), ">>> ");
        assert_eq!(prompt.plain_len(), 4);
        assert_eq!(prompt.to_string(), "\x1b[1;32m>>>\x1b[0m ");
    }

    #[test]
    fn test_default() {
        assert_eq!(Prompt::default().plain_len(), DEFAULT_PROMPT.len());
    }
}
