// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BasicLineEditor, Evaluator, Prompt, ReplError, SharedEvaluator,
            TerminalLineEditor, TerminalRestorer, TextCompletion};
use std::sync::Arc;

/// The editor chosen for the current console, see
/// [`crate::ReadEvaluatePrintLoop::try_new`].
#[derive(Debug)]
pub enum LineEditor {
    Terminal(TerminalLineEditor),
    Basic(BasicLineEditor),
}

impl From<TerminalLineEditor> for LineEditor {
    fn from(value: TerminalLineEditor) -> Self { Self::Terminal(value) }
}

impl From<BasicLineEditor> for LineEditor {
    fn from(value: BasicLineEditor) -> Self { Self::Basic(value) }
}

impl LineEditor {
    /// # Errors
    ///
    /// See [`TerminalLineEditor::run`] and [`BasicLineEditor::run`].
    pub fn run(&mut self, evaluator: impl Evaluator) -> Result<(), ReplError> {
        let evaluator: SharedEvaluator = Arc::new(evaluator);
        self.run_shared(&evaluator)
    }

    /// # Errors
    ///
    /// See [`TerminalLineEditor::run`] and [`BasicLineEditor::run`].
    pub fn run_shared(&mut self, evaluator: &SharedEvaluator) -> Result<(), ReplError> {
        match self {
            Self::Terminal(editor) => editor.run_shared(evaluator),
            Self::Basic(editor) => editor.run_shared(evaluator),
        }
    }

    /// Only the terminal editor changes the terminal's mode, so only it has something
    /// to restore.
    #[must_use]
    pub fn terminal_restorer(&self) -> Option<TerminalRestorer> {
        match self {
            Self::Terminal(editor) => Some(editor.terminal_restorer()),
            Self::Basic(_) => None,
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<Prompt>) {
        match self {
            Self::Terminal(editor) => editor.set_prompt(prompt),
            Self::Basic(editor) => editor.set_prompt(prompt),
        }
    }

    /// Ignored by the basic editor.
    pub fn set_text_completion(&mut self, text_completion: Option<Box<dyn TextCompletion>>) {
        if let Self::Terminal(editor) = self {
            editor.set_text_completion(text_completion);
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool { matches!(self, Self::Terminal(_)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Finish, LoopResult, ReplConfig, test_fixtures::MockConsole};
    use r3bl_test_fixtures::StdoutMock;
    use std::io::Cursor;

    #[test]
    fn test_only_terminal_editor_has_restorer() {
        let config = ReplConfig::default();
        let terminal: LineEditor =
            TerminalLineEditor::new(MockConsole::new((24, 80)), &config).into();
        let basic: LineEditor =
            BasicLineEditor::new(Cursor::new(vec![]), StdoutMock::new(), &config).into();

        assert!(terminal.is_terminal());
        assert!(terminal.terminal_restorer().is_some());
        assert!(!basic.is_terminal());
        assert!(basic.terminal_restorer().is_none());
    }

    #[test]
    fn test_run_dispatches_to_variant() {
        let stdout_mock = StdoutMock::new();
        let mut editor: LineEditor = BasicLineEditor::new(
            Cursor::new(b"hello\n".to_vec()),
            stdout_mock.clone(),
            &ReplConfig::default(),
        )
        .into();
        editor.set_prompt("? ");

        let result = editor.run(|line: String, finish: Finish| {
            assert_eq!(line, "hello");
            finish.finish(LoopResult::Break);
        });

        assert!(result.is_ok());
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "? \n");
    }
}
