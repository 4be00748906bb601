// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BoxedConsole, CommandHistory, Console, ConsoleOp, EscapeSequence,
            EvaluationDispatcher, EvaluationRendezvous, Evaluator, HistoryNavigation,
            InputKey, InputReader, LineEditorState, LoopResult, Prompt, ReplConfig,
            ReplError, ScreenPos, SharedEvaluator, TerminalRestorer, TextCompletion, ok};
use std::{io, ops::ControlFlow, sync::Arc};

/// Full screen-aware line editor for an interactive terminal.
///
/// # Mental model
///
/// [`TerminalLineEditor::run`] puts the terminal in raw mode and loops over input
/// characters until the evaluator asks to stop, or the user presses Ctrl-C / Ctrl-D. For
/// each character it:
///
/// 1. Classifies it into an [`InputKey`] (or an [`EscapeSequence`] after `ESC`).
/// 2. Mutates the [`LineEditorState`] and the [`CommandHistory`].
/// 3. Compensates for scrolling, writes the buffer back into the live history entry,
///    and redraws the prompt line via [`TerminalLineEditor::render_and_flush`].
///
/// On Enter, the line is committed to history and handed to the [`Evaluator`] through
/// the [`EvaluationDispatcher`]. The reader then blocks on the
/// [`EvaluationRendezvous`]; no input is read and nothing is drawn until the evaluator
/// delivers its [`LoopResult`].
///
/// # Keys
///
/// | Key        | Effect                                                           |
/// |------------|------------------------------------------------------------------|
/// | Ctrl-D     | stop with [`ReplError::EndOfInput`]                              |
/// | Ctrl-C     | stop with [`ReplError::Interrupted`]                             |
/// | Ctrl-A / E | move to the start / end of the line                              |
/// | Ctrl-K / U | delete to the end / start of the line                            |
/// | Ctrl-L     | clear the screen, and start over with an empty line at the top   |
/// | Backspace  | delete the character before the cursor                           |
/// | Delete     | delete the character under the cursor, bell at the end           |
/// | Left/Right | move the cursor                                                  |
/// | Up/Down    | browse history, bell at either end                               |
/// | Tab        | complete via [`TextCompletion`], bell if there is nothing to do  |
/// | Enter      | submit                                                           |
///
/// # Cleanup
///
/// Every exit from `run` (including errors) goes through the console's
/// [`TerminalRestorer`], which restores the input mode, emits a newline, and flushes. It
/// runs at most once per session, even if a signal handler triggers it too.
#[derive(Debug)]
pub struct TerminalLineEditor {
    console: BoxedConsole,
    prompt: Prompt,
    text_completion: Option<Box<dyn TextCompletion>>,
    history: CommandHistory,
    reader: InputReader,
    rendezvous: EvaluationRendezvous,
    dispatcher: EvaluationDispatcher,
}

impl TerminalLineEditor {
    pub fn new(console: impl Console + 'static, config: &ReplConfig) -> Self {
        Self {
            console: Box::new(console),
            prompt: config.prompt.clone(),
            text_completion: None,
            history: CommandHistory::new(config.max_history_line_count),
            reader: InputReader::new(),
            rendezvous: EvaluationRendezvous::new(),
            dispatcher: EvaluationDispatcher::default(),
        }
    }

    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: EvaluationDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    #[must_use]
    pub fn with_text_completion(mut self, text_completion: impl TextCompletion + 'static) -> Self {
        self.text_completion = Some(Box::new(text_completion));
        self
    }

    pub fn set_text_completion(&mut self, text_completion: Option<Box<dyn TextCompletion>>) {
        self.text_completion = text_completion;
    }

    pub fn set_prompt(&mut self, prompt: impl Into<Prompt>) { self.prompt = prompt.into(); }

    #[must_use]
    pub fn prompt(&self) -> &Prompt { &self.prompt }

    #[must_use]
    pub fn history(&self) -> &CommandHistory { &self.history }

    #[must_use]
    pub fn terminal_restorer(&self) -> TerminalRestorer { self.console.terminal_restorer() }

    /// Run until the evaluator returns [`LoopResult::Break`] (which is `Ok`), or
    /// something stops the loop.
    ///
    /// # Errors
    ///
    /// - [`ReplError::EndOfInput`] on Ctrl-D, or when the input closes.
    /// - [`ReplError::Interrupted`] on Ctrl-C.
    /// - [`ReplError::Evaluation`] when the evaluator returns [`LoopResult::Error`].
    /// - [`ReplError::Io`] if the console fails.
    pub fn run(&mut self, evaluator: impl Evaluator) -> Result<(), ReplError> {
        let evaluator: SharedEvaluator = Arc::new(evaluator);
        self.run_shared(&evaluator)
    }

    /// Same as [`TerminalLineEditor::run`], for an evaluator that is already shared.
    ///
    /// # Errors
    ///
    /// See [`TerminalLineEditor::run`].
    pub fn run_shared(&mut self, evaluator: &SharedEvaluator) -> Result<(), ReplError> {
        let result = self.run_loop(evaluator);

        let restorer = self.console.terminal_restorer();
        match (result, restorer.restore()) {
            (Err(error), _) => {
                tracing::info!(message = "Line editor stopped", %error);
                Err(error)
            }
            (Ok(()), Err(error)) => Err(error.into()),
            (Ok(()), Ok(_)) => {
                tracing::info!(message = "Line editor stopped", reason = "break");
                ok!()
            }
        }
    }

    fn run_loop(&mut self, evaluator: &SharedEvaluator) -> Result<(), ReplError> {
        self.console.enable_raw_mode()?;
        self.console.terminal_restorer().arm();

        self.console.write_op(ConsoleOp::ClearLine)?;
        self.console.write_op(ConsoleOp::ToLineStart)?;
        let mut state = self.fresh_state()?;
        self.history.begin_session();
        self.console.write_str(self.prompt.styled())?;
        self.console.flush()?;

        tracing::info!(
            message = "Line editor started",
            start = %state.start(),
            terminal_size = ?state.terminal_size()
        );

        loop {
            state.set_terminal_size(self.console.window_size()?);

            let ch = self.reader.read_next(&mut *self.console)?;
            if self.process_input(&mut state, ch, evaluator)?.is_break() {
                return ok!();
            }

            let scrolled_by = state.compensate_scroll();
            self.history.update_live_entry(state.input());
            self.render_and_flush(&state)?;

            tracing::debug!(
                message = "Processed input",
                ch = ?ch,
                start = %state.start(),
                cursor = %state.cursor(),
                end = %state.end(),
                expanded_to_rows = state.expanded_to_rows(),
                scrolled_by,
                navigation_index = self.history.navigation_index()
            );
        }
    }

    /// Reposition to the prompt start, clear what follows, print the prompt and the
    /// buffer, and put the cursor back. Calling this twice with the same state produces
    /// the same output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the console fails.
    pub fn render_and_flush(&mut self, state: &LineEditorState) -> io::Result<()> {
        self.console.write_op(ConsoleOp::SetPosition(state.start()))?;
        self.console.write_op(ConsoleOp::ClearScreenFromCursor)?;
        self.console.write_str(self.prompt.styled())?;
        self.console.write_str(&state.input())?;
        self.console.write_op(ConsoleOp::SetPosition(state.cursor()))?;
        self.console.flush()
    }

    /// A new, empty line wherever the console's cursor is now.
    fn fresh_state(&mut self) -> Result<LineEditorState, ReplError> {
        let start = self.console.cursor_position()?;
        let terminal_size = self.console.window_size()?;
        ok!(LineEditorState::new(&self.prompt, start, terminal_size))
    }

    fn bell(&mut self) -> io::Result<()> { self.console.write_op(ConsoleOp::Bell) }

    fn process_input(
        &mut self,
        state: &mut LineEditorState,
        ch: char,
        evaluator: &SharedEvaluator,
    ) -> Result<ControlFlow<()>, ReplError> {
        match InputKey::from(ch) {
            InputKey::EndOfInput => return Err(ReplError::EndOfInput),
            InputKey::Interrupt => return Err(ReplError::Interrupted),
            InputKey::MoveToStart => state.move_to_start(),
            InputKey::MoveToEnd => state.move_to_end(),
            InputKey::KillToEnd => state.kill_to_end(),
            InputKey::KillToStart => state.kill_to_start(),
            InputKey::ClearScreen => {
                let home = ScreenPos::new(1, 1);
                self.console.write_op(ConsoleOp::ClearScreen)?;
                self.console.write_op(ConsoleOp::SetPosition(home))?;
                *state = LineEditorState::new(&self.prompt, home, state.terminal_size());
            }
            InputKey::Printable(ch) => {
                if state.insert(ch) {
                    // Scroll the terminal along with the model.
                    self.console.write_str("\n")?;
                }
            }
            InputKey::Backspace => {
                state.backspace();
            }
            InputKey::Submit => return self.submit(state, evaluator),
            InputKey::Tab => self.complete(state)?,
            InputKey::Escape => {
                if let Some(escape_sequence) =
                    EscapeSequence::decode(&mut self.reader, &mut *self.console)?
                {
                    self.apply_escape_sequence(state, escape_sequence)?;
                }
            }
            InputKey::Unhandled(_) => {}
        }

        ok!(ControlFlow::Continue(()))
    }

    fn submit(
        &mut self,
        state: &mut LineEditorState,
        evaluator: &SharedEvaluator,
    ) -> Result<ControlFlow<()>, ReplError> {
        state.move_to_end();
        self.console.write_op(ConsoleOp::SetPosition(state.end()))?;
        self.console.write_str("\n")?;
        self.console.write_op(ConsoleOp::ToLineStart)?;
        self.console.flush()?;

        let line = state.input();
        self.history.commit(&line);

        let finish = self.rendezvous.arm()?;
        if let Err(error) = self.dispatcher.dispatch(evaluator, line, finish) {
            // The dropped handle has delivered `Abandoned`, consume it.
            drop(self.rendezvous.wait());
            return Err(error.into());
        }

        match self.rendezvous.wait()? {
            LoopResult::Continue => {
                self.console.write_op(ConsoleOp::ToLineStart)?;
                *state = self.fresh_state()?;
                ok!(ControlFlow::Continue(()))
            }
            LoopResult::Break => ok!(ControlFlow::Break(())),
            LoopResult::Error(error) => Err(error.into()),
        }
    }

    fn complete(&mut self, state: &mut LineEditorState) -> Result<(), ReplError> {
        let Some(text_completion) = &self.text_completion else {
            self.bell()?;
            return ok!();
        };

        let input_before = state.input();
        let index_before = state.index();
        let (input, index) = text_completion.complete(&input_before, index_before);
        if input == input_before && index == index_before {
            self.bell()?;
            return ok!();
        }

        let expanded_before = state.expanded_to_rows();
        state.set_buffer(&input, index);
        self.reflow(state, expanded_before)?;
        ok!()
    }

    fn apply_escape_sequence(
        &mut self,
        state: &mut LineEditorState,
        escape_sequence: EscapeSequence,
    ) -> io::Result<()> {
        match escape_sequence {
            EscapeSequence::Up => {
                let navigation = self.history.navigate_older();
                self.recall_history(state, navigation)?;
            }
            EscapeSequence::Down => {
                let navigation = self.history.navigate_newer();
                self.recall_history(state, navigation)?;
            }
            EscapeSequence::Left => {
                state.move_left();
            }
            EscapeSequence::Right => {
                state.move_right();
            }
            EscapeSequence::Delete => {
                if !state.delete_at_cursor() {
                    self.bell()?;
                }
            }
        }
        ok!()
    }

    fn recall_history(
        &mut self,
        state: &mut LineEditorState,
        navigation: HistoryNavigation,
    ) -> io::Result<()> {
        if navigation == HistoryNavigation::AtBoundary {
            return self.bell();
        }

        let expanded_before = state.expanded_to_rows();
        let entry = self.history.current_entry().to_string();
        state.set_buffer(&entry, usize::MAX);
        self.reflow(state, expanded_before)
    }

    /// After the buffer was replaced: move to its end, and emit newlines if it now takes
    /// up more rows, so the terminal scrolls to make room.
    fn reflow(&mut self, state: &LineEditorState, expanded_before: isize) -> io::Result<()> {
        self.console.write_op(ConsoleOp::SetPosition(state.end()))?;
        let delta = state.expanded_to_rows() - expanded_before;
        if delta > 0 {
            self.console
                .write_str(&"\n".repeat(delta.unsigned_abs()))?;
        }
        ok!()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EvaluationError, Finish, StdMutex, WordListCompletion, lock_recover,
                test_fixtures::{ConsoleEvent, MockConsole}};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    struct Outcome {
        console: MockConsole,
        result: Result<(), ReplError>,
        lines: Vec<String>,
        history: Vec<String>,
    }

    /// Runs the editor against `input`. Lines are recorded, `quit` breaks, `fail` returns
    /// an error, and anything else continues.
    fn run_script(
        console: MockConsole,
        configure: impl FnOnce(TerminalLineEditor) -> TerminalLineEditor,
    ) -> Outcome {
        let lines = Arc::new(StdMutex::new(Vec::<String>::new()));
        let mut editor =
            configure(TerminalLineEditor::new(console.clone(), &ReplConfig::default()));

        let result = editor.run({
            let lines = lines.clone();
            move |line: String, finish: Finish| {
                let result = match line.as_str() {
                    "quit" => LoopResult::Break,
                    "fail" => LoopResult::error("boom"),
                    _ => LoopResult::Continue,
                };
                lock_recover!(lines).push(line);
                finish.finish(result);
            }
        });

        let lines = lock_recover!(lines).clone();
        let history = editor.history().entries().map(str::to_string).collect();
        Outcome { console, result, lines, history }
    }

    fn run_input(input: &str) -> Outcome {
        run_script(MockConsole::new((24, 80)).with_input(input), |it| it)
    }

    #[test]
    fn test_submit_line_then_end_of_input() {
        let outcome = run_input("hi\r");

        assert!(matches!(outcome.result, Err(ReplError::EndOfInput)));
        assert_eq!(outcome.lines, vec!["hi"]);
        assert_eq!(outcome.history, vec!["", "hi"]);
        assert_eq!(outcome.console.restore_count(), 1);
        assert!(!outcome.console.is_raw_mode());
        assert!(outcome.console.output_text().starts_with(">>> "));
    }

    #[test_case("hello\x01X\r", "Xhello" ; "ctrl a moves to start")]
    #[test_case("abc\x01\x05d\r", "abcd" ; "ctrl e moves to end")]
    #[test_case("abc\x15d\r", "d" ; "ctrl u kills to start")]
    #[test_case("abcdef\x01\x0bz\r", "z" ; "ctrl k kills to end")]
    #[test_case("ac\x1b[Db\r", "abc" ; "left arrow")]
    #[test_case("ac\x1b[D\x1b[Cb\r", "acb" ; "right arrow")]
    #[test_case("abc\x01\x1b[3~\r", "bc" ; "delete under cursor")]
    #[test_case("abx\x7fc\r", "abc" ; "backspace")]
    #[test_case("\x7f\x7fa\r", "a" ; "backspace at start")]
    #[test_case("\x1bxy\r", "xy" ; "unknown escape is dropped")]
    #[test_case("\x1b[3x\r", "[3x" ; "partial delete sequence is kept")]
    #[test_case("\x1b[Z\r", "[Z" ; "unknown csi is kept")]
    #[test_case("a\x02b\r", "ab" ; "unhandled control char")]
    fn test_editing_keys(input: &str, expected: &str) {
        let outcome = run_input(input);
        assert_eq!(outcome.lines, vec![expected]);
        assert_eq!(outcome.console.bell_count(), 0);
    }

    #[test]
    fn test_delete_at_end_rings_bell() {
        let outcome = run_input("abc\x1b[3~\r");
        assert_eq!(outcome.lines, vec!["abc"]);
        assert_eq!(outcome.console.bell_count(), 1);
    }

    #[test]
    fn test_up_with_empty_history_rings_bell() {
        let outcome = run_input("\x1b[A\x1b[B");
        assert_eq!(outcome.console.bell_count(), 2);
        assert_eq!(outcome.history, vec![""]);
        assert!(outcome.lines.is_empty());
    }

    #[test]
    fn test_history_recall_and_edit() {
        let outcome = run_input("one\rtwo\r\x1b[A\x1b[A!\r\x1b[A\x1b[B\r");

        assert_eq!(outcome.lines, vec!["one", "two", "one!", ""]);
        assert_eq!(outcome.console.bell_count(), 0);
        // The browsed entry keeps the edit, and the blank line isn't recorded.
        assert_eq!(outcome.history, vec!["", "one!", "two", "one!"]);
    }

    #[test]
    fn test_ctrl_d_and_ctrl_c() {
        let outcome = run_input("abc\x04ignored");
        assert!(matches!(outcome.result, Err(ReplError::EndOfInput)));
        assert_eq!(outcome.console.remaining_input(), "ignored");
        assert_eq!(outcome.console.restore_count(), 1);

        let outcome = run_input("abc\x03");
        assert!(matches!(outcome.result, Err(ReplError::Interrupted)));
        assert!(outcome.lines.is_empty());
        assert_eq!(outcome.console.restore_count(), 1);
    }

    #[test]
    fn test_break_stops_without_reading_further() {
        let outcome = run_input("quit\rmore");
        assert!(outcome.result.is_ok());
        assert_eq!(outcome.lines, vec!["quit"]);
        assert_eq!(outcome.console.remaining_input(), "more");
        assert_eq!(outcome.console.restore_count(), 1);
        assert!(!outcome.console.is_raw_mode());
    }

    #[test]
    fn test_evaluation_error_stops_loop() {
        let outcome = run_input("fail\rmore");
        assert!(matches!(
            outcome.result,
            Err(ReplError::Evaluation(EvaluationError::Failed(_)))
        ));
        assert_eq!(outcome.console.remaining_input(), "more");
        assert_eq!(outcome.console.restore_count(), 1);
    }

    #[test]
    fn test_panicking_evaluator_is_reported() {
        let console = MockConsole::new((24, 80)).with_input("x\rmore");
        let mut editor = TerminalLineEditor::new(console.clone(), &ReplConfig::default());
        let result = editor.run(|line: String, _finish: Finish| {
            assert!(line.is_empty(), "evaluator panic");
        });

        assert!(matches!(
            result,
            Err(ReplError::Evaluation(EvaluationError::Panicked))
        ));
        assert_eq!(console.restore_count(), 1);
    }

    #[test]
    fn test_tab_completion() {
        let outcome = run_script(MockConsole::new((24, 80)).with_input("ba\tzz\t\r"), |it| {
            it.with_text_completion(WordListCompletion::new(["banana", "water"]))
        });
        assert_eq!(outcome.lines, vec!["bananazz"]);
        assert_eq!(outcome.console.bell_count(), 1);
    }

    #[test]
    fn test_tab_without_completion_rings_bell() {
        let outcome = run_input("a\t\r");
        assert_eq!(outcome.lines, vec!["a"]);
        assert_eq!(outcome.console.bell_count(), 1);
    }

    #[test]
    fn test_ctrl_l_clears_screen_and_buffer() {
        let console = MockConsole::new((24, 80))
            .with_cursor(ScreenPos::new(10, 1))
            .with_input("abc\x0cd\r");
        let outcome = run_script(console, |it| it);

        assert_eq!(outcome.lines, vec!["d"]);
        assert_eq!(outcome.console.count_ops(ConsoleOp::ClearScreen), 1);
        assert!(outcome.console.events().contains(&ConsoleEvent::Op(
            ConsoleOp::SetPosition(ScreenPos::new(1, 1))
        )));
    }

    #[test]
    fn test_wrap_at_bottom_row_scrolls() {
        // Prompt ">>> " plus 8 characters in a 10 column window spills onto a second
        // row, which has to scroll the prompt row up by one.
        let console = MockConsole::new((3, 10))
            .with_cursor(ScreenPos::new(3, 1))
            .with_input("abcdefgh");
        let outcome = run_script(console, |it| it);

        let events = outcome.console.events();
        let newlines = events
            .iter()
            .filter(|it| **it == ConsoleEvent::Text("\n".into()))
            .count();
        assert_eq!(newlines, 1);

        let positions: Vec<ScreenPos> = events
            .iter()
            .filter_map(|it| match it {
                ConsoleEvent::Op(ConsoleOp::SetPosition(pos)) => Some(*pos),
                _ => None,
            })
            .collect();
        // The last redraw starts from the scrolled prompt row and puts the cursor after
        // the "h".
        assert_eq!(positions[positions.len() - 2..].to_vec(), vec![
            ScreenPos::new(2, 1),
            ScreenPos::new(3, 3)
        ]);
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let console = MockConsole::new((24, 80));
        let mut editor = TerminalLineEditor::new(console.clone(), &ReplConfig::default());
        let mut state = LineEditorState::new(editor.prompt(), ScreenPos::new(5, 1), (24, 80));
        "hello".chars().for_each(|ch| {
            state.insert(ch);
        });
        state.move_left();

        editor.render_and_flush(&state).unwrap();
        let first = console.take_events();
        editor.render_and_flush(&state).unwrap();
        let second = console.take_events();

        assert_eq!(first, second);
        assert_eq!(first, vec![
            ConsoleEvent::Op(ConsoleOp::SetPosition(ScreenPos::new(5, 1))),
            ConsoleEvent::Op(ConsoleOp::ClearScreenFromCursor),
            ConsoleEvent::Text(">>> ".into()),
            ConsoleEvent::Text("hello".into()),
            ConsoleEvent::Op(ConsoleOp::SetPosition(ScreenPos::new(5, 9))),
            ConsoleEvent::Flush,
        ]);
    }

    #[test]
    fn test_custom_prompt_is_used() {
        let console = MockConsole::new((24, 80)).with_input("x\r");
        let mut editor = TerminalLineEditor::new(console.clone(), &ReplConfig::default());
        editor.set_prompt("$ ");
        drop(editor.run(|_line: String, finish: Finish| finish.finish(LoopResult::Continue)));

        assert!(console.output_text().starts_with("$ "));
        assert!(!console.output_text().contains(">>>"));
    }
}
