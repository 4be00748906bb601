// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Runs of the [`BasicLineEditor`] through the public API, with piped input and an
//! in memory stdout.

use pretty_assertions::assert_eq;
use r3bl_repl::{BasicLineEditor, DispatchContext, EVALUATOR_THREAD_NAME,
                EvaluationDispatcher, Finish, LineEditor, LoopResult, ReplConfig, StdMutex,
                lock_recover};
use r3bl_test_fixtures::StdoutMock;
use std::{io::Cursor, sync::Arc, thread};

#[test]
fn test_styled_prompt_is_printed_plain() {
    let stdout_mock = StdoutMock::new();
    let config = ReplConfig::default().with_prompt("\x1b[1;34mcalc>\x1b[0m ");
    let mut editor =
        BasicLineEditor::new(Cursor::new(b"1 + 1\n".to_vec()), stdout_mock.clone(), &config);

    let result = editor.run(|_line: String, finish: Finish| finish.finish(LoopResult::Continue));

    assert!(result.is_ok());
    let output = stdout_mock.get_copy_of_buffer_as_string();
    assert_eq!(output, stdout_mock.get_copy_of_buffer_as_string_strip_ansi());
    assert_eq!(output, "calc> calc> \n");
}

#[test]
fn test_evaluator_runs_on_named_os_thread() {
    let stdout_mock = StdoutMock::new();
    let thread_names = Arc::new(StdMutex::new(Vec::<Option<String>>::new()));
    let mut editor = BasicLineEditor::new(
        Cursor::new(b"a\nb\n".to_vec()),
        stdout_mock,
        &ReplConfig::default(),
    )
    .with_dispatcher(EvaluationDispatcher::new(DispatchContext::OsThread));

    let result = editor.run({
        let thread_names = thread_names.clone();
        move |_line: String, finish: Finish| {
            lock_recover!(thread_names).push(thread::current().name().map(str::to_string));
            finish.finish(LoopResult::Continue);
        }
    });

    assert!(result.is_ok());
    let expected = Some(EVALUATOR_THREAD_NAME.to_string());
    assert_eq!(*lock_recover!(thread_names), vec![expected.clone(), expected]);
}

#[test]
fn test_line_editor_wraps_basic_editor() {
    let stdout_mock = StdoutMock::new();
    let mut editor: LineEditor = BasicLineEditor::new(
        Cursor::new(b"stop\nnever\n".to_vec()),
        stdout_mock.clone(),
        &ReplConfig::default(),
    )
    .into();
    editor.set_prompt("? ");

    assert!(!editor.is_terminal());
    assert!(editor.terminal_restorer().is_none());

    let lines = Arc::new(StdMutex::new(Vec::<String>::new()));
    let result = editor.run({
        let lines = lines.clone();
        move |line: String, finish: Finish| {
            lock_recover!(lines).push(line);
            finish.finish(LoopResult::Break);
        }
    });

    assert!(result.is_ok());
    assert_eq!(*lock_recover!(lines), vec!["stop"]);
    assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "? \n");
}
