// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end runs of the [`TerminalLineEditor`] against a [`MockConsole`], with the
//! evaluator on its own thread.

use crate::{ConsoleOp, DispatchContext, EVALUATOR_THREAD_NAME, EvaluationDispatcher, Finish,
            LoopResult, ReplConfig, ReplError, ScreenPos, StdMutex, TerminalLineEditor,
            lock_recover,
            test_fixtures::{ConsoleEvent, MockConsole}};
use pretty_assertions::assert_eq;
use std::{sync::Arc, thread, time::Duration};

fn continue_evaluator(
    lines: Arc<StdMutex<Vec<String>>>,
) -> impl Fn(String, Finish) + Send + Sync + 'static {
    move |line: String, finish: Finish| {
        lock_recover!(lines).push(line);
        finish.finish(LoopResult::Continue);
    }
}

#[test]
fn test_submit_renders_fresh_prompt_on_next_row() {
    let console = MockConsole::new((24, 80)).with_input("hi\r");
    let lines = Arc::new(StdMutex::new(vec![]));
    let mut editor = TerminalLineEditor::new(console.clone(), &ReplConfig::default());

    let result = editor.run(continue_evaluator(lines.clone()));

    assert!(matches!(result, Err(ReplError::EndOfInput)));
    assert_eq!(*lock_recover!(lines), vec!["hi"]);
    assert_eq!(editor.history().entries().collect::<Vec<_>>(), vec!["", "hi"]);

    let events = console.events();
    let fresh_prompt = [
        ConsoleEvent::Op(ConsoleOp::SetPosition(ScreenPos::new(2, 1))),
        ConsoleEvent::Op(ConsoleOp::ClearScreenFromCursor),
        ConsoleEvent::Text(">>> ".into()),
        ConsoleEvent::Text(String::new()),
        ConsoleEvent::Op(ConsoleOp::SetPosition(ScreenPos::new(2, 5))),
    ];
    assert!(events.windows(fresh_prompt.len()).any(|it| it == fresh_prompt));
}

#[test]
fn test_recalling_long_entry_scrolls_by_added_rows() {
    let long_line = "abcdefghijkl";
    let console = MockConsole::new((24, 10)).with_input(&format!("{long_line}\r\x1b[A\r"));
    let lines = Arc::new(StdMutex::new(vec![]));
    let mut editor = TerminalLineEditor::new(console.clone(), &ReplConfig::default());

    drop(editor.run(continue_evaluator(lines.clone())));

    assert_eq!(*lock_recover!(lines), vec![long_line, long_line]);
    assert_eq!(console.bell_count(), 0);

    // Wrap while typing, submit, one added row on recall, submit.
    let newlines = console
        .events()
        .iter()
        .filter(|it| **it == ConsoleEvent::Text("\n".into()))
        .count();
    assert_eq!(newlines, 4);
}

#[test]
fn test_reader_blocks_until_evaluator_finishes() {
    let console = MockConsole::new((24, 80))
        .with_blocking_input()
        .with_input("slow\r");
    let pending_finish = Arc::new(StdMutex::new(None::<Finish>));

    let reader = {
        let console = console.clone();
        let pending_finish = pending_finish.clone();
        thread::spawn(move || {
            let mut editor = TerminalLineEditor::new(console, &ReplConfig::default());
            editor.run(move |_line: String, finish: Finish| {
                *lock_recover!(pending_finish) = Some(finish);
            })
        })
    };

    // Wait for the evaluator to have been called.
    while lock_recover!(pending_finish).is_none() {
        thread::sleep(Duration::from_millis(5));
    }

    console.push_input("typed ahead");
    thread::sleep(Duration::from_millis(200));
    assert_eq!(console.remaining_input(), "typed ahead");
    assert!(!reader.is_finished());

    let finish = lock_recover!(pending_finish).take().unwrap();
    finish.finish(LoopResult::Break);

    assert!(reader.join().unwrap().is_ok());
    assert_eq!(console.remaining_input(), "typed ahead");
    assert_eq!(console.restore_count(), 1);
}

#[test]
fn test_history_capacity_from_config() {
    let console = MockConsole::new((24, 80)).with_input("a\rb\rc\r");
    let mut editor = TerminalLineEditor::new(
        console,
        &ReplConfig::default().with_max_history_line_count(3),
    );

    drop(editor.run(|_line: String, finish: Finish| finish.finish(LoopResult::Continue)));

    assert_eq!(editor.history().entries().collect::<Vec<_>>(), vec!["", "c", "b"]);
}

fn wait_for_output(console: &MockConsole, text: &str) {
    while !console.output_text().contains(text) {
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_resize_reflows_cursor_on_next_key() {
    let console = MockConsole::new((24, 80)).with_blocking_input();
    let reader = {
        let console = console.clone();
        thread::spawn(move || {
            let mut editor = TerminalLineEditor::new(console, &ReplConfig::default());
            editor.run(|_line: String, finish: Finish| finish.finish(LoopResult::Continue))
        })
    };

    console.push_input("abcdef");
    wait_for_output(&console, "abcdef");
    console.set_size((24, 10));
    // Ctrl-E changes nothing but forces a redraw with the new width.
    console.push_input("g\x05");
    wait_for_output(&console, "abcdefg");
    console.close_input();

    assert!(matches!(reader.join().unwrap(), Err(ReplError::EndOfInput)));

    // ">>> abcdefg" is 11 cells, so at width 10 the cursor sits on the second row.
    let last_position = console
        .events()
        .iter()
        .rev()
        .find_map(|it| match it {
            ConsoleEvent::Op(ConsoleOp::SetPosition(pos)) => Some(*pos),
            _ => None,
        });
    assert_eq!(last_position, Some(ScreenPos::new(2, 2)));
}

#[test]
fn test_evaluator_runs_on_named_os_thread() {
    let console = MockConsole::new((24, 80)).with_input("which\r");
    let thread_names = Arc::new(StdMutex::new(Vec::<Option<String>>::new()));
    let mut editor = TerminalLineEditor::new(console, &ReplConfig::default())
        .with_dispatcher(EvaluationDispatcher::new(DispatchContext::OsThread));

    drop(editor.run({
        let thread_names = thread_names.clone();
        move |_line: String, finish: Finish| {
            lock_recover!(thread_names).push(thread::current().name().map(str::to_string));
            finish.finish(LoopResult::Continue);
        }
    }));

    assert_eq!(*lock_recover!(thread_names), vec![Some(
        EVALUATOR_THREAD_NAME.to_string()
    )]);
}
