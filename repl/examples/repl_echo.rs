// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Echoes each line back. Type `quit` or `exit` to stop, press Tab to complete one of
//! the words in [`WORDS`], and use Up / Down to recall earlier lines.
//!
//! Logs go to `repl_echo.log` in the current folder, since the terminal is in raw mode
//! while the editor runs. Follow them with `tail -f repl_echo.log`.

use miette::IntoDiagnostic;
use r3bl_repl::{Finish, LoopResult, ReadEvaluatePrintLoop, ReplConfig, SignalKind,
                StopReason, TracingConfig, WordListCompletion,
                try_initialize_logging_global};
use std::{io::Write, str::FromStr};
use strum_macros::{Display, EnumString};
use tracing_core::LevelFilter;

const WORDS: [&str; 4] = ["banana", "discombobulated", "water", "whatever"];

#[derive(Debug, PartialEq, EnumString, Display)]
enum Command {
    #[strum(ascii_case_insensitive)]
    Quit,

    #[strum(ascii_case_insensitive)]
    Exit,
}

/// Raw mode doesn't translate `\n`, hence the explicit `\r\n`.
fn evaluate(line: String, finish: Finish) {
    if Command::from_str(line.trim()).is_ok() {
        finish.finish(LoopResult::Break);
        return;
    }

    let mut stdout = std::io::stdout();
    let result = write!(stdout, "You entered: {line}\r\n").and_then(|()| stdout.flush());
    finish.finish(match result {
        Ok(()) => LoopResult::Continue,
        Err(error) => LoopResult::error(error),
    });
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    try_initialize_logging_global(TracingConfig::new_file(
        Some("repl_echo.log".to_string()),
        LevelFilter::DEBUG,
    ))?;

    let config = ReplConfig::default()
        .with_prompt("\x1b[1;32m>>>\x1b[0m ")
        .with_basic_fallback_when_not_a_terminal(true);
    let mut repl = ReadEvaluatePrintLoop::try_new(config)?;
    repl.set_text_completion(WordListCompletion::new(WORDS));

    let stop_reason = repl
        .run(evaluate, |kind: SignalKind| {
            tracing::info!(message = "Stopping on signal", %kind);
            true
        })
        .await?;

    match stop_reason {
        StopReason::Break => println!("Goodbye!"),
        StopReason::EndOfInput => println!("End of input."),
        StopReason::Signal(kind) => println!("Stopped by {kind}."),
    }

    std::io::stdout().flush().into_diagnostic()?;
    Ok(())
}
