// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BasicLineEditor, ConsoleCapability, CrosstermConsole, Evaluator, LineEditor,
            Prompt, ReplConfig, ReplError, SharedEvaluator, SignalHandler, SignalKind,
            TerminalLineEditor, TerminalRestorer, TextCompletion, spawn_os_signal_forwarder};
use std::{io, sync::Arc, thread};
use tokio::sync::{mpsc, oneshot};

/// Name of the OS thread that runs the line editor.
pub const READER_THREAD_NAME: &str = "repl-reader";

/// Why [`ReadEvaluatePrintLoop::run`] returned normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The evaluator returned [`crate::LoopResult::Break`], or the basic editor ran out
    /// of input.
    Break,
    /// Ctrl-D, or the terminal input closed.
    EndOfInput,
    /// The [`SignalHandler`] accepted this signal, and process exit is disabled.
    Signal(SignalKind),
}

/// Owns the chosen [`LineEditor`] and supervises it.
///
/// The editor's input loop blocks, so it runs on its own OS thread
/// ([`READER_THREAD_NAME`]) and reports back through a oneshot channel. The async side
/// waits for either that report or an OS signal in a [`tokio::select!`] loop. This
/// object is explicitly constructed and consumed by `run`, so there is no process
/// wide instance.
///
/// | Outcome                    | Result                                               |
/// |----------------------------|------------------------------------------------------|
/// | `LoopResult::Break`        | `Ok(StopReason::Break)`                              |
/// | Ctrl-D                     | `Ok(StopReason::EndOfInput)`                         |
/// | Ctrl-C                     | restore, then exit the process, or `Err(Interrupted)` |
/// | `LoopResult::Error`        | `Err(ReplError::Evaluation)`                         |
/// | signal, handler is `true`  | restore, then exit, or `Ok(StopReason::Signal)`      |
/// | signal, handler is `false` | keep going                                           |
///
/// Process exit is controlled by [`ReplConfig::exit_process_on_interrupt`]. An
/// evaluation that is in flight when the loop stops is not cancelled, and on a signal
/// driven stop the reader thread is left detached.
#[derive(Debug)]
pub struct ReadEvaluatePrintLoop {
    editor: LineEditor,
    config: ReplConfig,
}

impl ReadEvaluatePrintLoop {
    /// Pick the editor for the current console. The terminal isn't touched until
    /// [`ReadEvaluatePrintLoop::run`].
    ///
    /// # Errors
    ///
    /// Returns [`ReplError::UnsupportedTerminal`] when stdin or stdout is not a terminal,
    /// unless [`ReplConfig::basic_fallback_when_not_a_terminal`] is set.
    pub fn try_new(config: ReplConfig) -> Result<Self, ReplError> {
        let capability = ConsoleCapability::probe();
        tracing::info!(message = "Probed console", ?capability);

        let fallback = config.basic_fallback_when_not_a_terminal;
        let editor: LineEditor = match (capability, fallback) {
            (ConsoleCapability::Interactive, _) => {
                TerminalLineEditor::new(CrosstermConsole::new(), &config).into()
            }
            (ConsoleCapability::Dumb, _) | (ConsoleCapability::NotATerminal, true) => {
                BasicLineEditor::new_stdio(&config).into()
            }
            (ConsoleCapability::NotATerminal, false) => {
                return Err(ReplError::UnsupportedTerminal);
            }
        };

        Ok(Self::with_editor(editor, config))
    }

    #[must_use]
    pub fn with_editor(editor: impl Into<LineEditor>, config: ReplConfig) -> Self {
        Self {
            editor: editor.into(),
            config,
        }
    }

    #[must_use]
    pub fn editor(&self) -> &LineEditor { &self.editor }

    #[must_use]
    pub fn config(&self) -> &ReplConfig { &self.config }

    pub fn set_prompt(&mut self, prompt: impl Into<Prompt>) {
        let prompt = prompt.into();
        self.config.prompt = prompt.clone();
        self.editor.set_prompt(prompt);
    }

    pub fn set_text_completion(&mut self, text_completion: impl TextCompletion + 'static) {
        self.editor.set_text_completion(Some(Box::new(text_completion)));
    }

    /// Run the loop, with `SIGINT`, `SIGHUP`, and `SIGTERM` routed to `signal_handler`.
    /// See [`ReadEvaluatePrintLoop`] for the possible outcomes.
    ///
    /// # Errors
    ///
    /// - [`ReplError::Interrupted`] on Ctrl-C, if process exit is disabled.
    /// - [`ReplError::Evaluation`] when the evaluator returns an error.
    /// - [`ReplError::Io`] if the console, a signal listener, or the reader thread
    ///   fails.
    pub async fn run(
        self,
        evaluator: impl Evaluator,
        signal_handler: impl SignalHandler,
    ) -> Result<StopReason, ReplError> {
        let signals = spawn_os_signal_forwarder()?;
        self.run_with_signals(evaluator, signal_handler, signals).await
    }

    /// Same as [`ReadEvaluatePrintLoop::run`], with signals taken from `signals`
    /// instead of the OS.
    ///
    /// # Errors
    ///
    /// See [`ReadEvaluatePrintLoop::run`].
    pub async fn run_with_signals(
        self,
        evaluator: impl Evaluator,
        mut signal_handler: impl SignalHandler,
        mut signals: mpsc::Receiver<SignalKind>,
    ) -> Result<StopReason, ReplError> {
        let Self { mut editor, config } = self;
        let restorer = editor.terminal_restorer();
        let evaluator: SharedEvaluator = Arc::new(evaluator);

        let (result_sender, mut result_receiver) = oneshot::channel();
        thread::Builder::new()
            .name(READER_THREAD_NAME.into())
            .spawn(move || {
                let result = editor.run_shared(&evaluator);
                // The control loop is gone if a signal stopped it.
                drop(result_sender.send(result));
            })?;

        loop {
            tokio::select! {
                result = &mut result_receiver => {
                    let result = result.unwrap_or_else(|_| {
                        Err(io::Error::other("reader thread exited without a result").into())
                    });
                    return handle_editor_result(result, &config, restorer.as_ref());
                }
                Some(kind) = signals.recv() => {
                    tracing::info!(message = "Received signal", %kind);
                    if signal_handler.handle(kind) {
                        restore_terminal(restorer.as_ref());
                        exit_process_if_configured(&config);
                        return Ok(StopReason::Signal(kind));
                    }
                    tracing::info!(message = "Signal suppressed by handler", %kind);
                }
            }
        }
    }
}

fn handle_editor_result(
    result: Result<(), ReplError>,
    config: &ReplConfig,
    restorer: Option<&TerminalRestorer>,
) -> Result<StopReason, ReplError> {
    match result {
        Ok(()) => Ok(StopReason::Break),
        Err(ReplError::EndOfInput) => {
            restore_terminal(restorer);
            Ok(StopReason::EndOfInput)
        }
        Err(ReplError::Interrupted) => {
            restore_terminal(restorer);
            exit_process_if_configured(config);
            Err(ReplError::Interrupted)
        }
        Err(error) => {
            restore_terminal(restorer);
            tracing::error!(message = "Read evaluate print loop failed", %error);
            Err(error)
        }
    }
}

/// No-op if the editor already restored the terminal.
fn restore_terminal(restorer: Option<&TerminalRestorer>) {
    let Some(restorer) = restorer else { return };
    if let Err(error) = restorer.restore() {
        tracing::warn!(message = "Could not restore terminal", %error);
    }
}

fn exit_process_if_configured(config: &ReplConfig) {
    if config.exit_process_on_interrupt {
        tracing::info!(message = "Exiting process");
        std::process::exit(0);
    }
}
