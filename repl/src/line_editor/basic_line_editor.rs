// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{EvaluationDispatcher, EvaluationRendezvous, Evaluator, LoopResult, Prompt,
            ReplConfig, ReplError, SharedEvaluator, ok};
use std::{io::{self, BufRead, BufReader, Write},
          sync::Arc};

pub type SendBufRead = Box<dyn BufRead + Send>;
pub type SendWrite = Box<dyn Write + Send>;

/// Line-at-a-time loop for terminals that can't position the cursor (`TERM=dumb`), or
/// for piped input. Prints the plain prompt, reads a whole line, and evaluates it with
/// the same exactly-once handshake as [`crate::TerminalLineEditor`]. There is no
/// history, completion, or redrawing.
pub struct BasicLineEditor {
    input: SendBufRead,
    output: SendWrite,
    prompt: Prompt,
    rendezvous: EvaluationRendezvous,
    dispatcher: EvaluationDispatcher,
}

impl std::fmt::Debug for BasicLineEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicLineEditor")
            .field("prompt", &self.prompt)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl BasicLineEditor {
    pub fn new(
        input: impl BufRead + Send + 'static,
        output: impl Write + Send + 'static,
        config: &ReplConfig,
    ) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
            prompt: config.prompt.clone(),
            rendezvous: EvaluationRendezvous::new(),
            dispatcher: EvaluationDispatcher::default(),
        }
    }

    /// Reads from stdin and writes to stdout.
    #[must_use]
    pub fn new_stdio(config: &ReplConfig) -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout(), config)
    }

    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: EvaluationDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn set_prompt(&mut self, prompt: impl Into<Prompt>) { self.prompt = prompt.into(); }

    #[must_use]
    pub fn prompt(&self) -> &Prompt { &self.prompt }

    /// Run until the input ends or the evaluator returns [`LoopResult::Break`], both of
    /// which are `Ok`.
    ///
    /// # Errors
    ///
    /// - [`ReplError::Evaluation`] when the evaluator returns [`LoopResult::Error`].
    /// - [`ReplError::Io`] if reading or writing fails.
    pub fn run(&mut self, evaluator: impl Evaluator) -> Result<(), ReplError> {
        let evaluator: SharedEvaluator = Arc::new(evaluator);
        self.run_shared(&evaluator)
    }

    /// Same as [`BasicLineEditor::run`], for an evaluator that is already shared.
    ///
    /// # Errors
    ///
    /// See [`BasicLineEditor::run`].
    pub fn run_shared(&mut self, evaluator: &SharedEvaluator) -> Result<(), ReplError> {
        tracing::info!(message = "Basic line editor started");

        let stopped_with = loop {
            write!(self.output, "{}", self.prompt.plain())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break None;
            }
            trim_line_ending(&mut line);

            let finish = self.rendezvous.arm()?;
            if let Err(error) = self.dispatcher.dispatch(evaluator, line, finish) {
                drop(self.rendezvous.wait());
                return Err(error.into());
            }

            match self.rendezvous.wait()? {
                LoopResult::Continue => {}
                other => break Some(other),
            }
        };

        writeln!(self.output)?;
        self.output.flush()?;

        tracing::info!(message = "Basic line editor stopped", result = ?stopped_with);
        match stopped_with {
            Some(LoopResult::Error(error)) => Err(error.into()),
            _ => ok!(),
        }
    }
}

fn trim_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}
