// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{EvaluationError, LoopResult, RendezvousError, StdMutex, lock_recover};
use std::{fmt::{Debug, Formatter},
          sync::{Arc, Condvar, PoisonError},
          thread,
          time::{Duration, Instant}};

#[derive(Debug)]
enum SlotState {
    Idle,
    /// An evaluation has been dispatched and has not delivered yet.
    Armed,
    /// Delivered, waiting for the reader to pick it up.
    Fulfilled(LoopResult),
}

#[derive(Debug)]
struct Inner {
    slot: StdMutex<SlotState>,
    condvar: Condvar,
}

/// Single slot mailbox between the reader (which waits) and the evaluator (which
/// finishes). At most one evaluation can be outstanding: [`EvaluationRendezvous::arm`]
/// refuses to arm again until the reader has consumed the previous result via
/// [`EvaluationRendezvous::wait`].
///
/// Cloning is cheap, since it only clones the [Arc].
#[derive(Debug, Clone)]
pub struct EvaluationRendezvous {
    inner: Arc<Inner>,
}

impl Default for EvaluationRendezvous {
    fn default() -> Self {
        Self {
            inner: Arc::new(Inner {
                slot: StdMutex::new(SlotState::Idle),
                condvar: Condvar::new(),
            }),
        }
    }
}

impl EvaluationRendezvous {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Arm the slot for one evaluation and return the handle the evaluator must use to
    /// deliver its result.
    ///
    /// # Errors
    ///
    /// Returns [`RendezvousError::AlreadyArmed`] if a previous evaluation is still
    /// outstanding, or its result has not been consumed.
    pub fn arm(&self) -> Result<Finish, RendezvousError> {
        let mut slot = lock_recover!(self.inner.slot);
        if !matches!(*slot, SlotState::Idle) {
            return Err(RendezvousError::AlreadyArmed);
        }
        *slot = SlotState::Armed;
        Ok(Finish {
            rendezvous: Some(self.clone()),
        })
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        !matches!(*lock_recover!(self.inner.slot), SlotState::Idle)
    }

    /// Block until the outstanding evaluation delivers its result. There is no timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RendezvousError::NotArmed`] if nothing was dispatched.
    pub fn wait(&self) -> Result<LoopResult, RendezvousError> {
        let mut slot = lock_recover!(self.inner.slot);
        loop {
            if matches!(*slot, SlotState::Idle) {
                return Err(RendezvousError::NotArmed);
            }
            if matches!(*slot, SlotState::Fulfilled(_)) {
                return Ok(take_result(&mut slot));
            }
            slot = self
                .inner
                .condvar
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Like [`EvaluationRendezvous::wait`], but gives up after `timeout`. Returns
    /// `Ok(None)` on timeout, in which case the slot stays armed.
    ///
    /// # Errors
    ///
    /// Returns [`RendezvousError::NotArmed`] if nothing was dispatched.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<Option<LoopResult>, RendezvousError> {
        let deadline = Instant::now() + timeout;
        let mut slot = lock_recover!(self.inner.slot);
        loop {
            if matches!(*slot, SlotState::Idle) {
                return Err(RendezvousError::NotArmed);
            }
            if matches!(*slot, SlotState::Fulfilled(_)) {
                return Ok(Some(take_result(&mut slot)));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            slot = self
                .inner
                .condvar
                .wait_timeout(slot, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    fn fulfill(&self, result: LoopResult) {
        let mut slot = lock_recover!(self.inner.slot);
        if matches!(*slot, SlotState::Armed) {
            *slot = SlotState::Fulfilled(result);
            self.inner.condvar.notify_all();
        } else {
            tracing::warn!(message = "Dropping result delivered to a slot that is not armed", ?result);
        }
    }
}

fn take_result(slot: &mut SlotState) -> LoopResult {
    match std::mem::replace(slot, SlotState::Idle) {
        SlotState::Fulfilled(result) => result,
        // Callers only reach here from the `Fulfilled` arm.
        SlotState::Idle | SlotState::Armed => LoopResult::Error(EvaluationError::Abandoned),
    }
}

/// Completion handle for one evaluation. Calling [`Finish::finish`] consumes it, so a
/// result can be delivered at most once.
///
/// If the handle is dropped without being called, the reader is still woken up: with
/// [`EvaluationError::Panicked`] if the drop happens while the thread is unwinding, and
/// with [`EvaluationError::Abandoned`] otherwise.
pub struct Finish {
    rendezvous: Option<EvaluationRendezvous>,
}

impl Debug for Finish {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Finish")
            .field("is_pending", &self.rendezvous.is_some())
            .finish()
    }
}

impl Finish {
    /// Deliver the result and wake up the reader. This can be called from any thread.
    pub fn finish(mut self, result: LoopResult) {
        if let Some(rendezvous) = self.rendezvous.take() {
            rendezvous.fulfill(result);
        }
    }
}

impl Drop for Finish {
    fn drop(&mut self) {
        if let Some(rendezvous) = self.rendezvous.take() {
            let error = if thread::panicking() {
                EvaluationError::Panicked
            } else {
                EvaluationError::Abandoned
            };
            tracing::warn!(message = "Evaluation ended without a result", %error);
            rendezvous.fulfill(LoopResult::Error(error));
        }
    }
}
