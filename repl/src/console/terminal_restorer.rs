// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          io,
          sync::{Arc,
                 atomic::{AtomicBool, Ordering}}};

type RestoreFn = dyn Fn() -> io::Result<()> + Send + Sync + 'static;

/// Puts the terminal back the way it was: restores the input mode, emits a trailing
/// newline, moves to the line start, and flushes.
///
/// Clones share a single "pending" flag. After [`TerminalRestorer::arm`] the restore
/// function runs on the first call to [`TerminalRestorer::restore`] only, regardless of
/// which clone (or thread) makes the call. This is how the reader thread and the signal
/// path of [`crate::ReadEvaluatePrintLoop`] agree on running cleanup exactly once.
#[derive(Clone)]
pub struct TerminalRestorer {
    is_pending: Arc<AtomicBool>,
    restore_fn: Arc<RestoreFn>,
}

impl Debug for TerminalRestorer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalRestorer")
            .field("is_pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

impl TerminalRestorer {
    /// The restorer starts out disarmed; [`TerminalRestorer::restore`] is a no-op until
    /// [`TerminalRestorer::arm`] is called.
    pub fn new(restore_fn: impl Fn() -> io::Result<()> + Send + Sync + 'static) -> Self {
        Self {
            is_pending: Arc::new(AtomicBool::new(false)),
            restore_fn: Arc::new(restore_fn),
        }
    }

    /// Call this right after the terminal has been put in raw mode.
    pub fn arm(&self) { self.is_pending.store(true, Ordering::SeqCst); }

    #[must_use]
    pub fn is_pending(&self) -> bool { self.is_pending.load(Ordering::SeqCst) }

    /// Returns `Ok(true)` if this call performed the restore.
    ///
    /// # Errors
    ///
    /// Returns the error of the restore function. The restorer is not re-armed.
    pub fn restore(&self) -> io::Result<bool> {
        if self.is_pending.swap(false, Ordering::SeqCst) {
            (self.restore_fn)()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::atomic::AtomicUsize, thread};

    #[test]
    fn test_restore_runs_once_per_arm() {
        let count = Arc::new(AtomicUsize::new(0));
        let restorer = {
            let count = count.clone();
            TerminalRestorer::new(move || {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        };

        // Disarmed.
        assert!(!restorer.restore().unwrap());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        restorer.arm();
        let clone = restorer.clone();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let clone = clone.clone();
                thread::spawn(move || clone.restore().unwrap())
            })
            .collect();
        let ran: usize = handles
            .into_iter()
            .map(|it| usize::from(it.join().unwrap()))
            .sum();

        assert_eq!(ran, 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!restorer.is_pending());

        // Re-arm for the next session.
        restorer.arm();
        assert!(restorer.restore().unwrap());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
