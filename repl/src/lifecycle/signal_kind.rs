// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;
use strum_macros::{Display, EnumIter};
use tokio::sync::mpsc;

/// Buffer size of the channel that carries OS signals to the control loop.
pub const SIGNAL_CHANNEL_CAPACITY: usize = 16;

/// OS signals that the [`crate::ReadEvaluatePrintLoop`] reports to its
/// [`SignalHandler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum SignalKind {
    /// `SIGINT`. In raw mode, Ctrl-C is read as input instead, so this only arrives
    /// from outside (eg: `kill -INT`).
    Interrupt,
    /// `SIGHUP`.
    Disconnect,
    /// `SIGTERM`.
    Terminate,
}

/// Decides what to do about a signal. Returning `true` stops the loop (restoring the
/// terminal first), `false` ignores the signal.
///
/// Any `FnMut(SignalKind) -> bool + Send + 'static` closure is a handler.
pub trait SignalHandler: Send + 'static {
    fn handle(&mut self, kind: SignalKind) -> bool;
}

impl<F> SignalHandler for F
where
    F: FnMut(SignalKind) -> bool + Send + 'static,
{
    fn handle(&mut self, kind: SignalKind) -> bool { self(kind) }
}

/// Install tokio signal listeners for every [`SignalKind`], and forward what they
/// receive into the returned channel. Must be called from inside a tokio runtime.
///
/// # Errors
///
/// Returns an error if a listener can't be registered.
#[cfg(unix)]
pub fn spawn_os_signal_forwarder() -> io::Result<mpsc::Receiver<SignalKind>> {
    use tokio::signal::unix::{SignalKind as OsSignalKind, signal};

    let (sender, receiver) = mpsc::channel(SIGNAL_CHANNEL_CAPACITY);
    for (os_signal_kind, kind) in [
        (OsSignalKind::interrupt(), SignalKind::Interrupt),
        (OsSignalKind::hangup(), SignalKind::Disconnect),
        (OsSignalKind::terminate(), SignalKind::Terminate),
    ] {
        let mut stream = signal(os_signal_kind)?;
        let sender = sender.clone();
        tokio::spawn(async move {
            while stream.recv().await.is_some() {
                if sender.send(kind).await.is_err() {
                    break;
                }
            }
        });
    }

    Ok(receiver)
}

/// Only Ctrl-C ([`SignalKind::Interrupt`]) can be observed on this platform.
///
/// # Errors
///
/// Returns an error if the listener can't be registered.
#[cfg(not(unix))]
pub fn spawn_os_signal_forwarder() -> io::Result<mpsc::Receiver<SignalKind>> {
    let (sender, receiver) = mpsc::channel(SIGNAL_CHANNEL_CAPACITY);
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if sender.send(SignalKind::Interrupt).await.is_err() {
                break;
            }
        }
    });
    Ok(receiver)
}
