// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Syntactic sugar for `Ok(())` and `Ok(value)`.
///
/// ```
/// use r3bl_repl::ok;
///
/// fn unit() -> std::io::Result<()> { ok!() }
/// fn value() -> std::io::Result<u8> { ok!(42) }
///
/// assert!(unit().is_ok());
/// assert_eq!(value().unwrap(), 42);
/// ```
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Lock a [`crate::StdMutex`], recovering the guard if a previous holder panicked.
///
/// The data guarded in this crate (rendezvous slot, mock console state) stays
/// consistent across a panic, since every mutation is a single assignment.
#[macro_export]
macro_rules! lock_recover {
    ($mutex:expr) => {
        $mutex
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    };
}
