// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`MockConsole`] stands in for a raw mode terminal, so the editors can be driven from
//! unit tests. The stdout fake for the basic editor lives in `r3bl_test_fixtures`.

// Attach.
pub mod mock_console;

// Re-export.
pub use mock_console::*;
