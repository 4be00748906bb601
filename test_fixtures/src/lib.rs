// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Test fixtures shared by the workspace crates. These are dev-dependencies only.

// Attach.
pub mod output_device_fixtures;

// Re-export.
pub use output_device_fixtures::*;
