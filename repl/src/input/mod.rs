// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod escape_sequence;
pub mod input_key;
pub mod input_reader;

// Re-export.
pub use escape_sequence::*;
pub use input_key::*;
pub use input_reader::*;
