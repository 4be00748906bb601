// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

/// Default for [`crate::ReplConfig::max_history_line_count`].
pub const HISTORY_SIZE_MAX: usize = 1_000;

/// Outcome of an Up / Down press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryNavigation {
    Moved,
    /// Already at the oldest (Up) or the live entry (Down). The caller rings the bell.
    AtBoundary,
}

/// Submitted lines, newest first. Entry 0 is the live, not yet submitted line, which is
/// kept in sync with the edit buffer while the user types. Browsing with Up / Down moves
/// the navigation index, and edits made while browsing are written back to the entry
/// being browsed.
#[derive(Debug)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    capacity: usize,
    navigation_index: usize,
}

impl Default for CommandHistory {
    fn default() -> Self { Self::new(HISTORY_SIZE_MAX) }
}

impl CommandHistory {
    /// `capacity` counts the live entry too, and is at least 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::default(),
            capacity: capacity.max(1),
            navigation_index: 0,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize { self.capacity }

    #[must_use]
    pub fn count(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn navigation_index(&self) -> usize { self.navigation_index }

    #[must_use]
    pub fn entry(&self, at: usize) -> Option<&str> { self.entries.get(at).map(String::as_str) }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> { self.entries.iter().map(String::as_str) }

    /// Add to the front, evicting the oldest entries beyond capacity.
    pub fn add_entry(&mut self, line: impl Into<String>) {
        self.entries.push_front(line.into());
        self.entries.truncate(self.capacity);
    }

    pub fn remove_first_entry(&mut self) -> Option<String> { self.entries.pop_front() }

    /// Returns `false` if there is no entry at `at`.
    pub fn update_entry(&mut self, line: impl Into<String>, at: usize) -> bool {
        match self.entries.get_mut(at) {
            Some(entry) => {
                *entry = line.into();
                true
            }
            None => false,
        }
    }

    /// Make sure there is an empty live entry, and stop browsing.
    pub fn begin_session(&mut self) {
        if self.entries.front().is_none_or(|it| !it.is_empty()) {
            self.add_entry("");
        }
        self.navigation_index = 0;
    }

    /// The entry at the navigation index.
    #[must_use]
    pub fn current_entry(&self) -> &str { self.entry(self.navigation_index).unwrap_or_default() }

    /// Write the edit buffer back into the entry at the navigation index.
    pub fn update_live_entry(&mut self, line: impl Into<String>) {
        let at = self.navigation_index;
        self.update_entry(line, at);
    }

    /// Up.
    pub fn navigate_older(&mut self) -> HistoryNavigation {
        if self.navigation_index + 1 >= self.count() {
            return HistoryNavigation::AtBoundary;
        }
        self.navigation_index += 1;
        HistoryNavigation::Moved
    }

    /// Down.
    pub fn navigate_newer(&mut self) -> HistoryNavigation {
        if self.navigation_index == 0 {
            return HistoryNavigation::AtBoundary;
        }
        self.navigation_index -= 1;
        HistoryNavigation::Moved
    }

    /// Record a submitted line: drop the live entry, keep `line` if it isn't blank, and
    /// start a fresh live entry.
    pub fn commit(&mut self, line: &str) {
        self.remove_first_entry();
        if !line.trim().is_empty() {
            self.add_entry(line);
        }
        self.add_entry("");
        self.navigation_index = 0;
    }
}
