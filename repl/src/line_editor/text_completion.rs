// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

/// Tab completion strategy. Receives the buffer and the cursor index (in characters),
/// and returns the new buffer and index. Returning them unchanged means "no
/// completion", and the editor rings the bell.
pub trait TextCompletion: Debug + Send {
    fn complete(&self, input: &str, index: usize) -> (String, usize);
}

/// Completes the word that ends at the cursor against a fixed list of words.
///
/// - A single match is completed in full.
/// - Several matches are completed up to their longest common prefix.
/// - An empty word, no matches, or no progress leaves the input unchanged.
#[derive(Debug, Clone, Default)]
pub struct WordListCompletion {
    words: Vec<String>,
}

impl WordListCompletion {
    pub fn new(words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl TextCompletion for WordListCompletion {
    fn complete(&self, input: &str, index: usize) -> (String, usize) {
        let chars: Vec<char> = input.chars().collect();
        let index = index.min(chars.len());
        let word_start = chars[..index]
            .iter()
            .rposition(|it| it.is_whitespace())
            .map_or(0, |it| it + 1);
        let prefix: String = chars[word_start..index].iter().collect();
        if prefix.is_empty() {
            return (input.to_string(), index);
        }

        let mut matches = self.words.iter().filter(|it| it.starts_with(&prefix));
        let Some(first) = matches.next() else {
            return (input.to_string(), index);
        };
        let completion = matches.fold(first.clone(), |acc, it| longest_common_prefix(&acc, it));

        let completion_len = completion.chars().count();
        if completion_len <= prefix.chars().count() {
            return (input.to_string(), index);
        }

        let mut output: String = chars[..word_start].iter().collect();
        output.push_str(&completion);
        output.extend(&chars[index..]);
        (output, word_start + completion_len)
    }
}

fn longest_common_prefix(lhs: &str, rhs: &str) -> String {
    lhs.chars()
        .zip(rhs.chars())
        .take_while(|(a, b)| a == b)
        .map(|(a, _)| a)
        .collect()
}
