//! This module provides a [`Prompter`] with scripted answers, so that confirmations can be tested without a user

use std::collections::VecDeque;

use crate::traits::Prompter;

/// Answers questions from pre-recorded queues, and remembers what has been asked.
///
/// Once a queue is empty, confirmations are refused and prompts are cancelled.
#[derive(Default, Clone, Debug)]
pub struct MockPrompter {
    pub confirmations: VecDeque<bool>,
    pub answers: VecDeque<Option<String>>,

    /// Every message passed to `confirm` or `prompt`, in order
    pub asked: Vec<String>,
}

impl MockPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts the next `n` confirmations
    pub fn confirming(n: usize) -> Self {
        Self {
            confirmations: std::iter::repeat(true).take(n).collect(),
            ..Self::default()
        }
    }

    /// Answers the next prompts with these values, in order
    pub fn answering<S: ToString>(answers: &[Option<S>]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.as_ref().map(|s| s.to_string())).collect(),
            ..Self::default()
        }
    }
}

impl Prompter for MockPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        let answer = self.confirmations.pop_front().unwrap_or(false);
        log::debug!("Mock prompter: {} to {:?}", if answer { "confirming" } else { "refusing" }, message);
        answer
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        self.asked.push(message.to_string());
        let answer = self.answers.pop_front().flatten();
        log::debug!("Mock prompter: answering {:?} to {:?} (default {:?})", answer, message, default);
        answer
    }
}
