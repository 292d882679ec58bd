//! Per-line start-state cache for incremental re-tokenizing.

use crate::state::LexState;
use crate::token::Token;
use crate::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use studio_core::TextBuffer;

/// Tokens of one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTokens {
    /// Zero-based line index.
    pub line: usize,
    /// Tokens covering the line.
    pub tokens: Vec<Token>,
}

/// Stores the [`LexState`] at the start of each line already seen.
///
/// Entry `i` is the state the tokenizer starts line `i` in; entry 0 is always
/// [`LexState::start`]. After an edit on line `n`, call [`invalidate_from`](Self::invalidate_from)
/// with `n`; lines up to and including `n` keep their start states.
#[derive(Debug, Clone)]
pub struct LineStateCache {
    start_states: Vec<LexState>,
}

impl Default for LineStateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LineStateCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self {
            start_states: vec![LexState::start()],
        }
    }

    /// Drop every cached state after the start of `line`.
    pub fn invalidate_from(&mut self, line: usize) {
        self.start_states.truncate(line + 1);
    }

    /// Cached start state of `line`, if known.
    pub fn start_state(&self, line: usize) -> Option<LexState> {
        self.start_states.get(line).copied()
    }

    /// Number of lines whose start state is cached.
    pub fn cached_lines(&self) -> usize {
        self.start_states.len()
    }

    /// Tokenize `range` of `buffer`, filling in start states from the last cached line.
    ///
    /// Lines past the end of the buffer are ignored.
    pub fn tokens_for_range(
        &mut self,
        tokenizer: &Tokenizer,
        buffer: &impl TextBuffer,
        range: Range<usize>,
    ) -> Vec<LineTokens> {
        let end = range.end.min(buffer.line_count());
        if range.start >= end {
            return Vec::new();
        }

        while self.start_states.len() <= range.start {
            let line = self.start_states.len() - 1;
            let text = buffer.line(line).unwrap_or_default();
            let (_, next) = tokenizer.tokenize(&text, self.start_states[line]);
            self.start_states.push(next);
        }

        let mut out = Vec::with_capacity(end - range.start);
        for line in range.start..end {
            let text = buffer.line(line).unwrap_or_default();
            let (tokens, next) = tokenizer.tokenize(&text, self.start_states[line]);
            match self.start_states.get(line + 1) {
                None => self.start_states.push(next),
                Some(cached) if *cached != next => {
                    self.start_states.truncate(line + 1);
                    self.start_states.push(next);
                }
                Some(_) => {}
            }
            out.push(LineTokens { line, tokens });
        }
        out
    }
}

/// Tokenize every line of `buffer` from the document start state.
pub fn highlight_document(tokenizer: &Tokenizer, buffer: &impl TextBuffer) -> Vec<LineTokens> {
    let mut state = LexState::start();
    (0..buffer.line_count())
        .map(|line| {
            let text = buffer.line(line).unwrap_or_default();
            let (tokens, next) = tokenizer.tokenize(&text, state);
            state = next;
            LineTokens { line, tokens }
        })
        .collect()
}
