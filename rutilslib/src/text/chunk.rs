//! Splitting long text into bounded chunks.
//!
//! Chat platforms cap message length, so long output is split on a delimiter
//! and greedily packed into chunks that stay within the bound. A single token
//! longer than the bound is never cut; it becomes its own oversized chunk.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Chunking configuration.
///
/// Lengths are measured in chars. A `max_length` of 0 puts every non-empty
/// token in its own chunk, since nothing can be appended to a started chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunker {
    /// Upper bound for the length of a chunk made of several tokens
    pub max_length: usize,
    /// Delimiter used to tokenize the input and to glue tokens within a chunk
    pub split_delimiter: String,
    /// Delimiter placed between chunks in [`Chunker::split`] output
    pub join_delimiter: String,
}

impl Chunker {
    /// Split on spaces and join chunks with newlines.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            split_delimiter: " ".to_string(),
            join_delimiter: "\n".to_string(),
        }
    }

    /// Builder: set the tokenizing delimiter
    pub fn with_split_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.split_delimiter = delimiter.into();
        self
    }

    /// Builder: set the delimiter placed between chunks
    pub fn with_join_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.join_delimiter = delimiter.into();
        self
    }

    /// Pack the tokens of `text` into chunks.
    ///
    /// Empty tokens produced by repeated delimiters are kept. An empty split
    /// delimiter treats the whole text as one token.
    pub fn chunks(&self, text: &str) -> Vec<String> {
        let tokens: Vec<&str> = if self.split_delimiter.is_empty() {
            vec![text]
        } else {
            text.split(self.split_delimiter.as_str()).collect()
        };
        let delimiter_len = self.split_delimiter.chars().count();

        let mut chunks = Vec::new();
        let mut chunk = String::new();
        let mut chunk_len = 0;

        for token in &tokens {
            let token_len = token.chars().count();

            if chunk.is_empty() {
                chunk.push_str(token);
                chunk_len = token_len;
            } else if chunk_len + delimiter_len + token_len <= self.max_length {
                chunk.push_str(&self.split_delimiter);
                chunk.push_str(token);
                chunk_len += delimiter_len + token_len;
            } else {
                chunks.push(std::mem::take(&mut chunk));
                chunk.push_str(token);
                chunk_len = token_len;
            }
        }

        if !chunk.is_empty() {
            chunks.push(chunk);
        }

        debug!(
            tokens = tokens.len(),
            chunks = chunks.len(),
            max_length = self.max_length,
            "split text into chunks"
        );
        chunks
    }

    /// Pack `text` into chunks and join them with the join delimiter.
    pub fn split(&self, text: &str) -> String {
        self.chunks(text).join(&self.join_delimiter)
    }
}

/// Split on spaces into chunks of at most `max_length` chars, one per line.
pub fn split_in_chunks(text: &str, max_length: usize) -> String {
    Chunker::new(max_length).split(text)
}
