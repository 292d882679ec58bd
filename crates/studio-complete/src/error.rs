use thiserror::Error;

/// Completion engine construction error.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("failed to compile completion pattern: {0}")]
    /// A trigger pattern did not compile.
    Pattern(#[from] regex::Error),
}
