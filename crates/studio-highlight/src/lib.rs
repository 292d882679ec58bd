#![warn(missing_docs)]
//! `studio-highlight` - line tokenizer for Home Assistant YAML with embedded templates.
//!
//! [`Tokenizer::tokenize`] is a pure function of `(line, LexState)`: it classifies the whole
//! line into [`Token`]s and returns the state the next line starts in. The YAML host grammar
//! hands over to the template grammar at `{{`, `{%` and `{#`, including inside quoted and
//! block scalars, and a Home Assistant overlay marks domain keys, structure keys and the
//! special tags.
//!
//! # Example
//!
//! ```
//! use studio_highlight::{LexState, TokenClass, Tokenizer};
//! use studio_schema::SchemaTables;
//!
//! let schema = SchemaTables::builtin().unwrap();
//! let tokenizer = Tokenizer::new(&schema).unwrap();
//! let line = "value: {{ states('x') }}";
//! let (tokens, end) = tokenizer.tokenize(line, LexState::start());
//!
//! assert_eq!(tokens[0].class, TokenClass::Key);
//! assert!(tokens.iter().any(|t| t.is_embedded()));
//! assert_eq!(end.embedded, None);
//! ```

mod cache;
mod host;
mod overlay;
mod state;
mod template;
mod token;
mod tokenizer;

pub use cache::{LineStateCache, LineTokens, highlight_document};
pub use state::{ExprKind, HostState, InnerMode, LexState, Quote};
pub use token::{Grammar, Overlay, Span, Token, TokenClass};
pub use tokenizer::{Tokenizer, TokenizerError};
