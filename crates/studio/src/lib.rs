#![warn(missing_docs)]
//! `studio` - the Blueprint Studio editing core behind one session object.
//!
//! ```
//! use studio::{EditingSession, LexState, Position};
//!
//! let session = EditingSession::builtin();
//! let doc = ["automation:", "  - condition:", "      - condition: dev"];
//!
//! let (tokens, _) = session.tokenize_line(doc[0], LexState::start());
//! assert_eq!(tokens[0].display_class(), "key ha-domain");
//!
//! let candidates = session.complete(&doc, Position::new(2, 22));
//! assert_eq!(candidates[0].display_text, "condition: device");
//! ```

mod session;

pub use session::EditingSession;

pub use studio_complete::{
    Candidate, CandidateKind, CompletionConfig, CompletionError, ContextResolver,
    DocumentContext, PartialToken, SuggestionProvider, resolve_context,
};
pub use studio_core::{
    EntityIndex, EntityIndexError, EntityRecord, LineIndex, Position, Range, TextBuffer,
    TextEdit, apply_text_edit,
};
pub use studio_highlight::{
    ExprKind, Grammar, InnerMode, LexState, LineStateCache, LineTokens, Overlay, Span, Token,
    TokenClass, Tokenizer, TokenizerError, highlight_document,
};
pub use studio_schema::{SchemaError, SchemaTables, SectionName};
