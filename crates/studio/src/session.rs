use std::sync::Arc;
use studio_complete::{
    Candidate, CompletionConfig, ContextResolver, DocumentContext, SuggestionProvider,
};
use studio_core::{EntityIndex, Position, TextBuffer};
use studio_highlight::{LexState, LineStateCache, LineTokens, Token, Tokenizer};
use studio_schema::{SchemaError, SchemaTables};
use tracing::warn;

/// Everything one editor instance needs: tokenizer, context resolver, suggestion provider
/// and the latest entity snapshot.
///
/// A session is built from the outcome of loading schema tables. When loading failed, the
/// failure is logged and the session runs degraded: YAML-only highlighting and no
/// completions.
#[derive(Debug, Clone)]
pub struct EditingSession {
    schema: Option<Arc<SchemaTables>>,
    tokenizer: Tokenizer,
    provider: SuggestionProvider,
    entities: Option<EntityIndex>,
    line_states: LineStateCache,
}

impl EditingSession {
    /// Create a session with default completion settings.
    pub fn new(schema: Result<SchemaTables, SchemaError>) -> Self {
        Self::with_config(schema, CompletionConfig::default())
    }

    /// Create a session over the built-in tables.
    pub fn builtin() -> Self {
        Self::new(SchemaTables::builtin())
    }

    /// Create a session with explicit completion settings.
    pub fn with_config(
        schema: Result<SchemaTables, SchemaError>,
        config: CompletionConfig,
    ) -> Self {
        let schema = match schema {
            Ok(tables) => Some(Arc::new(tables)),
            Err(err) => {
                warn!(error = %err, "schema tables unavailable; editing session is degraded");
                None
            }
        };

        let tokenizer = Tokenizer::from_schema(schema.as_deref());
        let provider = match &schema {
            Some(tables) => SuggestionProvider::new(Arc::clone(tables), config)
                .unwrap_or_else(|err| {
                    warn!(error = %err, "completion engine unavailable");
                    SuggestionProvider::empty()
                }),
            None => SuggestionProvider::empty(),
        };

        Self {
            schema,
            tokenizer,
            provider,
            entities: None,
            line_states: LineStateCache::new(),
        }
    }

    /// Returns `true` if schema loading or engine set-up failed.
    pub fn is_degraded(&self) -> bool {
        self.schema.is_none() || self.tokenizer.is_degraded() || self.provider.is_degraded()
    }

    /// Loaded schema tables, if any.
    pub fn schema(&self) -> Option<&SchemaTables> {
        self.schema.as_deref()
    }

    /// The tokenizer.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// The context resolver used for completion.
    pub fn resolver(&self) -> &ContextResolver {
        self.provider.resolver()
    }

    /// Replace the entity snapshot.
    pub fn set_entities(&mut self, entities: EntityIndex) {
        self.entities = Some(entities);
    }

    /// Drop the entity snapshot; completion then sees zero entities.
    pub fn clear_entities(&mut self) {
        self.entities = None;
    }

    /// Current entity snapshot.
    pub fn entities(&self) -> Option<&EntityIndex> {
        self.entities.as_ref()
    }

    /// Tokenize one line.
    pub fn tokenize_line(&self, line: &str, state: LexState) -> (Vec<Token>, LexState) {
        self.tokenizer.tokenize(line, state)
    }

    /// Tokens for the visible `lines` of `document`, reusing cached line start states.
    pub fn visible_tokens(
        &mut self,
        document: &impl TextBuffer,
        lines: std::ops::Range<usize>,
    ) -> Vec<LineTokens> {
        self.line_states.tokens_for_range(&self.tokenizer, document, lines)
    }

    /// Forget cached line start states after `line`, the first line an edit touched.
    pub fn invalidate_from(&mut self, line: usize) {
        self.line_states.invalidate_from(line);
    }

    /// Context of `line`.
    pub fn context_at(&self, document: &impl TextBuffer, line: usize) -> DocumentContext {
        self.provider.resolver().resolve(document, line)
    }

    /// Completion candidates at `cursor`.
    pub fn complete(&self, document: &impl TextBuffer, cursor: Position) -> Vec<Candidate> {
        self.provider.suggest(document, cursor, self.entities.as_ref())
    }
}
