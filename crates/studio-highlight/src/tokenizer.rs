//! Line tokenizer: YAML host grammar with embedded template blocks.

use crate::host::{self, LineContext};
use crate::overlay::HostOverlay;
use crate::state::{ExprKind, InnerMode, LexState};
use crate::template;
use crate::token::{Grammar, Overlay, Span, Token, TokenClass};
use studio_schema::SchemaTables;
use thiserror::Error;

/// Tokenizer construction error.
#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("failed to compile highlight vocabulary: {0}")]
    /// A vocabulary entry produced an invalid pattern.
    Vocabulary(#[from] regex::Error),
}

/// Tokenizes one line at a time, threading [`LexState`] across lines.
///
/// A tokenizer built without schema data is *host-only*: it lexes YAML but neither detects
/// template blocks nor applies the Home Assistant overlay.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    overlay: Option<HostOverlay>,
    embedding: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::host_only()
    }
}

impl Tokenizer {
    /// Build a full tokenizer from the schema's highlight vocabulary.
    pub fn new(schema: &SchemaTables) -> Result<Self, TokenizerError> {
        Ok(Self {
            overlay: Some(HostOverlay::new(schema.highlight())?),
            embedding: true,
        })
    }

    /// A tokenizer that only knows the YAML host grammar.
    pub fn host_only() -> Self {
        Self {
            overlay: None,
            embedding: false,
        }
    }

    /// Build from optional schema data, degrading to [`Tokenizer::host_only`] when the
    /// schema is missing or its vocabulary does not compile.
    pub fn from_schema(schema: Option<&SchemaTables>) -> Self {
        let Some(schema) = schema else {
            tracing::warn!("no schema tables; highlighting without template or overlay support");
            return Self::host_only();
        };
        match Self::new(schema) {
            Ok(tokenizer) => tokenizer,
            Err(err) => {
                tracing::warn!(error = %err, "tokenizer initialisation failed; using host-only mode");
                Self::host_only()
            }
        }
    }

    /// Returns `true` when template detection and the overlay are disabled.
    pub fn is_degraded(&self) -> bool {
        !self.embedding
    }

    /// Which grammar is active at the boundary described by `state`.
    pub fn inner_mode(state: &LexState) -> InnerMode<'_> {
        match state.embedded {
            Some(kind) => InnerMode::Embedded {
                kind,
                host: &state.host,
            },
            None => InnerMode::Host(&state.host),
        }
    }

    /// Tokenize `line` (without its line terminator) starting from `state`.
    ///
    /// Returns the tokens, which cover the whole line in order, and the state at the end of
    /// the line.
    pub fn tokenize(&self, line: &str, state: LexState) -> (Vec<Token>, LexState) {
        let mut state = state;
        if !self.embedding {
            state.embedded = None;
        }

        let mut ctx = LineContext::begin(line, &mut state.host, state.embedded.is_some());
        let mut tokens = Vec::new();
        let mut pos_byte = 0usize;
        let mut pos_char = 0usize;

        while pos_byte < line.len() {
            let rest = &line[pos_byte..];
            let (end, class, grammar, overlay) = match state.embedded {
                Some(kind) => match template::close_at(rest, kind) {
                    Some(len) => {
                        state.embedded = None;
                        (pos_byte + len, TokenClass::EmbeddedBracket, Grammar::Embedded, None)
                    }
                    None => {
                        let (end, class) = template::next_unit(line, pos_byte, kind);
                        (end, class, Grammar::Embedded, None)
                    }
                },
                None => match self.open_at(rest) {
                    Some((kind, len)) => {
                        state.embedded = Some(kind);
                        ctx.enter_embedded();
                        (pos_byte + len, TokenClass::EmbeddedBracket, Grammar::Embedded, None)
                    }
                    None => {
                        let unit = host::next_unit(
                            line,
                            pos_byte,
                            &mut state.host,
                            &mut ctx,
                            self.embedding,
                        );
                        let (class, overlay) = self.overlay(line, pos_byte, unit);
                        (unit.end, class, Grammar::Host, overlay)
                    }
                },
            };

            // Zero-width step: force one char of progress.
            let (end, class) = if end > pos_byte {
                (end, class)
            } else {
                let step = rest.chars().next().map_or(1, char::len_utf8);
                (pos_byte + step, TokenClass::Plain)
            };

            let chars = line[pos_byte..end].chars().count();
            push_token(
                &mut tokens,
                Token {
                    span: Span::new(pos_char, pos_char + chars),
                    class,
                    grammar,
                    overlay,
                },
            );
            pos_byte = end;
            pos_char += chars;
        }

        (tokens, state)
    }

    fn open_at(&self, rest: &str) -> Option<(ExprKind, usize)> {
        if self.embedding {
            template::open_at(rest)
        } else {
            None
        }
    }

    fn overlay(
        &self,
        line: &str,
        start: usize,
        unit: host::HostUnit,
    ) -> (TokenClass, Option<Overlay>) {
        match &self.overlay {
            Some(overlay) if unit.end > start => {
                overlay.apply(&line[start..unit.end], unit.class, unit.leading)
            }
            _ => (unit.class, None),
        }
    }
}

fn mergeable(class: TokenClass) -> bool {
    matches!(
        class,
        TokenClass::Comment | TokenClass::Plain | TokenClass::String
    )
}

/// Append `token`, extending the previous one when both share class, grammar and overlay.
fn push_token(tokens: &mut Vec<Token>, token: Token) {
    if let Some(last) = tokens.last_mut()
        && last.span.end == token.span.start
        && last.class == token.class
        && last.grammar == token.grammar
        && last.overlay == token.overlay
        && mergeable(token.class)
    {
        last.span.end = token.span.end;
        return;
    }
    tokens.push(token);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_token_coalesces_only_mergeable_classes() {
        let mut tokens = Vec::new();
        push_token(&mut tokens, Token::host(0, 1, TokenClass::Plain));
        push_token(&mut tokens, Token::host(1, 3, TokenClass::Plain));
        push_token(&mut tokens, Token::host(3, 4, TokenClass::Operator));
        push_token(&mut tokens, Token::host(4, 5, TokenClass::Operator));
        push_token(&mut tokens, Token::embedded(5, 6, TokenClass::Plain));
        assert_eq!(
            tokens,
            vec![
                Token::host(0, 3, TokenClass::Plain),
                Token::host(3, 4, TokenClass::Operator),
                Token::host(4, 5, TokenClass::Operator),
                Token::embedded(5, 6, TokenClass::Plain),
            ]
        );
    }

    #[test]
    fn test_host_only_ignores_template_markers() {
        let tokenizer = Tokenizer::host_only();
        let (tokens, state) = tokenizer.tokenize("value: {{ x }}", LexState::start());
        assert!(tokens.iter().all(|t| !t.is_embedded()));
        assert_eq!(state.embedded, None);
        assert!(tokenizer.is_degraded());
    }

    #[test]
    fn test_from_schema_without_tables_degrades() {
        assert!(Tokenizer::from_schema(None).is_degraded());
    }
}
