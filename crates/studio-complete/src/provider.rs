//! Tiered completion source selection.
//!
//! Exactly one source answers a request, tried in this order:
//!
//! 1. entity ids, when the text before the cursor ends in `domain.partial` and the snapshot
//!    has at least one match;
//! 2. YAML special tags, when the typed word starts with `!`;
//! 3. snippets, for `snip:<name>`;
//! 4. context tables chosen from the [`DocumentContext`];
//! 5. common keys followed by root keys.
//!
//! The result is filtered, sorted and capped by [`crate::rank`].

use crate::candidate::{Candidate, CandidateKind};
use crate::config::CompletionConfig;
use crate::context::{ContextResolver, DocumentContext};
use crate::error::CompletionError;
use crate::partial::PartialToken;
use crate::rank::{rank, sort_and_truncate};
use crate::snippet;
use regex::Regex;
use std::sync::Arc;
use studio_core::{
    EntityIndex, Position, Range, TextBuffer, TextEdit, char_to_byte, leading_whitespace,
};
use studio_schema::{CandidateTemplate, SchemaTables, SectionName, TableId};
use tracing::debug;

const ENTITY_PATTERN: &str = r"([A-Za-z_][A-Za-z0-9_]*\.[A-Za-z0-9_]*)$";
const SNIPPET_PATTERN: &str = r"(?i)(?:^|\s)(snip:([A-Za-z0-9_]*))$";
const MODE_PATTERN: &str = r"^\s*mode:\s*(\S*)$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Entity,
    Tag,
    Snippet,
    Context,
    Fallback,
}

#[derive(Debug, Clone)]
struct Patterns {
    entity: Regex,
    snippet: Regex,
    mode: Regex,
}

impl Patterns {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            entity: Regex::new(ENTITY_PATTERN)?,
            snippet: Regex::new(SNIPPET_PATTERN)?,
            mode: Regex::new(MODE_PATTERN)?,
        })
    }
}

#[derive(Debug, Clone)]
struct Engine {
    schema: Arc<SchemaTables>,
    patterns: Patterns,
}

/// The cursor line split at the cursor.
struct Request<'a> {
    line_index: usize,
    line: &'a str,
    column: usize,
    before: &'a str,
    after: &'a str,
    partial: PartialToken,
}

impl Request<'_> {
    fn partial_range(&self) -> Range {
        Range::on_line(self.line_index, self.partial.start, self.partial.end)
    }

    /// Range from the byte offset `start` in `before` up to the cursor.
    fn range_from(&self, start: usize) -> Range {
        let start_col = self.before[..start].chars().count();
        Range::on_line(self.line_index, start_col, self.column)
    }
}

/// Produces ranked completion candidates for a cursor position.
#[derive(Debug, Clone)]
pub struct SuggestionProvider {
    engine: Option<Engine>,
    resolver: ContextResolver,
    config: CompletionConfig,
}

impl SuggestionProvider {
    /// Build a provider over shared schema tables.
    pub fn new(
        schema: Arc<SchemaTables>,
        config: CompletionConfig,
    ) -> Result<Self, CompletionError> {
        let resolver = ContextResolver::new(&schema, &config);
        Ok(Self {
            engine: Some(Engine {
                schema,
                patterns: Patterns::new()?,
            }),
            resolver,
            config,
        })
    }

    /// A provider that never suggests anything.
    pub fn empty() -> Self {
        Self {
            engine: None,
            resolver: ContextResolver::default(),
            config: CompletionConfig::default(),
        }
    }

    /// Returns `true` for a provider built with [`SuggestionProvider::empty`].
    pub fn is_degraded(&self) -> bool {
        self.engine.is_none()
    }

    /// Context resolver used for the context tier.
    pub fn resolver(&self) -> &ContextResolver {
        &self.resolver
    }

    /// Active configuration.
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Candidates for `cursor` in `document`.
    ///
    /// `entities` is the latest entity snapshot; `None` behaves like an empty one. A cursor
    /// outside the document yields no candidates.
    pub fn suggest(
        &self,
        document: &impl TextBuffer,
        cursor: Position,
        entities: Option<&EntityIndex>,
    ) -> Vec<Candidate> {
        let Some(engine) = &self.engine else {
            return Vec::new();
        };
        let Some(line) = document.line(cursor.line) else {
            return Vec::new();
        };

        let column = cursor.column.min(line.chars().count());
        let split = char_to_byte(&line, column);
        let request = Request {
            line_index: cursor.line,
            line: &line,
            column,
            before: &line[..split],
            after: &line[split..],
            partial: PartialToken::at(&line, column),
        };

        let entity_hits = self.entity_tier(engine, &request, entities);
        let (tier, candidates) = if let Some(found) = entity_hits {
            (Tier::Entity, found)
        } else if let Some(found) = self.tag_tier(engine, &request) {
            (Tier::Tag, found)
        } else if let Some(found) = self.snippet_tier(engine, &request) {
            (Tier::Snippet, found)
        } else {
            let context = self.resolver.resolve(document, cursor.line);
            self.context_tier(engine, &request, &context)
        };

        debug!(
            ?tier,
            line = cursor.line,
            column,
            count = candidates.len(),
            "completion source selected"
        );
        candidates
    }

    fn entity_tier(
        &self,
        engine: &Engine,
        request: &Request<'_>,
        entities: Option<&EntityIndex>,
    ) -> Option<Vec<Candidate>> {
        let index = entities?;
        let typed = engine.patterns.entity.captures(request.before)?.get(1)?;
        let range = request.range_from(typed.start());

        let found: Vec<Candidate> = index
            .prefix_matches(typed.as_str())
            .map(|record| Candidate {
                text: record.entity_id.clone(),
                display_text: record.entity_id.clone(),
                kind: CandidateKind::Entity {
                    friendly_name: record.friendly_name.clone(),
                    icon: record.icon.clone(),
                    state: record.state.clone(),
                },
                description: record.friendly_name.clone(),
                edit: TextEdit::new(range, record.entity_id.clone()),
            })
            .collect();
        if found.is_empty() {
            return None;
        }
        Some(sort_and_truncate(found, typed.as_str(), self.config.max_results))
    }

    fn tag_tier(&self, engine: &Engine, request: &Request<'_>) -> Option<Vec<Candidate>> {
        if !request.partial.text.starts_with('!') {
            return None;
        }
        let range = request.partial_range();
        let space_follows = request.after.starts_with(char::is_whitespace);

        let tags = engine
            .schema
            .table(TableId::YamlTags)
            .iter()
            .map(|entry| {
                let text = if space_follows {
                    entry.text.trim_end()
                } else {
                    entry.text.as_str()
                };
                Candidate {
                    text: text.to_string(),
                    display_text: entry.text.trim_end().to_string(),
                    kind: entry.kind.into(),
                    description: entry.description.clone(),
                    edit: TextEdit::new(range, text),
                }
            })
            .collect();
        Some(rank(tags, &request.partial.text, self.config.max_results))
    }

    fn snippet_tier(&self, engine: &Engine, request: &Request<'_>) -> Option<Vec<Candidate>> {
        let caps = engine.patterns.snippet.captures(request.before)?;
        let typed = caps.get(1)?;
        let query = caps.get(2).map_or("", |m| m.as_str());
        let range = request.range_from(typed.start());
        let indent = leading_whitespace(request.line);

        let found = engine
            .schema
            .snippets()
            .iter()
            .filter(|template| snippet::matches(&template.name, query))
            .map(|template| {
                let body = snippet::reindent(&template.body, indent);
                Candidate {
                    text: body.clone(),
                    display_text: format!("snip:{}", template.name),
                    kind: CandidateKind::Snippet,
                    description: template.description.clone(),
                    edit: TextEdit::new(range, body),
                }
            })
            .collect();
        Some(sort_and_truncate(found, typed.as_str(), self.config.max_results))
    }

    fn context_tier(
        &self,
        engine: &Engine,
        request: &Request<'_>,
        context: &DocumentContext,
    ) -> (Tier, Vec<Candidate>) {
        let line_start = request.before.trim() == request.partial.text.trim();
        let range = request.partial_range();
        let query = request.partial.text.as_str();

        let tables: &[TableId] = if context.indent == 0 && line_start {
            &[TableId::RootKeys]
        } else if context.section == Some(SectionName::Automation) {
            if let Some(value) = engine
                .patterns
                .mode
                .captures(request.before)
                .and_then(|caps| caps.get(1))
            {
                let modes = table_candidates(
                    &engine.schema,
                    &[TableId::AutomationModes],
                    request.range_from(value.start()),
                );
                return (
                    Tier::Context,
                    rank(modes, value.as_str(), self.config.max_results),
                );
            }
            if context.in_trigger {
                &[TableId::Triggers]
            } else if context.in_condition {
                &[TableId::Conditions]
            } else if context.in_action {
                &[TableId::Services, TableId::ActionKeys]
            } else {
                &[TableId::Automation]
            }
        } else if context.section.as_ref().is_some_and(SectionName::is_sensor_like) {
            if context.in_platform {
                &[TableId::SensorPlatforms]
            } else {
                &[TableId::CommonKeys]
            }
        } else {
            let fallback = table_candidates(
                &engine.schema,
                &[TableId::CommonKeys, TableId::RootKeys],
                range,
            );
            return (
                Tier::Fallback,
                rank(fallback, query, self.config.max_results),
            );
        };

        let candidates = table_candidates(&engine.schema, tables, range);
        (Tier::Context, rank(candidates, query, self.config.max_results))
    }
}

fn table_candidates(schema: &SchemaTables, tables: &[TableId], range: Range) -> Vec<Candidate> {
    tables
        .iter()
        .flat_map(|&id| schema.table(id))
        .map(|entry| from_template(entry, range))
        .collect()
}

fn from_template(entry: &CandidateTemplate, range: Range) -> Candidate {
    Candidate {
        text: entry.text.clone(),
        display_text: entry.text.clone(),
        kind: entry.kind.into(),
        description: entry.description.clone(),
        edit: TextEdit::new(range, entry.text.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        let patterns = Patterns::new().unwrap();
        assert_eq!(&patterns.entity.captures("x: light.ki").unwrap()[1], "light.ki");
        assert!(patterns.entity.captures("x: 1.5").is_none());
        assert_eq!(&patterns.snippet.captures("  SNIP:auto").unwrap()[2], "auto");
        assert!(patterns.snippet.captures("xsnip:auto").is_none());
        assert_eq!(&patterns.mode.captures("  mode: que").unwrap()[1], "que");
    }

    #[test]
    fn test_empty_provider_has_no_candidates() {
        let provider = SuggestionProvider::empty();
        assert!(provider.is_degraded());
        assert!(
            provider
                .suggest(&["automation:"], Position::new(0, 3), None)
                .is_empty()
        );
    }
}
