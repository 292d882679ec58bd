//! Cursor context from a bounded backward indentation scan.
//!
//! No YAML parse is attempted. Every non-blank line above the cursor that is indented less
//! than the cursor line contributes: its key may open a section (`automation:`) or one of the
//! automation sub-blocks. The comparison baseline is always the cursor line's own indentation,
//! measured in raw chars.

use crate::config::CompletionConfig;
use serde::{Deserialize, Serialize};
use studio_core::{TextBuffer, line_indent};
use studio_schema::{SchemaTables, SectionName};

/// Where the cursor sits, as far as the indentation scan can tell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentContext {
    /// Leading whitespace chars of the cursor line.
    pub indent: usize,
    /// Nearest enclosing root section.
    pub section: Option<SectionName>,
    /// Inside a `trigger:` / `triggers:` block.
    pub in_trigger: bool,
    /// Inside a `condition:` / `conditions:` block.
    pub in_condition: bool,
    /// Inside an `action:` / `actions:` block.
    pub in_action: bool,
    /// Below a `platform:` key.
    pub in_platform: bool,
}

/// Resolves a [`DocumentContext`] for a cursor line.
#[derive(Debug, Clone)]
pub struct ContextResolver {
    sections: Vec<SectionName>,
    max_scan_lines: usize,
}

const BUILTIN_SECTIONS: [&str; 6] = [
    "automation",
    "script",
    "scene",
    "sensor",
    "binary_sensor",
    "template",
];

impl Default for ContextResolver {
    fn default() -> Self {
        Self::with_sections(
            BUILTIN_SECTIONS.into_iter().map(SectionName::from_key),
            CompletionConfig::default().max_scan_lines,
        )
    }
}

impl ContextResolver {
    /// Use the section markers listed in `schema`.
    pub fn new(schema: &SchemaTables, config: &CompletionConfig) -> Self {
        Self::with_sections(schema.sections().iter().cloned(), config.max_scan_lines)
    }

    /// Use an explicit list of section markers.
    pub fn with_sections(
        sections: impl IntoIterator<Item = SectionName>,
        max_scan_lines: usize,
    ) -> Self {
        Self {
            sections: sections.into_iter().collect(),
            max_scan_lines,
        }
    }

    /// Resolve the context of `cursor_line`.
    ///
    /// A cursor past the end of the document resolves to the default context.
    pub fn resolve(&self, document: &impl TextBuffer, cursor_line: usize) -> DocumentContext {
        let mut context = DocumentContext::default();
        let Some(current) = document.line(cursor_line) else {
            return context;
        };
        context.indent = line_indent(&current);

        let floor = cursor_line.saturating_sub(self.max_scan_lines);
        for index in (floor..cursor_line).rev() {
            let Some(line) = document.line(index) else {
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }
            let indent = line_indent(&line);
            if indent >= context.indent {
                continue;
            }

            let key = line_key(&line);
            if context.section.is_none() {
                context.section = self
                    .sections
                    .iter()
                    .find(|section| section.as_key() == key)
                    .cloned();
            }
            match key {
                "trigger" | "triggers" => context.in_trigger = true,
                "condition" | "conditions" => context.in_condition = true,
                "action" | "actions" => context.in_action = true,
                "platform" => context.in_platform = true,
                _ => {}
            }

            if indent == 0 {
                break;
            }
        }

        tracing::trace!(cursor_line, ?context, "resolved document context");
        context
    }
}

/// Resolve with the built-in section markers and default scan bound.
pub fn resolve_context(document: &impl TextBuffer, cursor_line: usize) -> DocumentContext {
    ContextResolver::default().resolve(document, cursor_line)
}

/// The mapping key a line opens: trimmed, an optional `- ` item marker stripped, text before
/// the first `:`. Lines without a `:` have no key.
fn line_key(line: &str) -> &str {
    let trimmed = line.trim();
    let item = trimmed
        .strip_prefix('-')
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map_or(trimmed, str::trim_start);
    match item.split_once(':') {
        Some((key, _)) => key.trim_end(),
        None => "",
    }
}
