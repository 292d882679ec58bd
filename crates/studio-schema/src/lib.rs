#![warn(missing_docs)]
//! `studio-schema` - static vocabulary data for the Blueprint Studio editing core.
//!
//! The tables are plain data: recognized root keys, automation sub-keys, trigger/condition
//! and service vocabularies, YAML special tags, sensor platforms and snippet bodies. They are
//! deserialized once from YAML (the built-in set lives in `schema/home_assistant.yaml`) and
//! never mutated afterwards; share them behind an `Arc`.

mod error;
mod section;
mod tables;

pub use error::SchemaError;
pub use section::SectionName;
pub use tables::{
    CandidateTemplate, EntryKind, HighlightVocabulary, SchemaTables, SnippetTemplate, TableId,
};
