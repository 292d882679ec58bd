#![warn(missing_docs)]
//! `studio-complete` - context resolution and ranked completions for Home Assistant YAML.
//!
//! [`ContextResolver`] infers where the cursor sits (root section, trigger/condition/action
//! block, sensor platform) from indentation alone. [`SuggestionProvider`] picks a single
//! candidate source for the request, filters it by the partially typed word and returns at
//! most [`CompletionConfig::max_results`] [`Candidate`]s, each with a [`TextEdit`] the host
//! applies.
//!
//! [`TextEdit`]: studio_core::TextEdit

mod candidate;
mod config;
mod context;
mod error;
mod partial;
mod provider;
pub mod rank;
mod snippet;

pub use candidate::{Candidate, CandidateKind};
pub use config::CompletionConfig;
pub use context::{ContextResolver, DocumentContext, resolve_context};
pub use error::CompletionError;
pub use partial::PartialToken;
pub use provider::SuggestionProvider;
pub use snippet::reindent;
