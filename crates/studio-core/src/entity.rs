//! Entity index snapshot.
//!
//! The surrounding application refreshes the entity list out-of-band (the `get_entities`
//! API action) and hands the editing core an immutable snapshot. Lookups never block: a
//! missing snapshot is the same as an empty one.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// One entity as reported by Home Assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Full entity id, e.g. `light.kitchen`.
    pub entity_id: String,
    /// `friendly_name` attribute, if any.
    #[serde(default)]
    pub friendly_name: Option<String>,
    /// `icon` attribute (e.g. `mdi:lightbulb`), if any.
    #[serde(default)]
    pub icon: Option<String>,
    /// Current state string.
    #[serde(default)]
    pub state: String,
}

impl EntityRecord {
    /// Create a record with only an id and a state.
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            friendly_name: None,
            icon: None,
            state: state.into(),
        }
    }

    /// Set the friendly name.
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// The domain part of the id (`light` for `light.kitchen`).
    pub fn domain(&self) -> &str {
        self.entity_id
            .split_once('.')
            .map_or(self.entity_id.as_str(), |(domain, _)| domain)
    }
}

#[derive(Debug, Error)]
/// Errors produced while parsing an entity snapshot.
pub enum EntityIndexError {
    #[error("entity JSON parse error: {0}")]
    /// The payload was not valid JSON or had the wrong shape.
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntityPayload {
    Wrapped { entities: Vec<EntityRecord> },
    Bare(Vec<EntityRecord>),
}

/// An ordered, immutable snapshot of entities. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    records: Arc<[EntityRecord]>,
}

impl EntityIndex {
    /// An empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from records, keeping their order.
    pub fn new(records: impl IntoIterator<Item = EntityRecord>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Parse the `get_entities` response (`{"entities": [...]}`) or a bare JSON array.
    pub fn from_json(json: &str) -> Result<Self, EntityIndexError> {
        let records = match serde_json::from_str::<EntityPayload>(json)? {
            EntityPayload::Wrapped { entities } => entities,
            EntityPayload::Bare(entities) => entities,
        };
        Ok(Self::new(records))
    }

    /// All records, in snapshot order.
    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the snapshot holds no entities.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose `entity_id` starts with `prefix` (ASCII case-insensitive).
    pub fn prefix_matches<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a EntityRecord> + 'a {
        self.records.iter().filter(move |record| {
            record
                .entity_id
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        })
    }
}
