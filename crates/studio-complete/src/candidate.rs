use serde::{Deserialize, Serialize};
use studio_core::TextEdit;
use studio_schema::EntryKind;

/// Category of a completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CandidateKind {
    /// Root configuration domain.
    Domain,
    /// Mapping key.
    Key,
    /// Scalar value.
    Value,
    /// Trigger form.
    Trigger,
    /// Condition form.
    Condition,
    /// Service call.
    Service,
    /// Sensor platform.
    Platform,
    /// YAML special tag.
    Tag,
    /// Multi-line snippet.
    Snippet,
    /// Entity from the host's entity snapshot.
    Entity {
        /// Human-readable name.
        friendly_name: Option<String>,
        /// Icon identifier (`mdi:lightbulb`).
        icon: Option<String>,
        /// State at snapshot time.
        state: String,
    },
}

impl CandidateKind {
    /// Short category name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Key => "key",
            Self::Value => "value",
            Self::Trigger => "trigger",
            Self::Condition => "condition",
            Self::Service => "service",
            Self::Platform => "platform",
            Self::Tag => "tag",
            Self::Snippet => "snippet",
            Self::Entity { .. } => "entity",
        }
    }
}

impl From<EntryKind> for CandidateKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Domain => Self::Domain,
            EntryKind::Key => Self::Key,
            EntryKind::Value => Self::Value,
            EntryKind::Trigger => Self::Trigger,
            EntryKind::Condition => Self::Condition,
            EntryKind::Service => Self::Service,
            EntryKind::Platform => Self::Platform,
            EntryKind::Tag => Self::Tag,
        }
    }
}

/// One completion suggestion.
///
/// Pure data: the host renders `display_text`/`kind`/`description` and applies `edit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Text inserted (equal to `edit.new_text`).
    pub text: String,
    /// Label shown in the completion list.
    pub display_text: String,
    /// Category.
    pub kind: CandidateKind,
    /// Optional description.
    pub description: Option<String>,
    /// Edit that applies the candidate.
    pub edit: TextEdit,
}

impl Candidate {
    /// Styling class for the completion list entry, e.g. `"ha-hint-trigger"`.
    pub fn hint_class(&self) -> String {
        format!("ha-hint-{}", self.kind.as_str())
    }
}
