use crate::error::SchemaError;
use crate::section::SectionName;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const BUILTIN_SCHEMA: &str = include_str!("../schema/home_assistant.yaml");

/// Category of a table entry, used by hosts for icons/styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A root configuration domain (`automation:`).
    Domain,
    /// A mapping key (`alias:`).
    Key,
    /// A scalar value (`queued`).
    Value,
    /// A trigger form (`platform: state`).
    Trigger,
    /// A condition form (`condition: and`).
    Condition,
    /// A service call (`service: light.turn_on`).
    Service,
    /// A sensor platform (`platform: template`).
    Platform,
    /// A YAML special tag (`!secret`).
    Tag,
}

/// One entry of a candidate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTemplate {
    /// Literal text inserted (also the label).
    pub text: String,
    /// Entry category.
    pub kind: EntryKind,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A multi-line snippet inserted via `snip:<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetTemplate {
    /// Lookup name (matched against the text typed after `snip:`).
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Snippet body; lines after the first are re-indented on insertion.
    pub body: String,
}

/// Keys the tokenizer overlay highlights.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightVocabulary {
    /// Root domains (highlighted when they open a line).
    #[serde(default)]
    pub domain_keys: Vec<String>,
    /// Structure keys (`trigger`, `service`, `entity_id`, ...).
    #[serde(default)]
    pub action_keys: Vec<String>,
}

/// Identifies one candidate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    /// Root configuration keys.
    RootKeys,
    /// Common automation keys.
    Automation,
    /// Values for an automation's `mode:`.
    AutomationModes,
    /// Trigger forms.
    Triggers,
    /// Condition forms.
    Conditions,
    /// Service calls.
    Services,
    /// Action keys (`delay:`, `choose:`, ...).
    ActionKeys,
    /// Common entity configuration keys.
    CommonKeys,
    /// YAML special tags.
    YamlTags,
    /// Sensor platforms.
    SensorPlatforms,
}

impl TableId {
    /// Name of the table in the schema document.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RootKeys => "root_keys",
            Self::Automation => "automation",
            Self::AutomationModes => "automation_modes",
            Self::Triggers => "triggers",
            Self::Conditions => "conditions",
            Self::Services => "services",
            Self::ActionKeys => "action_keys",
            Self::CommonKeys => "common_keys",
            Self::YamlTags => "yaml_tags",
            Self::SensorPlatforms => "sensor_platforms",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSchema {
    #[serde(default)]
    sections: Option<Vec<String>>,
    #[serde(default)]
    highlight: Option<HighlightVocabulary>,
    #[serde(default)]
    root_keys: Option<Vec<CandidateTemplate>>,
    #[serde(default)]
    automation: Option<Vec<CandidateTemplate>>,
    #[serde(default)]
    automation_modes: Vec<CandidateTemplate>,
    #[serde(default)]
    triggers: Option<Vec<CandidateTemplate>>,
    #[serde(default)]
    conditions: Option<Vec<CandidateTemplate>>,
    #[serde(default)]
    services: Option<Vec<CandidateTemplate>>,
    #[serde(default)]
    action_keys: Option<Vec<CandidateTemplate>>,
    #[serde(default)]
    common_keys: Option<Vec<CandidateTemplate>>,
    #[serde(default)]
    yaml_tags: Option<Vec<CandidateTemplate>>,
    #[serde(default)]
    sensor_platforms: Option<Vec<CandidateTemplate>>,
    #[serde(default)]
    snippets: Vec<SnippetTemplate>,
}

fn required(
    table: Option<Vec<CandidateTemplate>>,
    id: TableId,
) -> Result<Vec<CandidateTemplate>, SchemaError> {
    let table = table.ok_or(SchemaError::MissingTable(id.name()))?;
    if table.is_empty() {
        return Err(SchemaError::EmptyTable(id.name()));
    }
    Ok(table)
}

fn is_plain_key(entry: &str) -> bool {
    let mut chars = entry.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn validate_vocabulary(table: &'static str, entries: &[String]) -> Result<(), SchemaError> {
    if entries.is_empty() {
        return Err(SchemaError::EmptyTable(table));
    }
    match entries.iter().find(|entry| !is_plain_key(entry)) {
        Some(entry) => Err(SchemaError::InvalidVocabulary {
            table,
            entry: entry.clone(),
        }),
        None => Ok(()),
    }
}

/// Load-once vocabulary tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaTables {
    sections: Vec<SectionName>,
    highlight: HighlightVocabulary,
    root_keys: Vec<CandidateTemplate>,
    automation: Vec<CandidateTemplate>,
    automation_modes: Vec<CandidateTemplate>,
    triggers: Vec<CandidateTemplate>,
    conditions: Vec<CandidateTemplate>,
    services: Vec<CandidateTemplate>,
    action_keys: Vec<CandidateTemplate>,
    common_keys: Vec<CandidateTemplate>,
    yaml_tags: Vec<CandidateTemplate>,
    sensor_platforms: Vec<CandidateTemplate>,
    snippets: Vec<SnippetTemplate>,
}

impl SchemaTables {
    /// Parse the built-in Home Assistant tables.
    pub fn builtin() -> Result<Self, SchemaError> {
        Self::from_yaml_str(BUILTIN_SCHEMA)
    }

    /// Parse and validate tables from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SchemaError> {
        let raw: RawSchema = serde_yaml::from_str(yaml)?;

        let sections = raw.sections.ok_or(SchemaError::MissingTable("sections"))?;
        validate_vocabulary("sections", &sections)?;
        let highlight = raw.highlight.ok_or(SchemaError::MissingTable("highlight"))?;
        validate_vocabulary("highlight.domain_keys", &highlight.domain_keys)?;
        validate_vocabulary("highlight.action_keys", &highlight.action_keys)?;

        let tables = Self {
            sections: sections.into_iter().map(SectionName::from).collect(),
            highlight,
            root_keys: required(raw.root_keys, TableId::RootKeys)?,
            automation: required(raw.automation, TableId::Automation)?,
            automation_modes: raw.automation_modes,
            triggers: required(raw.triggers, TableId::Triggers)?,
            conditions: required(raw.conditions, TableId::Conditions)?,
            services: required(raw.services, TableId::Services)?,
            action_keys: required(raw.action_keys, TableId::ActionKeys)?,
            common_keys: required(raw.common_keys, TableId::CommonKeys)?,
            yaml_tags: required(raw.yaml_tags, TableId::YamlTags)?,
            sensor_platforms: required(raw.sensor_platforms, TableId::SensorPlatforms)?,
            snippets: raw.snippets,
        };

        debug!(
            sections = tables.sections.len(),
            root_keys = tables.root_keys.len(),
            snippets = tables.snippets.len(),
            "schema tables loaded"
        );
        Ok(tables)
    }

    /// Read and parse tables from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Entries of one candidate table, in schema order.
    pub fn table(&self, id: TableId) -> &[CandidateTemplate] {
        match id {
            TableId::RootKeys => &self.root_keys,
            TableId::Automation => &self.automation,
            TableId::AutomationModes => &self.automation_modes,
            TableId::Triggers => &self.triggers,
            TableId::Conditions => &self.conditions,
            TableId::Services => &self.services,
            TableId::ActionKeys => &self.action_keys,
            TableId::CommonKeys => &self.common_keys,
            TableId::YamlTags => &self.yaml_tags,
            TableId::SensorPlatforms => &self.sensor_platforms,
        }
    }

    /// Root sections tracked by the context resolver.
    pub fn sections(&self) -> &[SectionName] {
        &self.sections
    }

    /// Keys the tokenizer overlay highlights.
    pub fn highlight(&self) -> &HighlightVocabulary {
        &self.highlight
    }

    /// Snippet bodies, in schema order.
    pub fn snippets(&self) -> &[SnippetTemplate] {
        &self.snippets
    }
}
