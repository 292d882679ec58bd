use serde::{Deserialize, Serialize};
use std::fmt;

/// A root configuration section the context resolver can report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionName {
    /// `automation:`
    Automation,
    /// `script:`
    Script,
    /// `scene:`
    Scene,
    /// `sensor:`
    Sensor,
    /// `binary_sensor:`
    BinarySensor,
    /// `template:`
    Template,
    /// Any other root key listed in the schema's `sections`.
    Other(String),
}

impl SectionName {
    /// Map a root key (without the trailing `:`) to a section name.
    pub fn from_key(key: &str) -> Self {
        match key {
            "automation" => Self::Automation,
            "script" => Self::Script,
            "scene" => Self::Scene,
            "sensor" => Self::Sensor,
            "binary_sensor" => Self::BinarySensor,
            "template" => Self::Template,
            other => Self::Other(other.to_string()),
        }
    }

    /// The root key this section is opened by.
    pub fn as_key(&self) -> &str {
        match self {
            Self::Automation => "automation",
            Self::Script => "script",
            Self::Scene => "scene",
            Self::Sensor => "sensor",
            Self::BinarySensor => "binary_sensor",
            Self::Template => "template",
            Self::Other(key) => key,
        }
    }

    /// Returns `true` for `sensor` and `binary_sensor`.
    pub fn is_sensor_like(&self) -> bool {
        matches!(self, Self::Sensor | Self::BinarySensor)
    }
}

impl From<String> for SectionName {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

impl From<SectionName> for String {
    fn from(section: SectionName) -> Self {
        section.as_key().to_string()
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}
