use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or validating schema tables.
pub enum SchemaError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error("missing required table: {0}")]
    /// A required table is absent from the document.
    MissingTable(&'static str),

    #[error("table '{0}' has no entries")]
    /// A required table is present but empty.
    EmptyTable(&'static str),

    #[error("invalid vocabulary entry '{entry}' in '{table}'")]
    /// A highlight or section vocabulary entry is not a plain YAML key.
    InvalidVocabulary {
        /// The vocabulary the entry belongs to.
        table: &'static str,
        /// The offending entry.
        entry: String,
    },
}
