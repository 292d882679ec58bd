use serde::{Deserialize, Serialize};

/// Tunables for completion.
///
/// Deserializes with per-field defaults, so a host settings file only needs the keys it
/// overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Maximum number of candidates returned by one request.
    pub max_results: usize,
    /// Maximum number of lines the context resolver scans backwards.
    pub max_scan_lines: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_results: 20,
            max_scan_lines: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fall_back_to_defaults() {
        let config: CompletionConfig = serde_json::from_str(r#"{"max_results": 5}"#).unwrap();
        assert_eq!(config.max_results, 5);
        assert_eq!(config.max_scan_lines, 2000);
    }
}
