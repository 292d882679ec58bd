//! Home Assistant overlay on top of host tokens.

use crate::token::{Overlay, TokenClass};
use regex::Regex;
use studio_schema::HighlightVocabulary;

const TAG_PATTERN: &str =
    r"^!(?:(include(?:_dir_(?:list|named|merge_list|merge_named))?)|(secret)|(env_var)|(input))(?:\S*)$";

fn word_set(words: &[String]) -> Result<Regex, regex::Error> {
    let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    Regex::new(&format!("^(?:{})$", alternatives.join("|")))
}

/// Compiled overlay vocabulary.
#[derive(Debug, Clone)]
pub(crate) struct HostOverlay {
    domains: Regex,
    actions: Regex,
    tags: Regex,
}

impl HostOverlay {
    pub(crate) fn new(vocabulary: &HighlightVocabulary) -> Result<Self, regex::Error> {
        Ok(Self {
            domains: word_set(&vocabulary.domain_keys)?,
            actions: word_set(&vocabulary.action_keys)?,
            tags: Regex::new(TAG_PATTERN)?,
        })
    }

    /// Re-classify a host unit. `leading` is true when only whitespace and sequence
    /// indicators precede it on the line.
    pub(crate) fn apply(
        &self,
        text: &str,
        class: TokenClass,
        leading: bool,
    ) -> (TokenClass, Option<Overlay>) {
        if text.starts_with('!') {
            if let Some(caps) = self.tags.captures(text) {
                let overlay = if caps.get(1).is_some() {
                    Overlay::IncludeTag
                } else if caps.get(2).is_some() {
                    Overlay::SecretTag
                } else if caps.get(3).is_some() {
                    Overlay::EnvVarTag
                } else {
                    Overlay::InputTag
                };
                return (TokenClass::Tag, Some(overlay));
            }
            return (class, None);
        }

        if class != TokenClass::Key {
            return (class, None);
        }
        if leading && self.domains.is_match(text) {
            (class, Some(Overlay::HostDomain))
        } else if self.actions.is_match(text) {
            (class, Some(Overlay::HostKey))
        } else {
            (class, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> HostOverlay {
        HostOverlay::new(&HighlightVocabulary {
            domain_keys: vec!["automation".into(), "sensor".into()],
            action_keys: vec!["trigger".into(), "entity_id".into()],
        })
        .unwrap()
    }

    #[test]
    fn test_domain_requires_leading_position() {
        let o = overlay();
        assert_eq!(
            o.apply("automation", TokenClass::Key, true),
            (TokenClass::Key, Some(Overlay::HostDomain))
        );
        assert_eq!(o.apply("automation", TokenClass::Key, false), (TokenClass::Key, None));
        assert_eq!(o.apply("sensors", TokenClass::Key, true), (TokenClass::Key, None));
        assert_eq!(o.apply("sensor", TokenClass::Plain, true), (TokenClass::Plain, None));
    }

    #[test]
    fn test_action_keys() {
        let o = overlay();
        assert_eq!(
            o.apply("entity_id", TokenClass::Key, false),
            (TokenClass::Key, Some(Overlay::HostKey))
        );
    }

    #[test]
    fn test_tag_family() {
        let o = overlay();
        let cases = [
            ("!include", Overlay::IncludeTag),
            ("!include_dir_merge_named", Overlay::IncludeTag),
            ("!secret", Overlay::SecretTag),
            ("!env_var", Overlay::EnvVarTag),
            ("!input", Overlay::InputTag),
        ];
        for (text, expected) in cases {
            assert_eq!(
                o.apply(text, TokenClass::Plain, false),
                (TokenClass::Tag, Some(expected)),
                "{text}"
            );
        }
        assert_eq!(o.apply("!custom", TokenClass::Tag, false), (TokenClass::Tag, None));
    }
}
