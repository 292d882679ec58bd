use studio_core::char_to_byte;

const STOP_CHARS: &str = "\"'`,()[]{}";

/// The partially typed word before the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialToken {
    /// Typed text.
    pub text: String,
    /// Char column where the word starts.
    pub start: usize,
    /// Char column of the cursor.
    pub end: usize,
}

impl PartialToken {
    /// Extract the run of chars immediately before `column` that are neither whitespace nor
    /// quote, comma, paren or bracket characters. `column` is clamped to the line.
    pub fn at(line: &str, column: usize) -> Self {
        let end = column.min(line.chars().count());
        let before = &line[..char_to_byte(line, end)];
        let text: String = {
            let mut word: Vec<char> = before
                .chars()
                .rev()
                .take_while(|&c| !c.is_whitespace() && !STOP_CHARS.contains(c))
                .collect();
            word.reverse();
            word.into_iter().collect()
        };
        let start = end - text.chars().count();
        Self { text, start, end }
    }

    /// Returns `true` if nothing has been typed yet.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_before_cursor() {
        assert_eq!(
            PartialToken::at("  - platform: sta", 17),
            PartialToken {
                text: "sta".into(),
                start: 14,
                end: 17
            }
        );
        assert_eq!(PartialToken::at("x: states('sun.s", 16).text, "sun.s");
        assert_eq!(PartialToken::at("alias", 3).text, "ali");
        assert!(PartialToken::at("key: ", 5).is_empty());
    }

    #[test]
    fn test_column_is_clamped_and_char_based() {
        let token = PartialToken::at("name: Küche", 99);
        assert_eq!(token.text, "Küche");
        assert_eq!((token.start, token.end), (6, 11));
    }
}
