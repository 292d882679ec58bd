use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` range of char columns within one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start column (inclusive).
    pub start: usize,
    /// End column (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Width in chars.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` for zero-width spans.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Closed set of token classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    /// `# comment` or `{# comment #}`.
    Comment,
    /// Mapping key.
    Key,
    /// YAML tag (`!secret`).
    Tag,
    /// Quoted scalar, block scalar content, or template string literal.
    String,
    /// Numeric literal.
    Number,
    /// Boolean / null literal.
    Atom,
    /// Anchor, alias, or template identifier.
    Identifier,
    /// Indicators, punctuation and template operators.
    Operator,
    /// Template reserved word (`if`, `for`, `endif`, ...).
    EmbeddedKeyword,
    /// Template delimiters (`{{`, `%}`, ...).
    EmbeddedBracket,
    /// Everything else (whitespace, plain scalars, unknown chars).
    Plain,
}

impl TokenClass {
    /// Base styling class.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Key => "key",
            Self::Tag => "tag",
            Self::String => "string",
            Self::Number => "number",
            Self::Atom => "atom",
            Self::Identifier => "variable",
            Self::Operator => "operator",
            Self::EmbeddedKeyword => "keyword",
            Self::EmbeddedBracket => "bracket",
            Self::Plain => "plain",
        }
    }
}

/// Which grammar produced a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grammar {
    /// The YAML host grammar.
    Host,
    /// The embedded template grammar (delimiters included).
    Embedded,
}

/// Home Assistant augmentation applied on top of a host token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    /// A root domain key opening a line (`automation:`).
    HostDomain,
    /// An automation structure key (`trigger:`, `entity_id:`).
    HostKey,
    /// `!include` and the `!include_dir_*` family.
    IncludeTag,
    /// `!secret`.
    SecretTag,
    /// `!env_var`.
    EnvVarTag,
    /// `!input`.
    InputTag,
}

impl Overlay {
    /// Extra styling class.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HostDomain => "ha-domain",
            Self::HostKey => "ha-key",
            Self::IncludeTag => "ha-include-tag",
            Self::SecretTag => "ha-secret-tag",
            Self::EnvVarTag => "ha-env-tag",
            Self::InputTag => "ha-input-tag",
        }
    }
}

/// One classified span of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Char columns covered by the token.
    pub span: Span,
    /// Token class.
    pub class: TokenClass,
    /// Producing grammar.
    pub grammar: Grammar,
    /// Optional Home Assistant overlay.
    pub overlay: Option<Overlay>,
}

impl Token {
    /// A host token without overlay.
    pub const fn host(start: usize, end: usize, class: TokenClass) -> Self {
        Self {
            span: Span::new(start, end),
            class,
            grammar: Grammar::Host,
            overlay: None,
        }
    }

    /// An embedded-grammar token.
    pub const fn embedded(start: usize, end: usize, class: TokenClass) -> Self {
        Self {
            span: Span::new(start, end),
            class,
            grammar: Grammar::Embedded,
            overlay: None,
        }
    }

    /// Returns `true` if the embedded grammar produced this token.
    pub fn is_embedded(&self) -> bool {
        self.grammar == Grammar::Embedded
    }

    /// The slice of `line` this token covers.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        let start = studio_core::char_to_byte(line, self.span.start);
        let end = studio_core::char_to_byte(line, self.span.end).max(start);
        &line[start..end]
    }

    /// Space-separated styling classes, e.g. `"key ha-domain"` or `"jinja-bracket"`.
    pub fn display_class(&self) -> String {
        let base = match self.grammar {
            Grammar::Host => self.class.as_str().to_string(),
            Grammar::Embedded => format!("jinja-{}", self.class.as_str()),
        };
        match self.overlay {
            Some(overlay) => format!("{base} {}", overlay.as_str()),
            None => base,
        }
    }
}
