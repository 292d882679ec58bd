use crate::token::Grammar;
use serde::{Deserialize, Serialize};

/// The three template delimiter pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprKind {
    /// `{{ ... }}`
    Expression,
    /// `{% ... %}`
    Statement,
    /// `{# ... #}`
    Comment,
}

impl ExprKind {
    /// Opening delimiter.
    pub const fn open(self) -> &'static str {
        match self {
            Self::Expression => "{{",
            Self::Statement => "{%",
            Self::Comment => "{#",
        }
    }

    /// Closing delimiter.
    pub const fn close(self) -> &'static str {
        match self {
            Self::Expression => "}}",
            Self::Statement => "%}",
            Self::Comment => "#}",
        }
    }

    pub(crate) const ALL: [ExprKind; 3] = [Self::Expression, Self::Statement, Self::Comment];
}

/// Quote style of an open YAML flow scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quote {
    /// `'...'` (`''` escapes a quote).
    Single,
    /// `"..."` (backslash escapes).
    Double,
}

impl Quote {
    pub(crate) fn from_char(c: char) -> Option<Self> {
        match c {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            _ => None,
        }
    }

    pub(crate) const fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }
}

/// State of the YAML host sub-lexer carried from one line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HostState {
    pub(crate) flow_depth: u16,
    pub(crate) block_parent: Option<u32>,
    pub(crate) quote: Option<Quote>,
}

impl HostState {
    /// Nesting depth of open `[`/`{` flow collections.
    pub fn flow_depth(&self) -> u16 {
        self.flow_depth
    }

    /// Indentation of the line that opened the current `|`/`>` block scalar, if any.
    ///
    /// Lines indented deeper than this are scalar content.
    pub fn block_scalar_parent(&self) -> Option<usize> {
        self.block_parent.map(|indent| indent as usize)
    }

    /// Quote style of a flow scalar left open at the end of the previous line.
    pub fn open_quote(&self) -> Option<Quote> {
        self.quote
    }
}

/// Lexer state at a line boundary.
///
/// Copyable and free of references into the text, so an editor can keep one per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LexState {
    /// Host sub-lexer state.
    pub host: HostState,
    /// Open template block, if the line boundary falls inside one.
    pub embedded: Option<ExprKind>,
}

impl LexState {
    /// The state at the start of a document.
    pub fn start() -> Self {
        Self::default()
    }

    /// Which grammar governs the position this state describes.
    pub fn grammar(&self) -> Grammar {
        match self.embedded {
            Some(_) => Grammar::Embedded,
            None => Grammar::Host,
        }
    }
}

/// Result of [`Tokenizer::inner_mode`](crate::Tokenizer::inner_mode).
///
/// Lets indentation or bracket-matching logic delegate to the grammar that is active at a
/// line boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InnerMode<'a> {
    /// The YAML host grammar is active.
    Host(&'a HostState),
    /// A template block is open; the host state is what resumes after it closes.
    Embedded {
        /// The open block kind.
        kind: ExprKind,
        /// Host sub-lexer state.
        host: &'a HostState,
    },
}

impl<'a> InnerMode<'a> {
    /// Active grammar.
    pub fn grammar(&self) -> Grammar {
        match self {
            Self::Host(_) => Grammar::Host,
            Self::Embedded { .. } => Grammar::Embedded,
        }
    }

    /// The host sub-lexer's own state.
    pub fn host_state(&self) -> &'a HostState {
        match *self {
            Self::Host(host) => host,
            Self::Embedded { host, .. } => host,
        }
    }
}
