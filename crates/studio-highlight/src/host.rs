//! YAML host sub-lexer.
//!
//! Line-oriented: it classifies one lexical unit at a time and never rejects input. State
//! that outlives a line lives in [`HostState`]; everything else is per-line.

use crate::state::{HostState, Quote};
use crate::template;
use crate::token::TokenClass;

const ATOMS: &[&str] = &["true", "false", "yes", "no", "on", "off", "null", "~"];

/// Per-line scanning context.
#[derive(Debug, Clone)]
pub(crate) struct LineContext {
    indent: usize,
    indent_bytes: usize,
    key_position: bool,
    leading: bool,
    /// The next unit follows a `:` separator, a `-`/`?` indicator or a document marker.
    value_position: bool,
    block_content: bool,
}

/// One host unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HostUnit {
    pub end: usize,
    pub class: TokenClass,
    /// Only whitespace and sequence indicators preceded this unit on the line.
    pub leading: bool,
}

impl LineContext {
    /// Prepare a line. `resumes_embedded` is true when the line starts inside a template
    /// block; the host then resumes mid-value.
    pub(crate) fn begin(line: &str, host: &mut HostState, resumes_embedded: bool) -> Self {
        let indent_bytes = line.len() - line.trim_start().len();
        let indent = line[..indent_bytes].chars().count();

        let mut block_content = false;
        if let Some(parent) = host.block_parent {
            if line.trim().is_empty() || indent > parent as usize {
                block_content = true;
            } else {
                host.block_parent = None;
            }
        }

        let fresh = !resumes_embedded && host.quote.is_none() && !block_content;
        Self {
            indent,
            indent_bytes,
            key_position: fresh,
            leading: fresh,
            value_position: false,
            block_content,
        }
    }

    /// Called when the host hands over to the template grammar.
    pub(crate) fn enter_embedded(&mut self) {
        self.key_position = false;
        self.leading = false;
        self.value_position = false;
    }
}

fn is_flow_indicator(c: char) -> bool {
    matches!(c, ',' | '[' | ']' | '{' | '}')
}

/// `true` if `rest` is empty or starts with whitespace.
fn at_boundary(rest: &str) -> bool {
    rest.chars().next().is_none_or(char::is_whitespace)
}

fn whitespace_end(line: &str, pos: usize) -> usize {
    line[pos..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(line.len(), |(i, _)| pos + i)
}

fn preceded_by_whitespace(line: &str, pos: usize) -> bool {
    pos == 0 || line[..pos].chars().next_back().is_some_and(char::is_whitespace)
}

/// End of the next run that stops at whitespace, (in flow context) flow indicators, and
/// (with embedding) an opening template delimiter.
fn word_end(line: &str, pos: usize, in_flow: bool, embedding: bool) -> usize {
    for (i, c) in line[pos..].char_indices() {
        let at = pos + i;
        if c.is_whitespace() || (in_flow && is_flow_indicator(c)) {
            return at;
        }
        if embedding && i > 0 && template::open_at(&line[at..]).is_some() {
            return at;
        }
    }
    line.len()
}

/// End of content up to an opening template delimiter or the end of the line.
fn content_end(line: &str, pos: usize, embedding: bool) -> usize {
    if !embedding {
        return line.len();
    }
    template::find_open(&line[pos..]).map_or(line.len(), |i| pos + i.max(1))
}

/// Scan a quoted scalar body starting at `from` (just past the opening quote, or at line
/// start for a continued scalar). Returns the end offset and whether the quote closed.
fn scan_quoted(line: &str, from: usize, quote: Quote, embedding: bool) -> (usize, bool) {
    let q = quote.as_char();
    let mut chars = line[from..].char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let at = from + i;
        if embedding && template::open_at(&line[at..]).is_some() {
            return (at, false);
        }
        match (quote, c) {
            (Quote::Double, '\\') => {
                chars.next();
            }
            (Quote::Single, '\'') if chars.peek().is_some_and(|&(_, next)| next == '\'') => {
                chars.next();
            }
            _ if c == q => return (at + c.len_utf8(), true),
            _ => {}
        }
    }
    (line.len(), false)
}

/// Find the end of a mapping key starting at `pos`: text up to a `:` followed by whitespace,
/// end of line, or (in flow context) a flow indicator. Returns the end of the trimmed key.
fn key_end(line: &str, pos: usize, in_flow: bool, embedding: bool) -> Option<usize> {
    let mut chars = line[pos..].char_indices().peekable();
    let mut prev_ws = false;
    while let Some((i, c)) = chars.next() {
        let at = pos + i;
        if embedding && template::open_at(&line[at..]).is_some() {
            return None;
        }
        if c == '#' && prev_ws {
            return None;
        }
        if in_flow && is_flow_indicator(c) {
            return None;
        }
        if c == ':' {
            let next = chars.peek().map(|&(_, n)| n);
            let terminates = match next {
                None => true,
                Some(n) => n.is_whitespace() || (in_flow && is_flow_indicator(n)),
            };
            if terminates {
                let key = line[pos..at].trim_end();
                return (!key.is_empty()).then(|| pos + key.len());
            }
        }
        prev_ws = c.is_whitespace();
    }
    None
}

fn is_number(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    let body = lower.strip_prefix(['-', '+']).unwrap_or(&lower);
    if matches!(body, ".inf" | ".nan") {
        return true;
    }
    if let Some(hex) = body.strip_prefix("0x") {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    if let Some(oct) = body.strip_prefix("0o") {
        return !oct.is_empty() && oct.chars().all(|c| ('0'..='7').contains(&c));
    }

    let (mantissa, exponent) = match body.split_once('e') {
        Some((m, e)) => (m, Some(e)),
        None => (body, None),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits_ok = |s: &str| s.chars().all(|c| c.is_ascii_digit() || c == '_');
    let has_digit = int.chars().chain(frac.chars()).any(|c| c.is_ascii_digit());
    let exponent_ok = exponent.is_none_or(|e| {
        let e = e.strip_prefix(['-', '+']).unwrap_or(e);
        !e.is_empty() && e.chars().all(|c| c.is_ascii_digit())
    });
    has_digit && digits_ok(int) && digits_ok(frac) && exponent_ok
}

fn is_atom(word: &str) -> bool {
    ATOMS.iter().any(|atom| atom.eq_ignore_ascii_case(word))
}

/// Block scalar header (`|`, `>-`, `|2+`) at `pos`: returns its end if the rest of the line
/// is blank or a comment.
fn block_header_end(line: &str, pos: usize) -> Option<usize> {
    let end = pos
        + 1
        + line[pos + 1..]
            .chars()
            .take_while(|c| matches!(c, '-' | '+' | '0'..='9'))
            .count();
    let tail = &line[end..];
    let rest = tail.trim_start();
    (rest.is_empty() || (rest.starts_with('#') && rest.len() < tail.len())).then_some(end)
}

/// Lex one host unit starting at `pos` (which must be inside the line).
pub(crate) fn next_unit(
    line: &str,
    pos: usize,
    host: &mut HostState,
    ctx: &mut LineContext,
    embedding: bool,
) -> HostUnit {
    let leading = ctx.leading;
    let unit = |end: usize, class: TokenClass| HostUnit {
        end,
        class,
        leading,
    };

    let rest = &line[pos..];
    let Some(c) = rest.chars().next() else {
        return unit(pos, TokenClass::Plain);
    };
    let one = pos + c.len_utf8();
    let in_flow = host.flow_depth > 0;

    if let Some(quote) = host.quote {
        let (end, closed) = scan_quoted(line, pos, quote, embedding);
        if closed {
            host.quote = None;
        }
        return unit(end.max(one), TokenClass::String);
    }

    if c.is_whitespace() {
        return unit(whitespace_end(line, pos), TokenClass::Plain);
    }

    if ctx.block_content {
        return unit(content_end(line, pos, embedding), TokenClass::String);
    }

    if c == '#' && preceded_by_whitespace(line, pos) {
        return unit(line.len(), TokenClass::Comment);
    }

    let value_position = std::mem::take(&mut ctx.value_position);

    if pos == ctx.indent_bytes
        && ctx.indent == 0
        && (rest.starts_with("---") || rest.starts_with("..."))
        && at_boundary(&rest[3..])
    {
        ctx.key_position = true;
        ctx.leading = false;
        ctx.value_position = true;
        return unit(pos + 3, TokenClass::Operator);
    }

    if matches!(c, '-' | '?') && ctx.key_position && at_boundary(&rest[1..]) {
        ctx.value_position = true;
        return unit(one, TokenClass::Operator);
    }

    if let Some(quote) = Quote::from_char(c) {
        ctx.key_position = false;
        ctx.leading = false;
        let (end, closed) = scan_quoted(line, one, quote, embedding);
        if !closed {
            host.quote = Some(quote);
        }
        return unit(end, TokenClass::String);
    }

    if c == '!' {
        ctx.key_position = false;
        ctx.leading = false;
        return unit(word_end(line, pos, in_flow, false).max(one), TokenClass::Tag);
    }

    if matches!(c, '&' | '*') && !at_boundary(&rest[1..]) {
        ctx.leading = false;
        return unit(word_end(line, one, in_flow, embedding), TokenClass::Identifier);
    }

    match c {
        '[' | '{' => {
            host.flow_depth = host.flow_depth.saturating_add(1);
            ctx.key_position = c == '{';
            ctx.leading = false;
            return unit(one, TokenClass::Operator);
        }
        ']' | '}' => {
            host.flow_depth = host.flow_depth.saturating_sub(1);
            ctx.key_position = false;
            ctx.leading = false;
            return unit(one, TokenClass::Operator);
        }
        ',' if in_flow => {
            ctx.key_position = true;
            return unit(one, TokenClass::Operator);
        }
        _ => {}
    }

    if matches!(c, '|' | '>')
        && value_position
        && let Some(end) = block_header_end(line, pos)
    {
        host.block_parent = Some(ctx.indent as u32);
        return unit(end, TokenClass::Operator);
    }

    if c == ':' {
        let next = rest[1..].chars().next();
        let separator = match next {
            None => true,
            Some(n) => n.is_whitespace() || (in_flow && is_flow_indicator(n)),
        };
        if separator {
            ctx.key_position = false;
            ctx.leading = false;
            ctx.value_position = true;
            return unit(one, TokenClass::Operator);
        }
    }

    if ctx.key_position
        && let Some(end) = key_end(line, pos, in_flow, embedding)
    {
        ctx.key_position = false;
        ctx.leading = false;
        return unit(end, TokenClass::Key);
    }

    ctx.key_position = false;
    ctx.leading = false;
    let end = word_end(line, pos, in_flow, embedding).max(one);
    let word = &line[pos..end];
    let class = if is_number(word) {
        TokenClass::Number
    } else if is_atom(word) {
        TokenClass::Atom
    } else {
        TokenClass::Plain
    };
    unit(end, class)
}
