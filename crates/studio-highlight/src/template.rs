//! Embedded template sub-lexer (Jinja-style `{{ }}`, `{% %}`, `{# #}`).

use crate::state::ExprKind;
use crate::token::TokenClass;

const KEYWORDS: &[&str] = &[
    "and", "as", "autoescape", "block", "break", "call", "context", "continue", "do", "elif",
    "else", "endautoescape", "endblock", "endcall", "endfilter", "endfor", "endif", "endmacro",
    "endraw", "endset", "endtrans", "endwith", "extends", "filter", "for", "from", "if",
    "ignore", "import", "in", "include", "is", "macro", "missing", "not", "or", "pluralize",
    "raw", "recursive", "scoped", "set", "trans", "with", "without",
];

const LITERALS: &[&str] = &["true", "false", "none", "null"];

const TWO_CHAR_OPERATORS: &[&str] = &["==", "!=", "<=", ">=", "//", "**"];

const OPERATOR_CHARS: &str = "+-*/%<>=!|~.,:;?()[]{}";

/// If `rest` starts with an opening delimiter, its kind and byte length (a Jinja
/// whitespace-control `-`/`+` right after the delimiter belongs to it).
pub(crate) fn open_at(rest: &str) -> Option<(ExprKind, usize)> {
    let kind = ExprKind::ALL
        .into_iter()
        .find(|kind| rest.starts_with(kind.open()))?;
    let len = match rest.as_bytes().get(2) {
        Some(b'-' | b'+') => 3,
        _ => 2,
    };
    Some((kind, len))
}

/// If `rest` starts with the closing delimiter of `kind` (optionally preceded by `-`/`+`),
/// its byte length.
pub(crate) fn close_at(rest: &str, kind: ExprKind) -> Option<usize> {
    if rest.starts_with(kind.close()) {
        return Some(2);
    }
    match rest.as_bytes().first() {
        Some(b'-' | b'+') if rest[1..].starts_with(kind.close()) => Some(3),
        _ => None,
    }
}

/// Byte offset of the first opening delimiter in `text`, if any.
pub(crate) fn find_open(text: &str) -> Option<usize> {
    text.match_indices('{')
        .map(|(i, _)| i)
        .find(|&i| open_at(&text[i..]).is_some())
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn scan_while(text: &str, from: usize, pred: impl Fn(char) -> bool) -> usize {
    text[from..]
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(text.len(), |(i, _)| from + i)
}

fn scan_string(line: &str, pos: usize, quote: char) -> usize {
    let mut chars = line[pos..].char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            return pos + i + c.len_utf8();
        }
    }
    line.len()
}

fn scan_number(line: &str, pos: usize) -> usize {
    let digits = |from| scan_while(line, from, |c| c.is_ascii_digit());
    let mut end = digits(pos);

    let bytes = line.as_bytes();
    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end = digits(end + 1);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            end = digits(exp);
        }
    }
    end
}

/// Lex one unit inside an open block of `kind`. The caller handles closing delimiters.
///
/// Always returns an end offset past `pos` when `pos` is within the line.
pub(crate) fn next_unit(line: &str, pos: usize, kind: ExprKind) -> (usize, TokenClass) {
    let rest = &line[pos..];
    let Some(c) = rest.chars().next() else {
        return (pos, TokenClass::Plain);
    };
    let one = pos + c.len_utf8();

    if kind == ExprKind::Comment {
        return (one, TokenClass::Comment);
    }

    if c.is_whitespace() {
        return (scan_while(line, pos, char::is_whitespace), TokenClass::Plain);
    }

    if c == '\'' || c == '"' {
        return (scan_string(line, pos, c), TokenClass::String);
    }

    if c.is_ascii_digit() {
        return (scan_number(line, pos), TokenClass::Number);
    }

    if is_ident_start(c) {
        let end = scan_while(line, pos, is_ident_continue);
        let word = &line[pos..end];
        let class = if KEYWORDS.contains(&word) {
            TokenClass::EmbeddedKeyword
        } else if LITERALS.iter().any(|lit| lit.eq_ignore_ascii_case(word)) {
            TokenClass::Atom
        } else {
            TokenClass::Identifier
        };
        return (end, class);
    }

    if let Some(op) = TWO_CHAR_OPERATORS.iter().find(|op| rest.starts_with(**op)) {
        return (pos + op.len(), TokenClass::Operator);
    }

    if OPERATOR_CHARS.contains(c) {
        return (one, TokenClass::Operator);
    }

    (one, TokenClass::Plain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(line: &str, kind: ExprKind) -> Vec<(&str, TokenClass)> {
        let mut out = Vec::new();
        let mut pos = 0;
        while pos < line.len() {
            let (end, class) = next_unit(line, pos, kind);
            assert!(end > pos, "no progress at {pos} in {line:?}");
            out.push((&line[pos..end], class));
            pos = end;
        }
        out
    }

    #[test]
    fn test_open_and_close_delimiters() {
        assert_eq!(open_at("{{ x }}"), Some((ExprKind::Expression, 2)));
        assert_eq!(open_at("{%- if"), Some((ExprKind::Statement, 3)));
        assert_eq!(open_at("{# c #}"), Some((ExprKind::Comment, 2)));
        assert_eq!(open_at("{ a: 1 }"), None);

        assert_eq!(close_at("}} tail", ExprKind::Expression), Some(2));
        assert_eq!(close_at("-%}", ExprKind::Statement), Some(3));
        assert_eq!(close_at("}}", ExprKind::Statement), None);
        assert_eq!(close_at("-", ExprKind::Comment), None);
    }

    #[test]
    fn test_find_open_skips_flow_braces() {
        assert_eq!(find_open("{a: 1} {{ b }}"), Some(7));
        assert_eq!(find_open("plain"), None);
    }

    #[test]
    fn test_expression_units() {
        let got = units("states('x') | float(0) >= 1.5e3 and not none", ExprKind::Expression);
        let classes: Vec<_> = got.iter().map(|(_, c)| *c).collect();
        assert_eq!(got[0], ("states", TokenClass::Identifier));
        assert_eq!(got[2], ("'x'", TokenClass::String));
        assert!(got.contains(&(">=", TokenClass::Operator)));
        assert!(got.contains(&("1.5e3", TokenClass::Number)));
        assert!(got.contains(&("and", TokenClass::EmbeddedKeyword)));
        assert!(got.contains(&("none", TokenClass::Atom)));
        assert!(!classes.contains(&TokenClass::Comment));
    }

    #[test]
    fn test_string_with_escape_and_unterminated() {
        assert_eq!(units(r#""a\"b" x"#, ExprKind::Statement)[0].0, r#""a\"b""#);
        assert_eq!(units("'open", ExprKind::Expression), vec![("'open", TokenClass::String)]);
    }

    #[test]
    fn test_comment_kind_consumes_single_chars() {
        let got = units("né", ExprKind::Comment);
        assert_eq!(got, vec![("n", TokenClass::Comment), ("é", TokenClass::Comment)]);
    }

    #[test]
    fn test_unknown_char_is_plain() {
        assert_eq!(units("@", ExprKind::Expression), vec![("@", TokenClass::Plain)]);
        assert_eq!(units("True", ExprKind::Expression), vec![("True", TokenClass::Atom)]);
    }
}
