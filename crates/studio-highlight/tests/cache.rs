use studio_core::{LineIndex, Position, Range, TextEdit, apply_text_edit};
use studio_highlight::{
    ExprKind, LexState, LineStateCache, TokenClass, Tokenizer, highlight_document,
};
use studio_schema::SchemaTables;

fn tokenizer() -> Tokenizer {
    Tokenizer::new(&SchemaTables::builtin().unwrap()).unwrap()
}

const DOC: &str = "automation:\n  - alias: x\n    value_template: >\n      {% if a\n      %}on{% endif %}\n    mode: single";

#[test]
fn test_range_matches_full_pass() {
    let tokenizer = tokenizer();
    let buffer = LineIndex::from_text(DOC);
    let full = highlight_document(&tokenizer, &buffer);

    let mut cache = LineStateCache::new();
    let tail = cache.tokens_for_range(&tokenizer, &buffer, 3..10);
    assert_eq!(tail.len(), 3);
    assert_eq!(tail[..], full[3..]);
    assert_eq!(cache.start_state(4).unwrap().embedded, Some(ExprKind::Statement));
    assert_eq!(cache.cached_lines(), 7);
}

#[test]
fn test_invalidate_after_edit() {
    let tokenizer = tokenizer();
    let mut buffer = LineIndex::from_text(DOC);
    let mut cache = LineStateCache::new();
    cache.tokens_for_range(&tokenizer, &buffer, 0..6);

    // Close the statement on line 3 itself.
    let edit = TextEdit::new(Range::new(Position::new(3, 13), Position::new(3, 13)), " %}");
    apply_text_edit(&mut buffer, &edit);
    cache.invalidate_from(3);
    assert_eq!(cache.cached_lines(), 4);

    let lines = cache.tokens_for_range(&tokenizer, &buffer, 3..6);
    assert_eq!(cache.start_state(4).unwrap().embedded, None);
    assert_eq!(lines, highlight_document(&tokenizer, &buffer)[3..]);
    assert!(lines[1].tokens.iter().any(|t| t.class == TokenClass::String));
}

#[test]
fn test_range_past_end_is_empty() {
    let tokenizer = tokenizer();
    let mut cache = LineStateCache::new();
    assert!(cache.tokens_for_range(&tokenizer, &["a: 1"], 5..9).is_empty());
    assert_eq!(cache.start_state(0), Some(LexState::start()));
}
