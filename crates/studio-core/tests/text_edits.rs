use pretty_assertions::assert_eq;
use studio_core::{LineIndex, Position, Range, TextBuffer, TextEdit, apply_text_edit};

#[test]
fn test_buffer_impls_agree() {
    let text = "automation:\n  - alias: Porch\n    trigger:\n";
    let index = LineIndex::from_text(text);
    let lines: Vec<&str> = text.split('\n').collect();

    assert_eq!(TextBuffer::line_count(&index), lines.line_count());
    for i in 0..lines.line_count() {
        assert_eq!(TextBuffer::line(&index, i), lines.line(i));
    }
}

#[test]
fn test_sequential_edits_keep_document_consistent() {
    let mut index = LineIndex::from_text("sensor:\n  - platform: tem\n");

    let edit = TextEdit::new(Range::on_line(1, 14, 17), "template");
    apply_text_edit(&mut index, &edit);
    assert_eq!(edit.end_position(), Position::new(1, 22));

    let edit = TextEdit::new(Range::on_line(2, 0, 0), "    name: Porch");
    apply_text_edit(&mut index, &edit);

    assert_eq!(
        index.get_text(),
        "sensor:\n  - platform: template\n    name: Porch"
    );
}

#[test]
fn test_stale_edit_is_clamped() {
    let mut index = LineIndex::from_text("a: 1");
    let edit = TextEdit::new(Range::on_line(5, 3, 40), "\nb: 2");
    edit.apply(&mut index);
    assert_eq!(index.get_text(), "a: 1\nb: 2");
}
