use pretty_assertions::assert_eq;
use studio::{
    EditingSession, EntityIndex, EntityRecord, LexState, LineIndex, Position, SchemaError,
    SchemaTables, SectionName, TextEdit, TokenClass, apply_text_edit,
};

#[test]
fn test_builtin_session_completes_and_highlights() {
    let session = EditingSession::builtin();
    assert!(!session.is_degraded());

    let doc = ["automation:", "  trigger:", "    - platform: state", "      "];
    let context = session.context_at(&doc, 3);
    assert_eq!(context.section, Some(SectionName::Automation));
    assert!(context.in_trigger);

    let candidates = session.complete(&doc, Position::new(3, 6));
    assert_eq!(candidates.len(), 15);
    assert!(candidates.iter().all(|c| c.display_text.starts_with("platform: ")));

    let (tokens, state) = session.tokenize_line("  value: {{ x", LexState::start());
    assert!(tokens.last().unwrap().is_embedded());
    assert!(state.embedded.is_some());
}

#[test]
fn test_entity_snapshot_lifecycle() {
    let mut session = EditingSession::builtin();
    let doc = ["      entity_id: light.k"];
    let cursor = Position::new(0, 24);

    let before: Vec<_> = session
        .complete(&doc, cursor)
        .into_iter()
        .map(|c| c.display_text)
        .collect();
    assert!(!before.contains(&"light.kitchen".to_string()));

    session.set_entities(EntityIndex::new([
        EntityRecord::new("light.kitchen", "on"),
        EntityRecord::new("switch.kitchen", "off"),
    ]));
    let with_entities = session.complete(&doc, cursor);
    assert_eq!(with_entities.len(), 1);
    assert_eq!(with_entities[0].text, "light.kitchen");

    session.clear_entities();
    assert!(session.entities().is_none());
}

#[test]
fn test_failed_schema_degrades_session() {
    let session = EditingSession::new(SchemaTables::from_yaml_str("sections: ["));
    assert!(session.is_degraded());
    assert!(session.schema().is_none());

    let doc = ["automation:", "  "];
    assert!(session.complete(&doc, Position::new(1, 2)).is_empty());

    let (tokens, state) = session.tokenize_line("automation: {{ x }}", LexState::start());
    assert_eq!(tokens[0].class, TokenClass::Key);
    assert!(tokens.iter().all(|t| !t.is_embedded() && t.overlay.is_none()));
    assert_eq!(state.embedded, None);
}

#[test]
fn test_missing_table_is_reported_before_degrading() {
    let result = SchemaTables::from_yaml_str("sections: [automation]\n");
    assert!(matches!(result, Err(SchemaError::MissingTable("highlight"))));
    assert!(EditingSession::new(result).is_degraded());
}

#[test]
fn test_visible_tokens_follow_edits() {
    let mut session = EditingSession::builtin();
    let mut buffer = LineIndex::from_text("a: >\n  {% if x\n  %}y\nb: 1");

    let lines = session.visible_tokens(&buffer, 0..4);
    assert_eq!(lines.len(), 4);
    assert!(lines[2].tokens[1].is_embedded());

    apply_text_edit(
        &mut buffer,
        &TextEdit::new(studio::Range::on_line(1, 9, 9), " %}"),
    );
    session.invalidate_from(1);
    let lines = session.visible_tokens(&buffer, 2..3);
    assert!(!lines[0].tokens[1].is_embedded());
}
