use std::cell::RefCell;
use std::rc::Rc;

use content_schema_core::{
    FieldType, ListFieldType, SchemaDraft, SchemaReference, SelectOption, ValidationError,
};
use content_schema_editor::{
    EditEvent, EditorError, EntityFeed, FieldAttribute, SchemaEditor, SchemaEffects,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct RecordingEffects {
    requests: Vec<String>,
    created: Vec<SchemaDraft>,
}

impl SchemaEffects for RecordingEffects {
    fn load_schemas(&mut self) {
        self.requests.push("load_schemas".into());
    }

    fn load_microschemas(&mut self) {
        self.requests.push("load_microschemas".into());
    }

    fn create_schema(&mut self, draft: &SchemaDraft) {
        self.requests.push("create".into());
        self.created.push(draft.clone());
    }

    fn delete_schema(&mut self, name: &str) {
        self.requests.push(format!("delete:{name}"));
    }
}

struct StaticFeed {
    schemas: Option<Vec<SchemaReference>>,
    microschemas: Option<Vec<SchemaReference>>,
}

impl EntityFeed for StaticFeed {
    fn all_schemas(&self) -> Option<Vec<SchemaReference>> {
        self.schemas.clone()
    }

    fn all_microschemas(&self) -> Option<Vec<SchemaReference>> {
        self.microschemas.clone()
    }
}

fn references(names: &[&str]) -> Vec<SchemaReference> {
    names.iter().map(|n| SchemaReference::new(n)).collect()
}

fn valid_editor() -> SchemaEditor {
    let mut editor = SchemaEditor::new();
    editor.set_name("article");
    editor.set_field_name(0, "title").unwrap();
    editor.set_field_label(0, "Title").unwrap();
    editor.set_field_type(0, Some(FieldType::String)).unwrap();
    editor.set_display_field("title");
    editor.set_segment_field("title");
    editor.set_url_fields(vec!["title".into()]);
    editor
}

// ---------------------------------------------------------------------------
// Type changes
// ---------------------------------------------------------------------------

#[test]
fn test_type_changes_always_purge_allow_and_list_type() {
    let sequence = [
        (Some(FieldType::String), None),
        (Some(FieldType::List), Some(ListFieldType::String)),
        (Some(FieldType::List), Some(ListFieldType::Number)),
        (Some(FieldType::List), Some(ListFieldType::String)),
        (Some(FieldType::Html), Some(ListFieldType::String)),
        (Some(FieldType::String), None),
        (None, None),
    ];

    let mut editor = SchemaEditor::new();
    for (field_type, list_type) in sequence {
        editor.add_allow_value(0, "stale").unwrap();
        editor.set_field_type(0, field_type).unwrap();
        editor.set_field_list_type(0, list_type).unwrap();

        let row = &editor.form().rows()[0];
        assert!(row.allow.is_empty(), "allow kept after {field_type:?}/{list_type:?}");
        let field = &editor.draft().fields[0];
        assert_eq!(field.allow, None);
        if field.field_type != Some(FieldType::List) {
            assert_eq!(field.list_type, None);
            assert_eq!(row.input.list_type, None);
        }
    }
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

#[test]
fn test_token_without_separator_is_never_committed() {
    let mut editor = SchemaEditor::new();
    editor.set_field_type(0, Some(FieldType::String)).unwrap();
    for _ in 0..3 {
        editor.set_allow_input(0, "red").unwrap();
        assert_eq!(editor.on_allow_input_change(0).unwrap(), None);
    }
    assert!(editor.form().rows()[0].allow.is_empty());
}

#[test]
fn test_separated_token_becomes_chip() {
    let mut editor = SchemaEditor::new();
    editor.set_field_type(0, Some(FieldType::String)).unwrap();
    editor.set_allow_input(0, "red, ").unwrap();

    let row = &editor.form().rows()[0];
    assert_eq!(row.allow.to_vec(), vec!["red"]);
    assert_eq!(row.input.allow_input, "");
}

#[test]
fn test_punctuated_input_becomes_single_chip() {
    let mut editor = SchemaEditor::new();
    editor.set_field_type(0, Some(FieldType::String)).unwrap();
    editor.set_allow_input(0, "big-deal ").unwrap();
    assert_eq!(editor.form().rows()[0].allow.to_vec(), vec!["bigdeal"]);

    editor.set_allow_input(0, "red green,").unwrap();
    assert_eq!(
        editor.draft().fields[0].allow,
        Some(vec!["bigdeal".to_string(), "redgreen".to_string()])
    );
}

#[test]
fn test_input_change_on_non_string_row_commits_nothing() {
    let mut editor = SchemaEditor::new();
    editor.set_field_type(0, Some(FieldType::Number)).unwrap();
    editor.set_allow_input(0, "7, ").unwrap();

    assert_eq!(editor.on_allow_input_change(0).unwrap(), None);
    let row = &editor.form().rows()[0];
    assert!(row.allow.is_empty());
    assert_eq!(row.input.allow_input, "7, ");
}

#[test]
fn test_separator_only_input_commits_nothing() {
    let mut editor = SchemaEditor::new();
    editor.set_field_type(0, Some(FieldType::String)).unwrap();
    editor.set_allow_input(0, " , ").unwrap();
    assert!(editor.form().rows()[0].allow.is_empty());
    assert!(!editor.allow_values_contain(0, "").unwrap());
}

// ---------------------------------------------------------------------------
// Allow value operations
// ---------------------------------------------------------------------------

#[test]
fn test_remove_last_respects_pending_text() {
    let mut editor = SchemaEditor::new();
    editor.set_field_type(0, Some(FieldType::String)).unwrap();
    editor
        .replace_allow_values(0, vec!["a".into(), "b".into()])
        .unwrap();

    editor.set_allow_input(0, "x").unwrap();
    editor.remove_last_allow_value(0).unwrap();
    assert_eq!(editor.form().rows()[0].allow.to_vec(), vec!["a", "b"]);

    editor.set_allow_input(0, "").unwrap();
    editor.remove_last_allow_value(0).unwrap();
    assert_eq!(editor.form().rows()[0].allow.to_vec(), vec!["a"]);
}

#[test]
fn test_clear_empties_set_and_buffer() {
    let mut editor = SchemaEditor::new();
    editor.set_field_type(0, Some(FieldType::String)).unwrap();
    editor.add_allow_value(0, "a").unwrap();
    editor.set_allow_input(0, "typing").unwrap();

    editor.clear_allow_values(0).unwrap();
    let row = &editor.form().rows()[0];
    assert!(row.allow.is_empty());
    assert_eq!(row.input.allow_input, "");
    assert_eq!(editor.draft().fields[0].allow, None);
}

#[test]
fn test_allow_values_never_leak_to_non_string_fields() {
    let mut editor = SchemaEditor::new();
    editor.set_field_type(0, Some(FieldType::Number)).unwrap();
    editor.add_allow_value(0, "7").unwrap();
    assert_eq!(editor.draft().fields[0].allow, None);
}

// ---------------------------------------------------------------------------
// Duplicates and display fields
// ---------------------------------------------------------------------------

#[test]
fn test_duplicate_names_ignore_case() {
    let mut editor = SchemaEditor::new();
    editor.add_field();
    editor.set_field_name(0, "Title").unwrap();
    editor.set_field_name(1, "title").unwrap();

    assert!(editor.field_has_duplicate_value(0, FieldAttribute::Name));
    assert!(editor.field_has_duplicate_value(1, FieldAttribute::Name));
    assert!(!editor.field_has_duplicate_value(0, FieldAttribute::Label));
    assert!(
        editor
            .validation_errors()
            .contains(&ValidationError::DuplicateFieldName("title".into()))
    );
}

#[test]
fn test_display_fields_track_named_rows() {
    let mut editor = SchemaEditor::new();
    editor.add_field();
    editor.add_field();
    editor.set_field_name(0, "title").unwrap();
    editor.set_field_name(2, "slug").unwrap();
    assert_eq!(
        editor.display_fields(),
        &[
            SelectOption::new("title", "title"),
            SelectOption::new("slug", "slug")
        ]
    );

    editor.remove_field_at(0).unwrap();
    assert_eq!(editor.display_fields(), &[SelectOption::new("slug", "slug")]);

    editor.remove_last_field();
    assert!(editor.display_fields().is_empty());
    assert!(!editor.has_named_fields());
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

#[test]
fn test_init_requests_both_feeds() {
    let editor = SchemaEditor::new();
    let mut effects = RecordingEffects::default();
    editor.init(&mut effects);
    assert_eq!(effects.requests, vec!["load_schemas", "load_microschemas"]);
}

#[test]
fn test_feeds_are_sorted_and_missing_feeds_are_empty() {
    let editor = SchemaEditor::new();
    let feed = StaticFeed {
        schemas: Some(references(&["folder", "Zeta", "alpha"])),
        microschemas: None,
    };

    let names: Vec<_> = editor
        .all_schemas(&feed)
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Zeta", "alpha", "folder"]);
    assert!(editor.all_microschemas(&feed).is_empty());
}

#[test]
fn test_create_refuses_invalid_draft() {
    let editor = SchemaEditor::new();
    let mut effects = RecordingEffects::default();
    let err = editor.create(&mut effects).unwrap_err();
    assert!(matches!(err, EditorError::InvalidDraft(ref errors) if !errors.is_empty()));
    assert!(effects.created.is_empty());
}

#[test]
fn test_create_hands_over_normalized_draft() {
    let editor = valid_editor();
    let mut effects = RecordingEffects::default();
    editor.create(&mut effects).unwrap();
    assert_eq!(effects.created.len(), 1);
    assert_eq!(effects.created[0].name, "article");
    assert_eq!(effects.created[0].display_field, "title");
}

#[test]
fn test_delete_requires_name() {
    let mut effects = RecordingEffects::default();
    assert_eq!(
        SchemaEditor::new().delete(&mut effects).unwrap_err(),
        EditorError::MissingSchemaName
    );
    valid_editor().delete(&mut effects).unwrap();
    assert_eq!(effects.requests, vec!["delete:article"]);
}

// ---------------------------------------------------------------------------
// Listeners and scripts
// ---------------------------------------------------------------------------

#[test]
fn test_close_releases_listeners() {
    let mut editor = SchemaEditor::new();
    let seen = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&seen);
    let subscription = editor.subscribe(move |_| *counter.borrow_mut() += 1);

    editor.set_name("page");
    assert_eq!(*seen.borrow(), 1);
    assert!(subscription.is_active());

    editor.close();
    assert!(!subscription.is_active());
    // dropping after teardown is harmless
    drop(subscription);
}

#[test]
fn test_listener_owned_subscription_released_with_owner() {
    let mut editor = SchemaEditor::new();
    let seen = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&seen);
    let inner = editor.subscribe(move |_| *counter.borrow_mut() += 1);
    let outer = editor.subscribe(move |_| {
        let _owned = &inner;
    });

    editor.set_name("x");
    assert_eq!(*seen.borrow(), 1);

    drop(outer);
    editor.set_name("y");
    assert_eq!(*seen.borrow(), 1);
}

#[test]
fn test_yaml_script_replays_session() {
    let script = r#"
- op: set_name
  value: product
- op: set_field_name
  index: 0
  value: color
- op: set_field_label
  index: 0
  value: Color
- op: set_field_type
  index: 0
  value: string
- op: set_allow_input
  index: 0
  value: "red, "
- op: set_allow_input
  index: 0
  value: "green "
- op: add_field
- op: set_field_name
  index: 1
  value: tags
- op: set_field_label
  index: 1
  value: Tags
- op: set_field_type
  index: 1
  value: list
- op: set_field_list_type
  index: 1
  value: node
- op: set_display_field
  value: color
- op: set_segment_field
  value: color
- op: set_url_fields
  values: [color]
"#;
    let events: Vec<EditEvent> = serde_yaml::from_str(script).unwrap();
    let mut editor = SchemaEditor::new();
    for event in events {
        editor.apply(event).unwrap();
    }

    assert!(editor.is_valid(), "{:?}", editor.validation_errors());
    let json = serde_json::to_value(editor.draft()).unwrap();
    assert_eq!(json["fields"][0]["allow"], serde_json::json!(["red", "green"]));
    assert_eq!(json["fields"][1]["listType"], "node");
    assert!(json["fields"][1].get("allow").is_none());
}
