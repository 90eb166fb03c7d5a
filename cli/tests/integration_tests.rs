use std::fs;
use std::path::PathBuf;
use std::process::Output;

use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_schema-editor"))
        .args(args)
        .output()
        .expect("failed to run schema-editor")
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    fs::write(&path, contents).expect("failed to write file");
    path
}

const PRODUCT_SCRIPT: &str = r#"
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
- op: set_display_field
  value: color
- op: set_segment_field
  value: color
- op: set_url_fields
  values: [color]
"#;

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

#[test]
fn test_apply_prints_normalized_draft() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "session.yml", PRODUCT_SCRIPT);

    let out = run(&["apply", "--script", script.to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["valid"], true);
    assert_eq!(report["draft"]["name"], "product");
    assert_eq!(report["draft"]["fields"][0]["allow"], serde_json::json!(["red", "green"]));
    assert_eq!(report["display_fields"][0]["value"], "color");
    assert_eq!(report["duplicates"], serde_json::json!([]));
    assert_eq!(report["errors"], serde_json::json!([]));
}

#[test]
fn test_apply_reports_duplicates_and_errors() {
    let dir = TempDir::new().unwrap();
    let script = write(
        &dir,
        "dupes.json",
        r#"[
            {"op": "add_field"},
            {"op": "set_field_name", "index": 0, "value": "Title"},
            {"op": "set_field_name", "index": 1, "value": "title"}
        ]"#,
    );

    let out = run(&["apply", "--script", script.to_str().unwrap()]);
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["duplicates"].as_array().unwrap().len(), 2);
    assert_eq!(report["duplicates"][1]["name"], true);
    assert_eq!(report["duplicates"][1]["label"], false);
    assert!(!report["errors"].as_array().unwrap().is_empty());
}

#[test]
fn test_apply_uses_config_settings_and_yaml_output() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "editor.yml", "editor:\n  initial_field_rows: 3\n");
    let script = write(&dir, "empty.yml", "[]\n");

    let out = run(&[
        "apply",
        "--script",
        script.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--format",
        "yaml",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_yaml::Value = serde_yaml::from_slice(&out.stdout).unwrap();
    let fields = report["draft"]["fields"].as_sequence().unwrap();
    assert_eq!(fields.len(), 3);
}

#[test]
fn test_apply_out_of_range_event_fails() {
    let dir = TempDir::new().unwrap();
    let script = write(
        &dir,
        "bad.yml",
        "- op: set_field_name\n  index: 4\n  value: x\n",
    );

    let out = run(&["apply", "--script", script.to_str().unwrap()]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error: event 1"), "{stderr}");
}

#[test]
fn test_apply_starts_from_existing_draft() {
    let dir = TempDir::new().unwrap();
    let draft = write(
        &dir,
        "draft.json",
        r#"{"name": "page", "fields": [
            {"name": "kind", "label": "Kind", "type": "string", "allow": ["a", "b"]}
        ]}"#,
    );
    let script = write(
        &dir,
        "session.yml",
        "- op: remove_last_allow_value\n  index: 0\n",
    );

    let out = run(&[
        "apply",
        "--script",
        script.to_str().unwrap(),
        "--draft",
        draft.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["draft"]["fields"][0]["allow"], serde_json::json!(["a"]));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn test_validate_accepts_valid_directory() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "drafts/article.json",
        r#"{"name": "article", "displayField": "title", "segmentField": "title",
            "urlFields": ["title"],
            "fields": [{"name": "title", "label": "Title", "type": "string"}]}"#,
    );

    let out = run(&["validate", dir.path().join("drafts").to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Validated 1 draft file(s)."));
}

#[test]
fn test_validate_reports_problems() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "broken.json",
        r#"{"name": "", "fields": [{"name": "n", "label": "N", "type": "number", "allow": ["1"]}]}"#,
    );

    let out = run(&["validate", path.to_str().unwrap()]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("schema name cannot be empty"), "{stderr}");
    assert!(stderr.contains("allow values but is not string-valued"), "{stderr}");
    assert!(stderr.contains("error: 1 of 1 draft(s) invalid"), "{stderr}");
}

// ---------------------------------------------------------------------------
// catalog and field-types
// ---------------------------------------------------------------------------

#[test]
fn test_catalog_lists_sorted_names() {
    let dir = TempDir::new().unwrap();
    write(&dir, "catalog/schemas/folder.json", r#"{"name": "folder"}"#);
    write(&dir, "catalog/schemas/Zeta.json", r#"{"name": "Zeta"}"#);
    write(&dir, "catalog/schemas/alpha.json", r#"{"name": "alpha"}"#);
    write(&dir, "catalog/microschemas/vcard.json", r#"{"name": "vcard"}"#);

    let out = run(&[
        "catalog",
        "--dir",
        dir.path().join("catalog").to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let listing: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(listing["schemas"], serde_json::json!(["Zeta", "alpha", "folder"]));
    assert_eq!(listing["microschemas"], serde_json::json!(["vcard"]));
}

#[test]
fn test_catalog_from_config_bundle() {
    let dir = TempDir::new().unwrap();
    let bundle = write(
        &dir,
        "catalog.json",
        r#"{"schemas": [{"name": "folder"}], "microschemas": []}"#,
    );
    let config = write(
        &dir,
        "editor.yml",
        &format!("catalog:\n  bundle: {}\n", bundle.display()),
    );

    let out = run(&["catalog", "--config", config.to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("schemas:\n  folder\nmicroschemas:\n"), "{stdout}");
}

#[test]
fn test_catalog_without_source_fails() {
    let out = run(&["catalog"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("no catalog source given"));
}

#[test]
fn test_field_types_lists_options() {
    let out = run(&["field-types"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("string"));
    assert!(stdout.lines().last().unwrap().starts_with("list"));

    let out = run(&["field-types", "--list"]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("micronode"));
    assert!(!stdout.contains("list "));
}
