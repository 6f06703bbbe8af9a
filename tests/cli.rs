// Exercises the declmeta binary end to end.
// Requires: assert_cmd, predicates, tempfile in [dev-dependencies]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const HEADER: &str = r#"[
  {
    "kind": "namespace_decl", "name": "app", "usr": "c:@N@app",
    "children": [
      {
        "kind": "class_decl", "name": "Widget", "qualified_name": "app::Widget",
        "usr": "c:@N@app@S@Widget", "annotations": ["reflect"],
        "children": [
          { "kind": "field_decl", "name": "size", "type": { "spelling": "int" } }
        ]
      },
      {
        "kind": "struct_decl", "name": "Detail", "qualified_name": "app::Detail",
        "usr": "c:@N@app@S@Detail", "comment": "/// @reflect\n/// @internal"
      },
      {
        "kind": "class_decl", "name": "Anon", "qualified_name": "app::Anon",
        "annotations": ["reflect"],
        "location": { "file": "widget.hpp", "line": 40, "column": 7 }
      }
    ]
  }
]"#;

const SOURCE: &str = r#"{
  "kind": "translation_unit",
  "children": [
    {
      "kind": "class_decl", "name": "Widget", "usr": "c:@N@app@S@Widget",
      "annotations": ["from_source"]
    },
    { "kind": "function_decl", "name": "main", "usr": "c:@F@main#" }
  ]
}"#;

const CONFIG: &str = "grab_tag_names: [reflect]\navoid_tag_names: [internal]\n";

fn fixture() -> (TempDir, PathBuf, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let header = dir.path().join("header.json");
    let source = dir.path().join("source.json");
    let config = dir.path().join("filter.yaml");
    fs::write(&header, HEADER).unwrap();
    fs::write(&source, SOURCE).unwrap();
    fs::write(&config, CONFIG).unwrap();
    (dir, header, source, config)
}

fn declmeta() -> Command {
    Command::cargo_bin("declmeta").unwrap()
}

#[test]
fn tree_prints_an_outline() {
    let (_dir, header, _, _) = fixture();
    declmeta()
        .arg("tree")
        .arg(&header)
        .assert()
        .success()
        .stdout(contains("translation_unit\n  namespace_decl app\n"))
        .stdout(contains("    class_decl Widget [reflect]\n      field_decl size\n"))
        .stdout(contains("struct_decl Detail [reflect, internal]"));
}

#[test]
fn tree_json_uses_snapshot_fields() {
    let (_dir, header, _, _) = fixture();
    declmeta()
        .args(["tree", "--json"])
        .arg(&header)
        .assert()
        .success()
        .stdout(contains("\"kind\": \"translation_unit\""))
        .stdout(contains("\"spelling\": \"int\""));
}

#[test]
fn merge_keeps_the_first_widget() {
    let (_dir, header, source, _) = fixture();
    declmeta()
        .arg("merge")
        .arg(&header)
        .arg(&source)
        .assert()
        .success()
        .stdout(contains("function_decl main"))
        .stdout(contains("from_source").not());
}

#[test]
fn filter_lists_qualified_names() {
    let (_dir, header, _, config) = fixture();
    declmeta()
        .arg("filter")
        .arg(&header)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("app::Widget\napp::Anon\n"))
        .stdout(contains("app::Detail").not());
}

#[test]
fn generate_writes_warnings_for_missing_usrs() {
    let (dir, header, _, config) = fixture();
    let output = dir.path().join("reflect.gen.hpp");
    declmeta()
        .arg("generate")
        .arg(&header)
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("// class_decl app::Widget\n//   @reflect()\n"));
    assert!(text.contains("// === Warnings\n"));
    assert!(text.contains("#warning \"widget.hpp:40:7: declaration 'app::Anon' has no USR\""));
}

#[test]
fn bad_config_is_reported_with_a_diagnostic_code() {
    let (dir, header, _, _) = fixture();
    let config = dir.path().join("bad.json");
    fs::write(&config, r#"{"allowed_kinds": ["klass"]}"#).unwrap();
    declmeta()
        .arg("filter")
        .arg(&header)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(contains("declmeta::config::decode").or(contains("invalid filter configuration")));
}

#[test]
fn missing_events_file_fails() {
    declmeta()
        .args(["tree", "/no/such/events.json"])
        .assert()
        .failure()
        .stderr(contains("declmeta::io").or(contains("could not read")));
}
