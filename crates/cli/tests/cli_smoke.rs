//! CLI smoke tests for appjson.
//!
//! These tests run the binary against temporary projects and check exit
//! codes, printed output and generated files.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the appjson binary.
fn appjson_cmd() -> Command {
  let mut cmd = cargo_bin_cmd!("appjson");
  cmd.env_remove("SRCROOT").env_remove("RUST_LOG");
  cmd
}

const TWO_COMPONENTS: &str = r#"{
  "name": "Example",
  "displayName": "Example",
  "components": [
    { "appKey": "Example", "displayName": "App" },
    { "appKey": "Example", "displayName": "App (modal)", "presentationStyle": "modal" }
  ],
  "resources": ["dist/main.jsbundle"]
}"#;

/// Create a project with the given app.json and an installed node_modules.
fn temp_project(manifest: &str) -> TempDir {
  let temp = TempDir::new().unwrap();
  fs::write(temp.path().join("app.json"), manifest).unwrap();
  fs::create_dir_all(temp.path().join("node_modules")).unwrap();
  temp
}

fn generated(project: &Path, relative: &str) -> std::path::PathBuf {
  project.join("node_modules").join(".generated").join(relative)
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  appjson_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  appjson_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("appjson"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["embed", "declarations", "validate", "checksum", "android-manifest"] {
    appjson_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

#[test]
fn unknown_platform_is_rejected() {
  appjson_cmd()
    .args(["embed", "java"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid value"));
}

// =============================================================================
// embed
// =============================================================================

#[test]
fn embed_generates_each_backend() {
  let project = temp_project(TWO_COMPONENTS);

  for (platform, file) in [
    ("cpp", "Manifest.g.cpp"),
    ("kotlin", "android/ManifestProvider.g.kt"),
  ] {
    appjson_cmd()
      .args(["embed", platform, "--project-root"])
      .arg(project.path())
      .assert()
      .success()
      .stdout(predicate::str::contains("Generated"));
    assert!(generated(project.path(), file).exists(), "{platform}");
  }

  let name = dunce::canonicalize(project.path())
    .unwrap()
    .file_name()
    .unwrap()
    .to_string_lossy()
    .into_owned();
  appjson_cmd()
    .args(["embed", "swift", "--project-root"])
    .arg(project.path())
    .assert()
    .success();
  assert!(generated(project.path(), &format!("{name}/Manifest+Embedded.g.swift")).exists());
}

#[test]
fn embed_skips_when_up_to_date() {
  let project = temp_project(TWO_COMPONENTS);

  appjson_cmd()
    .args(["embed", "cpp", "--project-root"])
    .arg(project.path())
    .assert()
    .success();

  appjson_cmd()
    .args(["embed", "cpp", "--project-root"])
    .arg(project.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("up to date"));

  appjson_cmd()
    .args(["embed", "cpp", "--force", "--project-root"])
    .arg(project.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Generated"));
}

#[test]
fn embed_json_output() {
  let project = temp_project(TWO_COMPONENTS);
  let output = project.path().join("out").join("Manifest.g.cpp");

  appjson_cmd()
    .args(["embed", "cpp", "--json", "--project-root"])
    .arg(project.path())
    .arg("--output")
    .arg(&output)
    .assert()
    .success()
    .stdout(predicate::str::contains("\"checksum\""))
    .stdout(predicate::str::contains("\"skipped\": false"));

  assert!(output.exists());
}

#[test]
fn embed_fails_without_manifest() {
  let temp = TempDir::new().unwrap();

  appjson_cmd()
    .args(["embed", "cpp", "--project-root"])
    .arg(temp.path())
    .assert()
    .code(1)
    .stderr(predicate::str::contains("app.json"));
}

#[test]
fn embed_fails_without_node_modules() {
  let temp = TempDir::new().unwrap();
  fs::write(temp.path().join("app.json"), TWO_COMPONENTS).unwrap();

  appjson_cmd()
    .args(["embed", "kotlin", "--project-root"])
    .arg(temp.path())
    .assert()
    .code(1)
    .stderr(predicate::str::contains("node_modules"));
}

#[test]
fn embed_reports_every_violation() {
  let project = temp_project(r#"{ "name": 1, "components": [{ "appKey": "" }] }"#);

  appjson_cmd()
    .args(["embed", "cpp", "--project-root"])
    .arg(project.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("is not a valid app manifest"))
    .stderr(predicate::str::contains("/name"))
    .stderr(predicate::str::contains("/components/0/appKey"));
}

#[test]
fn violation_count_never_exits_with_success() {
  let components = vec!["{}"; 24].join(", ");
  let project = temp_project(&format!(r#"{{ "name": "E", "displayName": "E", "components": [{components}] }}"#));

  appjson_cmd()
    .args(["embed", "swift", "--project-root"])
    .arg(project.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("(24 error(s))"))
    .stderr(predicate::str::contains("/components/23"));
}

#[test]
fn platform_names_are_case_insensitive() {
  let project = temp_project(TWO_COMPONENTS);

  appjson_cmd()
    .args(["embed", "C++", "--project-root"])
    .arg(project.path())
    .assert()
    .success();
  assert!(generated(project.path(), "Manifest.g.cpp").exists());
}

// =============================================================================
// declarations
// =============================================================================

#[test]
fn declarations_are_generated_next_to_embedded_source() {
  let project = temp_project(TWO_COMPONENTS);

  appjson_cmd()
    .args(["declarations", "kotlin", "--project-root"])
    .arg(project.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Generated"));
  let code = fs::read_to_string(generated(project.path(), "android/Manifest.kt")).unwrap();
  assert!(code.contains("data class Component("));

  appjson_cmd()
    .args(["declarations", "kotlin", "--project-root"])
    .arg(project.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("up to date"));
}

#[test]
fn declarations_to_explicit_output() {
  let temp = TempDir::new().unwrap();
  let output = temp.path().join("Manifest.h");

  appjson_cmd()
    .args(["declarations", "cpp", "--project-root"])
    .arg(temp.path())
    .arg("--output")
    .arg(&output)
    .assert()
    .success();
  assert!(fs::read_to_string(&output).unwrap().contains("namespace ReactApp"));
}

// =============================================================================
// validate
// =============================================================================

#[test]
fn validate_prints_escaped_manifest() {
  let project = temp_project(TWO_COMPONENTS);

  appjson_cmd()
    .args(["validate", "--project-root"])
    .arg(project.path())
    .assert()
    .success()
    .stdout(predicate::str::starts_with(r#"{\"name\":\"Example\""#))
    .stdout(predicate::str::contains("resources").not());
}

#[test]
fn validate_writes_header() {
  let project = temp_project(TWO_COMPONENTS);

  appjson_cmd()
    .args(["validate", "--mode", "file", "--project-root"])
    .arg(project.path())
    .assert()
    .success();

  let header = fs::read_to_string(generated(project.path(), "app.json.h")).unwrap();
  assert!(header.contains("#define ReactTestApp_AppManifestChecksum"));
}

// =============================================================================
// checksum
// =============================================================================

#[test]
fn checksum_prints_full_hash() {
  let project = temp_project(TWO_COMPONENTS);

  appjson_cmd()
    .args(["checksum", "--project-root"])
    .arg(project.path())
    .assert()
    .success()
    .stdout(predicate::str::is_match("^[0-9a-f]{64}\n$").unwrap());
}

// =============================================================================
// android-manifest
// =============================================================================

#[test]
fn android_manifest_generates_xml() {
  let project = temp_project(
    r#"{
      "name": "Example",
      "displayName": "Example",
      "android": { "permissions": [{ "android:name": "android.permission.CAMERA" }] }
    }"#,
  );
  let output = project.path().join("build").join("AndroidManifest.xml");

  appjson_cmd()
    .arg("android-manifest")
    .arg(project.path().join("app.json"))
    .arg(&output)
    .assert()
    .success();

  let xml = fs::read_to_string(&output).unwrap();
  assert!(xml.contains("android.permission.CAMERA"));
}
