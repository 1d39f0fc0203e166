use std::fs;

use appjson_lib::codegen::{Backend, CodegenError};
use appjson_lib::consts::CHECKSUM_LEN;
use appjson_lib::embed::{EmbedError, EmbedOptions, compile, embed, write_declarations};
use appjson_lib::validate::ValidateError;
use serde_json::json;
use tempfile::TempDir;

use super::common::{TestProject, two_components};

#[tokio::test]
async fn generates_cpp_for_two_components() {
  let project = TestProject::new(&two_components());

  let result = embed(&EmbedOptions::new(project.root(), Backend::Cpp)).await.unwrap();

  assert!(!result.skipped);
  assert!(result.warnings.is_empty());
  assert_eq!(result.output_path, project.generated("Manifest.g.cpp"));
  assert_eq!(result.checksum.as_str().len(), CHECKSUM_LEN);

  let code = fs::read_to_string(&result.output_path).unwrap();
  assert!(code.contains(&format!("return \"{}\";", result.checksum)));
  let first = code.find("\"App\"").unwrap();
  let second = code.find("\"App (modal)\"").unwrap();
  assert!(first < second);
  assert!(code.contains("\"modal\""));
}

#[tokio::test]
async fn compiling_twice_is_byte_identical() {
  let project = TestProject::new(&two_components());
  let mut options = EmbedOptions::new(project.root(), Backend::Kotlin);

  let first = embed(&options).await.unwrap();
  let before = fs::read(&first.output_path).unwrap();

  options.force = true;
  let second = embed(&options).await.unwrap();
  assert!(!second.skipped);
  assert_eq!(fs::read(&second.output_path).unwrap(), before);
  assert_eq!(first.checksum, second.checksum);
}

#[tokio::test]
async fn skips_unchanged_manifest() {
  let project = TestProject::new(&two_components());
  let options = EmbedOptions::new(project.root(), Backend::Cpp);

  embed(&options).await.unwrap();
  let second = embed(&options).await.unwrap();
  assert!(second.skipped);

  let mut changed = two_components();
  changed["displayName"] = json!("Changed");
  project.write_manifest(&changed);

  let third = embed(&options).await.unwrap();
  assert!(!third.skipped);
  assert_ne!(third.checksum, second.checksum);
}

#[tokio::test]
async fn regenerates_deleted_output() {
  let project = TestProject::new(&two_components());
  let options = EmbedOptions::new(project.root(), Backend::Cpp);

  let first = embed(&options).await.unwrap();
  fs::remove_file(&first.output_path).unwrap();

  let second = embed(&options).await.unwrap();
  assert!(!second.skipped);
  assert!(second.output_path.exists());
}

#[tokio::test]
async fn build_only_keys_do_not_change_checksum() {
  let project = TestProject::new(&two_components());
  let options = EmbedOptions::new(project.root(), Backend::Swift);
  let with_resources = embed(&options).await.unwrap();

  let mut stripped = two_components();
  let object = stripped.as_object_mut().unwrap();
  object.remove("$schema");
  object.remove("resources");
  object.insert("android".into(), json!({ "package": "com.example" }));
  project.write_manifest(&stripped);

  let without_resources = embed(&options).await.unwrap();
  assert_eq!(with_resources.checksum, without_resources.checksum);
  assert!(without_resources.skipped);
}

#[tokio::test]
async fn writes_to_explicit_output() {
  let project = TestProject::without_dependencies(&two_components());
  let output = project.root().join("build").join("Manifest.g.swift");

  let mut options = EmbedOptions::new(project.root(), Backend::Swift);
  options.output = Some(output.clone());
  let result = embed(&options).await.unwrap();

  assert_eq!(result.output_path, output);
  assert!(fs::read_to_string(&output).unwrap().contains("static func load() -> Self"));
}

#[tokio::test]
async fn missing_manifest_fails_with_exit_code_one() {
  let dir = TempDir::new().unwrap();

  let err = embed(&EmbedOptions::new(dir.path(), Backend::Cpp)).await.unwrap_err();
  assert!(matches!(err, EmbedError::Validate(ValidateError::NotFound { .. })));
  assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn missing_dependency_root_fails() {
  let project = TestProject::without_dependencies(&two_components());

  let err = embed(&EmbedOptions::new(project.root(), Backend::Cpp)).await.unwrap_err();
  assert!(matches!(
    err,
    EmbedError::Codegen(CodegenError::DependencyRootNotFound { .. })
  ));
  assert_eq!(compile(project.root(), Backend::Cpp).await, 1);
}

#[tokio::test]
async fn invalid_manifest_reports_every_violation() {
  let project = TestProject::new(&json!({
    "name": 1,
    "components": [{ "appKey": "" }, { "presentationStyle": "sheet" }],
  }));

  let err = embed(&EmbedOptions::new(project.root(), Backend::Cpp)).await.unwrap_err();
  let count = match &err {
    EmbedError::Validate(e) => e.violations().len(),
    other => panic!("unexpected error: {other}"),
  };
  assert!(count >= 4, "expected every violation, got {count}");
  assert_eq!(err.exit_code(), 1000 + count as i32);
  assert_eq!(compile(project.root(), Backend::Cpp).await, 1000 + count as i32);
  assert!(!project.generated("Manifest.g.cpp").exists());
}

#[tokio::test]
async fn backends_write_disjoint_paths() {
  let project = TestProject::new(&two_components());

  let mut paths = Vec::new();
  for backend in Backend::ALL {
    let result = embed(&EmbedOptions::new(project.root(), backend)).await.unwrap();
    paths.push(result.output_path);
  }
  paths.sort();
  paths.dedup();
  assert_eq!(paths.len(), Backend::ALL.len());
}

#[tokio::test]
async fn declarations_are_written_once() {
  let project = TestProject::new(&two_components());

  let (path, written) = write_declarations(project.root(), Backend::Kotlin, None).await.unwrap();
  assert!(written);
  assert_eq!(path, project.generated("android/Manifest.kt"));
  let code = fs::read_to_string(&path).unwrap();
  assert!(code.contains("data class Manifest("));

  let (_, written) = write_declarations(project.root(), Backend::Kotlin, None).await.unwrap();
  assert!(!written);
}

#[tokio::test]
async fn declarations_match_embedded_constructors() {
  let project = TestProject::new(&two_components());

  let result = embed(&EmbedOptions::new(project.root(), Backend::Cpp)).await.unwrap();
  let (path, _) = write_declarations(project.root(), Backend::Cpp, None).await.unwrap();

  assert_eq!(path.parent(), result.output_path.parent());
  let header = fs::read_to_string(&path).unwrap();
  let source = fs::read_to_string(&result.output_path).unwrap();
  assert!(source.contains(&format!("#include \"{}\"", Backend::Cpp.declarations().file_name())));
  for name in ["Manifest GetManifest();", "struct Component {", "JSONObject ="] {
    assert!(header.contains(name), "{name}");
  }
}

#[tokio::test]
async fn declarations_need_dependency_root_unless_output_is_given() {
  let project = TestProject::without_dependencies(&two_components());

  let err = write_declarations(project.root(), Backend::Cpp, None).await.unwrap_err();
  assert!(matches!(err, EmbedError::Codegen(CodegenError::DependencyRootNotFound { .. })));

  let output = project.root().join("Manifest.h");
  let (path, written) = write_declarations(project.root(), Backend::Cpp, Some(output.clone()))
    .await
    .unwrap();
  assert!(written);
  assert_eq!(path, output);
}
