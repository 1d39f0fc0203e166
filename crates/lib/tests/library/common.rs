use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// A project directory with an `app.json` and an installed `node_modules`.
pub struct TestProject {
  pub dir: TempDir,
}

impl TestProject {
  pub fn new(manifest: &Value) -> Self {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("node_modules")).unwrap();
    let project = Self { dir };
    project.write_manifest(manifest);
    project
  }

  /// A project without `node_modules`.
  pub fn without_dependencies(manifest: &Value) -> Self {
    let project = Self::new(manifest);
    fs::remove_dir(project.root().join("node_modules")).unwrap();
    project
  }

  pub fn root(&self) -> &Path {
    self.dir.path()
  }

  pub fn write_manifest(&self, manifest: &Value) {
    fs::write(self.root().join("app.json"), serde_json::to_string_pretty(manifest).unwrap()).unwrap();
  }

  pub fn generated(&self, relative: &str) -> PathBuf {
    dunce::canonicalize(self.root())
      .unwrap()
      .join("node_modules")
      .join(".generated")
      .join(relative)
  }
}

/// Two components; the second one is presented modally.
pub fn two_components() -> Value {
  json!({
    "$schema": "../node_modules/app.schema.json",
    "name": "Example",
    "displayName": "Example",
    "components": [
      { "appKey": "Example", "displayName": "App" },
      { "appKey": "Example", "displayName": "App (modal)", "presentationStyle": "modal" },
    ],
    "resources": { "android": ["dist/res"], "ios": ["dist/main.jsbundle"] },
  })
}
