//! Locating the manifest and dependency root of a project.
//!
//! Both are found by searching upward from a start directory, the way package
//! managers resolve `node_modules`: the nearest ancestor containing the entry
//! wins.

use std::path::{Path, PathBuf};

use crate::consts::{APP_MANIFEST, GENERATED_DIR, NODE_MODULES};

/// Returns the first `<ancestor>/<name>` that exists, starting at `start_dir`.
pub fn find_file(name: &str, start_dir: &Path) -> Option<PathBuf> {
  let start = dunce::canonicalize(start_dir).unwrap_or_else(|_| start_dir.to_path_buf());
  start
    .ancestors()
    .map(|dir| dir.join(name))
    .find(|candidate| candidate.exists())
}

/// Returns the path to the nearest `app.json`.
pub fn find_manifest(project_root: &Path) -> Option<PathBuf> {
  find_file(APP_MANIFEST, project_root)
}

/// Returns the nearest `node_modules` directory.
pub fn find_dependency_root(start_dir: &Path) -> Option<PathBuf> {
  find_file(NODE_MODULES, start_dir)
}

/// Returns the generator-owned directory inside a dependency root.
pub fn generated_dir(dependency_root: &Path) -> PathBuf {
  dependency_root.join(GENERATED_DIR)
}

/// Returns the Xcode source root.
///
/// Xcode exports `SRCROOT` to build phases; outside Xcode the project root is
/// used instead.
pub fn src_root(project_root: &Path) -> PathBuf {
  std::env::var_os("SRCROOT")
    .filter(|value| !value.is_empty())
    .map(PathBuf::from)
    .unwrap_or_else(|| project_root.to_path_buf())
}
