//! C/C++ header embedding the stripped manifest as a string literal.
//!
//! Hosts that parse the manifest at runtime include
//! `node_modules/.generated/app.json.h` and read three macros: the JSON text,
//! its checksum and its length in bytes.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::codegen::CodegenError;
use crate::consts::{APP_MANIFEST, NODE_MODULES};
use crate::platform::paths::{find_dependency_root, generated_dir};
use crate::util::fs::write_atomic;
use crate::util::hash::{Fingerprint, hash_bytes};
use crate::validate::ValidatedManifest;

const INCLUDE_GUARD: &str = "REACTTESTAPP_APP_JSON_H_";

#[derive(Debug, Error)]
pub enum HeaderError {
  #[error("failed to serialize manifest: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error(transparent)]
  DependencyRoot(#[from] CodegenError),

  #[error("failed to write {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// The stripped manifest in its compact serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestHeader {
  json: String,
  checksum: Fingerprint,
}

impl ManifestHeader {
  pub fn new(validated: &ValidatedManifest) -> Result<Self, HeaderError> {
    let json = serde_json::to_string(&validated.document).map_err(HeaderError::Serialize)?;
    let checksum = hash_bytes(json.as_bytes());
    Ok(Self { json, checksum })
  }

  pub fn json(&self) -> &str {
    &self.json
  }

  pub fn checksum(&self) -> &Fingerprint {
    &self.checksum
  }

  /// The JSON text escaped for use inside a C string literal.
  pub fn escaped_json(&self) -> String {
    self.json.replace('\\', "\\\\").replace('"', "\\\"")
  }

  /// Complete header source.
  pub fn render(&self) -> String {
    [
      "// clang-format off".to_string(),
      format!("#ifndef {INCLUDE_GUARD}"),
      format!("#define {INCLUDE_GUARD}"),
      String::new(),
      format!("#define ReactTestApp_AppManifest \"{}\"", self.escaped_json()),
      format!("#define ReactTestApp_AppManifestChecksum \"{}\"", self.checksum),
      format!("#define ReactTestApp_AppManifestLength {}", self.json.len()),
      String::new(),
      format!("#endif  // {INCLUDE_GUARD}"),
      String::new(),
    ]
    .join("\n")
  }
}

/// Where the header of a project goes.
pub fn header_path(project_root: &Path) -> Result<PathBuf, HeaderError> {
  let dependency_root = find_dependency_root(project_root).ok_or_else(|| CodegenError::DependencyRootNotFound {
    start: project_root.to_path_buf(),
  })?;
  debug!(path = %dependency_root.display(), "found {NODE_MODULES}");
  Ok(generated_dir(&dependency_root).join(format!("{APP_MANIFEST}.h")))
}

/// Write the header for `validated`, leaving the file untouched if its
/// content would not change.
///
/// Returns the header path and whether it was written.
pub async fn write_header(project_root: &Path, validated: &ValidatedManifest) -> Result<(PathBuf, bool), HeaderError> {
  let path = header_path(project_root)?;
  let content = ManifestHeader::new(validated)?.render();

  if std::fs::read_to_string(&path).is_ok_and(|existing| existing == content) {
    debug!(path = %path.display(), "header is up to date");
    return Ok((path, false));
  }

  write_atomic(&path, content.as_bytes())
    .await
    .map_err(|source| HeaderError::Write {
      path: path.clone(),
      source,
    })?;
  info!(path = %path.display(), "wrote manifest header");
  Ok((path, true))
}
