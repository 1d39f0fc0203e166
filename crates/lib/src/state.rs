//! Record of what produced a generated file.
//!
//! Every generated source gets a sibling state file:
//!
//! ```text
//! node_modules/.generated/
//! ├── Manifest.g.cpp
//! └── Manifest.g.cpp.state.json   # GeneratedState
//! ```
//!
//! When the state matches the current fingerprint, generator version and
//! backend, and the output still exists, regenerating would produce the same
//! bytes and is skipped.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::codegen::Backend;
use crate::consts::GENERATOR_VERSION;
use crate::util::fs::write_atomic;
use crate::util::hash::Fingerprint;

/// Suffix appended to the generated file's name.
const STATE_SUFFIX: &str = ".state.json";

#[derive(Debug, Error)]
pub enum StateError {
  #[error("failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to serialize state: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("failed to write {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Inputs that determined the content of a generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedState {
  pub generator_version: String,
  pub checksum: String,
  pub backend: Backend,
}

impl GeneratedState {
  /// State for output produced by this build of the generator.
  pub fn current(checksum: &Fingerprint, backend: Backend) -> Self {
    Self {
      generator_version: GENERATOR_VERSION.to_string(),
      checksum: checksum.to_string(),
      backend,
    }
  }
}

/// Path of the state file belonging to `output`.
pub fn state_path(output: &Path) -> PathBuf {
  let mut name: OsString = output.file_name().map(OsString::from).unwrap_or_default();
  name.push(STATE_SUFFIX);
  output.with_file_name(name)
}

/// Load the state recorded next to `output`.
///
/// Returns `Ok(None)` if no state has been recorded.
pub fn load(output: &Path) -> Result<Option<GeneratedState>, StateError> {
  let path = state_path(output);
  let content = match std::fs::read_to_string(&path) {
    Ok(content) => content,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
    Err(source) => return Err(StateError::Read { path, source }),
  };

  serde_json::from_str(&content)
    .map(Some)
    .map_err(|source| StateError::Parse { path, source })
}

/// Record `state` next to `output`.
pub async fn save(output: &Path, state: &GeneratedState) -> Result<(), StateError> {
  let path = state_path(output);
  let content = serde_json::to_string_pretty(state).map_err(StateError::Serialize)?;
  write_atomic(&path, content.as_bytes())
    .await
    .map_err(|source| StateError::Write { path, source })
}

/// Whether `output` exists and was produced from exactly `expected`.
///
/// A state file that cannot be read counts as stale.
pub fn is_up_to_date(output: &Path, expected: &GeneratedState) -> bool {
  if !output.exists() {
    return false;
  }

  match load(output) {
    Ok(Some(recorded)) => recorded == *expected,
    Ok(None) => false,
    Err(e) => {
      debug!(error = %e, "ignoring unreadable state file");
      false
    }
  }
}
