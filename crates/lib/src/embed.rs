//! The manifest compiler pipeline.
//!
//! ```text
//! locate app.json -> validate -> fingerprint -> resolve output -> emit -> write
//! ```
//!
//! Each stage fails with its own [`EmbedError`] variant; the variant decides
//! the process exit code. Writing is skipped when the existing output was
//! produced from the same fingerprint by the same generator version.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::codegen::{self, Backend, CodegenError};
use crate::diagnostics::Diagnostics;
use crate::state::{self, GeneratedState, StateError};
use crate::util::fs::write_atomic;
use crate::util::hash::{Fingerprint, HashError};
use crate::validate::{ValidateError, load_manifest};

#[derive(Debug, Error)]
pub enum EmbedError {
  #[error(transparent)]
  Validate(#[from] ValidateError),

  #[error(transparent)]
  Codegen(#[from] CodegenError),

  #[error("failed to fingerprint manifest: {0}")]
  Fingerprint(#[source] HashError),

  #[error("failed to write {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  State(#[from] StateError),
}

impl EmbedError {
  /// Process exit code for this failure.
  ///
  /// Schema violations map to `1000 + error count`; everything else is `1`.
  pub fn exit_code(&self) -> i32 {
    match self {
      EmbedError::Validate(e) => e.exit_code(),
      _ => 1,
    }
  }
}

/// Options for [`embed`].
#[derive(Debug, Clone)]
pub struct EmbedOptions {
  /// Directory the manifest search starts from.
  pub project_root: PathBuf,
  pub backend: Backend,
  /// Write here instead of beneath `node_modules/.generated`.
  pub output: Option<PathBuf>,
  /// Regenerate even if the output is up to date.
  pub force: bool,
}

impl EmbedOptions {
  pub fn new(project_root: impl Into<PathBuf>, backend: Backend) -> Self {
    Self {
      project_root: project_root.into(),
      backend,
      output: None,
      force: false,
    }
  }
}

/// Outcome of a successful [`embed`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedResult {
  pub manifest_path: PathBuf,
  pub output_path: PathBuf,
  pub backend: Backend,
  pub checksum: Fingerprint,
  /// The output was already up to date and was not rewritten.
  pub skipped: bool,
  /// Values that were left out of the generated code.
  pub warnings: Vec<String>,
}

/// Compile the project's manifest into source code for one backend.
pub async fn embed(options: &EmbedOptions) -> Result<EmbedResult, EmbedError> {
  let validated = load_manifest(&options.project_root)?;
  let checksum = validated.fingerprint().map_err(EmbedError::Fingerprint)?;
  debug!(checksum = %checksum, "fingerprinted manifest");

  let output_path = match &options.output {
    Some(path) => path.clone(),
    None => options.backend.output_path(&options.project_root)?,
  };

  let expected = GeneratedState::current(&checksum, options.backend);
  if !options.force && state::is_up_to_date(&output_path, &expected) {
    info!(path = %output_path.display(), "generated manifest is up to date");
    return Ok(EmbedResult {
      manifest_path: validated.path,
      output_path,
      backend: options.backend,
      checksum,
      skipped: true,
      warnings: Vec::new(),
    });
  }

  let mut diagnostics = Diagnostics::new();
  let code = codegen::emit(&validated.manifest, &checksum, options.backend, &mut diagnostics);

  write_atomic(&output_path, code.as_bytes())
    .await
    .map_err(|source| EmbedError::Write {
      path: output_path.clone(),
      source,
    })?;
  state::save(&output_path, &expected).await?;
  info!(path = %output_path.display(), backend = %options.backend, "generated manifest");

  Ok(EmbedResult {
    manifest_path: validated.path,
    output_path,
    backend: options.backend,
    checksum,
    skipped: false,
    warnings: diagnostics.into_warnings(),
  })
}

/// Write the `Manifest`/`Component` declarations for `backend`, leaving the
/// file untouched if its content would not change.
///
/// Returns the declarations path and whether it was written. The manifest
/// itself is not read; the declarations depend only on the schema.
pub async fn write_declarations(
  project_root: &Path,
  backend: Backend,
  output: Option<PathBuf>,
) -> Result<(PathBuf, bool), EmbedError> {
  let path = match output {
    Some(path) => path,
    None => backend.declarations_path(project_root)?,
  };
  let content = codegen::declarations(backend)?;

  if std::fs::read_to_string(&path).is_ok_and(|existing| existing == content) {
    debug!(path = %path.display(), "declarations are up to date");
    return Ok((path, false));
  }

  write_atomic(&path, content.as_bytes())
    .await
    .map_err(|source| EmbedError::Write {
      path: path.clone(),
      source,
    })?;
  info!(path = %path.display(), backend = %backend, "wrote declarations");
  Ok((path, true))
}

/// Run [`embed`] with default options and return the process exit code.
pub async fn compile(project_root: &Path, backend: Backend) -> i32 {
  match embed(&EmbedOptions::new(project_root, backend)).await {
    Ok(_) => 0,
    Err(e) => {
      tracing::error!("{e}");
      e.exit_code()
    }
  }
}
