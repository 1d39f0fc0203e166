//! Schema validation of `app.json`.
//!
//! The raw document is checked against the embedded JSON Schema. Every
//! violation is collected, not just the first, so authors can fix all of them
//! in one pass. Documents that pass have their build-only keys removed and are
//! returned together with their typed [`Manifest`] view.
//!
//! The schema carries documentation keywords (`markdownDescription`,
//! `exclude-from-codegen`) that are not part of JSON Schema; the engine treats
//! unknown keywords as annotations, so they never fail validation.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::consts::{BUILD_ONLY_KEYS, VALIDATION_EXIT_BASE};
use crate::manifest::Manifest;
use crate::platform::paths::find_manifest;
use crate::util::hash::{Fingerprint, Fingerprintable, HashError};

/// The app manifest schema.
pub const SCHEMA: &str = include_str!("schema.json");

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
  /// JSON pointer to the offending value; empty for the document root.
  pub instance_path: String,
  pub message: String,
}

impl fmt::Display for SchemaViolation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let path = if self.instance_path.is_empty() {
      "<root>"
    } else {
      &self.instance_path
    };
    write!(f, "{} {}", path, self.message)
  }
}

/// Errors that can occur while loading and validating a manifest.
#[derive(Debug, Error)]
pub enum ValidateError {
  #[error("failed to find 'app.json' in {} or any parent directory", start.display())]
  NotFound { start: PathBuf },

  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to parse {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("{}: app.json is not a valid app manifest ({} error(s))", path.display(), violations.len())]
  Invalid {
    path: PathBuf,
    violations: Vec<SchemaViolation>,
  },

  #[error("{}: unexpected manifest shape: {source}", path.display())]
  Shape { path: PathBuf, source: serde_json::Error },

  #[error("failed to compile manifest schema: {0}")]
  Schema(String),
}

impl ValidateError {
  /// Schema violations carried by this error.
  pub fn violations(&self) -> &[SchemaViolation] {
    match self {
      ValidateError::Invalid { violations, .. } => violations,
      _ => &[],
    }
  }

  /// Process exit code: `1000 + error count` for schema violations, `1` otherwise.
  pub fn exit_code(&self) -> i32 {
    match self {
      ValidateError::Invalid { violations, .. } => VALIDATION_EXIT_BASE + violations.len() as i32,
      _ => 1,
    }
  }
}

/// A manifest that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedManifest {
  /// Where the manifest was read from.
  pub path: PathBuf,
  /// The stripped document, in authored key order.
  pub document: Map<String, Value>,
  /// Typed view of `document`.
  pub manifest: Manifest,
}

impl ValidatedManifest {
  pub fn fingerprint(&self) -> Result<Fingerprint, HashError> {
    self.document.fingerprint()
  }
}

/// Validates documents against a compiled schema.
pub struct ManifestValidator {
  validator: jsonschema::Validator,
}

impl ManifestValidator {
  /// Compile the embedded app manifest schema.
  pub fn new() -> Result<Self, ValidateError> {
    let schema: Value = serde_json::from_str(SCHEMA).map_err(|e| ValidateError::Schema(e.to_string()))?;
    Self::with_schema(&schema)
  }

  /// Compile a caller-supplied schema document.
  pub fn with_schema(schema: &Value) -> Result<Self, ValidateError> {
    let validator = jsonschema::options()
      .with_draft(jsonschema::Draft::Draft202012)
      .build(schema)
      .map_err(|e| ValidateError::Schema(e.to_string()))?;
    Ok(Self { validator })
  }

  /// Every violation in `document`, in the order the engine reports them.
  pub fn violations(&self, document: &Value) -> Vec<SchemaViolation> {
    self
      .validator
      .iter_errors(document)
      .map(|error| SchemaViolation {
        instance_path: error.instance_path().to_string(),
        message: error.to_string(),
      })
      .collect()
  }

  /// Validate a parsed document read from `source`.
  pub fn validate(&self, document: Value, source: &Path) -> Result<ValidatedManifest, ValidateError> {
    let violations = self.violations(&document);
    if !violations.is_empty() {
      return Err(ValidateError::Invalid {
        path: source.to_path_buf(),
        violations,
      });
    }

    let Value::Object(mut document) = document else {
      return Err(ValidateError::Invalid {
        path: source.to_path_buf(),
        violations: vec![SchemaViolation {
          instance_path: String::new(),
          message: "must be object".to_string(),
        }],
      });
    };

    strip_build_only_keys(&mut document);

    let manifest = Manifest::from_document(&document).map_err(|source_err| ValidateError::Shape {
      path: source.to_path_buf(),
      source: source_err,
    })?;

    debug!(path = %source.display(), "manifest is valid");
    Ok(ValidatedManifest {
      path: source.to_path_buf(),
      document,
      manifest,
    })
  }

  /// Read, parse and validate the manifest at `path`.
  pub fn validate_file(&self, path: &Path) -> Result<ValidatedManifest, ValidateError> {
    let content = fs::read_to_string(path).map_err(|e| ValidateError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;
    let document: Value = serde_json::from_str(&content).map_err(|e| ValidateError::Parse {
      path: path.to_path_buf(),
      source: e,
    })?;
    self.validate(document, path)
  }
}

/// Locate `app.json` from `project_root` and validate it.
pub fn load_manifest(project_root: &Path) -> Result<ValidatedManifest, ValidateError> {
  let path = find_manifest(project_root).ok_or_else(|| ValidateError::NotFound {
    start: project_root.to_path_buf(),
  })?;
  debug!(path = %path.display(), "found manifest");
  ManifestValidator::new()?.validate_file(&path)
}

/// Remove top-level keys that only matter to build tooling.
///
/// The remaining keys keep their relative order.
pub fn strip_build_only_keys(document: &mut Map<String, Value>) {
  document.retain(|key, _| !BUILD_ONLY_KEYS.contains(&key.as_str()));
}
