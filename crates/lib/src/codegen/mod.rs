//! Source code generation for embedded manifests.
//!
//! Every backend writes the same structure: a manifest literal, the component
//! list, and two accessors returning the manifest and its checksum. The
//! traversal over the manifest is shared; a backend only supplies its literal
//! syntax through [`LiteralSyntax`].
//!
//! # Layout
//!
//! Non-empty arrays and objects are written one element per line. Nested
//! values are indented one [`INDENT`] per level, so the output is stable and
//! diffs cleanly between builds.
//!
//! # Unsupported values
//!
//! Values that cannot be expressed as a literal (non-finite numbers) are
//! skipped with a warning in [`Diagnostics`]; the rest of the file is still
//! generated.
//!
//! # Declarations
//!
//! The `Manifest` and `Component` types the literals construct are generated
//! from the schema by [`declarations`], one file per backend.

mod cpp;
mod declarations;
mod kotlin;
mod swift;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use cpp::Cpp;
pub use declarations::{DeclarationSyntax, EXCLUDE_KEYWORD, FieldType, declarations, declare, typename};
pub use kotlin::Kotlin;
pub use swift::Swift;

use crate::consts::INDENT;
use crate::diagnostics::Diagnostics;
use crate::manifest::{Component, JsonObject, JsonValue, Manifest};
use crate::platform::paths::{find_dependency_root, generated_dir, src_root};
use crate::util::hash::Fingerprint;

/// Errors raised while resolving where generated code goes.
#[derive(Debug, Error)]
pub enum CodegenError {
  #[error("failed to find 'node_modules' in {} or any parent directory; make sure npm dependencies are installed", start.display())]
  DependencyRootNotFound { start: PathBuf },

  #[error("unknown backend '{0}'; expected one of: cpp, kotlin, swift")]
  UnknownBackend(String),

  #[error("cannot generate declarations: {0}")]
  InvalidSchema(String),
}

/// Target language of the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  /// C++ for Windows (and any other C++ host).
  Cpp,
  /// Kotlin for Android.
  Kotlin,
  /// Swift for iOS, macOS and visionOS.
  Swift,
}

impl Backend {
  pub const ALL: [Backend; 3] = [Backend::Cpp, Backend::Kotlin, Backend::Swift];

  pub fn as_str(self) -> &'static str {
    match self {
      Backend::Cpp => "cpp",
      Backend::Kotlin => "kotlin",
      Backend::Swift => "swift",
    }
  }

  /// Literal syntax of this backend.
  pub fn syntax(self) -> &'static dyn LiteralSyntax {
    match self {
      Backend::Cpp => &Cpp,
      Backend::Kotlin => &Kotlin,
      Backend::Swift => &Swift,
    }
  }

  /// Declaration syntax of this backend.
  pub fn declarations(self) -> &'static dyn DeclarationSyntax {
    match self {
      Backend::Cpp => &Cpp,
      Backend::Kotlin => &Kotlin,
      Backend::Swift => &Swift,
    }
  }

  /// Location of the type declarations, next to the embedded manifest.
  pub fn declarations_path(self, project_root: &Path) -> Result<PathBuf, CodegenError> {
    Ok(self.output_path(project_root)?.with_file_name(self.declarations().file_name()))
  }

  /// Directory the dependency root search starts from.
  fn search_start(self, project_root: &Path) -> PathBuf {
    match self {
      Backend::Swift => src_root(project_root),
      Backend::Cpp | Backend::Kotlin => project_root.to_path_buf(),
    }
  }

  /// Location of the generated file beneath `node_modules/.generated`.
  ///
  /// Fails when no `node_modules` directory exists above the search start;
  /// writing elsewhere would only make the native build fail later with a
  /// less obvious error.
  pub fn output_path(self, project_root: &Path) -> Result<PathBuf, CodegenError> {
    let start = self.search_start(project_root);
    let dependency_root = find_dependency_root(&start).ok_or_else(|| CodegenError::DependencyRootNotFound {
      start: start.clone(),
    })?;
    let generated = generated_dir(&dependency_root);

    let path = match self {
      Backend::Cpp => generated.join("Manifest.g.cpp"),
      Backend::Kotlin => generated.join("android").join("ManifestProvider.g.kt"),
      Backend::Swift => {
        let start = dunce::canonicalize(&start).unwrap_or(start);
        let project = start
          .file_name()
          .map(|name| name.to_string_lossy().into_owned())
          .unwrap_or_else(|| "app".to_string());
        generated.join(project).join("Manifest+Embedded.g.swift")
      }
    };
    Ok(path)
  }
}

impl fmt::Display for Backend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Backend {
  type Err = CodegenError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "cpp" | "c++" => Ok(Backend::Cpp),
      "kotlin" | "kt" => Ok(Backend::Kotlin),
      "swift" => Ok(Backend::Swift),
      _ => Err(CodegenError::UnknownBackend(s.to_string())),
    }
  }
}

/// Literal syntax of a target language.
///
/// Methods returning fragments never add indentation to their first line;
/// multi-line fragments indent continuation lines relative to the level they
/// are rendered at.
pub trait LiteralSyntax: Sync {
  /// JSON `null` inside `initialProperties`.
  fn null(&self) -> &'static str;

  fn boolean(&self, value: bool) -> String {
    value.to_string()
  }

  /// A finite number.
  fn number(&self, value: f64) -> String;

  /// A JSON string inside `initialProperties`.
  fn string(&self, value: &str) -> String;

  fn empty_array(&self) -> &'static str;
  fn array_open(&self) -> &'static str;
  fn array_close(&self) -> &'static str;

  fn empty_object(&self) -> &'static str;
  fn object_open(&self) -> &'static str;
  fn object_close(&self) -> &'static str;

  /// Levels added to the indentation of a value rendered inside an object entry.
  fn entry_depth(&self) -> usize;

  /// A complete object entry line (or lines), starting with `indent`.
  ///
  /// `rendered` is `value` already rendered at the entry depth.
  fn object_entry(&self, key: &str, value: &JsonValue, rendered: &str, indent: &str) -> String;

  /// An absent optional field.
  fn none(&self) -> &'static str;

  /// A string field of the manifest or a component.
  fn text(&self, value: &str) -> String;

  /// A constructor argument; labelled in languages that label arguments.
  fn field(&self, _name: &str, value: String) -> String {
    value
  }

  fn empty_components(&self) -> &'static str;
  fn components_open(&self) -> &'static str;
  fn components_close(&self) -> &'static str;
  fn component_open(&self) -> &'static str;
  fn component_close(&self) -> &'static str;

  /// Indentation level of the manifest constructor arguments.
  fn manifest_depth(&self) -> usize;

  /// The complete source file around the manifest constructor arguments.
  fn source_file(&self, manifest_fields: &str, checksum: &str) -> String;
}

/// Indentation for `level`.
pub fn indent(level: usize) -> String {
  INDENT.repeat(level)
}

/// Generate the complete source file for `backend`.
pub fn emit(manifest: &Manifest, checksum: &Fingerprint, backend: Backend, diagnostics: &mut Diagnostics) -> String {
  let syntax = backend.syntax();
  let level = syntax.manifest_depth();
  let fields = render_manifest_fields(syntax, manifest, level, diagnostics);
  syntax.source_file(&join_fields(&fields, level), checksum.as_str())
}

/// The manifest constructor arguments, in declaration order.
pub fn render_manifest_fields(
  syntax: &dyn LiteralSyntax,
  manifest: &Manifest,
  level: usize,
  diagnostics: &mut Diagnostics,
) -> Vec<String> {
  vec![
    syntax.field("name", syntax.text(&manifest.name)),
    syntax.field("displayName", syntax.text(manifest.display_name())),
    syntax.field("version", optional_text(syntax, manifest.version.as_deref())),
    syntax.field("bundleRoot", optional_text(syntax, manifest.bundle_root.as_deref())),
    syntax.field("singleApp", optional_text(syntax, manifest.single_app.as_deref())),
    syntax.field(
      "components",
      render_components(syntax, manifest.components(), level, diagnostics),
    ),
  ]
}

/// The component list.
///
/// Absent and empty component lists both render as an empty list.
pub fn render_components(
  syntax: &dyn LiteralSyntax,
  components: &[Component],
  level: usize,
  diagnostics: &mut Diagnostics,
) -> String {
  if components.is_empty() {
    return syntax.empty_components().to_string();
  }

  let outer = indent(level + 1);
  let mut lines = vec![syntax.components_open().to_string()];
  for component in components {
    let initial_properties = match &component.initial_properties {
      Some(props) => render_object(syntax, props, level + 2, diagnostics),
      None => syntax.none().to_string(),
    };
    let fields = [
      syntax.field("appKey", syntax.text(&component.app_key)),
      syntax.field("displayName", syntax.text(component.display_name())),
      syntax.field("initialProperties", initial_properties),
      syntax.field(
        "presentationStyle",
        optional_text(syntax, component.presentation_style.as_deref()),
      ),
      syntax.field("slug", optional_text(syntax, component.slug.as_deref())),
    ];

    lines.push(format!("{outer}{}", syntax.component_open()));
    lines.push(join_fields(&fields, level + 2));
    lines.push(format!("{outer}{},", syntax.component_close()));
  }
  lines.push(format!("{}{}", indent(level), syntax.components_close()));
  lines.join("\n")
}

/// Any JSON value; `None` if it has no literal form.
pub fn render_value(
  syntax: &dyn LiteralSyntax,
  value: &JsonValue,
  level: usize,
  diagnostics: &mut Diagnostics,
) -> Option<String> {
  match value {
    JsonValue::Null => Some(syntax.null().to_string()),
    JsonValue::Bool(b) => Some(syntax.boolean(*b)),
    JsonValue::Number(n) if n.is_finite() => Some(syntax.number(*n)),
    JsonValue::Number(_) => None,
    JsonValue::String(s) => Some(syntax.string(s)),
    JsonValue::Array(items) => Some(render_array(syntax, items, level, diagnostics)),
    JsonValue::Object(entries) => Some(render_object(syntax, entries, level, diagnostics)),
  }
}

pub fn render_array(
  syntax: &dyn LiteralSyntax,
  items: &[JsonValue],
  level: usize,
  diagnostics: &mut Diagnostics,
) -> String {
  let inner = indent(level + 1);
  let mut lines = Vec::with_capacity(items.len());
  for item in items {
    match render_value(syntax, item, level + 1, diagnostics) {
      Some(rendered) => lines.push(format!("{inner}{rendered}")),
      None => diagnostics.warn(format!("unsupported {} value in array: {item:?}", item.kind())),
    }
  }

  if lines.is_empty() {
    return syntax.empty_array().to_string();
  }
  format!(
    "{}\n{}\n{}{}",
    syntax.array_open(),
    lines.join(",\n"),
    indent(level),
    syntax.array_close()
  )
}

pub fn render_object(
  syntax: &dyn LiteralSyntax,
  entries: &JsonObject,
  level: usize,
  diagnostics: &mut Diagnostics,
) -> String {
  let inner = indent(level + 1);
  let mut lines = Vec::with_capacity(entries.len());
  for (key, value) in entries {
    match render_value(syntax, value, level + syntax.entry_depth(), diagnostics) {
      Some(rendered) => lines.push(syntax.object_entry(key, value, &rendered, &inner)),
      None => diagnostics.warn(format!("unsupported {} value for '{key}': {value:?}", value.kind())),
    }
  }

  if lines.is_empty() {
    return syntax.empty_object().to_string();
  }
  format!(
    "{}\n{}\n{}{}",
    syntax.object_open(),
    lines.join("\n"),
    indent(level),
    syntax.object_close()
  )
}

fn optional_text(syntax: &dyn LiteralSyntax, value: Option<&str>) -> String {
  match value {
    Some(value) => syntax.text(value),
    None => syntax.none().to_string(),
  }
}

fn join_fields(fields: &[String], level: usize) -> String {
  let prefix = indent(level);
  fields
    .iter()
    .map(|field| format!("{prefix}{field}"))
    .collect::<Vec<_>>()
    .join(",\n")
}
