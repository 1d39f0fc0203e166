//! `AndroidManifest.xml` derived from the `android` section of `app.json`.
//!
//! Only `uses-feature` and `uses-permission` are generated. Gradle merges the
//! result into the host's own manifest, so everything else stays there.
//!
//! The output is not a complete app manifest: it has no `<application>`
//! element. Without a declared list, permissions default to network access
//! only; the host's camera feature and permission are not added.
//!
//! ```json
//! "android": {
//!   "features": [{ "android:name": "android.hardware.camera", "android:required": "false" }],
//!   "permissions": [{ "android:name": "android.permission.CAMERA" }]
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::util::fs::write_atomic;

const ANDROID_NS: &str = "http://schemas.android.com/apk/res/android";

/// Permissions every app needs to reach the development server.
const DEFAULT_PERMISSIONS: &[&str] = &["android.permission.ACCESS_NETWORK_STATE", "android.permission.INTERNET"];

/// <https://developer.android.com/guide/topics/manifest/uses-feature-element>
const FEATURE_NAMES: &[&str] = &["android:name", "android:glEsVersion"];
const FEATURE_ATTRIBUTES: &[&str] = &["android:required"];

/// <https://developer.android.com/guide/topics/manifest/uses-permission-element>
const PERMISSION_NAMES: &[&str] = &["android:name"];
const PERMISSION_ATTRIBUTES: &[&str] = &["android:maxSdkVersion"];

#[derive(Debug, Error)]
pub enum AndroidManifestError {
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

  #[error("failed to build AndroidManifest.xml: {0}")]
  Xml(String),

  #[error("failed to write {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// One `uses-*` element: its identifying attribute first, then the optional ones.
pub type Element = Vec<(String, String)>;

/// Elements and attributes derived from the `android` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AndroidManifest {
  pub features: Vec<Element>,
  pub permissions: Vec<Element>,
}

impl AndroidManifest {
  /// Derive the manifest from a whole `app.json` document.
  ///
  /// Declared lists replace the defaults; entries without an identifying
  /// attribute are ignored.
  pub fn from_app_manifest(app_manifest: &Value) -> Self {
    let android = app_manifest.get("android");
    let declared = |key: &str, names: &[&str], attributes: &[&str]| {
      let list = android.and_then(|a| a.get(key)).and_then(Value::as_array)?;
      let elements = to_elements(list, names, attributes);
      (!elements.is_empty()).then_some(elements)
    };

    let features = declared("features", FEATURE_NAMES, FEATURE_ATTRIBUTES).unwrap_or_default();
    let permissions = declared("permissions", PERMISSION_NAMES, PERMISSION_ATTRIBUTES).unwrap_or_else(|| {
      DEFAULT_PERMISSIONS
        .iter()
        .map(|name| vec![("android:name".to_string(), name.to_string())])
        .collect()
    });

    Self { features, permissions }
  }

  /// Render as an XML document.
  pub fn to_xml(&self) -> Result<String, AndroidManifestError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
      .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
      .map_err(xml_error)?;

    let mut root = BytesStart::new("manifest");
    root.push_attribute(("xmlns:android", ANDROID_NS));
    writer.write_event(Event::Start(root)).map_err(xml_error)?;

    for (tag, elements) in [("uses-feature", &self.features), ("uses-permission", &self.permissions)] {
      for element in elements {
        let mut start = BytesStart::new(tag);
        for (name, value) in element {
          start.push_attribute((name.as_str(), value.as_str()));
        }
        writer.write_event(Event::Empty(start)).map_err(xml_error)?;
      }
    }

    writer
      .write_event(Event::End(BytesEnd::new("manifest")))
      .map_err(xml_error)?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
    xml.push('\n');
    Ok(xml)
  }
}

fn xml_error(e: impl std::fmt::Display) -> AndroidManifestError {
  AndroidManifestError::Xml(e.to_string())
}

fn to_elements(entries: &[Value], names: &[&str], attributes: &[&str]) -> Vec<Element> {
  entries
    .iter()
    .filter_map(|entry| {
      let entry = entry.as_object()?;
      let name = names.iter().find(|name| entry.contains_key(**name))?;
      let mut element = vec![(name.to_string(), attribute_value(&entry[*name])?)];
      for attribute in attributes {
        if let Some(value) = entry.get(*attribute).and_then(attribute_value) {
          element.push((attribute.to_string(), value));
        }
      }
      Some(element)
    })
    .collect()
}

fn attribute_value(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

/// Whether `output` exists and is not older than `source`.
fn is_up_to_date(source: &Path, output: &Path) -> bool {
  let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified());
  match (modified(source), modified(output)) {
    (Ok(source), Ok(output)) => source <= output,
    _ => false,
  }
}

/// Generate `output` from the `app.json` at `app_manifest`.
///
/// Returns `false` if the output was newer than the manifest and was left alone.
pub async fn generate_android_manifest(app_manifest: &Path, output: &Path) -> Result<bool, AndroidManifestError> {
  if is_up_to_date(app_manifest, output) {
    debug!(path = %output.display(), "AndroidManifest.xml is up to date");
    return Ok(false);
  }

  let content = fs::read_to_string(app_manifest).map_err(|source| AndroidManifestError::Read {
    path: app_manifest.to_path_buf(),
    source,
  })?;
  let document: Value = serde_json::from_str(&content).map_err(|source| AndroidManifestError::Parse {
    path: app_manifest.to_path_buf(),
    source,
  })?;

  let xml = AndroidManifest::from_app_manifest(&document).to_xml()?;
  write_atomic(output, xml.as_bytes())
    .await
    .map_err(|source| AndroidManifestError::Write {
      path: output.to_path_buf(),
      source,
    })?;
  info!(path = %output.display(), "generated AndroidManifest.xml");
  Ok(true)
}
