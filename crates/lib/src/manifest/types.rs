//! Typed view of a validated app manifest.
//!
//! # Defaults
//!
//! `displayName` falls back to `name` (manifest) or `appKey` (component).
//! The fallback is applied by the accessors used during code generation; the
//! stored fields stay `None` so the model reflects exactly what was authored.
//!
//! # Components
//!
//! `components: None` means the manifest does not declare any components and
//! the shell discovers them at runtime. `Some(vec![])` declares zero
//! components. Both are emitted as an empty list, but they are distinct here
//! and produce different fingerprints.

use serde::{Deserialize, Serialize};

use super::value::JsonObject;

/// The runtime-relevant contents of `app.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
  /// App name.
  pub name: String,
  /// Display name; defaults to `name`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub display_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,
  /// Name of the JS bundle to load.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bundle_root: Option<String>,
  /// Slug of the component to launch directly, bypassing the component list.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub single_app: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub components: Option<Vec<Component>>,
}

impl Manifest {
  /// Build the typed view from a stripped manifest document.
  pub fn from_document(document: &serde_json::Map<String, serde_json::Value>) -> Result<Self, serde_json::Error> {
    serde_json::from_value(serde_json::Value::Object(document.clone()))
  }

  /// Display name with the `name` fallback applied.
  pub fn display_name(&self) -> &str {
    self.display_name.as_deref().unwrap_or(&self.name)
  }

  /// Declared components; empty when none are declared.
  pub fn components(&self) -> &[Component] {
    self.components.as_deref().unwrap_or_default()
  }
}

/// A launchable unit registered with the JS runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
  /// Key passed to `AppRegistry.registerComponent()`.
  pub app_key: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub display_name: Option<String>,
  /// Properties handed to the component on launch.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub initial_properties: Option<JsonObject>,
  /// `default` or `modal`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub presentation_style: Option<String>,
  /// URL slug used for deep linking.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub slug: Option<String>,
}

impl Component {
  /// Display name with the `appKey` fallback applied.
  pub fn display_name(&self) -> &str {
    self.display_name.as_deref().unwrap_or(&self.app_key)
  }
}
