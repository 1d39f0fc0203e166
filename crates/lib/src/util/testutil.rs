//! Test fixtures for appjson-lib.
//!
//! Manifests shared by the validator, emitter and driver tests.

use serde_json::{Map, Value, json};

use crate::manifest::Manifest;

/// A manifest using every top-level field, including build-only keys.
pub fn simple() -> Value {
  json!({
    "$schema": "https://example.com/app.schema.json",
    "name": "Example",
    "displayName": "Template",
    "version": "1.0",
    "bundleRoot": "main",
    "singleApp": "single",
    "components": [
      { "appKey": "Example" },
      {
        "appKey": "Example",
        "displayName": "Template",
        "initialProperties": {},
        "presentationStyle": "modal",
        "slug": "single",
      },
    ],
    "resources": ["dist/res", "dist/main.jsbundle"],
  })
}

/// Smallest manifest the emitters accept.
pub fn minimum() -> Value {
  json!({ "name": "Example" })
}

/// Two components; the second one is presented modally.
pub fn two_components() -> Value {
  json!({
    "name": "Example",
    "displayName": "Example",
    "components": [
      { "appKey": "Example", "displayName": "App" },
      { "appKey": "Example", "displayName": "App (modal)", "presentationStyle": "modal" },
    ],
  })
}

fn scalars() -> Value {
  json!({
    "boolean": true,
    "double": 1.1,
    "int": 1,
    "null": null,
    "string": "string",
  })
}

/// `initialProperties` nesting every JSON kind inside arrays and objects.
pub fn extended() -> Value {
  json!({
    "name": "Example",
    "components": [{
      "appKey": "Example",
      "initialProperties": {
        "boolean": true,
        "double": 1.1,
        "int": 1,
        "null": null,
        "string": "string",
        "array": [true, 1.1, 1, null, "string", [true, 1.1, 1, null, "string", [], scalars()], scalars()],
        "object": {
          "boolean": true,
          "double": 1.1,
          "int": 1,
          "null": null,
          "string": "string",
          "array": [true, 1.1, 1, null, "string", [true, 1.1, 1, null, "string", [], scalars()], {}],
        },
      },
    }],
  })
}

/// Unwrap a fixture into its object map.
pub fn object(value: Value) -> Map<String, Value> {
  match value {
    Value::Object(map) => map,
    other => panic!("expected an object, got {other}"),
  }
}

/// Typed manifest for a fixture, skipping schema validation.
pub fn manifest(value: Value) -> Manifest {
  Manifest::from_document(&object(value)).unwrap()
}
