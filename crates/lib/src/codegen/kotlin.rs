//! Kotlin literal syntax.
//!
//! Objects become `android.os.Bundle`s filled with typed `put*` calls, so the
//! entry syntax depends on the kind of value being stored.

use std::fmt::Write;

use super::{DeclarationSyntax, FieldType, LiteralSyntax};
use crate::consts::INDENT;
use crate::manifest::{JsonValue, as_integer};

/// Package of the generated provider; the Android host imports it from here.
const PACKAGE: &str = "com.microsoft.reacttestapp.manifest";

/// Kotlin backend; compiled into the Android host.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kotlin;

fn escape(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  for c in value.chars() {
    match c {
      '"' => out.push_str("\\\""),
      '\\' => out.push_str("\\\\"),
      '$' => out.push_str("\\$"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\u{8}' => out.push_str("\\b"),
      c if c.is_control() => {
        let _ = write!(out, "\\u{:04x}", c as u32);
      }
      c => out.push(c),
    }
  }
  out
}

/// Whole numbers that do not fit an `Int`.
fn is_long(n: i64) -> bool {
  i32::try_from(n).is_err()
}

impl Kotlin {
  fn put(method: &str, key: &str, rendered: &str) -> String {
    format!("{method}({key}, {rendered})")
  }
}

impl LiteralSyntax for Kotlin {
  fn null(&self) -> &'static str {
    "null"
  }

  fn number(&self, value: f64) -> String {
    match as_integer(value) {
      Some(n) if is_long(n) => format!("{n}L"),
      Some(n) => n.to_string(),
      None => format!("{value:?}"),
    }
  }

  fn string(&self, value: &str) -> String {
    self.text(value)
  }

  fn empty_array(&self) -> &'static str {
    "arrayListOf<Any>()"
  }

  fn array_open(&self) -> &'static str {
    "arrayListOf("
  }

  fn array_close(&self) -> &'static str {
    ")"
  }

  fn empty_object(&self) -> &'static str {
    "Bundle()"
  }

  fn object_open(&self) -> &'static str {
    "Bundle().apply {"
  }

  fn object_close(&self) -> &'static str {
    "}"
  }

  fn entry_depth(&self) -> usize {
    2
  }

  fn object_entry(&self, key: &str, value: &JsonValue, rendered: &str, indent: &str) -> String {
    let key = self.text(key);
    let call = match value {
      JsonValue::Null => Self::put("putString", &key, rendered),
      JsonValue::Bool(_) => Self::put("putBoolean", &key, rendered),
      JsonValue::Number(n) => match as_integer(*n) {
        Some(i) if is_long(i) => Self::put("putLong", &key, rendered),
        Some(_) => Self::put("putInt", &key, rendered),
        None => Self::put("putDouble", &key, rendered),
      },
      JsonValue::String(_) => Self::put("putString", &key, rendered),
      JsonValue::Array(_) | JsonValue::Object(_) => {
        let method = if matches!(value, JsonValue::Array(_)) {
          "putSerializable"
        } else {
          "putBundle"
        };
        let nested = format!("{indent}{INDENT}");
        format!("{method}(\n{nested}{key},\n{nested}{rendered}\n{indent})")
      }
    };
    format!("{indent}{call}")
  }

  fn none(&self) -> &'static str {
    "null"
  }

  fn text(&self, value: &str) -> String {
    format!("\"{}\"", escape(value))
  }

  fn empty_components(&self) -> &'static str {
    "arrayListOf<Component>()"
  }

  fn components_open(&self) -> &'static str {
    "arrayListOf("
  }

  fn components_close(&self) -> &'static str {
    ")"
  }

  fn component_open(&self) -> &'static str {
    "Component("
  }

  fn component_close(&self) -> &'static str {
    ")"
  }

  fn manifest_depth(&self) -> usize {
    4
  }

  fn source_file(&self, manifest_fields: &str, checksum: &str) -> String {
    format!(
      r#"package {PACKAGE}

import android.os.Bundle

class ManifestProvider {{
    companion object {{
        fun checksum(): String {{
            return "{checksum}"
        }}

        fun manifest(): Manifest {{
            return Manifest(
{manifest_fields}
            )
        }}
    }}
}}
"#
    )
  }
}

impl DeclarationSyntax for Kotlin {
  fn file_name(&self) -> &'static str {
    "Manifest.kt"
  }

  fn preamble(&self) -> Option<&'static str> {
    Some(
      r#"@file:Suppress("ktlint:standard:trailing-comma-on-declaration-site")

package com.microsoft.reacttestapp.manifest

import android.os.Bundle
"#,
    )
  }

  fn struct_open(&self, name: &str) -> String {
    format!("data class {name}(")
  }

  fn struct_close(&self) -> &'static str {
    ")"
  }

  fn field_declaration(&self, name: &str, ty: &FieldType, required: bool) -> String {
    let ty = match ty {
      FieldType::List(item) => format!("List<{item}>"),
      FieldType::Object => "Bundle".to_string(),
      FieldType::String => "String".to_string(),
    };
    let optional = if required { "" } else { "?" };
    format!("val {name}: {ty}{optional},")
  }
}
