//! Swift literal syntax.

use std::fmt::Write;

use super::{DeclarationSyntax, FieldType, LiteralSyntax};
use crate::manifest::{JsonValue, as_integer};

/// Swift backend; compiled into the iOS, macOS and visionOS hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Swift;

fn escape(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  for c in value.chars() {
    match c {
      '"' => out.push_str("\\\""),
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\0' => out.push_str("\\0"),
      c if c.is_control() => {
        let _ = write!(out, "\\u{{{:x}}}", c as u32);
      }
      c => out.push(c),
    }
  }
  out
}

impl LiteralSyntax for Swift {
  fn null(&self) -> &'static str {
    "NSNull()"
  }

  fn number(&self, value: f64) -> String {
    match as_integer(value) {
      Some(n) => n.to_string(),
      None => format!("{value:?}"),
    }
  }

  fn string(&self, value: &str) -> String {
    self.text(value)
  }

  fn empty_array(&self) -> &'static str {
    "[]"
  }

  fn array_open(&self) -> &'static str {
    "["
  }

  fn array_close(&self) -> &'static str {
    "]"
  }

  fn empty_object(&self) -> &'static str {
    "[:]"
  }

  fn object_open(&self) -> &'static str {
    "["
  }

  fn object_close(&self) -> &'static str {
    "]"
  }

  fn entry_depth(&self) -> usize {
    1
  }

  fn object_entry(&self, key: &str, _value: &JsonValue, rendered: &str, indent: &str) -> String {
    format!("{indent}{}: {rendered},", self.text(key))
  }

  fn none(&self) -> &'static str {
    "nil"
  }

  fn text(&self, value: &str) -> String {
    format!("\"{}\"", escape(value))
  }

  fn field(&self, name: &str, value: String) -> String {
    format!("{name}: {value}")
  }

  fn empty_components(&self) -> &'static str {
    "[]"
  }

  fn components_open(&self) -> &'static str {
    "["
  }

  fn components_close(&self) -> &'static str {
    "]"
  }

  fn component_open(&self) -> &'static str {
    "Component("
  }

  fn component_close(&self) -> &'static str {
    ")"
  }

  fn manifest_depth(&self) -> usize {
    3
  }

  fn source_file(&self, manifest_fields: &str, checksum: &str) -> String {
    format!(
      r#"import Foundation

extension Manifest {{
    static func checksum() -> String {{
        "{checksum}"
    }}

    static func load() -> Self {{
        Manifest(
{manifest_fields}
        )
    }}
}}
"#
    )
  }
}

impl DeclarationSyntax for Swift {
  fn file_name(&self) -> &'static str {
    "Manifest.swift"
  }

  /// Lets hosts build a component from its app key alone.
  fn epilogue(&self) -> Option<&'static str> {
    Some(
      r#"extension Component {
    init(appKey: String) {
        self.init(
            appKey: appKey,
            displayName: nil,
            initialProperties: nil,
            presentationStyle: nil,
            slug: nil
        )
    }
}
"#,
    )
  }

  fn struct_open(&self, name: &str) -> String {
    format!("struct {name} {{")
  }

  fn struct_close(&self) -> &'static str {
    "}"
  }

  fn field_declaration(&self, name: &str, ty: &FieldType, required: bool) -> String {
    let ty = match ty {
      FieldType::List(item) => format!("[{item}]"),
      FieldType::Object => "[String: Any]".to_string(),
      FieldType::String => "String".to_string(),
    };
    let optional = if required { "" } else { "?" };
    format!("let {name}: {ty}{optional}")
  }
}
