//! C++ literal syntax.

use std::fmt::Write;

use super::{DeclarationSyntax, FieldType, LiteralSyntax};
use crate::manifest::{JsonValue, as_integer};

/// C++ backend; compiled into the Windows host.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cpp;

/// Escape for a C++ narrow string literal.
///
/// Control characters use three-digit octal escapes so a following digit can
/// never extend the escape sequence.
fn escape(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  for c in value.chars() {
    match c {
      '"' => out.push_str("\\\""),
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c if c.is_ascii_control() => {
        let _ = write!(out, "\\{:03o}", c as u32);
      }
      c => out.push(c),
    }
  }
  out
}

impl LiteralSyntax for Cpp {
  fn null(&self) -> &'static str {
    "nullptr"
  }

  fn number(&self, value: f64) -> String {
    match as_integer(value) {
      Some(n) => format!("INT64_C({n})"),
      None => format!("{value:?}"),
    }
  }

  fn string(&self, value: &str) -> String {
    format!("\"{}\"sv", escape(value))
  }

  fn empty_array(&self) -> &'static str {
    "std::vector<std::any>{}"
  }

  fn array_open(&self) -> &'static str {
    "std::vector<std::any>{"
  }

  fn array_close(&self) -> &'static str {
    "}"
  }

  fn empty_object(&self) -> &'static str {
    "JSONObject{}"
  }

  fn object_open(&self) -> &'static str {
    "JSONObject{"
  }

  fn object_close(&self) -> &'static str {
    "}"
  }

  fn entry_depth(&self) -> usize {
    2
  }

  fn object_entry(&self, key: &str, value: &JsonValue, rendered: &str, indent: &str) -> String {
    let key = self.text(key);
    if value.is_container() {
      let nested = format!("{indent}{}", crate::consts::INDENT);
      format!("{indent}{{\n{nested}{key},\n{nested}{rendered}\n{indent}}},")
    } else {
      format!("{indent}{{{key}, {rendered}}},")
    }
  }

  fn none(&self) -> &'static str {
    "std::nullopt"
  }

  fn text(&self, value: &str) -> String {
    format!("\"{}\"", escape(value))
  }

  fn empty_components(&self) -> &'static str {
    "std::make_optional<std::vector<Component>>({})"
  }

  fn components_open(&self) -> &'static str {
    "std::make_optional<std::vector<Component>>({"
  }

  fn components_close(&self) -> &'static str {
    "})"
  }

  fn component_open(&self) -> &'static str {
    "Component{"
  }

  fn component_close(&self) -> &'static str {
    "}"
  }

  fn manifest_depth(&self) -> usize {
    2
  }

  fn source_file(&self, manifest_fields: &str, checksum: &str) -> String {
    format!(
      r#"// clang-format off
#include "Manifest.h"

#include <cstdint>

using ReactApp::Component;
using ReactApp::JSONObject;
using ReactApp::Manifest;

Manifest ReactApp::GetManifest()
{{
    using namespace std::literals::string_view_literals;

    return Manifest{{
{manifest_fields}
    }};
}}

std::string_view ReactApp::GetManifestChecksum()
{{
    return "{checksum}";
}}
"#
    )
  }
}

impl DeclarationSyntax for Cpp {
  fn file_name(&self) -> &'static str {
    "Manifest.h"
  }

  fn declaration_depth(&self) -> usize {
    1
  }

  fn preamble(&self) -> Option<&'static str> {
    Some(
      r#"#pragma once

#include <any>
#include <map>
#include <optional>
#include <string_view>
#include <vector>

namespace ReactApp
{
    using JSONObject = std::map<std::string_view, std::any>;
"#,
    )
  }

  fn epilogue(&self) -> Option<&'static str> {
    Some(
      r#"    Manifest GetManifest();
    std::string_view GetManifestChecksum();

}  // namespace ReactApp
"#,
    )
  }

  fn struct_open(&self, name: &str) -> String {
    format!("struct {name} {{")
  }

  fn struct_close(&self) -> &'static str {
    "};"
  }

  fn field_declaration(&self, name: &str, ty: &FieldType, required: bool) -> String {
    let ty = match ty {
      FieldType::List(item) => format!("std::vector<{item}>"),
      FieldType::Object => "JSONObject".to_string(),
      FieldType::String => "std::string_view".to_string(),
    };
    if required {
      format!("{ty} {name};")
    } else {
      format!("std::optional<{ty}> {name};")
    }
  }
}
