//! Type declarations the embedded manifest literals are built from.
//!
//! Every `$defs` entry of the manifest schema that is not marked
//! `exclude-from-codegen` becomes one struct (a `data class` in Kotlin). Only
//! `string`, `object` and `array` properties are declared; arrays must name
//! their item type through `items.$ref`. Properties outside a definition's
//! `required` list are optional.

use serde_json::{Map, Value};
use tracing::debug;

use super::{Backend, CodegenError, indent};
use crate::consts::APP_NAME;
use crate::validate::SCHEMA;

/// Schema keyword hiding a definition from the declarations.
pub const EXCLUDE_KEYWORD: &str = "exclude-from-codegen";

/// The declared type of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
  /// A list of the named struct.
  List(String),
  /// A free-form JSON object.
  Object,
  String,
}

/// Type declaration syntax of a target language.
pub trait DeclarationSyntax: Sync {
  /// File name of the declarations.
  fn file_name(&self) -> &'static str;

  /// Indentation level of the struct declarations.
  fn declaration_depth(&self) -> usize {
    0
  }

  /// Text between the generated-file banner and the first struct.
  fn preamble(&self) -> Option<&'static str> {
    None
  }

  /// Text after the last struct.
  fn epilogue(&self) -> Option<&'static str> {
    None
  }

  fn struct_open(&self, name: &str) -> String;
  fn struct_close(&self) -> &'static str;

  /// One field line, without indentation.
  fn field_declaration(&self, name: &str, ty: &FieldType, required: bool) -> String;
}

/// Type name for a `$ref` such as `#/$defs/component`.
pub fn typename(reference: &str) -> String {
  let name = reference.rsplit('/').next().unwrap_or(reference);
  let mut chars = name.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

fn invalid(message: impl Into<String>) -> CodegenError {
  CodegenError::InvalidSchema(message.into())
}

fn field_type(name: &str, property: &Value) -> Result<Option<FieldType>, CodegenError> {
  let ty = match property.get("type").and_then(Value::as_str) {
    Some("array") => {
      let reference = property
        .pointer("/items/$ref")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(format!("array property '{name}' has no items.$ref")))?;
      FieldType::List(typename(reference))
    }
    Some("object") => FieldType::Object,
    Some("string") => FieldType::String,
    other => {
      debug!(property = name, ty = ?other, "no declaration for property type");
      return Ok(None);
    }
  };
  Ok(Some(ty))
}

fn declare_struct(
  syntax: &dyn DeclarationSyntax,
  name: &str,
  definition: &Map<String, Value>,
) -> Result<Vec<String>, CodegenError> {
  let properties = definition
    .get("properties")
    .and_then(Value::as_object)
    .ok_or_else(|| invalid(format!("definition '{name}' has no properties")))?;
  let required: Vec<&str> = definition
    .get("required")
    .and_then(Value::as_array)
    .map(|names| names.iter().filter_map(Value::as_str).collect())
    .unwrap_or_default();

  let level = syntax.declaration_depth();
  let field_indent = indent(level + 1);
  let mut lines = vec![format!("{}{}", indent(level), syntax.struct_open(&typename(name)))];
  for (key, property) in properties {
    if let Some(ty) = field_type(key, property)? {
      let declaration = syntax.field_declaration(key, &ty, required.contains(&key.as_str()));
      lines.push(format!("{field_indent}{declaration}"));
    }
  }
  lines.push(format!("{}{}", indent(level), syntax.struct_close()));
  Ok(lines)
}

/// Declarations for every codegen definition of `schema`, in schema order.
pub fn declare(schema: &Value, backend: Backend) -> Result<String, CodegenError> {
  let syntax = backend.declarations();
  let definitions = schema
    .get("$defs")
    .and_then(Value::as_object)
    .ok_or_else(|| invalid("schema has no $defs"))?;

  let mut lines = vec![
    format!("// This file was generated by {APP_NAME}."),
    "// DO NOT MODIFY. ALL CHANGES WILL BE OVERWRITTEN.".to_string(),
    String::new(),
  ];
  if let Some(preamble) = syntax.preamble() {
    lines.push(preamble.to_string());
  }

  for (name, definition) in definitions {
    let Some(definition) = definition.as_object() else {
      return Err(invalid(format!("definition '{name}' is not an object")));
    };
    if definition.get(EXCLUDE_KEYWORD).and_then(Value::as_bool) == Some(true) {
      continue;
    }
    lines.extend(declare_struct(syntax, name, definition)?);
    lines.push(String::new());
  }

  if let Some(epilogue) = syntax.epilogue() {
    lines.push(epilogue.to_string());
  }
  Ok(lines.join("\n"))
}

/// Declarations for the embedded manifest schema.
pub fn declarations(backend: Backend) -> Result<String, CodegenError> {
  let schema: Value = serde_json::from_str(SCHEMA).map_err(|e| invalid(e.to_string()))?;
  declare(&schema, backend)
}
