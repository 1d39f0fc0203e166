//! Implementation of the `appjson checksum` command.

use std::path::Path;

use anyhow::{Context, Result};

use appjson_lib::validate::load_manifest;

use super::report_validate_error;
use crate::output::print_json;

pub fn cmd_checksum(project_root: &Path, json: bool) -> Result<i32> {
  let validated = match load_manifest(project_root) {
    Ok(validated) => validated,
    Err(e) => return Ok(report_validate_error(&e)),
  };
  let checksum = validated.fingerprint().context("Failed to compute manifest checksum")?;

  if json {
    print_json(&serde_json::json!({
      "manifest": validated.path,
      "checksum": checksum,
    }))?;
  } else {
    println!("{}", checksum);
  }

  Ok(0)
}
