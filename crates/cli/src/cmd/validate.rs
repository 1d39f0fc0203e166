//! Implementation of the `appjson validate` command.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use appjson_lib::header::{ManifestHeader, write_header};
use appjson_lib::validate::load_manifest;

use super::report_validate_error;
use crate::output::print_file_status;

/// Where the validated manifest goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ValidateMode {
  /// Print the manifest as an escaped C string
  #[default]
  Stdout,
  /// Write `node_modules/.generated/app.json.h`
  File,
}

pub async fn cmd_validate(project_root: &Path, mode: ValidateMode) -> Result<i32> {
  let validated = match load_manifest(project_root) {
    Ok(validated) => validated,
    Err(e) => return Ok(report_validate_error(&e)),
  };

  match mode {
    ValidateMode::Stdout => {
      let header = ManifestHeader::new(&validated).context("Failed to serialize manifest")?;
      println!("{}", header.escaped_json());
    }
    ValidateMode::File => {
      let (path, written) = write_header(project_root, &validated)
        .await
        .context("Failed to write manifest header")?;
      print_file_status(&path, written);
    }
  }

  Ok(0)
}
