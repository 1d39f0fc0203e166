//! Implementation of the `appjson declarations` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use appjson_lib::codegen::Backend;
use appjson_lib::embed::write_declarations;

use crate::output::{print_error, print_file_status};

pub async fn cmd_declarations(backend: Backend, project_root: &Path, output: Option<PathBuf>) -> Result<i32> {
  match write_declarations(project_root, backend, output).await {
    Ok((path, written)) => {
      print_file_status(&path, written);
      Ok(0)
    }
    Err(e) => {
      print_error(&e.to_string());
      Ok(e.exit_code())
    }
  }
}
