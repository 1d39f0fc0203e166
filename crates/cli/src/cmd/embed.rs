//! Implementation of the `appjson embed` command.
//!
//! Generates the source file that embeds `app.json` into a native host.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use appjson_lib::codegen::Backend;
use appjson_lib::embed::{EmbedError, EmbedOptions, embed};

use super::report_validate_error;
use crate::output::{print_embed_summary, print_error, print_json};

pub async fn cmd_embed(
  backend: Backend,
  project_root: PathBuf,
  output: Option<PathBuf>,
  force: bool,
  json: bool,
) -> Result<i32> {
  let options = EmbedOptions {
    project_root,
    backend,
    output,
    force,
  };
  debug!(?options, "embedding manifest");

  let result = match embed(&options).await {
    Ok(result) => result,
    Err(EmbedError::Validate(e)) => return Ok(report_validate_error(&e)),
    Err(e) => {
      print_error(&e.to_string());
      return Ok(e.exit_code());
    }
  };

  if json {
    print_json(&result)?;
  } else {
    print_embed_summary(&result);
  }
  Ok(0)
}
