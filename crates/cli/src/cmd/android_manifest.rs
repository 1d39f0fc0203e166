//! Implementation of the `appjson android-manifest` command.

use std::path::Path;

use anyhow::{Context, Result};

use appjson_lib::android::generate_android_manifest;

use crate::output::print_file_status;

pub async fn cmd_android_manifest(app_manifest: &Path, output: &Path) -> Result<i32> {
  let written = generate_android_manifest(app_manifest, output)
    .await
    .with_context(|| format!("Failed to generate {}", output.display()))?;

  print_file_status(output, written);
  Ok(0)
}
