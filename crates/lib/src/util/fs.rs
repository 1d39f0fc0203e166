//! Durable file writes.
//!
//! Generated files are written to a temporary sibling, flushed to disk and
//! renamed into place. A caller that awaited [`write_atomic`] can report
//! success knowing the file is complete; a failed write never leaves a
//! truncated artifact at the destination.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Write `contents` to `path`, creating parent directories as needed.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
  if let Some(parent) = path.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }

  let temp_path = temp_path_for(path);
  if let Err(e) = write_and_sync(&temp_path, contents).await {
    let _ = tokio::fs::remove_file(&temp_path).await;
    return Err(e);
  }

  tokio::fs::rename(&temp_path, path).await?;
  debug!(path = %path.display(), bytes = contents.len(), "wrote file");
  Ok(())
}

async fn write_and_sync(path: &Path, contents: &[u8]) -> io::Result<()> {
  let mut file = tokio::fs::File::create(path).await?;
  file.write_all(contents).await?;
  file.sync_all().await
}

fn temp_path_for(path: &Path) -> PathBuf {
  let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
  name.push(".tmp");
  path.with_file_name(name)
}
