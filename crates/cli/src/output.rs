//! Terminal reporting for generated files.
//!
//! File status goes to stdout; errors, warnings and schema violations go to
//! stderr. Colors are only used when the stream supports them.

use std::path::Path;

use anyhow::Context;
use owo_colors::{OwoColorize, Stream};

use appjson_lib::embed::EmbedResult;
use appjson_lib::validate::ValidateError;

const WRITTEN: &str = "✓";
const UNCHANGED: &str = "•";
const ERROR: &str = "✗";
const WARNING: &str = "⚠";

/// Hex digits of a checksum shown in summaries.
const SHORT_CHECKSUM: usize = 12;

fn short_checksum(checksum: &str) -> &str {
  checksum.get(..SHORT_CHECKSUM).unwrap_or(checksum)
}

/// One status line for a generated file.
pub fn print_file_status(path: &Path, written: bool) {
  if written {
    println!(
      "{} Generated {}",
      WRITTEN.if_supports_color(Stream::Stdout, |s| s.green()),
      path.display()
    );
  } else {
    println!(
      "{} {} is up to date",
      UNCHANGED.if_supports_color(Stream::Stdout, |s| s.blue()),
      path.display()
    );
  }
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

/// The error, then one `<path>: error: <violation>` line per schema violation.
pub fn print_manifest_error(err: &ValidateError) {
  print_error(&err.to_string());
  if let ValidateError::Invalid { path, violations } = err {
    for violation in violations {
      print_error(&format!("{}: error: {}", path.display(), violation));
    }
  }
}

fn summary_line(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

/// Warnings, file status, source manifest and short checksum of an embed run.
pub fn print_embed_summary(result: &EmbedResult) {
  for warning in &result.warnings {
    print_warning(warning);
  }
  print_file_status(&result.output_path, !result.skipped);
  summary_line("Manifest", &result.manifest_path.display().to_string());
  summary_line("Checksum", short_checksum(result.checksum.as_str()));
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{json}");
  Ok(())
}
