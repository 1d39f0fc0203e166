mod cmd;
mod output;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use appjson_lib::codegen::Backend;
use appjson_lib::consts::APP_NAME;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::ValidateMode;

/// appjson - compile app.json into native source code
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate source code embedding the manifest
  Embed {
    /// Language to generate: cpp, kotlin or swift
    #[arg(value_parser = Backend::from_str)]
    platform: Backend,

    /// Directory to start searching for app.json from
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Write to this file instead of node_modules/.generated
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Regenerate even if the output is up to date
    #[arg(short, long)]
    force: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
  },

  /// Generate the Manifest and Component type declarations
  Declarations {
    /// Language to generate: cpp, kotlin or swift
    #[arg(value_parser = Backend::from_str)]
    platform: Backend,

    /// Directory the node_modules search starts from
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Write to this file instead of node_modules/.generated
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Validate app.json against the manifest schema
  Validate {
    /// Directory to start searching for app.json from
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Print the manifest or write it to a C header
    #[arg(long, value_enum, default_value_t = ValidateMode::Stdout)]
    mode: ValidateMode,
  },

  /// Print the manifest checksum
  Checksum {
    /// Directory to start searching for app.json from
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
  },

  /// Generate AndroidManifest.xml from the android section of app.json
  AndroidManifest {
    /// Path to app.json
    app_manifest: PathBuf,

    /// Path of the generated AndroidManifest.xml
    output: PathBuf,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let code = match run(cli.command) {
    Ok(code) => code,
    Err(e) => {
      output::print_error(&format!("{e:#}"));
      1
    }
  };
  std::process::exit(exit_status(code));
}

/// Process status for `code`.
///
/// Unix keeps only the low 8 bits of a status, so a code like `1000 + 24`
/// would read as success. Such codes become `1`.
fn exit_status(code: i32) -> i32 {
  if cfg!(not(windows)) && code != 0 && code & 0xFF == 0 {
    1
  } else {
    code
  }
}

fn run(command: Commands) -> Result<i32> {
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;

  match command {
    Commands::Embed {
      platform,
      project_root,
      output,
      force,
      json,
    } => rt.block_on(cmd::cmd_embed(platform, project_root, output, force, json)),
    Commands::Declarations {
      platform,
      project_root,
      output,
    } => rt.block_on(cmd::cmd_declarations(platform, &project_root, output)),
    Commands::Validate { project_root, mode } => rt.block_on(cmd::cmd_validate(&project_root, mode)),
    Commands::Checksum { project_root, json } => cmd::cmd_checksum(&project_root, json),
    Commands::AndroidManifest { app_manifest, output } => {
      rt.block_on(cmd::cmd_android_manifest(&app_manifest, &output))
    }
  }
}
