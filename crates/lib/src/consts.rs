//! Shared constants.

pub const APP_NAME: &str = "appjson";

/// Name of the app manifest searched for in the project tree.
pub const APP_MANIFEST: &str = "app.json";

/// Dependency root every backend writes beneath.
pub const NODE_MODULES: &str = "node_modules";

/// Generator-owned directory inside [`NODE_MODULES`].
pub const GENERATED_DIR: &str = ".generated";

/// Top-level keys consumed only by build tooling.
///
/// They are removed from the manifest before it is fingerprinted or emitted.
pub const BUILD_ONLY_KEYS: &[&str] = &["$schema", "android", "ios", "macos", "windows", "plugins", "resources"];

/// Version stamped into state files; a new generator always regenerates.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Length of a hex-encoded SHA-256 digest.
pub const CHECKSUM_LEN: usize = 64;

/// Exit code offset for schema validation failures (`1000 + error count`).
pub const VALIDATION_EXIT_BASE: i32 = 1000;

/// Indentation unit used by all generated sources.
pub const INDENT: &str = "    ";
