//! Non-fatal diagnostics raised while generating code.
//!
//! Emitters receive a [`Diagnostics`] collector instead of printing to a
//! process-wide stream. Every warning is also forwarded to `tracing`, so the
//! CLI still shows it while tests can assert on the collected list.

use tracing::warn;

/// Collects warnings for a single compiler invocation.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
  warnings: Vec<String>,
}

impl Diagnostics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a warning.
  pub fn warn(&mut self, message: impl Into<String>) {
    let message = message.into();
    warn!("app.json: {message}");
    self.warnings.push(message);
  }

  pub fn warnings(&self) -> &[String] {
    &self.warnings
  }

  pub fn is_empty(&self) -> bool {
    self.warnings.is_empty()
  }

  /// Consume the collector, returning its warnings.
  pub fn into_warnings(self) -> Vec<String> {
    self.warnings
  }
}
