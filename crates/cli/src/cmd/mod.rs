mod android_manifest;
mod checksum;
mod declarations;
mod embed;
mod validate;

pub use android_manifest::cmd_android_manifest;
pub use checksum::cmd_checksum;
pub use declarations::cmd_declarations;
pub use embed::cmd_embed;
pub use validate::{ValidateMode, cmd_validate};

use appjson_lib::validate::ValidateError;

use crate::output::print_manifest_error;

/// Print a manifest error and return its exit code.
fn report_validate_error(err: &ValidateError) -> i32 {
  print_manifest_error(err);
  err.exit_code()
}
