//! App manifest types.
//!
//! The manifest is the runtime-relevant part of `app.json`: the app name and
//! the launchable components. Build-only sections are stripped by
//! [`crate::validate`] before a document becomes a [`Manifest`].

mod types;
mod value;

pub use types::*;
pub use value::*;
