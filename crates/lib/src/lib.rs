//! appjson-lib: the app manifest compiler
//!
//! This crate turns a project's `app.json` into artifacts the native hosts
//! build with:
//! - `validate`: schema validation and build-only key stripping
//! - `codegen`: C++, Kotlin and Swift source embedding the manifest, and the
//!   type declarations it builds on
//! - `embed`: the locate/validate/fingerprint/emit/write pipeline
//! - `header`: the `app.json.h` C header
//! - `android`: `AndroidManifest.xml` from the `android` section

pub mod android;
pub mod codegen;
pub mod consts;
pub mod diagnostics;
pub mod embed;
pub mod header;
pub mod manifest;
pub mod platform;
pub mod state;
pub mod util;
pub mod validate;
