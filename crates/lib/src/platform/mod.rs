//! Project layout and environment lookup.

pub mod paths;
