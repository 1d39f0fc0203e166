mod common;
mod embed_tests;
mod header_tests;
