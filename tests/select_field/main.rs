//! Select field integration tests.

#[path = "../support/mod.rs"]
mod support;

mod binding;
mod failures;
mod hooks;

#[cfg(feature = "http")]
mod http;
