//! Cross-locale search over translatable entities.
//!
//! [`TranslatableSearchService`] builds one OR-ed predicate across every
//! searched field and locale, runs it through an
//! [`EntityStore`](crate::EntityStore), and labels the matches using
//! best-locale resolution. [`helpers`] holds entity-level shortcuts.

pub mod helpers;
mod options;
mod service;

pub use options::{Formatted, Formatter, SearchOptions};
pub use service::TranslatableSearchService;
