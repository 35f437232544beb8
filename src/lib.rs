//! Memcheck -- Memory Store Integrity Validator
//!
//! Validates a Markdown knowledge-base ("memory") store: the `MEMORY.md`
//! index, per-project dossiers, observation logs, and the JSON config.
//! Read-only and single-pass; every check runs and every violation is
//! reported.

pub mod checks;
pub mod config;
pub mod parse;
pub mod report;
pub mod store;
pub mod types;
