//! Memcheck - Type Definitions
//!
//! Shared types for the memory store validator: the configuration schema,
//! check outcomes, and violation reports.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

// ─── Configuration ───────────────────────────────────────────────

/// Deserialized `memory-config.json`.
///
/// Every field is optional at the parse level; the config-shape check is
/// responsible for reporting missing required keys (`memory_path`,
/// `projects`, `fallback_project`).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_project: Option<String>,
}

/// Observation categories accepted when the config does not override them.
pub const DEFAULT_OBSERVATION_TYPES: [&str; 5] =
    ["decision", "bugfix", "feature", "discovery", "problem"];

/// The allowed observation-type set: configured types if present, defaults
/// otherwise.
pub fn valid_observation_types(config: Option<&MemoryConfig>) -> HashSet<String> {
    match config.and_then(|c| c.observation_types.as_ref()) {
        Some(types) => types.iter().cloned().collect(),
        None => DEFAULT_OBSERVATION_TYPES
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Maximum line count for the index document and for each dossier.
pub const MAX_DOC_LINES: usize = 200;

// ─── Check Outcomes ──────────────────────────────────────────────

/// A single broken rule, tied to the file it was found in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// File the rule was evaluated against, relative to the store base
    /// (e.g. `MEMORY.md`, `projects/app.observations.md`).
    pub file: String,
    /// Human-readable explanation; for consistency violations this carries
    /// both sides of the mismatch (claimed vs actual).
    pub message: String,
}

impl Violation {
    pub fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

/// Outcome of one check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
    /// The check had nothing to evaluate (e.g. no index document means the
    /// store is uninitialized, not corrupt).
    Skip(String),
}

/// Result of a single named check over the store.
#[derive(Clone, Debug)]
pub struct CheckReport {
    /// Stable snake_case identifier, e.g. `observation_numbering`.
    pub name: &'static str,
    pub status: CheckStatus,
    pub violations: Vec<Violation>,
}

impl CheckReport {
    /// Pass if no violations were collected, fail otherwise.
    pub fn from_violations(name: &'static str, violations: Vec<Violation>) -> Self {
        let status = if violations.is_empty() {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        };
        Self {
            name,
            status,
            violations,
        }
    }

    pub fn skip(name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Skip(reason.into()),
            violations: Vec::new(),
        }
    }

    pub fn failed(&self) -> bool {
        self.status == CheckStatus::Fail
    }
}
