//! Configuration Check
//!
//! Unlike the index document, a missing config is a failure in its own
//! right, not a skip: every store is expected to carry a
//! `memory-config.json` with the three required keys.

use std::path::Path;

use crate::types::{CheckReport, Violation};

const REQUIRED_KEYS: [&str; 3] = ["memory_path", "projects", "fallback_project"];

/// Check 11: the config file exists, parses as JSON, and carries the
/// required keys.
pub fn config_shape(config_raw: Option<&str>, config_path: &Path) -> CheckReport {
    const NAME: &str = "config_shape";

    let display = config_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| config_path.display().to_string());

    let raw = match config_raw {
        Some(raw) => raw,
        None => {
            return CheckReport::from_violations(
                NAME,
                vec![Violation::new(
                    display,
                    format!("config not found at {}", config_path.display()),
                )],
            );
        }
    };

    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            return CheckReport::from_violations(
                NAME,
                vec![Violation::new(display, format!("invalid JSON: {}", e))],
            );
        }
    };

    let mut violations = Vec::new();

    match value.as_object() {
        Some(object) => {
            for key in REQUIRED_KEYS {
                if !object.contains_key(key) {
                    violations.push(Violation::new(
                        display.clone(),
                        format!("missing required key: {}", key),
                    ));
                }
            }
        }
        None => violations.push(Violation::new(display, "config is not a JSON object")),
    }

    CheckReport::from_violations(NAME, violations)
}
