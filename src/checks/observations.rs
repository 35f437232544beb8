//! Observation Log Checks
//!
//! Per-log structural rules: the Index/Details skeleton, observation-type
//! membership, contiguous numbering, the index-to-details cross-reference,
//! and context completeness of every details block.

use std::collections::HashSet;

use crate::parse::observations::INDEX_TABLE_HEADER;
use crate::parse::ObservationLog;
use crate::store::StoreSnapshot;
use crate::types::{CheckReport, Violation};

/// Check 6: every log has an `## Index` section with the exact table
/// header, and a `## Details` section.
pub fn observation_log_format(logs: &[ObservationLog]) -> CheckReport {
    const NAME: &str = "observation_log_format";

    let mut violations = Vec::new();

    for log in logs {
        let rel_path = StoreSnapshot::observations_rel_path(&log.project);

        if !log.has_index_heading {
            violations.push(Violation::new(rel_path.clone(), "missing ## Index section"));
        }
        if !log.has_table_header {
            violations.push(Violation::new(
                rel_path.clone(),
                format!("missing index header `{}`", INDEX_TABLE_HEADER),
            ));
        }
        if !log.has_details_heading {
            violations.push(Violation::new(rel_path, "missing ## Details section"));
        }
    }

    CheckReport::from_violations(NAME, violations)
}

/// Check 7: every `Type` value is drawn from the allowed set.
pub fn observation_types(logs: &[ObservationLog], allowed: &HashSet<String>) -> CheckReport {
    const NAME: &str = "observation_types";

    let mut violations = Vec::new();

    for log in logs {
        let rel_path = StoreSnapshot::observations_rel_path(&log.project);

        for row in &log.rows {
            if !allowed.contains(&row.obs_type) {
                violations.push(Violation::new(
                    rel_path.clone(),
                    format!("row {} has invalid type: {}", row.number, row.obs_type),
                ));
            }
        }
    }

    CheckReport::from_violations(NAME, violations)
}

/// Check 8: row numbers form the contiguous sequence `1..=len` in document
/// order. A log with no rows passes.
pub fn observation_numbering(logs: &[ObservationLog]) -> CheckReport {
    const NAME: &str = "observation_numbering";

    let mut violations = Vec::new();

    for log in logs {
        let numbers: Vec<usize> = log.rows.iter().map(|r| r.number).collect();
        if numbers.is_empty() {
            continue;
        }

        let expected: Vec<usize> = (1..=numbers.len()).collect();
        if numbers != expected {
            violations.push(Violation::new(
                StoreSnapshot::observations_rel_path(&log.project),
                format!(
                    "row numbers not sequential: found {:?}, expected {:?}",
                    numbers, expected
                ),
            ));
        }
    }

    CheckReport::from_violations(NAME, violations)
}

/// Check 9: every index row has exactly one `### [<n>]` details block.
/// Unreferenced extra blocks are not checked.
pub fn index_details_match(logs: &[ObservationLog]) -> CheckReport {
    const NAME: &str = "index_details_match";

    let mut violations = Vec::new();

    for log in logs {
        let rel_path = StoreSnapshot::observations_rel_path(&log.project);

        for row in &log.rows {
            match log.details_for(row.number).count() {
                0 => violations.push(Violation::new(
                    rel_path.clone(),
                    format!("index entry #{} has no matching ### [{}] details block", row.number, row.number),
                )),
                1 => {}
                n => violations.push(Violation::new(
                    rel_path.clone(),
                    format!("index entry #{} has {} ### [{}] details blocks", row.number, n, row.number),
                )),
            }
        }
    }

    CheckReport::from_violations(NAME, violations)
}

/// Check 10: every numbered details block carries at least one context
/// marker field.
pub fn details_context(logs: &[ObservationLog]) -> CheckReport {
    const NAME: &str = "details_context";

    let mut violations = Vec::new();

    for log in logs {
        let rel_path = StoreSnapshot::observations_rel_path(&log.project);

        for block in &log.details {
            let number = match block.number {
                Some(n) => n,
                None => continue,
            };
            if !block.has_context_marker() {
                violations.push(Violation::new(
                    rel_path.clone(),
                    format!(
                        "details entry #{} lacks context (Before/After/Context)",
                        number
                    ),
                ));
            }
        }
    }

    CheckReport::from_violations(NAME, violations)
}
