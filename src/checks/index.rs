//! Index Document Checks
//!
//! Structure and cross-file consistency of `MEMORY.md`: basic shape, the
//! secret scan, bidirectional agreement with the dossier files on disk,
//! and the declared observation counts.
//!
//! Every check here skips (rather than fails) when the index document is
//! absent -- a store without `MEMORY.md` is uninitialized, not corrupt.

use regex::Regex;

use crate::parse::{IndexDocument, ObservationLog};
use crate::store::{DossierFile, StoreSnapshot, INDEX_FILENAME};
use crate::types::{CheckReport, Violation, MAX_DOC_LINES};

use super::INDEX_MISSING;

/// Credential-shaped patterns the index must never contain. The label is
/// what gets reported; the matched text never is.
const SECRET_PATTERNS: [(&str, &str); 4] = [
    ("API-key prefix", r"(?i)sk-[a-zA-Z0-9]{20,}"),
    ("token prefix", r"(?i)ghp_[a-zA-Z0-9]{36}"),
    ("password assignment", r"(?i)password\s*[:=]\s*\S+"),
    ("API-key assignment", r"(?i)api[_-]?key\s*[:=]\s*\S+"),
];

/// Check 1: the index exists, has a project table marker, and stays within
/// the line bound.
pub fn index_structure(index: Option<&IndexDocument>) -> CheckReport {
    const NAME: &str = "index_structure";

    let doc = match index {
        Some(doc) => doc,
        None => return CheckReport::skip(NAME, INDEX_MISSING),
    };

    let mut violations = Vec::new();

    if !doc.has_project_table {
        violations.push(Violation::new(
            INDEX_FILENAME,
            "no project table found (expected a `| Project` header)",
        ));
    }

    if doc.line_count > MAX_DOC_LINES {
        violations.push(Violation::new(
            INDEX_FILENAME,
            format!(
                "{} lines, should be <= {}",
                doc.line_count, MAX_DOC_LINES
            ),
        ));
    }

    CheckReport::from_violations(NAME, violations)
}

/// Check 2: no credential-like content in the index.
pub fn index_secret_scan(raw: Option<&str>) -> CheckReport {
    const NAME: &str = "index_secret_scan";

    let content = match raw {
        Some(c) => c,
        None => return CheckReport::skip(NAME, INDEX_MISSING),
    };

    let mut violations = Vec::new();

    for (label, pattern) in SECRET_PATTERNS {
        let matched = Regex::new(pattern)
            .map(|re| re.is_match(content))
            .unwrap_or(false);
        if matched {
            violations.push(Violation::new(
                INDEX_FILENAME,
                format!("possible secret found ({})", label),
            ));
        }
    }

    CheckReport::from_violations(NAME, violations)
}

/// Check 3a: every dossier on disk is mentioned somewhere in the index.
pub fn dossiers_in_index(raw: Option<&str>, dossiers: &[DossierFile]) -> CheckReport {
    const NAME: &str = "dossiers_in_index";

    let content = match raw {
        Some(c) => c,
        None => return CheckReport::skip(NAME, INDEX_MISSING),
    };

    let mut violations = Vec::new();

    for dossier in dossiers {
        if !content.contains(&dossier.project) {
            violations.push(Violation::new(
                StoreSnapshot::dossier_rel_path(&dossier.project),
                format!("dossier not referenced in {}", INDEX_FILENAME),
            ));
        }
    }

    CheckReport::from_violations(NAME, violations)
}

/// Check 3b: every project the index references has a dossier on disk.
pub fn index_refs_exist(
    index: Option<&IndexDocument>,
    dossiers: &[DossierFile],
) -> CheckReport {
    const NAME: &str = "index_refs_exist";

    let doc = match index {
        Some(doc) => doc,
        None => return CheckReport::skip(NAME, INDEX_MISSING),
    };

    let mut violations = Vec::new();

    for project in doc.referenced_projects() {
        let exists = dossiers.iter().any(|d| d.project == project);
        if !exists {
            violations.push(Violation::new(
                INDEX_FILENAME,
                format!(
                    "references {} but the file does not exist",
                    StoreSnapshot::dossier_rel_path(project)
                ),
            ));
        }
    }

    CheckReport::from_violations(NAME, violations)
}

/// Check 4: every `(N entries)` annotation matches the actual number of
/// rows in that project's observation log.
pub fn observation_counts(
    index: Option<&IndexDocument>,
    logs: &[ObservationLog],
) -> CheckReport {
    const NAME: &str = "observation_counts";

    let doc = match index {
        Some(doc) => doc,
        None => return CheckReport::skip(NAME, INDEX_MISSING),
    };

    let mut violations = Vec::new();

    for entry in &doc.entries {
        let claimed = match entry.declared_count {
            Some(n) => n,
            None => continue,
        };

        let log_path = StoreSnapshot::observations_rel_path(&entry.project);
        match logs.iter().find(|l| l.project == entry.project) {
            None => violations.push(Violation::new(
                INDEX_FILENAME,
                format!(
                    "claims {} observations for {} but {} does not exist",
                    claimed, entry.project, log_path
                ),
            )),
            Some(log) if log.rows.len() != claimed => violations.push(Violation::new(
                INDEX_FILENAME,
                format!(
                    "count mismatch for {}: {} says {}, {} has {}",
                    entry.project,
                    INDEX_FILENAME,
                    claimed,
                    log_path,
                    log.rows.len()
                ),
            )),
            Some(_) => {}
        }
    }

    CheckReport::from_violations(NAME, violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CheckStatus;

    fn dossier(project: &str) -> DossierFile {
        DossierFile {
            project: project.to_string(),
            content: String::new(),
        }
    }

    #[test]
    fn test_missing_index_skips_every_index_check() {
        assert!(matches!(
            index_structure(None).status,
            CheckStatus::Skip(_)
        ));
        assert!(matches!(
            index_secret_scan(None).status,
            CheckStatus::Skip(_)
        ));
        assert!(matches!(
            dossiers_in_index(None, &[]).status,
            CheckStatus::Skip(_)
        ));
        assert!(matches!(
            index_refs_exist(None, &[]).status,
            CheckStatus::Skip(_)
        ));
        assert!(matches!(
            observation_counts(None, &[]).status,
            CheckStatus::Skip(_)
        ));
    }

    #[test]
    fn test_index_structure_requires_table() {
        let doc = IndexDocument::parse("# Memory\n\nprose only\n");
        let report = index_structure(Some(&doc));
        assert!(report.failed());
        assert!(report.violations[0].message.contains("project table"));
    }

    #[test]
    fn test_index_structure_line_bound() {
        let content = format!("| Project |\n{}", "x\n".repeat(MAX_DOC_LINES));
        let doc = IndexDocument::parse(&content);
        let report = index_structure(Some(&doc));
        assert!(report.failed());
        assert!(report.violations[0].message.contains("201 lines"));
    }

    #[test]
    fn test_secret_scan_flags_patterns_without_echoing() {
        let content = "| Project |\napi_key = sk-abcdefghijklmnopqrstuvwx\n";
        let report = index_secret_scan(Some(content));
        assert!(report.failed());
        // Both the key prefix and the assignment form match.
        assert_eq!(report.violations.len(), 2);
        for v in &report.violations {
            assert!(!v.message.contains("abcdefghijklmnopqrstuvwx"));
        }
    }

    #[test]
    fn test_secret_scan_is_case_insensitive() {
        let report = index_secret_scan(Some("PASSWORD = hunter2\n"));
        assert!(report.failed());
    }

    #[test]
    fn test_secret_scan_clean_index() {
        let report = index_secret_scan(Some("| Project |\n| app | `projects/app.md` |\n"));
        assert_eq!(report.status, CheckStatus::Pass);
    }

    #[test]
    fn test_dossier_missing_from_index() {
        let report = dossiers_in_index(Some("| app | `projects/app.md` |"), &[
            dossier("app"),
            dossier("orphan"),
        ]);
        assert!(report.failed());
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].file, "projects/orphan.md");
    }

    #[test]
    fn test_index_ref_without_dossier() {
        let doc = IndexDocument::parse("| ghost | `projects/ghost.md` |\n");
        let report = index_refs_exist(Some(&doc), &[]);
        assert!(report.failed());
        assert!(report.violations[0]
            .message
            .contains("projects/ghost.md"));
    }

    #[test]
    fn test_count_mismatch_reports_both_sides() {
        let doc = IndexDocument::parse("| app | `projects/app.md` | (3 entries) |\n");
        let log = ObservationLog::parse(
            "app",
            "## Index\n| 1 | 2026-08-01 | decision | a | b |\n| 2 | 2026-08-02 | bugfix | c | d |\n",
        );
        let report = observation_counts(Some(&doc), &[log]);
        assert!(report.failed());
        let message = &report.violations[0].message;
        assert!(message.contains("says 3"));
        assert!(message.contains("has 2"));
    }

    #[test]
    fn test_count_against_missing_log() {
        let doc = IndexDocument::parse("| app | `projects/app.md` | (2 entries) |\n");
        let report = observation_counts(Some(&doc), &[]);
        assert!(report.failed());
        assert!(report.violations[0].message.contains("does not exist"));
    }

    #[test]
    fn test_count_matching_passes() {
        let doc = IndexDocument::parse("| app | `projects/app.md` | (1 entry) |\n");
        let log =
            ObservationLog::parse("app", "## Index\n| 1 | 2026-08-01 | decision | a | b |\n");
        let report = observation_counts(Some(&doc), &[log]);
        assert_eq!(report.status, CheckStatus::Pass);
    }
}
