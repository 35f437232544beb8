//! Dossier Checks
//!
//! Shape of each `projects/<name>.md`: the four required sections and the
//! line bound. A store with no dossiers passes trivially.

use crate::parse::Dossier;
use crate::store::StoreSnapshot;
use crate::types::{CheckReport, Violation, MAX_DOC_LINES};

/// Check 5: every dossier has all required sections and stays within the
/// line bound.
pub fn dossier_format(dossiers: &[Dossier]) -> CheckReport {
    const NAME: &str = "dossier_format";

    let mut violations = Vec::new();

    for dossier in dossiers {
        let rel_path = StoreSnapshot::dossier_rel_path(&dossier.project);

        for section in dossier.missing_sections() {
            violations.push(Violation::new(
                rel_path.clone(),
                format!("missing section: {}", section),
            ));
        }

        if dossier.line_count > MAX_DOC_LINES {
            violations.push(Violation::new(
                rel_path,
                format!(
                    "{} lines, should be <= {}",
                    dossier.line_count, MAX_DOC_LINES
                ),
            ));
        }
    }

    CheckReport::from_violations(NAME, violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CheckStatus;

    const COMPLETE: &str =
        "## Status\nok\n## Description\nx\n## Current State\nx\n## Session History\nx\n";

    #[test]
    fn test_no_dossiers_passes() {
        assert_eq!(dossier_format(&[]).status, CheckStatus::Pass);
    }

    #[test]
    fn test_complete_dossier_passes() {
        let dossiers = [Dossier::parse("app", COMPLETE)];
        assert_eq!(dossier_format(&dossiers).status, CheckStatus::Pass);
    }

    #[test]
    fn test_each_missing_section_is_reported() {
        let dossiers = [Dossier::parse("app", "## Status\nonly this\n")];
        let report = dossier_format(&dossiers);
        assert!(report.failed());
        assert_eq!(report.violations.len(), 3);
        assert!(report.violations[0].message.contains("## Description"));
        assert_eq!(report.violations[0].file, "projects/app.md");
    }

    #[test]
    fn test_oversized_dossier_fails() {
        let content = format!("{}{}", COMPLETE, "filler\n".repeat(MAX_DOC_LINES));
        let dossiers = [Dossier::parse("big", &content)];
        let report = dossier_format(&dossiers);
        assert!(report.failed());
        assert!(report.violations[0].message.contains("lines"));
    }
}
