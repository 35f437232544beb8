//! Check Report Output
//!
//! Renders the battery results for the terminal: one line per check, one
//! dimmed line per violation, and a summary. Output goes to stdout; the
//! caller decides the exit code from [`Summary::ok`].

use colored::Colorize;

use crate::types::{CheckReport, CheckStatus};

/// Aggregate result of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn of(reports: &[CheckReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            match report.status {
                CheckStatus::Pass => summary.passed += 1,
                CheckStatus::Fail => summary.failed += 1,
                CheckStatus::Skip(_) => summary.skipped += 1,
            }
        }
        summary
    }

    /// True if no check failed. Skips do not fail a run.
    pub fn ok(&self) -> bool {
        self.failed == 0
    }
}

/// Print the per-check report and summary; returns the summary.
pub fn print_report(reports: &[CheckReport]) -> Summary {
    for report in reports {
        match &report.status {
            CheckStatus::Pass => {
                println!("  {}  {}", "PASS".green(), report.name);
            }
            CheckStatus::Skip(reason) => {
                println!("  {}  {}", "SKIP".yellow(), report.name);
                println!("        {}", reason.dimmed());
            }
            CheckStatus::Fail => {
                println!("  {}  {}", "FAIL".red(), report.name);
                for violation in &report.violations {
                    println!(
                        "        {}",
                        format!("{}: {}", violation.file, violation.message).dimmed()
                    );
                }
            }
        }
    }

    let summary = Summary::of(reports);

    println!();
    let line = format!(
        "  {} passed, {} failed, {} skipped",
        summary.passed, summary.failed, summary.skipped
    );
    if summary.ok() {
        println!("{}", line.green());
    } else {
        println!("{}", line.red());
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Violation;

    #[test]
    fn test_summary_counts() {
        let reports = vec![
            CheckReport::from_violations("a", vec![]),
            CheckReport::from_violations("b", vec![Violation::new("f", "m")]),
            CheckReport::skip("c", "nothing to do"),
        ];
        let summary = Summary::of(&reports);
        assert_eq!(
            summary,
            Summary {
                passed: 1,
                failed: 1,
                skipped: 1,
            }
        );
        assert!(!summary.ok());
    }

    #[test]
    fn test_skips_do_not_fail_a_run() {
        let reports = vec![
            CheckReport::from_violations("a", vec![]),
            CheckReport::skip("b", "MEMORY.md not found"),
        ];
        assert!(Summary::of(&reports).ok());
    }
}
