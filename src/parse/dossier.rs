//! Dossier Parser
//!
//! A dossier is a per-project profile with four required sections. The
//! parser records which of them are present and the document's line count.

use super::trimmed_line_count;

/// Section headers every dossier must contain, in any order.
pub const REQUIRED_SECTIONS: [&str; 4] = [
    "## Status",
    "## Description",
    "## Current State",
    "## Session History",
];

/// Typed view of one dossier file.
#[derive(Clone, Debug)]
pub struct Dossier {
    pub project: String,
    pub line_count: usize,
    missing: Vec<&'static str>,
}

impl Dossier {
    pub fn parse(project: &str, content: &str) -> Self {
        let missing = REQUIRED_SECTIONS
            .iter()
            .copied()
            .filter(|section| !content.contains(section))
            .collect();

        Self {
            project: project.to_string(),
            line_count: trimmed_line_count(content),
            missing,
        }
    }

    /// Required sections absent from the file, in canonical order.
    pub fn missing_sections(&self) -> &[&'static str] {
        &self.missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_dossier() {
        let content = "\
# app

## Status
Active

## Description
An app.

## Current State
Fine.

## Session History
- 2026-08-01: created
";
        let dossier = Dossier::parse("app", content);
        assert!(dossier.missing_sections().is_empty());
        assert_eq!(dossier.line_count, 14);
    }

    #[test]
    fn test_missing_sections_reported_in_order() {
        let dossier = Dossier::parse("app", "## Status\n## Session History\n");
        assert_eq!(
            dossier.missing_sections(),
            ["## Description", "## Current State"]
        );
    }
}
