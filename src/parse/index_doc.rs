//! Index Document Parser
//!
//! Parses `MEMORY.md` into its project table facts: which dossiers the
//! table references (backtick-quoted `projects/<name>.md` paths) and what
//! observation count each row declares in its `(N entries)` annotation.

use regex::Regex;

use super::trimmed_line_count;

/// One project reference found in the index, with the entry count the same
/// line declares (if any).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pub project: String,
    /// Parsed from a `(N entries)` / `(1 entry)` annotation on the same
    /// line, after the project reference.
    pub declared_count: Option<usize>,
}

/// Typed view of the index document.
#[derive(Clone, Debug)]
pub struct IndexDocument {
    pub line_count: usize,
    /// Whether a project table marker (`| Project`) is present.
    pub has_project_table: bool,
    /// One entry per line carrying a project reference, in document order.
    pub entries: Vec<IndexEntry>,
}

impl IndexDocument {
    pub fn parse(content: &str) -> Self {
        let has_project_table =
            content.contains("| Project") || content.contains("|Project");

        let reference = Regex::new(r"`projects/([^`]+)\.md`").ok();
        let annotation = Regex::new(r"\((\d+)\s*entr(?:y|ies)\)").ok();

        let mut entries = Vec::new();
        if let Some(reference) = &reference {
            for line in content.lines() {
                let m = match reference.captures(line) {
                    Some(m) => m,
                    None => continue,
                };
                let project = m[1].to_string();
                let after_ref = &line[m.get(0).map(|g| g.end()).unwrap_or(0)..];

                let declared_count = annotation
                    .as_ref()
                    .and_then(|re| re.captures(after_ref))
                    .and_then(|c| c[1].parse::<usize>().ok());

                entries.push(IndexEntry {
                    project,
                    declared_count,
                });
            }
        }

        Self {
            line_count: trimmed_line_count(content),
            has_project_table,
            entries,
        }
    }

    /// Projects referenced anywhere in the table, deduplicated in order.
    pub fn referenced_projects(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.project.as_str()) {
                seen.push(entry.project.as_str());
            }
        }
        seen
    }
}
