//! Line-Oriented Markdown Parsers
//!
//! Each store document is parsed into a small typed representation before
//! any check runs. The checks then work over these structures instead of
//! re-scanning raw text, so formatting drift shows up as a parse difference
//! rather than a silently passing regex.

pub mod dossier;
pub mod index_doc;
pub mod observations;

pub use dossier::Dossier;
pub use index_doc::IndexDocument;
pub use observations::ObservationLog;

/// Line count the way the store convention measures it: surrounding blank
/// lines are not held against the document.
pub fn trimmed_line_count(content: &str) -> usize {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        0
    } else {
        trimmed.lines().count()
    }
}
