//! Observation Log Parser
//!
//! An observation log has two parts: an `## Index` section with a summary
//! table, and a `## Details` section with one `### [<n>]` block per table
//! row. The parser walks the file line by line and produces both as typed
//! lists; the checks compare them against each other and the index
//! document.

/// The exact header row the index table must carry.
pub const INDEX_TABLE_HEADER: &str = "| # | Date | Type | Summary | Files |";

/// At least one of these must appear in every details block.
pub const CONTEXT_MARKERS: [&str; 6] = [
    "**Before:**",
    "**After:**",
    "**Context:**",
    "**Symptoms:**",
    "**What:**",
    "**Signal:**",
];

/// One data row of the index table (`| <n> | <date> | <type> | ... |`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexRow {
    pub number: usize,
    pub date: String,
    pub obs_type: String,
    pub summary: String,
    pub files: String,
}

/// One `### [<n>]` block in the Details section.
#[derive(Clone, Debug)]
pub struct DetailsBlock {
    pub number: Option<usize>,
    pub heading: String,
    body: String,
}

impl DetailsBlock {
    /// True if the block carries at least one recognized context field.
    pub fn has_context_marker(&self) -> bool {
        CONTEXT_MARKERS.iter().any(|m| self.body.contains(m))
    }
}

/// Typed view of one observation log.
#[derive(Clone, Debug)]
pub struct ObservationLog {
    pub project: String,
    pub has_index_heading: bool,
    pub has_table_header: bool,
    pub has_details_heading: bool,
    /// Index table rows in document order.
    pub rows: Vec<IndexRow>,
    /// Details blocks in document order.
    pub details: Vec<DetailsBlock>,
}

impl ObservationLog {
    pub fn parse(project: &str, content: &str) -> Self {
        let mut rows = Vec::new();
        let mut details: Vec<DetailsBlock> = Vec::new();
        let mut has_index_heading = false;
        let mut has_table_header = false;
        let mut has_details_heading = false;
        let mut current: Option<DetailsBlock> = None;

        for line in content.lines() {
            let trimmed = line.trim_end();

            if trimmed.starts_with("## Index") {
                has_index_heading = true;
            }
            if trimmed.starts_with("## Details") {
                has_details_heading = true;
            }
            if trimmed.trim() == INDEX_TABLE_HEADER {
                has_table_header = true;
            }

            if let Some(heading) = trimmed.strip_prefix("### [") {
                // Close the previous block before starting the next.
                if let Some(block) = current.take() {
                    details.push(block);
                }
                let number = heading
                    .split(']')
                    .next()
                    .and_then(|n| n.trim().parse::<usize>().ok());
                current = Some(DetailsBlock {
                    number,
                    heading: trimmed.to_string(),
                    body: String::new(),
                });
                continue;
            }

            if let Some(block) = current.as_mut() {
                block.body.push_str(line);
                block.body.push('\n');
            }

            if let Some(row) = parse_index_row(trimmed) {
                rows.push(row);
            }
        }

        if let Some(block) = current.take() {
            details.push(block);
        }

        Self {
            project: project.to_string(),
            has_index_heading,
            has_table_header,
            has_details_heading,
            rows,
            details,
        }
    }

    /// Details blocks carrying the given number.
    pub fn details_for(&self, number: usize) -> impl Iterator<Item = &DetailsBlock> {
        self.details
            .iter()
            .filter(move |b| b.number == Some(number))
    }
}

/// Parse a table line of the form `| <integer> | ... |` into a row.
///
/// Lines whose first cell is not an integer (the header, the separator,
/// prose) are not rows.
fn parse_index_row(line: &str) -> Option<IndexRow> {
    let rest = line.strip_prefix('|')?;

    let mut cells = rest.split('|').map(str::trim);
    let number = cells.next()?.parse::<usize>().ok()?;

    Some(IndexRow {
        number,
        date: cells.next().unwrap_or("").to_string(),
        obs_type: cells.next().unwrap_or("").to_string(),
        summary: cells.next().unwrap_or("").to_string(),
        files: cells.next().unwrap_or("").to_string(),
    })
}
