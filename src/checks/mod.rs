//! Store Integrity Checks
//!
//! The fixed battery of structural and cross-file consistency checks. Every
//! check is an independent predicate over the parsed store: all of them run
//! on every invocation, none short-circuits another, and each reports every
//! violation it finds.

use tracing::debug;

use crate::parse::{Dossier, IndexDocument, ObservationLog};
use crate::store::StoreSnapshot;
use crate::types::{valid_observation_types, CheckReport, MemoryConfig};

pub mod config;
pub mod dossier;
pub mod index;
pub mod observations;

/// Skip reason used by every check that needs the index document.
pub(crate) const INDEX_MISSING: &str = "MEMORY.md not found";

/// Run the full battery over a loaded snapshot.
///
/// Documents are parsed once up front; the checks share the typed views
/// read-only. The order matches the report order and nothing else.
pub fn run_all(snapshot: &StoreSnapshot, config: Option<&MemoryConfig>) -> Vec<CheckReport> {
    let index = snapshot.index.as_deref().map(IndexDocument::parse);

    let dossiers: Vec<Dossier> = snapshot
        .dossiers
        .iter()
        .map(|d| Dossier::parse(&d.project, &d.content))
        .collect();

    let logs: Vec<ObservationLog> = snapshot
        .observations
        .iter()
        .map(|o| ObservationLog::parse(&o.project, &o.content))
        .collect();

    let allowed_types = valid_observation_types(config);

    let reports = vec![
        index::index_structure(index.as_ref()),
        index::index_secret_scan(snapshot.index.as_deref()),
        index::dossiers_in_index(snapshot.index.as_deref(), &snapshot.dossiers),
        index::index_refs_exist(index.as_ref(), &snapshot.dossiers),
        index::observation_counts(index.as_ref(), &logs),
        dossier::dossier_format(&dossiers),
        observations::observation_log_format(&logs),
        observations::observation_types(&logs, &allowed_types),
        observations::observation_numbering(&logs),
        observations::index_details_match(&logs),
        observations::details_context(&logs),
        config::config_shape(snapshot.config_raw.as_deref(), &snapshot.config_path),
    ];

    debug!(
        total = reports.len(),
        failed = reports.iter().filter(|r| r.failed()).count(),
        "check battery complete"
    );

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Paths;
    use std::fs;

    #[test]
    fn test_run_all_reports_every_check_once() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths {
            memory_dir: dir.path().to_path_buf(),
            config_path: dir.path().join("memory-config.json"),
        };
        fs::write(dir.path().join("MEMORY.md"), "| Project |\n").unwrap();

        let snapshot = StoreSnapshot::load(&paths).unwrap();
        let reports = run_all(&snapshot, None);

        assert_eq!(reports.len(), 12);
        let mut names: Vec<&str> = reports.iter().map(|r| r.name).collect();
        names.dedup();
        assert_eq!(names.len(), 12, "check names must be unique");
    }
}
