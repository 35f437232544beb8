//! Memory Store Snapshot
//!
//! Reads the store directory once and holds everything the checks need:
//! the index document, per-project dossiers, observation logs, and the raw
//! config file. The snapshot is immutable -- the validator never writes.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Paths;

/// Index document file name within the store directory.
pub const INDEX_FILENAME: &str = "MEMORY.md";

/// Subdirectory holding dossiers and observation logs.
pub const PROJECTS_DIR: &str = "projects";

const OBSERVATIONS_SUFFIX: &str = ".observations.md";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One dossier file (`projects/<name>.md`).
#[derive(Clone, Debug)]
pub struct DossierFile {
    /// Project name derived from the file stem.
    pub project: String,
    pub content: String,
}

/// One observation log (`projects/<name>.observations.md`).
#[derive(Clone, Debug)]
pub struct ObservationFile {
    pub project: String,
    pub content: String,
}

/// Read-once view of the store on disk.
#[derive(Debug)]
pub struct StoreSnapshot {
    pub memory_dir: PathBuf,
    pub config_path: PathBuf,
    /// `MEMORY.md` content, `None` when the store is uninitialized.
    pub index: Option<String>,
    /// Raw config file content, `None` when absent.
    pub config_raw: Option<String>,
    /// Sorted by project name.
    pub dossiers: Vec<DossierFile>,
    /// Sorted by project name.
    pub observations: Vec<ObservationFile>,
}

impl StoreSnapshot {
    /// Load the store from disk. A missing store directory, index document,
    /// or `projects/` subdirectory is not an error here -- the checks decide
    /// what absence means. Individual unreadable files are.
    pub fn load(paths: &Paths) -> Result<Self, StoreError> {
        let index_path = paths.memory_dir.join(INDEX_FILENAME);
        let index = read_optional(&index_path)?;

        let config_raw = read_optional(&paths.config_path)?;

        let projects_dir = paths.memory_dir.join(PROJECTS_DIR);
        let (dossiers, observations) = scan_projects(&projects_dir)?;

        debug!(
            index = index.is_some(),
            dossiers = dossiers.len(),
            observations = observations.len(),
            "loaded store snapshot"
        );

        Ok(Self {
            memory_dir: paths.memory_dir.clone(),
            config_path: paths.config_path.clone(),
            index,
            config_raw,
            dossiers,
            observations,
        })
    }

    /// The observation log for a project, if one exists.
    pub fn observation_log(&self, project: &str) -> Option<&ObservationFile> {
        self.observations.iter().find(|o| o.project == project)
    }

    /// Store-relative display path for a dossier.
    pub fn dossier_rel_path(project: &str) -> String {
        format!("{}/{}.md", PROJECTS_DIR, project)
    }

    /// Store-relative display path for an observation log.
    pub fn observations_rel_path(project: &str) -> String {
        format!("{}/{}{}", PROJECTS_DIR, project, OBSERVATIONS_SUFFIX)
    }
}

/// Read a file that may legitimately be absent.
fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Enumerate `projects/`: `*.md` files are dossiers unless they end in
/// `.observations.md`, which makes them observation logs. Anything else is
/// ignored.
fn scan_projects(
    projects_dir: &Path,
) -> Result<(Vec<DossierFile>, Vec<ObservationFile>), StoreError> {
    let mut dossiers = Vec::new();
    let mut observations = Vec::new();

    let entries = match fs::read_dir(projects_dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok((dossiers, observations));
        }
        Err(e) => {
            return Err(StoreError::Read {
                path: projects_dir.to_path_buf(),
                source: e,
            });
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };

        if !file_name.ends_with(".md") {
            continue;
        }

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable file");
                continue;
            }
        };

        if let Some(project) = file_name.strip_suffix(OBSERVATIONS_SUFFIX) {
            observations.push(ObservationFile {
                project: project.to_string(),
                content,
            });
        } else if let Some(project) = file_name.strip_suffix(".md") {
            dossiers.push(DossierFile {
                project: project.to_string(),
                content,
            });
        }
    }

    dossiers.sort_by(|a, b| a.project.cmp(&b.project));
    observations.sort_by(|a, b| a.project.cmp(&b.project));

    Ok((dossiers, observations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Paths, CONFIG_FILENAME};

    fn paths_for(dir: &Path) -> Paths {
        Paths {
            memory_dir: dir.to_path_buf(),
            config_path: dir.join(CONFIG_FILENAME),
        }
    }

    #[test]
    fn test_load_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = StoreSnapshot::load(&paths_for(dir.path())).unwrap();

        assert!(snapshot.index.is_none());
        assert!(snapshot.config_raw.is_none());
        assert!(snapshot.dossiers.is_empty());
        assert!(snapshot.observations.is_empty());
    }

    #[test]
    fn test_dossiers_and_observations_are_separated() {
        let dir = tempfile::tempdir().unwrap();
        let projects = dir.path().join(PROJECTS_DIR);
        fs::create_dir_all(&projects).unwrap();
        fs::write(projects.join("app.md"), "## Status\n").unwrap();
        fs::write(projects.join("app.observations.md"), "## Index\n").unwrap();
        fs::write(projects.join("notes.txt"), "ignored").unwrap();

        let snapshot = StoreSnapshot::load(&paths_for(dir.path())).unwrap();

        assert_eq!(snapshot.dossiers.len(), 1);
        assert_eq!(snapshot.dossiers[0].project, "app");
        assert_eq!(snapshot.observations.len(), 1);
        assert_eq!(snapshot.observations[0].project, "app");
    }

    #[test]
    fn test_snapshot_reads_index_and_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(INDEX_FILENAME), "# Memory\n").unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{}").unwrap();

        let snapshot = StoreSnapshot::load(&paths_for(dir.path())).unwrap();
        assert_eq!(snapshot.index.as_deref(), Some("# Memory\n"));
        assert_eq!(snapshot.config_raw.as_deref(), Some("{}"));
    }

    #[test]
    fn test_rel_paths() {
        assert_eq!(StoreSnapshot::dossier_rel_path("app"), "projects/app.md");
        assert_eq!(
            StoreSnapshot::observations_rel_path("app"),
            "projects/app.observations.md"
        );
    }
}
