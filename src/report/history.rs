//! Historical result lookup
//!
//! Finds earlier result documents for the same bundle in the results
//! directory. History is trend data only: anything that cannot be read is
//! logged and skipped, and a missing directory simply means no history.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use super::document::ResultDocument;
use super::naming::parse_result_file_name;

/// Earlier documents for one bundle, most recent first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalSet {
    pub documents: Vec<ResultDocument>,
    /// Path of each entry in `documents`, same order
    pub paths: Vec<PathBuf>,
}

impl HistoricalSet {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResultDocument, &Path)> {
        self.documents
            .iter()
            .zip(self.paths.iter().map(PathBuf::as_path))
    }
}

/// Locate up to `max_results` earlier result documents for `bundle_name`.
///
/// Only `<bundle_name>-<timestamp>-result.json` files directly inside
/// `results_dir` are considered, excluding `reference_filename` (matched by
/// file name). Candidates are ordered by their parsed timestamp, newest first,
/// and truncated before being read; a candidate that fails to load is dropped.
pub fn locate(
    bundle_name: &str,
    results_dir: &Path,
    reference_filename: &str,
    max_results: usize,
) -> HistoricalSet {
    let reference = Path::new(reference_filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(reference_filename);

    let mut candidates = candidates(bundle_name, results_dir, reference);
    candidates.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
    candidates.truncate(max_results);

    let mut set = HistoricalSet::default();
    for (_, path) in candidates {
        match load(&path) {
            Ok(document) => {
                set.documents.push(document);
                set.paths.push(path);
            }
            Err(reason) => {
                warn!(path = %path.display(), %reason, "Skipping unreadable historical result");
            }
        }
    }

    debug!(
        bundle = bundle_name,
        found = set.len(),
        "Located historical results"
    );
    set
}

fn candidates(
    bundle_name: &str,
    results_dir: &Path,
    reference: &str,
) -> Vec<(NaiveDateTime, PathBuf)> {
    let entries = match std::fs::read_dir(results_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %results_dir.display(), "No results directory yet");
            return Vec::new();
        }
        Err(e) => {
            warn!(dir = %results_dir.display(), error = %e, "Cannot scan results directory");
            return Vec::new();
        }
    };

    let mut found = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %results_dir.display(), error = %e, "Cannot read directory entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name == reference {
            continue;
        }

        match parse_result_file_name(file_name) {
            Some(parsed) if parsed.bundle == bundle_name => {
                found.push((parsed.timestamp, path.clone()));
            }
            Some(_) => {}
            None => {
                if file_name.starts_with(bundle_name) && file_name.ends_with("-result.json") {
                    warn!(path = %path.display(), "Skipping result file with unparseable timestamp");
                }
            }
        }
    }
    found
}

fn load(path: &Path) -> Result<ResultDocument, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    ResultDocument::from_json(&content).map_err(|e| e.to_string())
}
