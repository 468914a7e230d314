//! Directory scan and index persistence

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use super::metadata::SpecMetadata;
use crate::error::IndexError;

/// Extensions recognized as specification files
const SPEC_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// A candidate file that did not make it into the index
#[derive(Debug)]
pub struct SkippedFile {
    pub file: String,
    pub error: IndexError,
}

/// Outcome of scanning one directory
#[derive(Debug, Default)]
pub struct IndexReport {
    /// Entries in index order
    pub specs: Vec<SpecMetadata>,
    /// Files that failed to read or parse
    pub skipped: Vec<SkippedFile>,
}

/// Scan `dir` and build the sorted index
///
/// Never fails: an unreadable directory yields an empty report and every
/// per-file problem is recorded in [`IndexReport::skipped`].
pub fn collect(dir: &Path) -> IndexReport {
    let mut report = IndexReport::default();

    let candidates = match list_spec_files(dir) {
        Ok(candidates) => candidates,
        Err(e) => {
            error!(error = %e, "Spec directory unavailable, indexing nothing");
            return report;
        }
    };

    for (file, path) in candidates {
        match read_spec(&file, &path) {
            Ok(meta) => {
                debug!(file = %file, id = %meta.id, order = meta.order, "Indexed spec");
                report.specs.push(meta);
            }
            Err(e) => {
                warn!(file = %file, error = %e, "Skipping spec");
                report.skipped.push(SkippedFile { file, error: e });
            }
        }
    }

    // Stable sort keeps file-name order for exact duplicates
    report.specs.sort_by(SpecMetadata::index_cmp);
    report
}

/// Scan `dir` and return only the index entries
pub fn index(dir: &Path) -> Vec<SpecMetadata> {
    collect(dir).specs
}

/// Serialize `specs` as a pretty JSON array, overwriting `output`
pub fn write_index(output: &Path, specs: &[SpecMetadata]) -> Result<(), IndexError> {
    let json = serde_json::to_string_pretty(specs)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| IndexError::OutputWrite {
            path: output.to_path_buf(),
            source,
        })?;
    }

    fs::write(output, json).map_err(|source| IndexError::OutputWrite {
        path: output.to_path_buf(),
        source,
    })
}

/// Full build step: scan `specs_dir` and persist the index to `output`
pub fn run(specs_dir: &Path, output: &Path) -> Result<IndexReport, IndexError> {
    info!(dir = %specs_dir.display(), "Reading OpenAPI specs...");
    let report = collect(specs_dir);
    info!(
        count = report.specs.len(),
        skipped = report.skipped.len(),
        "Found {} specifications",
        report.specs.len()
    );

    info!(output = %output.display(), "Writing sidebar data");
    write_index(output, &report.specs)?;

    Ok(report)
}

/// Spec files directly inside `dir`, sorted by file name
fn list_spec_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, IndexError> {
    let entries = fs::read_dir(dir).map_err(|source| IndexError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IndexError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if !path.is_file() || !is_spec_file(&path) {
            continue;
        }

        // Names that are not valid UTF-8 cannot become ids
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        files.push((name.to_string(), path));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

fn is_spec_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SPEC_EXTENSIONS.contains(&ext))
}

fn read_spec(file: &str, path: &Path) -> Result<SpecMetadata, IndexError> {
    let content = fs::read_to_string(path).map_err(|source| IndexError::FileRead {
        file: file.to_string(),
        source,
    })?;

    let id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file);

    SpecMetadata::from_document(file, id, &content)
}
