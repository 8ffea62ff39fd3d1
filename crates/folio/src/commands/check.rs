//! Validate data files without building.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use folio_data::{load_document, validate_document};
use walkdir::WalkDir;

use crate::config::ConfigFile;

/// Run the check command on one file, or on every data file.
pub async fn run(config_path: &Path, path: Option<PathBuf>) -> Result<()> {
    let target = match path {
        Some(path) => path,
        None => ConfigFile::load(config_path)?.data_dir(),
    };

    let files = data_files(&target)?;
    if files.is_empty() {
        tracing::warn!("No data files found in {}", target.display());
        return Ok(());
    }

    let problems = check_files(&files);
    if problems > 0 {
        bail!("Found {} problem(s) in {} file(s)", problems, files.len());
    }

    tracing::info!("All {} file(s) passed", files.len());
    Ok(())
}

/// Check each file, logging every problem. Returns the problem count.
fn check_files(files: &[PathBuf]) -> usize {
    let mut problems = 0;

    for file in files {
        let doc = match load_document(file) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!("{}: {}", file.display(), e);
                problems += 1;
                continue;
            }
        };

        let issues = validate_document(&doc);
        for issue in &issues {
            tracing::error!("{}: {}", file.display(), issue);
        }
        problems += issues.len();

        if issues.is_empty() {
            tracing::info!(
                "{}: {} topics, {} articles",
                file.display(),
                doc.topics.len(),
                doc.articles().count()
            );
        }
    }

    problems
}

/// A single file, or every `*.json` under a directory outside `backups/`.
fn data_files(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }
    if !target.is_dir() {
        bail!("Not found: {}", target.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(target)
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == "backups"))
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    files.sort();

    Ok(files)
}
