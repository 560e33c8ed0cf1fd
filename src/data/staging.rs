use std::fs;
use std::path::Path;

use super::error::{DataError, DataResult};

/// Extensions of the files that make up a data directory.
const DATA_EXTENSIONS: &[&str] = &["csv", "feather"];

/// A data file present in the destination after staging.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    pub name: String,
    pub size_mb: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagingReport {
    pub moved: Vec<String>,
    /// Already present in the destination; left untouched in the source.
    pub skipped: Vec<String>,
    /// Every data file now in the destination, sorted by name.
    pub files: Vec<StagedFile>,
}

fn is_data_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| DATA_EXTENSIONS.contains(&ext))
}

// `rename` fails across file systems; only then fall back to copy + remove.
// A copy whose source cannot be removed is rolled back.
fn move_file(from: &Path, to: &Path) -> DataResult<()> {
    let Err(rename_err) = fs::rename(from, to) else {
        return Ok(());
    };
    if !from.is_file() || to.exists() {
        return Err(rename_err.into());
    }

    fs::copy(from, to)?;
    if let Err(e) = fs::remove_file(from) {
        if let Err(cleanup) = fs::remove_file(to) {
            log::warn!("Could not remove partial copy {}: {cleanup}", to.display());
        }
        return Err(e.into());
    }
    Ok(())
}

/// Move chunk CSVs and the feather metadata from `from` into `to`, next to
/// where the dashboard looks for them.
pub fn stage_files(from: &Path, to: &Path) -> DataResult<StagingReport> {
    if !from.is_dir() {
        return Err(DataError::MissingFile(from.to_path_buf()));
    }

    let mut sources: Vec<_> = fs::read_dir(from)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| is_data_file(path))
        .collect();
    sources.sort();
    log::info!("Found {} data files to move from {}", sources.len(), from.display());

    let mut report = StagingReport::default();
    for source in sources {
        let Some(name) = source.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };
        let destination = to.join(&name);
        if destination.exists() {
            log::info!("  {name} already exists in {}, skipping", to.display());
            report.skipped.push(name);
            continue;
        }
        move_file(&source, &destination)?;
        log::info!("  Moved {name}");
        report.moved.push(name);
    }

    for entry in fs::read_dir(to)? {
        let path = entry?.path();
        if !is_data_file(&path) {
            continue;
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let size_mb = fs::metadata(&path)?.len() as f64 / (1024.0 * 1024.0);
        report.files.push(StagedFile { name, size_mb });
    }
    report.files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(report)
}
