use chrono::{DateTime, Local};
use core::fmt;
use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::{RunConfig, StructureMode};
use crate::files::category::MediaCategory;

/// A source file that passed the category and size filters.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub file_name: OsString,
    pub category: MediaCategory,
    pub size: u64,
    /// Directory of the file relative to the source root, only kept in preserve mode.
    pub relative_dir: Option<PathBuf>,
    pub modified: Option<DateTime<Local>>,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(date) = &self.modified {
            write!(
                f,
                "{} ({} bytes, modified on {})",
                self.path.display(),
                self.size,
                date.format("%Y-%m-%d %H:%M:%S")
            )
        } else {
            write!(f, "{} ({} bytes)", self.path.display(), self.size)
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("cannot enumerate {}: {source}", root.display())]
pub struct DiscoveryError {
    pub root: PathBuf,
    #[source]
    pub source: walkdir::Error,
}

pub fn get_modified_date(metadata: &fs::Metadata) -> Option<DateTime<Local>> {
    metadata.modified().ok().map(DateTime::<Local>::from)
}

// The archive may live inside the source tree; never walk into it.
fn is_skipped_dir(entry: &DirEntry, destination_root: &Path) -> bool {
    entry.file_type().is_dir() && entry.path() == destination_root
}

/// Regular files pass as is. Symlinks pass only when they point at a regular file.
fn file_metadata(entry: &DirEntry) -> Option<fs::Metadata> {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return entry.metadata().ok();
    }
    if file_type.is_symlink() {
        return match fs::metadata(entry.path()) {
            Ok(metadata) if metadata.is_file() => Some(metadata),
            Ok(_) => {
                debug!("not following symlink {}", entry.path().display());
                None
            }
            Err(e) => {
                warn!("dangling symlink {}: {}", entry.path().display(), e);
                None
            }
        };
    }
    None
}

fn to_candidate(entry: &DirEntry, config: &RunConfig) -> Option<Candidate> {
    let path = entry.path();
    let category = MediaCategory::of_path(path)?;
    if !config.accepts_category(category) {
        return None;
    }
    let metadata = file_metadata(entry)?;
    let size = metadata.len();
    if !config.accepts_size(size) {
        return None;
    }

    let relative_dir = match config.structure {
        StructureMode::Preserve => path
            .strip_prefix(&config.source_root)
            .ok()
            .and_then(Path::parent)
            .map(Path::to_path_buf),
        StructureMode::Flatten => None,
    };

    Some(Candidate {
        path: path.to_path_buf(),
        file_name: entry.file_name().to_os_string(),
        category,
        size,
        relative_dir,
        modified: get_modified_date(&metadata),
    })
}

/// Walks the source root once and collects every candidate in a stable order.
///
/// Unreadable subdirectories are logged and left out. Only a failure to read
/// the root itself is returned as an error.
pub fn collect_candidates(config: &RunConfig) -> Result<Vec<Candidate>, DiscoveryError> {
    let mut candidates = Vec::new();

    let walker = WalkDir::new(&config.source_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e, &config.destination_root));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(DiscoveryError {
                    root: config.source_root.clone(),
                    source: e,
                });
            }
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if let Some(candidate) = to_candidate(&entry, config) {
            debug!("found {}", candidate);
            candidates.push(candidate);
        }
    }

    Ok(candidates)
}
