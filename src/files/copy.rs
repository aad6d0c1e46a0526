use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use filetime::FileTime;
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::files::file::Candidate;
use crate::files::planner::{Action, PlannedCopy};
use crate::stats::RunStats;

/// Carries out one planned copy and records the outcome in `stats`.
///
/// Failures are logged and counted; they never stop the run.
pub fn execute(
    candidate: &Candidate,
    planned: &PlannedCopy,
    config: &RunConfig,
    stats: &mut RunStats,
) {
    match planned.action {
        Action::SkipDuplicate => {
            info!(
                "skipped {} (same name and size as {})",
                candidate.path.display(),
                planned.destination.display()
            );
            stats.skipped += 1;
        }
        Action::Copy if config.dry_run => {
            info!(
                "would copy {} {} -> {}",
                candidate.category,
                candidate,
                planned.destination.display()
            );
            stats.copied += 1;
        }
        Action::Copy => match copy_file(&candidate.path, &planned.destination) {
            Ok(()) => {
                info!(
                    "copied {} {} -> {}",
                    candidate.category,
                    candidate,
                    planned.destination.display()
                );
                stats.copied += 1;
            }
            Err(e) => {
                warn!("{:#}", e);
                stats.errors += 1;
            }
        },
    }
}

/// Copies content, permission bits and timestamps from `src` to a new file at `dst`.
///
/// `dst` must not exist. A partially written `dst` is removed on failure.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    let mut reader = File::open(src).with_context(|| format!("cannot open {}", src.display()))?;
    let metadata = reader
        .metadata()
        .with_context(|| format!("cannot read metadata of {}", src.display()))?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst)
        .with_context(|| format!("cannot create {}", dst.display()))?;

    if let Err(e) = io::copy(&mut reader, &mut writer) {
        drop(writer);
        if let Err(cleanup) = fs::remove_file(dst) {
            warn!("failed removing partial copy {}: {}", dst.display(), cleanup);
        }
        return Err(e).with_context(|| {
            format!("failed copying {} to {}", src.display(), dst.display())
        });
    }
    drop(writer);

    preserve_metadata(&metadata, dst);
    Ok(())
}

// Best effort, the content is already in place.
fn preserve_metadata(metadata: &fs::Metadata, dst: &Path) {
    if let Err(e) = fs::set_permissions(dst, metadata.permissions()) {
        warn!("failed setting permissions on {}: {}", dst.display(), e);
    }
    let atime = FileTime::from_last_access_time(metadata);
    let mtime = FileTime::from_last_modification_time(metadata);
    if let Err(e) = filetime::set_file_times(dst, atime, mtime) {
        warn!("failed setting timestamps on {}: {}", dst.display(), e);
    }
}
