use std::collections::{HashMap, HashSet};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::config::{DuplicatePolicy, RunConfig, StructureMode};
use crate::files::file::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Copy,
    SkipDuplicate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCopy {
    pub destination: PathBuf,
    pub action: Action,
}

/// Maps candidates to destination paths, one at a time.
///
/// Planning must stay sequential: every collision check looks at the files
/// earlier candidates have already produced. In dry-run nothing is written, so
/// the planner remembers what it would have copied and treats those paths as
/// existing.
pub struct Planner<'a> {
    config: &'a RunConfig,
    simulated: HashMap<PathBuf, u64>,
    simulated_dirs: HashSet<PathBuf>,
}

impl<'a> Planner<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Planner {
            config,
            simulated: HashMap::new(),
            simulated_dirs: HashSet::new(),
        }
    }

    pub fn plan(&mut self, candidate: &Candidate) -> Result<PlannedCopy> {
        let base = self.base_destination(candidate)?;

        if self.config.duplicates == DuplicatePolicy::SkipIfSameNameAndSize {
            if let Some(existing) = self.existing_file_size(&base) {
                if existing == candidate.size && existing != 0 {
                    return Ok(PlannedCopy {
                        destination: base,
                        action: Action::SkipDuplicate,
                    });
                }
                debug!(
                    "{} exists with {} bytes, source has {}",
                    base.display(),
                    existing,
                    candidate.size
                );
            }
        }

        let destination = self.resolve_collision(base);
        if self.config.dry_run {
            self.simulated.insert(destination.clone(), candidate.size);
        }
        Ok(PlannedCopy {
            destination,
            action: Action::Copy,
        })
    }

    fn base_destination(&mut self, candidate: &Candidate) -> Result<PathBuf> {
        let dir = match (self.config.structure, &candidate.relative_dir) {
            (StructureMode::Preserve, Some(relative)) => self.config.destination_root.join(relative),
            _ => self.config.destination_root.clone(),
        };
        if !dir.is_dir() {
            if !self.config.dry_run {
                fs::create_dir_all(&dir)
                    .with_context(|| format!("failed creating directory {}", dir.display()))?;
            } else if !self.simulated_dirs.contains(&dir) {
                check_creatable(&dir)?;
                info!("would create directory {}", dir.display());
                self.simulated_dirs.insert(dir.clone());
            }
        }
        Ok(dir.join(&candidate.file_name))
    }

    fn exists(&self, path: &Path) -> bool {
        self.simulated.contains_key(path) || path.symlink_metadata().is_ok()
    }

    fn existing_file_size(&self, path: &Path) -> Option<u64> {
        if let Some(size) = self.simulated.get(path) {
            return Some(*size);
        }
        fs::metadata(path)
            .ok()
            .filter(|metadata| metadata.is_file())
            .map(|metadata| metadata.len())
    }

    fn resolve_collision(&self, base: PathBuf) -> PathBuf {
        if !self.exists(&base) {
            return base;
        }
        let mut counter: u64 = 1;
        loop {
            let attempt = numbered_path(&base, counter);
            if !self.exists(&attempt) {
                return attempt;
            }
            counter += 1;
        }
    }
}

/// Fails the way `create_dir_all` would when the nearest existing ancestor of
/// `dir` is not a directory.
fn check_creatable(dir: &Path) -> Result<()> {
    for ancestor in dir.ancestors() {
        match fs::metadata(ancestor) {
            Ok(metadata) if metadata.is_dir() => return Ok(()),
            Ok(_) => bail!(
                "failed creating directory {}: {} is not a directory",
                dir.display(),
                ancestor.display()
            ),
            Err(_) => continue,
        }
    }
    Ok(())
}

/// `dir/name.ext` becomes `dir/name(n).ext`. Only the last extension is kept apart.
///
/// Works on raw `OsStr` pieces so names that are not valid UTF-8 survive as is.
pub fn numbered_path(path: &Path, counter: u64) -> PathBuf {
    let mut name = path.file_stem().map(OsStr::to_os_string).unwrap_or_default();
    name.push(format!("({})", counter));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}
