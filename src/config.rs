use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::args::Args;
use crate::error::ConfigError;
use crate::files::category::MediaCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StructureMode {
    #[default]
    Preserve,
    Flatten,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    SkipIfSameNameAndSize,
    #[default]
    AlwaysCopy,
}

/// Effective settings for one run. Built once and only read afterwards.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub categories: BTreeSet<MediaCategory>,
    /// Exclusive lower bound in bytes.
    pub min_size: Option<u64>,
    /// Exclusive upper bound in bytes.
    pub max_size: Option<u64>,
    pub structure: StructureMode,
    pub duplicates: DuplicatePolicy,
    pub dry_run: bool,
    pub verbose: bool,
}

impl RunConfig {
    pub fn accepts_size(&self, size: u64) -> bool {
        self.min_size.map_or(true, |min| size > min) && self.max_size.map_or(true, |max| size < max)
    }

    pub fn accepts_category(&self, category: MediaCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Validates `args`, normalizes both roots and creates the destination
    /// (or reports it in dry-run).
    pub fn resolve(args: &Args) -> Result<RunConfig, ConfigError> {
        let categories = enabled_categories(args)?;

        if let (Some(min), Some(max)) = (args.min_size, args.max_size) {
            if max < min {
                return Err(ConfigError::SizeBounds { min, max });
            }
        }

        let source_root = resolve_source(&args.source_dir)?;
        let destination_root = resolve_destination(&args.destination_dir, args.dry_run)?;
        if source_root == destination_root {
            return Err(ConfigError::SameDirectory(source_root));
        }

        Ok(RunConfig {
            source_root,
            destination_root,
            categories,
            min_size: args.min_size,
            max_size: args.max_size,
            structure: if args.flatten {
                StructureMode::Flatten
            } else {
                StructureMode::Preserve
            },
            duplicates: if args.skip_duplicates {
                DuplicatePolicy::SkipIfSameNameAndSize
            } else {
                DuplicatePolicy::AlwaysCopy
            },
            dry_run: args.dry_run,
            verbose: args.verbose,
        })
    }
}

fn enabled_categories(args: &Args) -> Result<BTreeSet<MediaCategory>, ConfigError> {
    let mut categories: BTreeSet<_> = MediaCategory::ALL.into_iter().collect();
    for excluded in &args.exclude_type {
        categories.remove(&MediaCategory::from(*excluded));
    }
    if categories.is_empty() {
        return Err(ConfigError::NothingToArchive);
    }
    Ok(categories)
}

fn resolve_source(path: &Path) -> Result<PathBuf, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::SourceMissing(path.to_path_buf()));
    }
    let resolved = fs::canonicalize(path).map_err(|e| ConfigError::io(path, e))?;
    if !resolved.is_dir() {
        return Err(ConfigError::SourceNotDirectory(path.to_path_buf()));
    }
    Ok(resolved)
}

fn resolve_destination(path: &Path, dry_run: bool) -> Result<PathBuf, ConfigError> {
    if path.exists() {
        let resolved = fs::canonicalize(path).map_err(|e| ConfigError::io(path, e))?;
        if !resolved.is_dir() {
            return Err(ConfigError::DestinationNotDirectory(path.to_path_buf()));
        }
        return Ok(resolved);
    }

    if dry_run {
        let resolved = canonicalize_missing(path)?;
        println!("Would create destination directory {}", resolved.display());
        return Ok(resolved);
    }

    fs::create_dir_all(path).map_err(|e| ConfigError::io(path, e))?;
    info!("created destination directory {}", path.display());
    fs::canonicalize(path).map_err(|e| ConfigError::io(path, e))
}

/// Canonicalizes the deepest existing ancestor of `path` and re-appends the
/// components that do not exist yet.
fn canonicalize_missing(path: &Path) -> Result<PathBuf, ConfigError> {
    let absolute = std::path::absolute(path).map_err(|e| ConfigError::io(path, e))?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }
    let mut resolved = fs::canonicalize(existing).map_err(|e| ConfigError::io(existing, e))?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}
