use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::files::category::MediaCategory;
use crate::size::parse_size;

/// Copy photos, sound and video files from a source tree into an archive directory
#[derive(Parser, Debug, Clone)]
#[command(name = "medarch", version, about, long_about = None)]
pub struct Args {
    /// Dir to search for media files
    #[arg(value_name = "SOURCE_DIR", value_hint = clap::ValueHint::DirPath)]
    pub source_dir: PathBuf,

    /// Dir to archive into, created if missing
    #[arg(value_name = "DESTINATION_DIR", value_hint = clap::ValueHint::DirPath)]
    pub destination_dir: PathBuf,

    /// Flatten directory structure
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub flatten: bool,

    /// Skip files identical in name and size
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub skip_duplicates: bool,

    /// Exclude a media type (repeatable)
    #[arg(short, long = "exclude-type", value_name = "TYPE", value_enum)]
    pub exclude_type: Vec<ExcludeType>,

    /// Only files larger than SIZE (e.g. 10M, 500k)
    #[arg(short, long, value_name = "SIZE", value_parser = parse_size)]
    pub min_size: Option<u64>,

    /// Only files smaller than SIZE
    #[arg(short = 'M', long, value_name = "SIZE", value_parser = parse_size)]
    pub max_size: Option<u64>,

    /// Simulate, no writes
    #[arg(short = 'n', long, action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Per-file log lines instead of progress counter
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExcludeType {
    Photo,
    Video,
    Sound,
}

impl From<ExcludeType> for MediaCategory {
    fn from(value: ExcludeType) -> Self {
        match value {
            ExcludeType::Photo => MediaCategory::Photo,
            ExcludeType::Video => MediaCategory::Video,
            ExcludeType::Sound => MediaCategory::Audio,
        }
    }
}
