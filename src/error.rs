use std::path::PathBuf;

/// Fatal problems found while turning the command line into a [`crate::config::RunConfig`].
///
/// Any of these aborts the run before the destination is touched.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("source directory does not exist: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("source is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),

    #[error("destination exists but is not a directory: {}", .0.display())]
    DestinationNotDirectory(PathBuf),

    #[error(
        "source and destination are the same directory: {}, refusing to run before any write",
        .0.display()
    )]
    SameDirectory(PathBuf),

    #[error("all media types are excluded, nothing to archive")]
    NothingToArchive,

    #[error("--min-size ({min} bytes) is larger than --max-size ({max} bytes)")]
    SizeBounds { min: u64, max: u64 },

    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SizeParseError {
    #[error("size is empty")]
    Empty,

    #[error("invalid size '{0}', expected a whole number with an optional k, M or G suffix")]
    Invalid(String),

    #[error("size '{0}' does not fit in 64 bits")]
    Overflow(String),
}
