//! Archive media files from a source tree into a destination directory.
//!
//! The pipeline runs in four steps, each one in its own module:
//! [`config`] resolves the command line, [`files::file`] discovers candidates,
//! [`files::planner`] picks destination paths and [`files::copy`] copies.

pub mod args;
pub mod config;
pub mod error;
pub mod files;
pub mod progress;
pub mod run;
pub mod size;
pub mod stats;

pub use args::Args;
pub use config::{DuplicatePolicy, RunConfig, StructureMode};
pub use error::{ConfigError, SizeParseError};
pub use files::category::MediaCategory;
pub use run::run;
pub use stats::RunStats;
