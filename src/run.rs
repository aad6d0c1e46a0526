use tracing::warn;

use crate::config::RunConfig;
use crate::files::copy::execute;
use crate::files::file::{collect_candidates, DiscoveryError};
use crate::files::planner::Planner;
use crate::progress::Progress;
use crate::stats::RunStats;

/// Discovers, plans and copies every matching file, strictly one after another.
///
/// Per-file failures end up in the returned stats. Only a source root that
/// cannot be listed at all is an error.
pub fn run(config: &RunConfig) -> Result<RunStats, DiscoveryError> {
    println!("Checking {}", config.source_root.display());
    let candidates = collect_candidates(config)?;
    let mut stats = RunStats {
        discovered: candidates.len() as u64,
        ..RunStats::default()
    };
    if candidates.is_empty() {
        println!("No matching files found.");
        return Ok(stats);
    }

    let progress = Progress::new(stats.discovered, config.verbose);
    let mut planner = Planner::new(config);
    for candidate in &candidates {
        match planner.plan(candidate) {
            Ok(planned) => execute(candidate, &planned, config, &mut stats),
            Err(e) => {
                warn!("skipping {}: {:#}", candidate.path.display(), e);
                stats.errors += 1;
            }
        }
        progress.update(&stats);
    }
    progress.finish();

    Ok(stats)
}
