use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::stats::RunStats;

/// In-place `Processed X/Y (...)` counter on stdout. Hidden in verbose mode,
/// where every file gets its own log line instead.
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    pub fn new(total: u64, verbose: bool) -> Self {
        if verbose {
            return Progress {
                bar: ProgressBar::hidden(),
            };
        }
        let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stdout());
        bar.set_style(
            ProgressStyle::with_template("Processed {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message(&RunStats::default()));
        Progress { bar }
    }

    pub fn update(&self, stats: &RunStats) {
        self.bar.set_position(stats.processed());
        self.bar.set_message(message(stats));
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

fn message(stats: &RunStats) -> String {
    format!(
        "(copied: {}, skipped: {}, errors: {})",
        stats.copied, stats.skipped, stats.errors
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message() {
        let stats = RunStats {
            discovered: 5,
            copied: 3,
            skipped: 1,
            errors: 0,
        };
        assert_eq!(message(&stats), "(copied: 3, skipped: 1, errors: 0)");
    }

    #[test]
    fn test_tracks_processed() {
        let progress = Progress::new(4, false);
        progress.update(&RunStats {
            discovered: 4,
            copied: 2,
            skipped: 1,
            errors: 0,
        });
        assert_eq!(progress.bar.position(), 3);
        assert_eq!(progress.bar.length(), Some(4));
        progress.finish();
    }
}
