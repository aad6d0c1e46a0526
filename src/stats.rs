use std::fmt;

/// Counters for one run. Rendered as the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub discovered: u64,
    pub copied: u64,
    pub skipped: u64,
    pub errors: u64,
}

impl RunStats {
    pub fn processed(&self) -> u64 {
        self.copied + self.skipped + self.errors
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  discovered: {}", self.discovered)?;
        writeln!(f, "  copied:     {}", self.copied)?;
        writeln!(f, "  skipped:    {}", self.skipped)?;
        write!(f, "  errors:     {}", self.errors)
    }
}
