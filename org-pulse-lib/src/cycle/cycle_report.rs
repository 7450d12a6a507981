use core::fmt;

/// Summary of one completed cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub members: usize,
    pub fetched: usize,
    pub not_modified: usize,
    pub failed: usize,
    pub events_seen: u64,
    pub push_events: u64,
    pub days: usize,
    pub series_failures: usize,
    pub etags_saved: bool,
}

impl CycleReport {
    /// Whether any step logged an error along the way
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.failed > 0 || self.series_failures > 0 || !self.etags_saved
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} member(s): {} fetched, {} unchanged, {} failed; {} event(s), {} push(es) over {} day(s)",
            self.members, self.fetched, self.not_modified, self.failed, self.events_seen, self.push_events, self.days
        )?;

        if self.series_failures > 0 {
            write!(f, "; {} series not written", self.series_failures)?;
        }

        if !self.etags_saved {
            write!(f, "; etags not saved")?;
        }

        Ok(())
    }
}
