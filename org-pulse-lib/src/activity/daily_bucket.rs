/// Activity accumulated for one UTC calendar day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyBucket {
    /// Sum of push payload sizes
    pub commits: u64,

    /// Number of push events
    pub pushes: u64,

    /// Reported as the "users" series, but this counts push events, not distinct
    /// actors, so it always equals `pushes`.
    pub users: u64,
}

impl DailyBucket {
    /// Account for one push event carrying `size` commits
    pub const fn record_push(&mut self, size: u64) {
        self.commits += size;
        self.pushes += 1;
        self.users += 1;
    }
}
