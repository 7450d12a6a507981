use crate::activity::DailyBucket;
use strum::{EnumIter, IntoStaticStr};

/// The three daily series written after each cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Metric {
    Commits,
    Pushes,
    Users,
}

impl Metric {
    /// Lowercase series name, as used in log output
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Commits => "commits.csv",
            Self::Pushes => "pushes.csv",
            Self::Users => "users.csv",
        }
    }

    #[must_use]
    pub const fn value(self, bucket: &DailyBucket) -> u64 {
        match self {
            Self::Commits => bucket.commits,
            Self::Pushes => bucket.pushes,
            Self::Users => bucket.users,
        }
    }
}
