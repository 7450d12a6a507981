//! Append-only CSV series, one file per metric.
//!
//! Each row is `(unix timestamp of the day's UTC midnight, count)`. Files are
//! never truncated and rows are never deduplicated against earlier cycles, so a
//! day aggregated by two cycles appears twice.

use super::Metric;
use crate::Result;
use crate::activity::{DailyActivity, DailyBucket};
use chrono::{NaiveDate, NaiveTime};
use ohno::IntoAppError;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use strum::IntoEnumIterator;

const LOG_TARGET: &str = "    series";

#[derive(Debug, Clone)]
pub struct SeriesWriter {
    dir: PathBuf,
}

impl SeriesWriter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn path(&self, metric: Metric) -> PathBuf {
        self.dir.join(metric.file_name())
    }

    /// Append one row per day, ascending, to each of the three series.
    ///
    /// Destinations are independent: a failure on one is reported in its slot of
    /// the returned list and does not stop the others.
    pub fn write(&self, activity: &DailyActivity) -> Vec<(Metric, Result<()>)> {
        let days = activity.sorted();
        Metric::iter().map(|metric| (metric, self.write_metric(metric, &days))).collect()
    }

    fn write_metric(&self, metric: Metric, days: &[(NaiveDate, DailyBucket)]) -> Result<()> {
        let path = self.path(metric);

        fs::create_dir_all(&self.dir).into_app_err_with(|| format!("unable to create directory '{}'", self.dir.display()))?;

        if path.exists() {
            log::debug!(target: LOG_TARGET, "Opening file '{}'", path.display());
        } else {
            log::info!(target: LOG_TARGET, "Creating file '{}'", path.display());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .into_app_err_with(|| format!("unable to open series file '{}'", path.display()))?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        for (day, bucket) in days {
            writer
                .serialize((day_timestamp(*day), metric.value(bucket)))
                .into_app_err_with(|| format!("unable to write series file '{}'", path.display()))?;
        }

        writer
            .flush()
            .into_app_err_with(|| format!("unable to flush series file '{}'", path.display()))?;

        log::debug!(target: LOG_TARGET, "Appended {} row(s) to '{}'", days.len(), path.display());
        Ok(())
    }
}

/// Seconds since the epoch at the start of `day` in UTC
#[must_use]
pub fn day_timestamp(day: NaiveDate) -> i64 {
    day.and_time(NaiveTime::MIN).and_utc().timestamp()
}
