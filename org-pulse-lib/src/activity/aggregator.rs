use super::DailyBucket;
use crate::github::Event;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::mpsc;

const LOG_TARGET: &str = "aggregator";

/// Day-bucketed activity for a single cycle, finalized once the event stream closes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyActivity {
    buckets: HashMap<NaiveDate, DailyBucket>,
    events_seen: u64,
    push_events: u64,
}

impl DailyActivity {
    #[must_use]
    pub fn get(&self, day: NaiveDate) -> Option<&DailyBucket> {
        self.buckets.get(&day)
    }

    /// Number of distinct days touched
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Every event observed on the stream, push or not
    #[must_use]
    pub const fn events_seen(&self) -> u64 {
        self.events_seen
    }

    /// Events that contributed to a bucket
    #[must_use]
    pub const fn push_events(&self) -> u64 {
        self.push_events
    }

    /// Buckets ordered by ascending date
    #[must_use]
    pub fn sorted(&self) -> Vec<(NaiveDate, DailyBucket)> {
        let mut days: Vec<_> = self.buckets.iter().map(|(day, bucket)| (*day, *bucket)).collect();
        days.sort_unstable_by_key(|(day, _)| *day);
        days
    }
}

/// Single consumer of the event stream.
///
/// Fetchers only ever send events; all bucket mutation happens here, through an
/// exclusive borrow, so updates for a given day are naturally linearized.
#[derive(Debug, Default)]
pub struct Aggregator {
    activity: DailyActivity,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into its day's bucket. Returns whether it was counted.
    pub fn record(&mut self, event: &Event) -> bool {
        self.activity.events_seen += 1;
        if !event.is_push() {
            return false;
        }

        self.activity
            .buckets
            .entry(event.day())
            .or_default()
            .record_push(event.payload.size);
        self.activity.push_events += 1;
        true
    }

    /// Drain `events` until every sender has been dropped, then hand off the result
    pub async fn consume(mut self, mut events: mpsc::Receiver<Event>) -> DailyActivity {
        while let Some(event) = events.recv().await {
            let _ = self.record(&event);
        }

        log::debug!(
            target: LOG_TARGET,
            "Event stream closed after {} event(s), {} push event(s) over {} day(s)",
            self.activity.events_seen,
            self.activity.push_events,
            self.activity.len()
        );

        self.finish()
    }

    #[must_use]
    pub fn finish(self) -> DailyActivity {
        self.activity
    }
}
