use super::CycleReport;
use crate::activity::{Aggregator, DailyActivity, FetchOutcome, FetchReport, fetch_member_events};
use crate::github::{Client, Member, fetch_members};
use crate::storage::{EtagMap, EtagStore, SeriesWriter};
use core::time::Duration;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;

const LOG_TARGET: &str = "     cycle";

/// Time between the end of one cycle and the start of the next
pub const CYCLE_INTERVAL: Duration = Duration::from_hours(24);

/// Capacity of the event channel between fetchers and the aggregator.
/// Fetchers block once it is full, so a slow aggregator throttles them.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Maximum number of member fetches with a request in flight at once
const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 16;

/// One full fetch, aggregate, and persist pass over the organization
#[derive(Debug)]
pub struct Cycle {
    client: Client,
    members_url: String,
    etag_store: EtagStore,
    series: SeriesWriter,
    max_concurrent_fetches: usize,
}

impl Cycle {
    #[must_use]
    pub fn new(client: Client, members_url: impl Into<String>, etag_store: EtagStore, series: SeriesWriter) -> Self {
        Self {
            client,
            members_url: members_url.into(),
            etag_store,
            series,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    #[must_use]
    pub fn with_max_concurrent_fetches(mut self, max_concurrent_fetches: usize) -> Self {
        self.max_concurrent_fetches = max_concurrent_fetches.max(1);
        self
    }

    /// Run cycles back to back, sleeping [`CYCLE_INTERVAL`] in between.
    #[expect(clippy::infinite_loop, reason = "the refresh loop lives as long as the process")]
    pub async fn run_forever(self) {
        loop {
            let _ = self.run_once().await;
            log::info!(target: LOG_TARGET, "Next refresh in {} hour(s)", CYCLE_INTERVAL.as_secs() / 3600);
            tokio::time::sleep(CYCLE_INTERVAL).await;
        }
    }

    /// Run a single cycle to completion.
    ///
    /// Every failure past this point is logged and folded into the report; the
    /// cycle itself always completes.
    pub async fn run_once(&self) -> CycleReport {
        log::info!(target: LOG_TARGET, "Starting refresh");

        let (members, members_rate_limit) = fetch_members(&self.client, &self.members_url).await;

        let mut etags = match self.etag_store.load() {
            Ok(etags) => etags,
            Err(e) => {
                log::error!(target: LOG_TARGET, "Could not load etags, fetching every member unconditionally: {e:#}");
                EtagMap::new()
            }
        };

        let (activity, fetch_reports) = self.fetch_all(&members, &etags).await;

        let mut report = CycleReport {
            members: members.len(),
            events_seen: activity.events_seen(),
            push_events: activity.push_events(),
            days: activity.len(),
            ..CycleReport::default()
        };

        for fetch in &fetch_reports {
            match &fetch.outcome {
                FetchOutcome::NotModified => report.not_modified += 1,
                FetchOutcome::Fetched { .. } => report.fetched += 1,
                FetchOutcome::Failed(_) => report.failed += 1,
            }

            if let Some(etag) = fetch.new_etag() {
                let _ = etags.insert(fetch.login.clone(), etag.to_string());
            }
        }

        // Members whose task died without reporting are failures too
        report.failed += members.len() - fetch_reports.len();

        let lowest_rate_limit = fetch_reports
            .iter()
            .filter_map(|fetch| fetch.rate_limit)
            .chain(members_rate_limit)
            .min_by_key(|rl| rl.remaining);

        if let Some(rate_limit) = lowest_rate_limit {
            log::info!(
                target: LOG_TARGET,
                "API rate limit: {} request(s) remaining, resets at {}",
                rate_limit.remaining,
                rate_limit.reset_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }

        for (metric, result) in self.series.write(&activity) {
            if let Err(e) = result {
                log::error!(target: LOG_TARGET, "Could not write {} series: {e:#}", metric.name());
                report.series_failures += 1;
            }
        }

        report.etags_saved = match self.etag_store.save(&etags) {
            Ok(()) => true,
            Err(e) => {
                log::error!(target: LOG_TARGET, "Could not save etags: {e:#}");
                false
            }
        };

        if report.has_errors() {
            log::warn!(target: LOG_TARGET, "Refresh completed with errors: {report}");
        } else {
            log::info!(target: LOG_TARGET, "Refresh completed: {report}");
        }

        report
    }

    /// Fetch every member concurrently while a single aggregator drains the events.
    ///
    /// Each task owns a clone of the sender; the orchestrator drops the original
    /// before draining, so the stream closes exactly when the last task finishes,
    /// whether it succeeded, failed, or panicked.
    async fn fetch_all(&self, members: &[Member], etags: &EtagMap) -> (DailyActivity, Vec<FetchReport>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_fetches));

        let mut tasks = JoinSet::new();
        for member in members {
            let client = self.client.clone();
            let member = member.clone();
            let etag = etags.get(&member.login).cloned();
            let events = tx.clone();
            let semaphore = Arc::clone(&semaphore);

            let _ = tasks.spawn(async move {
                // The semaphore is never closed, so a permit is always granted
                let _permit = semaphore.acquire_owned().await.ok();
                fetch_member_events(&client, &member, etag.as_deref(), events).await
            });
        }
        drop(tx);

        let join_fetches = async {
            let mut reports = Vec::with_capacity(members.len());
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(report) => reports.push(report),
                    Err(e) => log::error!(target: LOG_TARGET, "Member fetch task did not complete: {e}"),
                }
            }
            reports
        };

        let (reports, activity) = tokio::join!(join_fetches, Aggregator::new().consume(rx));

        log::info!(target: LOG_TARGET, "Fetched events from {} of {} member(s)", reports.len(), members.len());

        (activity, reports)
    }
}
