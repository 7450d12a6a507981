//! The fetch and aggregate halves of a cycle
//!
//! Per-member fetchers run concurrently and push raw events into a bounded
//! channel; a single [`Aggregator`] owns the day buckets and drains that channel
//! until every fetcher has dropped its sender.

mod aggregator;
mod daily_bucket;
mod fetcher;

pub use aggregator::{Aggregator, DailyActivity};
pub use daily_bucket::DailyBucket;
pub use fetcher::{FetchOutcome, FetchReport, fetch_member_events};
