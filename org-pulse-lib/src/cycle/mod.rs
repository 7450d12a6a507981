//! The refresh cycle
//!
//! One long-lived task runs [`Cycle::run_forever`]: fetch the membership list,
//! load etags, fetch every member's events concurrently into the aggregator,
//! then write the series and save the etags. Cycles never overlap.

mod cycle_report;
mod orchestrator;

pub use cycle_report::CycleReport;
pub use orchestrator::{CYCLE_INTERVAL, Cycle};
