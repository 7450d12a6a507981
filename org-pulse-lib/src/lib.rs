#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for org-pulse
//!
//! This library holds everything behind the org-pulse daemon, which polls the
//! members of a GitHub organization once a day, aggregates their push activity
//! into daily buckets, and appends the results to CSV series served over HTTP.
//!
//! # Module Organization
//!
//! - [`github`]: API client, members, and events
//! - [`activity`]: Concurrent per-member fetch and the single-consumer aggregator
//! - [`storage`]: Etag store and append-only series files
//! - [`cycle`]: The refresh cycle orchestrator
//! - [`server`]: Static file server for the series
//! - [`commands`]: Configuration, logging, and process entry point

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod activity;
pub mod commands;
pub mod cycle;
pub mod github;
pub mod server;
pub mod storage;

pub use crate::commands::run;
