//! Command-line surface and process wiring
//!
//! [`Config`] is parsed from arguments or environment variables; [`run`] sets up
//! logging, spawns the refresh loop, and serves the assets directory.

mod common;
mod config;
mod run;

pub use common::init_logging;
pub use config::{Config, DEFAULT_MEMBERS_URL, LogLevel};
pub use run::run;
