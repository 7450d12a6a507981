//! Process entry point for org-pulse

use super::common::init_logging;
use super::config::Config;
use crate::Result;
use crate::cycle::Cycle;
use crate::github::Client;
use crate::server;
use crate::storage::{EtagStore, SeriesWriter};
use clap::Parser;

const LOG_TARGET: &str = "       run";

/// Parse configuration, start the refresh loop in the background, and serve the
/// assets directory in the foreground.
///
/// Missing or invalid configuration stops the process before any cycle runs.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
pub async fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let config = Config::parse_from(args);
    init_logging(config.log_level);

    log::debug!(target: LOG_TARGET, "Starting with {config:?}");

    let client = Client::new(&config.access_token)?;
    let cycle = Cycle::new(
        client,
        config.members_url.as_str(),
        EtagStore::new(config.etags_path.as_std_path()),
        SeriesWriter::new(config.assets_dir.as_std_path()),
    );

    drop(tokio::spawn(cycle.run_forever()));

    server::serve(config.port, &config.assets_dir).await
}
