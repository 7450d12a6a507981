//! Durable state: the etag store read and rewritten each cycle, and the
//! append-only series files the static server exposes.

mod etag_store;
mod metric;
mod series_writer;

pub use etag_store::{EtagMap, EtagStore};
pub use metric::Metric;
pub use series_writer::{SeriesWriter, day_timestamp};
