//! Access to the code-hosting API
//!
//! A thin client around `reqwest` that authenticates with a single static token,
//! classifies responses (success, not modified, failed), and exposes the two
//! resources the activity pipeline reads: organization members and their public
//! event feeds.

mod client;
mod event;
mod member;

pub use client::{ApiResult, Client, RateLimitInfo, extract_etag};
pub use event::{Actor, Event, PUSH_EVENT, Payload};
pub use member::{Member, fetch_members};
