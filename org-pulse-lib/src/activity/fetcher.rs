use crate::github::{ApiResult, Client, Event, Member, RateLimitInfo, extract_etag};
use tokio::sync::mpsc;

const LOG_TARGET: &str = "    events";

/// How a single member's fetch ended
#[derive(Debug)]
pub enum FetchOutcome {
    /// The cached etag still matches, the member has no new activity
    NotModified,

    /// The feed was read; `events` of them were forwarded to the stream.
    /// `etag` is the fresh cache token, if the response carried one.
    Fetched { events: usize, etag: Option<String> },

    /// Transport failure or bad status. The stored etag must be left alone so
    /// the same range is requested again next cycle.
    Failed(ohno::AppError),
}

/// Outcome of one member's fetch, reported back to the orchestrator
#[derive(Debug)]
pub struct FetchReport {
    pub login: String,
    pub outcome: FetchOutcome,
    pub rate_limit: Option<RateLimitInfo>,
}

impl FetchReport {
    /// The cache token to store for this member, if the fetch produced one
    #[must_use]
    pub fn new_etag(&self) -> Option<&str> {
        match &self.outcome {
            FetchOutcome::Fetched { etag, .. } => etag.as_deref(),
            FetchOutcome::NotModified | FetchOutcome::Failed(_) => None,
        }
    }
}

/// Read one member's event feed, forwarding every decoded event into `events`.
///
/// Issues a single conditional request (no retries). The sender is dropped when
/// this returns, whatever the outcome, which is what lets the stream close once
/// every member is done.
pub async fn fetch_member_events(client: &Client, member: &Member, etag: Option<&str>, events: mpsc::Sender<Event>) -> FetchReport {
    let url = member.events_locator();
    let login = member.login.clone();

    let (resp, rate_limit) = match client.api_call(&url, etag).await {
        ApiResult::Success(resp, rate_limit) => (resp, rate_limit),
        ApiResult::NotModified(rate_limit) => {
            log::debug!(target: LOG_TARGET, "No new activity for user '{login}'");
            return FetchReport {
                login,
                outcome: FetchOutcome::NotModified,
                rate_limit,
            };
        }
        ApiResult::Failed(e, rate_limit) => {
            log::warn!(target: LOG_TARGET, "Could not fetch events for user '{login}': {e:#}");
            return FetchReport {
                login,
                outcome: FetchOutcome::Failed(e),
                rate_limit,
            };
        }
    };

    let new_etag = extract_etag(resp.headers());

    let decoded = match resp.json::<Vec<Event>>().await {
        Ok(decoded) => decoded,
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Could not decode events for user '{login}': {e:#}");
            Vec::new()
        }
    };

    let mut forwarded = 0;
    for event in decoded {
        if events.send(event).await.is_err() {
            log::error!(target: LOG_TARGET, "Event stream closed while forwarding events for user '{login}'");
            break;
        }
        forwarded += 1;
    }

    log::debug!(target: LOG_TARGET, "Forwarded {forwarded} event(s) for user '{login}'");

    FetchReport {
        login,
        outcome: FetchOutcome::Fetched {
            events: forwarded,
            etag: new_etag,
        },
        rate_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_etag_only_for_fetched() {
        let fetched = FetchReport {
            login: "octocat".to_string(),
            outcome: FetchOutcome::Fetched {
                events: 2,
                etag: Some("\"abc\"".to_string()),
            },
            rate_limit: None,
        };
        assert_eq!(fetched.new_etag(), Some("\"abc\""));

        let not_modified = FetchReport {
            login: "octocat".to_string(),
            outcome: FetchOutcome::NotModified,
            rate_limit: None,
        };
        assert_eq!(not_modified.new_etag(), None);

        let failed = FetchReport {
            login: "octocat".to_string(),
            outcome: FetchOutcome::Failed(ohno::app_err!("boom")),
            rate_limit: None,
        };
        assert_eq!(failed.new_etag(), None);
    }
}
