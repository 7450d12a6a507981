use super::client::{ApiResult, Client, RateLimitInfo};
use serde::Deserialize;

const LOG_TARGET: &str = "   members";

/// Path-template fragment GitHub leaves at the end of `events_url`.
const PRIVACY_TEMPLATE: &str = "{/privacy}";

/// An account belonging to the monitored organization
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Member {
    pub login: String,
    pub events_url: String,
}

impl Member {
    /// The member's public events feed, with the path template removed
    #[must_use]
    pub fn events_locator(&self) -> String {
        self.events_url.replacen(PRIVACY_TEMPLATE, "", 1)
    }
}

/// Fetch the organization membership list, along with the rate limit the response reported.
///
/// Failures are logged and yield an empty list so the cycle can still complete.
pub async fn fetch_members(client: &Client, url: &str) -> (Vec<Member>, Option<RateLimitInfo>) {
    let (resp, rate_limit) = match client.api_call(url, None).await {
        ApiResult::Success(resp, rate_limit) => (resp, rate_limit),
        ApiResult::NotModified(rate_limit) => {
            log::warn!(target: LOG_TARGET, "Unexpected 'not modified' response fetching org members from '{url}'");
            return (Vec::new(), rate_limit);
        }
        ApiResult::Failed(e, rate_limit) => {
            log::error!(target: LOG_TARGET, "Could not fetch org members: {e:#}");
            return (Vec::new(), rate_limit);
        }
    };

    let members = match resp.json::<Vec<Member>>().await {
        Ok(members) => {
            log::info!(target: LOG_TARGET, "Fetched {} org member(s)", members.len());
            members
        }
        Err(e) => {
            log::error!(target: LOG_TARGET, "Could not decode org members response from '{url}': {e:#}");
            Vec::new()
        }
    };

    (members, rate_limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_locator_strips_privacy_template() {
        let member = Member {
            login: "octocat".to_string(),
            events_url: "https://api.github.com/users/octocat/events{/privacy}".to_string(),
        };

        assert_eq!(member.events_locator(), "https://api.github.com/users/octocat/events");
    }

    #[test]
    fn test_events_locator_without_template() {
        let member = Member {
            login: "octocat".to_string(),
            events_url: "https://api.github.com/users/octocat/events".to_string(),
        };

        assert_eq!(member.events_locator(), "https://api.github.com/users/octocat/events");
    }

    #[test]
    fn test_member_deserialize_ignores_extra_fields() {
        let json = r#"[{
            "login": "octocat",
            "id": 1,
            "events_url": "https://api.github.com/users/octocat/events{/privacy}",
            "site_admin": false
        }]"#;

        let members: Vec<Member> = serde_json::from_str(json).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].login, "octocat");
    }

    #[tokio::test]
    async fn test_fetch_members_reports_rate_limit() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orgs/acme/members"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{ "login": "octocat", "events_url": "http://x/events{/privacy}" }]))
                    .insert_header("x-ratelimit-remaining", "41")
                    .insert_header("x-ratelimit-reset", "1704067200"),
            )
            .mount(&server)
            .await;

        let client = Client::new("test_token").unwrap();
        let (members, rate_limit) = fetch_members(&client, &format!("{}/orgs/acme/members", server.uri())).await;

        assert_eq!(members.len(), 1);
        assert_eq!(rate_limit.map(|rl| rl.remaining), Some(41));
    }

    #[tokio::test]
    async fn test_fetch_members_failure_is_empty_but_keeps_rate_limit() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "0")
                    .insert_header("x-ratelimit-reset", "1704067200"),
            )
            .mount(&server)
            .await;

        let client = Client::new("test_token").unwrap();
        let (members, rate_limit) = fetch_members(&client, &server.uri()).await;

        assert!(members.is_empty());
        assert_eq!(rate_limit.map(|rl| rl.remaining), Some(0));
    }
}
