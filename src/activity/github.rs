use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::config::ActivityConfig;
use crate::error::{Error, Result};

use super::Event;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("devtrack/", env!("CARGO_PKG_VERSION"));

/// One page of the events feed as the endpoint returned it.
#[derive(Debug, Clone, PartialEq)]
pub enum PageResponse {
    /// Raw event records, newest first. Empty means the feed is exhausted.
    Events(Vec<serde_json::Value>),
    /// Non-success HTTP status.
    Status(u16),
}

/// Abstraction over the events endpoint for testability.
pub trait EventsClient {
    fn fetch_page(&self, username: &str, page: u32, per_page: u32) -> Result<PageResponse>;
}

/// Blocking `ureq` client for the public (unauthenticated) REST API.
pub struct UreqEventsClient {
    api_url: String,
    agent: ureq::Agent,
}

impl UreqEventsClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            agent: ureq::agent(),
        }
    }

    fn events_url(&self, username: &str) -> String {
        format!(
            "{}/users/{username}/events",
            self.api_url.trim_end_matches('/')
        )
    }
}

impl EventsClient for UreqEventsClient {
    fn fetch_page(&self, username: &str, page: u32, per_page: u32) -> Result<PageResponse> {
        let url = self.events_url(username);
        match self
            .agent
            .get(&url)
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", USER_AGENT)
            .query("page", &page.to_string())
            .query("per_page", &per_page.to_string())
            .call()
        {
            Ok(response) => {
                let records: Vec<serde_json::Value> = response.into_json().map_err(|e| {
                    Error::Network(format!("failed to read events response: {e}"))
                })?;
                Ok(PageResponse::Events(records))
            }
            Err(ureq::Error::Status(code, _)) => Ok(PageResponse::Status(code)),
            Err(e) => Err(Error::Network(format!("events request failed: {e}"))),
        }
    }
}

pub struct ActivityFetcher {
    client: Box<dyn EventsClient>,
    per_page: u32,
}

impl ActivityFetcher {
    pub fn new(config: &ActivityConfig) -> Self {
        Self {
            client: Box::new(UreqEventsClient::new(config.api_url.clone())),
            per_page: config.per_page,
        }
    }

    pub fn with_client(client: Box<dyn EventsClient>, per_page: u32) -> Self {
        Self { client, per_page }
    }

    /// Collect the account's events from the last `window_days` days.
    ///
    /// A window reaching past chrono's representable range covers everything.
    pub fn fetch(&self, username: &str, window_days: u32) -> Vec<Event> {
        let cutoff = Utc::now()
            .checked_sub_signed(Duration::days(i64::from(window_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.fetch_since(username, cutoff)
    }

    /// Walk the feed page by page until it runs dry, the endpoint fails, or an
    /// event older than `cutoff` shows up. Whatever was collected so far is
    /// returned in every case.
    pub fn fetch_since(&self, username: &str, cutoff: DateTime<Utc>) -> Vec<Event> {
        let mut events = Vec::new();
        let mut page = 1;

        loop {
            let records = match self.client.fetch_page(username, page, self.per_page) {
                Ok(PageResponse::Events(records)) => records,
                Ok(PageResponse::Status(status)) => {
                    warn!(status, page, "failed to fetch events, stopping");
                    return events;
                }
                Err(e) => {
                    warn!(error = %e, page, "failed to fetch events, stopping");
                    return events;
                }
            };

            if records.is_empty() {
                debug!(page, "events feed exhausted");
                return events;
            }
            debug!(page, count = records.len(), "fetched events page");

            for record in records {
                let event: Event = match serde_json::from_value(record) {
                    Ok(event) => event,
                    Err(e) => {
                        warn!(error = %e, page, "skipping undecodable event");
                        continue;
                    }
                };
                // Feed is newest first: nothing after this one is in the window.
                if event.created_at.is_some_and(|at| at < cutoff) {
                    debug!(id = %event.id, "reached events outside the window");
                    return events;
                }
                events.push(event);
            }

            page += 1;
        }
    }
}
