pub mod github;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Event type from a GitHub timeline, decoded once from its wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Push,
    Issues,
    PullRequest,
    Watch,
    PullRequestReview,
    /// Any type without a dedicated rule; keeps the raw wire name.
    Other(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Push => "PushEvent",
            EventKind::Issues => "IssuesEvent",
            EventKind::PullRequest => "PullRequestEvent",
            EventKind::Watch => "WatchEvent",
            EventKind::PullRequestReview => "PullRequestReviewEvent",
            EventKind::Other(raw) => raw,
        }
    }
}

impl From<String> for EventKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PushEvent" => EventKind::Push,
            "IssuesEvent" => EventKind::Issues,
            "PullRequestEvent" => EventKind::PullRequest,
            "WatchEvent" => EventKind::Watch,
            "PullRequestReviewEvent" => EventKind::PullRequestReview,
            _ => EventKind::Other(raw),
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
}

/// One record from `GET /users/{username}/events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub repo: Repo,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// One-line, human-readable description of an event.
pub fn describe(event: &Event) -> String {
    let repo = &event.repo.name;
    match &event.kind {
        EventKind::Push => format!("Pushed a commit to {repo}"),
        EventKind::Issues => format!("Opened a new issue in {repo}"),
        EventKind::PullRequest => format!("Opened a new pull request in {repo}"),
        EventKind::Watch => format!("Starred {repo}"),
        EventKind::PullRequestReview => format!("Reviewed a pull request in {repo}"),
        EventKind::Other(raw) => format!("Performed {raw} in {repo}"),
    }
}

/// Decode a serialized event, then describe it.
pub fn describe_json(json: &str) -> Result<String> {
    let event: Event = serde_json::from_str(json)?;
    Ok(describe(&event))
}
