#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use assert_cmd::Command;
use chrono::{DateTime, Utc};

use devtrack::activity::github::{EventsClient, PageResponse};
use devtrack::error::{Error, Result};

#[allow(deprecated)]
pub fn task_cli(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("task-cli").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[allow(deprecated)]
pub fn github_activity(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("github-activity").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

/// Scripted events endpoint. Records each requested page.
pub struct MockEventsClient {
    responses: RefCell<Vec<Result<PageResponse>>>,
    pub pages: Rc<RefCell<Vec<u32>>>,
}

impl MockEventsClient {
    pub fn new(responses: Vec<Result<PageResponse>>) -> Self {
        Self {
            responses: RefCell::new(responses),
            pages: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl EventsClient for MockEventsClient {
    fn fetch_page(&self, _username: &str, page: u32, _per_page: u32) -> Result<PageResponse> {
        self.pages.borrow_mut().push(page);
        let mut responses = self.responses.borrow_mut();
        if responses.is_empty() {
            Err(Error::Network("no more mock responses".to_string()))
        } else {
            responses.remove(0)
        }
    }
}

pub fn event_json(id: &str, kind: &str, repo: &str, created_at: DateTime<Utc>) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "type": kind,
        "actor": { "login": "octocat" },
        "repo": { "name": repo },
        "payload": {},
        "public": true,
        "created_at": created_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    })
}
