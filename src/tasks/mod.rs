pub mod commands;
pub mod store;

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Status::Todo),
            "in-progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => Err(format!(
                "invalid status '{other}' (expected: todo, in-progress, done)"
            )),
        }
    }
}

/// Argument of `delete`: one task by id, or the whole store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    All,
    Id(u64),
}

impl FromStr for DeleteTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "all" {
            return Ok(DeleteTarget::All);
        }
        s.parse::<u64>()
            .map(DeleteTarget::Id)
            .map_err(|_| format!("task ID must be an integer or 'all', got '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub description: String,
    pub status: Status,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Task {
    /// Refresh `updated_at`, never moving it backwards if the clock does.
    fn touch(&mut self, now: NaiveDateTime) {
        self.updated_at = now.max(self.updated_at);
    }

    pub fn set_description(&mut self, description: String, now: NaiveDateTime) {
        self.description = description;
        self.touch(now);
    }

    pub fn set_status(&mut self, status: Status, now: NaiveDateTime) {
        self.status = status;
        self.touch(now);
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Description: {}, Status: {}, Created At: {}, Updated At: {}",
            self.id,
            self.description,
            self.status,
            self.created_at.format(TIMESTAMP_FORMAT),
            self.updated_at.format(TIMESTAMP_FORMAT)
        )
    }
}

/// Local wall-clock time at one-second precision, the store's timestamp format.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// The whole store, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// `None` once the largest id is `u64::MAX`.
    pub fn next_id(&self) -> Option<u64> {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0).checked_add(1)
    }

    /// Append a new `todo` task and return it, or `None` if no id is left.
    pub fn add(&mut self, description: String, now: NaiveDateTime) -> Option<&Task> {
        let task = Task {
            id: self.next_id()?,
            description,
            status: Status::Todo,
            created_at: now,
            updated_at: now,
        };
        self.tasks.push(task);
        self.tasks.last()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Tasks matching `status`, or every task when it is `None`.
    pub fn filter(&self, status: Option<Status>) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |t| status.is_none_or(|s| t.status == s))
    }
}
