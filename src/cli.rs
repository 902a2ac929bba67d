use clap::{Parser, Subcommand};

use crate::tasks::{DeleteTarget, Status};

/// task-cli — track tasks in a local JSON file
#[derive(Parser, Debug, Clone)]
#[command(name = "task-cli", version, about)]
pub struct TaskCli {
    #[command(subcommand)]
    pub command: Option<TaskCommand>,

    /// Path to the task store (default: tasks.json)
    #[arg(long, global = true)]
    pub file: Option<String>,

    /// Path to config file (default: devtrack.toml, if present)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TaskCommand {
    /// Add a new task
    Add {
        /// Task description (remaining words are joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// List all tasks, or only those with the given status
    List {
        /// Status filter (todo, in-progress, done)
        status: Option<Status>,
    },

    /// Update a task's description
    Update {
        /// Task ID
        #[arg(value_parser = parse_task_id)]
        id: u64,

        /// New description
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// Delete a task by ID, or every task with `all`
    Delete {
        /// Task ID or `all`
        target: DeleteTarget,
    },

    /// Mark a task as todo
    MarkTodo {
        #[arg(value_parser = parse_task_id)]
        id: u64,
    },

    /// Mark a task as done
    MarkDone {
        #[arg(value_parser = parse_task_id)]
        id: u64,
    },

    /// Mark a task as in-progress
    MarkInProgress {
        #[arg(value_parser = parse_task_id)]
        id: u64,
    },
}

/// github-activity — show a GitHub user's recent public activity
#[derive(Parser, Debug, Clone)]
#[command(name = "github-activity", version, about)]
pub struct ActivityCli {
    /// GitHub username (falls back to `activity.username` in the config file)
    pub username: Option<String>,

    /// Only show events from the last N days (default: 30)
    #[arg(long)]
    pub days: Option<u32>,

    /// Events requested per page, 1-100 (default: 30)
    #[arg(long)]
    pub per_page: Option<u32>,

    /// GitHub API base URL (default: https://api.github.com)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Path to config file (default: devtrack.toml, if present)
    #[arg(long)]
    pub config: Option<String>,
}

pub fn parse_task_id(value: &str) -> std::result::Result<u64, String> {
    value
        .parse::<u64>()
        .map_err(|_| format!("task ID must be an integer, got '{value}'"))
}

/// Parse arguments, exiting 0 for help/version output and 1 for anything else.
///
/// Clap's own convention is exit code 2 for usage errors; both tools report
/// usage and validation failures with 1.
pub fn parse_or_exit<P: Parser>() -> P {
    match P::try_parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}
