use std::io::Write;

use tracing::info;

use crate::cli::TaskCommand;
use crate::error::{Error, Result};

use super::store::TaskStore;
use super::{DeleteTarget, Status, TaskList, now};

/// Run one command against the store, writing its report to `out`.
///
/// Unknown ids are reported on `out` and are not errors.
pub fn run(command: TaskCommand, store: &TaskStore, out: &mut dyn Write) -> Result<()> {
    match command {
        TaskCommand::Add { description } => add(store, join_description(&description)?, out),
        TaskCommand::List { status } => list(store, status, out),
        TaskCommand::Update { id, description } => {
            update(store, id, join_description(&description)?, out)
        }
        TaskCommand::Delete { target } => delete(store, target, out),
        TaskCommand::MarkTodo { id } => mark(store, id, Status::Todo, out),
        TaskCommand::MarkInProgress { id } => mark(store, id, Status::InProgress, out),
        TaskCommand::MarkDone { id } => mark(store, id, Status::Done, out),
    }
}

fn join_description(words: &[String]) -> Result<String> {
    let description = words.join(" ");
    if description.trim().is_empty() {
        return Err(Error::Usage(
            "please provide a task description".to_string(),
        ));
    }
    Ok(description)
}

fn add(store: &TaskStore, description: String, out: &mut dyn Write) -> Result<()> {
    let mut tasks = store.load()?;
    let id = tasks
        .add(description, now())
        .ok_or_else(|| Error::store(store.path(), "no task IDs left to assign"))?
        .id;
    store.save(&tasks)?;
    info!(id, "task added");
    writeln!(out, "Task added successfully (ID: {id}).")?;
    Ok(())
}

fn list(store: &TaskStore, status: Option<Status>, out: &mut dyn Write) -> Result<()> {
    let tasks = store.load()?;
    let mut found = false;
    for task in tasks.filter(status) {
        writeln!(out, "{task}")?;
        found = true;
    }
    if !found {
        match status {
            Some(status) => writeln!(out, "No tasks found with status '{status}'.")?,
            None => writeln!(out, "No tasks found.")?,
        }
    }
    Ok(())
}

fn update(store: &TaskStore, id: u64, description: String, out: &mut dyn Write) -> Result<()> {
    let mut tasks = store.load()?;
    let Some(task) = tasks.get_mut(id) else {
        return not_found(id, out);
    };
    task.set_description(description, now());
    store.save(&tasks)?;
    info!(id, "task updated");
    writeln!(out, "Task {id} updated.")?;
    Ok(())
}

fn delete(store: &TaskStore, target: DeleteTarget, out: &mut dyn Write) -> Result<()> {
    match target {
        // Does not read the store, so a corrupt file can still be reset.
        DeleteTarget::All => {
            store.save(&TaskList::default())?;
            info!("all tasks deleted");
            writeln!(out, "All tasks deleted.")?;
        }
        DeleteTarget::Id(id) => {
            let mut tasks = store.load()?;
            if tasks.remove(id).is_none() {
                return not_found(id, out);
            }
            store.save(&tasks)?;
            info!(id, "task deleted");
            writeln!(out, "Task {id} deleted.")?;
        }
    }
    Ok(())
}

fn mark(store: &TaskStore, id: u64, status: Status, out: &mut dyn Write) -> Result<()> {
    let mut tasks = store.load()?;
    let Some(task) = tasks.get_mut(id) else {
        return not_found(id, out);
    };
    task.set_status(status, now());
    store.save(&tasks)?;
    info!(id, %status, "task status changed");
    writeln!(out, "Task {id} marked as {status}.")?;
    Ok(())
}

fn not_found(id: u64, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "No task found with ID {id}.")?;
    Ok(())
}
