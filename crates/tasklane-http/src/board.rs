//! Local task list with optimistic updates.

use tracing::{debug, warn};

use tasklane_core::{Result, Task, TaskFilter, TaskId};

use crate::client::TaskClient;

/// The client-side view of the user's tasks, newest first.
///
/// `toggle` and `delete` change the local list before the request is sent and
/// put the previous list back if the request fails. The error is still
/// returned so the caller can show it.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Tasks shown under the given filter, in board order.
    pub fn visible(&self, filter: TaskFilter) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| filter.matches(t))
    }

    /// Replace the board with the server's list.
    pub async fn load(&mut self, client: &TaskClient) -> Result<()> {
        self.tasks = client.list_tasks().await?;
        debug!(count = self.tasks.len(), "Board loaded");
        Ok(())
    }

    /// Create a task and put it at the top of the board.
    pub async fn create(&mut self, client: &TaskClient, title: &str) -> Result<&Task> {
        let task = client.create_task(title).await?;
        self.tasks.insert(0, task);
        Ok(&self.tasks[0])
    }

    /// Flip a task's completion state, reconciling with the server's answer.
    pub async fn toggle(&mut self, client: &TaskClient, id: &TaskId) -> Result<()> {
        let snapshot = self.tasks.clone();

        if let Some(task) = self.tasks.iter_mut().find(|t| &t.id == id) {
            task.completed = !task.completed;
        }

        match client.toggle_task(id).await {
            Ok(Some(updated)) => {
                self.replace(updated);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => {
                warn!(%id, error = %err, "Toggle failed, rolling back");
                self.tasks = snapshot;
                Err(err)
            }
        }
    }

    /// Remove a task, restoring it if the server refuses.
    pub async fn delete(&mut self, client: &TaskClient, id: &TaskId) -> Result<()> {
        let snapshot = self.tasks.clone();
        self.tasks.retain(|t| &t.id != id);

        if let Err(err) = client.delete_task(id).await {
            warn!(%id, error = %err, "Delete failed, rolling back");
            self.tasks = snapshot;
            return Err(err);
        }
        Ok(())
    }

    /// Rename a task. The board only changes once the server confirms.
    pub async fn rename(&mut self, client: &TaskClient, id: &TaskId, title: &str) -> Result<()> {
        let updated = client.update_task(id, title).await?;
        self.replace(updated);
        Ok(())
    }

    fn replace(&mut self, updated: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
            *slot = updated;
        }
    }
}
