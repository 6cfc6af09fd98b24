//! Toggle command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tasklane_core::TaskId;
use tasklane_http::{TaskBoard, TaskClient};

use crate::output;

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Task ID
    pub id: TaskId,
}

pub async fn run(args: ToggleArgs, client: &TaskClient) -> Result<()> {
    let mut board = TaskBoard::new();
    board.load(client).await.context("Failed to load tasks")?;

    if board.get(&args.id).is_none() {
        anyhow::bail!("No task with ID {}", args.id);
    }

    board
        .toggle(client, &args.id)
        .await
        .context("Failed to toggle task")?;

    if let Some(task) = board.get(&args.id) {
        let state = if task.completed { "done" } else { "not done" };
        output::success(&format!("Marked {}", state));
        output::task(task);
    }

    Ok(())
}
