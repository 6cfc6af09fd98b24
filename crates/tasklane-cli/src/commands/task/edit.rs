//! Edit command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tasklane_core::TaskId;
use tasklane_http::TaskClient;

use crate::output;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Task ID
    pub id: TaskId,

    /// New title
    pub title: String,
}

pub async fn run(args: EditArgs, client: &TaskClient) -> Result<()> {
    let task = client
        .update_task(&args.id, &args.title)
        .await
        .context("Failed to update task")?;

    output::success("Task updated");
    output::task(&task);

    Ok(())
}
