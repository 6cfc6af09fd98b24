//! Add command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tasklane_http::TaskClient;

use crate::output;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task title
    pub title: String,
}

pub async fn run(args: AddArgs, client: &TaskClient) -> Result<()> {
    let task = client
        .create_task(&args.title)
        .await
        .context("Failed to create task")?;

    output::success("Task created");
    output::task(&task);

    Ok(())
}
