//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tasklane_core::TaskId;
use tasklane_http::TaskClient;

use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Task ID
    pub id: TaskId,
}

pub async fn run(args: DeleteArgs, client: &TaskClient) -> Result<()> {
    client
        .delete_task(&args.id)
        .await
        .context("Failed to delete task")?;

    output::success(&format!("Deleted {}", args.id));

    Ok(())
}
