//! Task subcommands.

mod add;
mod delete;
mod edit;
mod list;
mod toggle;

use anyhow::Result;
use clap::{Args, Subcommand};

use tasklane_http::TaskClient;

use crate::session;

#[derive(Args, Debug)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub command: TaskSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TaskSubcommand {
    /// List tasks
    List(list::ListArgs),

    /// Create a task
    Add(add::AddArgs),

    /// Mark a task done or not done
    Toggle(toggle::ToggleArgs),

    /// Change a task's title
    Edit(edit::EditArgs),

    /// Delete a task
    Delete(delete::DeleteArgs),
}

pub async fn handle(cmd: TaskCommand, client: &TaskClient) -> Result<()> {
    session::require_session(client)?;

    match cmd.command {
        TaskSubcommand::List(args) => list::run(args, client).await,
        TaskSubcommand::Add(args) => add::run(args, client).await,
        TaskSubcommand::Toggle(args) => toggle::run(args, client).await,
        TaskSubcommand::Edit(args) => edit::run(args, client).await,
        TaskSubcommand::Delete(args) => delete::run(args, client).await,
    }
}
