//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tasklane_core::{Task, TaskFilter};
use tasklane_http::{TaskBoard, TaskClient};

use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Which tasks to show (all, active, completed)
    #[arg(long, default_value_t = TaskFilter::All)]
    pub filter: TaskFilter,

    /// Print the tasks as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, client: &TaskClient) -> Result<()> {
    let mut board = TaskBoard::new();
    board.load(client).await.context("Failed to load tasks")?;

    let visible: Vec<&Task> = board.visible(args.filter).collect();

    if args.json {
        return output::json(&visible);
    }

    if visible.is_empty() {
        println!("{}", "No tasks".dimmed());
        return Ok(());
    }

    for task in &visible {
        output::task(task);
    }

    let done = board.tasks().iter().filter(|t| t.completed).count();
    println!(
        "{}",
        format!("{} of {} done", done, board.tasks().len()).dimmed()
    );

    Ok(())
}
