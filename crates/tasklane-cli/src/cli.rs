//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::task::TaskCommand;

/// API origin used when neither `--api` nor `TASKLANE_API` is given.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Manage your tasks from the terminal.
#[derive(Parser, Debug)]
#[command(name = "tasklane")]
#[command(author, version = env!("TASKLANE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Task API base URL
    #[arg(long, env = "TASKLANE_API", default_value = DEFAULT_API_URL, global = true)]
    pub api: String,

    /// Where to keep the login session (defaults to the user data directory)
    #[arg(long, env = "TASKLANE_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account and session operations
    Auth(AuthCommand),

    /// Task operations
    Task(TaskCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_task_list_filter() {
        let cli = Cli::try_parse_from([
            "tasklane",
            "--api",
            "https://tasks.example.com",
            "task",
            "list",
            "--filter",
            "completed",
        ])
        .unwrap();

        assert_eq!(cli.api, "https://tasks.example.com");
        assert!(matches!(cli.command, Commands::Task(_)));
    }

    #[test]
    fn rejects_bad_task_id() {
        assert!(Cli::try_parse_from(["tasklane", "task", "toggle", "a/b"]).is_err());
    }

    #[test]
    fn rejects_dot_segment_task_id() {
        assert!(Cli::try_parse_from(["tasklane", "task", "delete", ".."]).is_err());
        assert!(Cli::try_parse_from(["tasklane", "task", "delete", "."]).is_err());
    }
}
