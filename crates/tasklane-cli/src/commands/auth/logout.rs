//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tasklane_http::TaskClient;

use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(_args: LogoutArgs, client: &TaskClient) -> Result<()> {
    client.logout().context("Failed to clear session")?;
    output::success("Logged out");
    Ok(())
}
