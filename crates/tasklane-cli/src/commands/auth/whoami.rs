//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tasklane_http::TaskClient;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, client: &TaskClient) -> Result<()> {
    session::require_session(client)?;

    let user = client.me().await.context("Failed to fetch profile")?;

    output::field("Name", &user.name);
    output::field("Email", &user.email);

    Ok(())
}
