//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tasklane_core::Credentials;
use tasklane_http::TaskClient;

use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, client: &TaskClient) -> Result<()> {
    eprintln!("{}", "Logging in...".dimmed());

    client
        .login(Credentials::new(&args.email, &args.password))
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    output::field("Email", &args.email);

    Ok(())
}
