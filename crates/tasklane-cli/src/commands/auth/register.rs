//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tasklane_core::Registration;
use tasklane_http::TaskClient;

use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: RegisterArgs, client: &TaskClient) -> Result<()> {
    client
        .register(Registration::new(&args.name, &args.email, &args.password))
        .await
        .context("Registration failed")?;

    output::success("Account created");
    println!("Run 'tasklane auth login --email {}' to sign in.", args.email);

    Ok(())
}
