//! Auth subcommands.

mod login;
mod logout;
mod refresh;
mod register;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use tasklane_http::TaskClient;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Create a new session (login)
    Login(login::LoginArgs),

    /// Create a new account
    Register(register::RegisterArgs),

    /// Forget the stored session
    Logout(logout::LogoutArgs),

    /// Show the logged-in user
    Whoami(whoami::WhoamiArgs),

    /// Renew the access token
    Refresh(refresh::RefreshArgs),
}

pub async fn handle(cmd: AuthCommand, client: &TaskClient) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args, client).await,
        AuthSubcommand::Register(args) => register::run(args, client).await,
        AuthSubcommand::Logout(args) => logout::run(args, client),
        AuthSubcommand::Whoami(args) => whoami::run(args, client).await,
        AuthSubcommand::Refresh(args) => refresh::run(args, client).await,
    }
}
