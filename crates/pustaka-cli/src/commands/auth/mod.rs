//! Auth subcommand implementations.

mod login;
mod logout;
mod register;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in and persist the session
    Login(login::LoginArgs),

    /// Create a new account (does not log in)
    Register(register::RegisterArgs),

    /// Clear the persisted session
    Logout(logout::LogoutArgs),

    /// Display the active session
    Whoami(whoami::WhoamiArgs),
}

pub async fn handle(cmd: AuthCommand, api: Option<&str>) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args, api).await,
        AuthSubcommand::Register(args) => register::run(args, api).await,
        AuthSubcommand::Logout(args) => logout::run(args, api).await,
        AuthSubcommand::Whoami(args) => whoami::run(args, api).await,
    }
}
