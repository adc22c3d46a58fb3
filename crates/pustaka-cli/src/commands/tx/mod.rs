//! Transaction subcommand implementations.

mod checkout;
mod list;
mod show;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct TxCommand {
    #[command(subcommand)]
    pub command: TxSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TxSubcommand {
    /// Buy books (requires login)
    Checkout(checkout::CheckoutArgs),

    /// List your transactions (requires login)
    List(list::ListArgs),

    /// Show a single transaction (requires login)
    Show(show::ShowArgs),
}

pub async fn handle(cmd: TxCommand, api: Option<&str>) -> Result<()> {
    match cmd.command {
        TxSubcommand::Checkout(args) => checkout::run(args, api).await,
        TxSubcommand::List(args) => list::run(args, api).await,
        TxSubcommand::Show(args) => show::run(args, api).await,
    }
}
