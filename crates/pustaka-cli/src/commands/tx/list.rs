//! List transactions command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, api: Option<&str>) -> Result<()> {
    let store = context::storefront(api)?;
    context::require_login(&store)?;

    let transactions = store
        .transactions()
        .list()
        .await
        .context("Failed to fetch transaction list")?;

    if transactions.is_empty() {
        eprintln!("{}", "No transactions yet.".dimmed());
        return Ok(());
    }

    if args.pretty {
        return output::json_pretty(&transactions);
    }

    for tx in &transactions {
        let total: u64 = tx
            .order_items
            .iter()
            .map(|item| item.book.price * u64::from(item.quantity))
            .sum();
        println!(
            "{}  {}  {} items  {}",
            tx.id.dimmed(),
            tx.created_at.format("%Y-%m-%d %H:%M"),
            tx.order_items.len(),
            output::rupiah(total)
        );
    }

    Ok(())
}
