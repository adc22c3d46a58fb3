//! Show transaction command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Transaction id
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ShowArgs, api: Option<&str>) -> Result<()> {
    let store = context::storefront(api)?;
    context::require_login(&store)?;

    let tx = store
        .transactions()
        .get(&args.id)
        .await
        .context("Failed to fetch transaction detail")?;

    if args.pretty {
        return output::json_pretty(&tx);
    }

    output::field("Transaction", &tx.id);
    output::field("Date", &tx.created_at.to_rfc3339());
    output::field("Buyer", &tx.user.username);
    println!();

    let mut total: u64 = 0;
    for item in &tx.order_items {
        let line_total = item.book.price * u64::from(item.quantity);
        total += line_total;
        println!(
            "  {} × {} @ {} = {}",
            item.quantity,
            item.book.title,
            output::rupiah(item.book.price),
            output::rupiah(line_total)
        );
    }

    println!();
    output::field("Total", &output::rupiah(total));

    Ok(())
}
