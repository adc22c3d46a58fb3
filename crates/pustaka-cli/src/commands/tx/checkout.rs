//! Checkout command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use pustaka::{BookQuery, Cart};

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// Item to buy as book_id:quantity (repeatable)
    #[arg(long = "item", value_name = "BOOK_ID:QTY", required = true)]
    pub items: Vec<String>,
}

pub async fn run(args: CheckoutArgs, api: Option<&str>) -> Result<()> {
    let store = context::storefront(api)?;
    context::require_login(&store)?;

    // Fetch the catalog so quantities can be clamped against stock
    // before the order is submitted.
    let page = store
        .catalog()
        .list(&BookQuery::default())
        .await
        .context("Failed to fetch books for checkout")?;

    let mut cart = Cart::new(&page.books);
    for raw in &args.items {
        let (book_id, quantity) = parse_item(raw)?;
        match cart.set_quantity(book_id, quantity) {
            Some(effective) if effective < quantity => {
                eprintln!(
                    "{}",
                    format!("Only {} in stock for {}, quantity reduced", effective, book_id)
                        .yellow()
                );
            }
            Some(_) => {}
            None => bail!("Unknown book id '{}'", book_id),
        }
    }

    if cart.is_empty() {
        bail!("Cart is empty, nothing to check out");
    }

    eprintln!(
        "{}",
        format!("Checking out {} items ({})...", cart.total_quantity(), output::rupiah(cart.total()))
            .dimmed()
    );

    let summary = store
        .transactions()
        .checkout(&cart.items())
        .await
        .context("Failed to create transaction")?;

    output::success("Checkout succeeded");
    println!();
    output::field("Transaction", &summary.transaction_id);
    output::field("Quantity", &summary.total_quantity.to_string());
    output::field("Total", &output::rupiah(summary.total_price));

    Ok(())
}

/// Parse an `--item` value of the form `book_id:quantity`.
fn parse_item(raw: &str) -> Result<(&str, u32)> {
    let Some((book_id, qty)) = raw.rsplit_once(':') else {
        bail!("Invalid item '{}', expected BOOK_ID:QTY", raw);
    };
    if book_id.is_empty() {
        bail!("Invalid item '{}', missing book id", raw);
    }
    let quantity: u32 = qty
        .parse()
        .with_context(|| format!("Invalid quantity in '{}'", raw))?;
    if quantity == 0 {
        bail!("Quantity must be at least 1 in '{}'", raw);
    }
    Ok((book_id, quantity))
}
