//! Show book command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Book id
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ShowArgs, api: Option<&str>) -> Result<()> {
    let store = context::storefront(api)?;

    let book = store
        .catalog()
        .get(&args.id)
        .await
        .context("Failed to fetch book")?;

    if args.pretty {
        return output::json_pretty(&book);
    }

    output::field("Title", &book.title);
    output::field("Writer", &book.writer);
    output::field("Publisher", &book.publisher);
    output::field("Year", &book.publication_year.to_string());
    output::field("Price", &output::rupiah(book.price));
    output::field("Stock", &book.stock_quantity.to_string());
    if let Some(genre) = &book.genre {
        output::field("Genre", &genre.name);
    }
    if let Some(condition) = &book.condition {
        output::field("Condition", &condition.to_string());
    }
    if let Some(isbn) = &book.isbn {
        output::field("ISBN", isbn);
    }
    if let Some(description) = &book.description {
        println!();
        println!("{}", description);
    }

    Ok(())
}
