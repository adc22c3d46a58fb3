//! Add book command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pustaka::BookInput;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Book title
    #[arg(long)]
    pub title: String,

    /// Writer name
    #[arg(long)]
    pub writer: String,

    /// Publisher name
    #[arg(long)]
    pub publisher: String,

    /// Price in rupiah
    #[arg(long)]
    pub price: u64,

    /// Stock quantity
    #[arg(long)]
    pub stock: u32,

    /// Genre id (see 'pustaka books genres')
    #[arg(long)]
    pub genre_id: String,

    /// Publication year
    #[arg(long)]
    pub year: i32,

    /// Cover image URL
    #[arg(long)]
    pub image: Option<String>,

    /// ISBN
    #[arg(long)]
    pub isbn: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Condition (new, like_new, good, fair, poor)
    #[arg(long)]
    pub condition: Option<String>,
}

pub async fn run(args: AddArgs, api: Option<&str>) -> Result<()> {
    let store = context::storefront(api)?;
    context::require_login(&store)?;

    let input = BookInput {
        title: args.title,
        writer: args.writer,
        publisher: args.publisher,
        price: args.price,
        stock_quantity: args.stock,
        genre_id: args.genre_id,
        publication_year: args.year,
        image: args.image,
        isbn: args.isbn,
        description: args.description,
        condition: args
            .condition
            .as_deref()
            .map(str::parse)
            .transpose()
            .context("Invalid condition")?,
    };

    let book = store
        .catalog()
        .create(&input)
        .await
        .context("Failed to add book")?;

    output::success(&format!("Added book: {}", book.title));
    output::field("ID", &book.id);

    Ok(())
}
