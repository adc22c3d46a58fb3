//! List books command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pustaka::BookQuery;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Search by title or writer
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by condition (new, like_new, good, fair, poor)
    #[arg(long)]
    pub condition: Option<String>,

    /// Sort field (title or year)
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort order (asc or desc)
    #[arg(long)]
    pub order: Option<String>,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub limit: Option<u32>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, api: Option<&str>) -> Result<()> {
    let store = context::storefront(api)?;

    let query = BookQuery {
        search: args.search,
        condition: args
            .condition
            .as_deref()
            .map(str::parse)
            .transpose()
            .context("Invalid condition")?,
        sort_by: args
            .sort_by
            .as_deref()
            .map(str::parse)
            .transpose()
            .context("Invalid sort field")?,
        order: args
            .order
            .as_deref()
            .map(str::parse)
            .transpose()
            .context("Invalid sort order")?,
        page: args.page,
        limit: args.limit,
    };

    let page = store
        .catalog()
        .list(&query)
        .await
        .context("Failed to list books")?;

    if page.books.is_empty() {
        eprintln!("{}", "No books found.".dimmed());
        return Ok(());
    }

    if args.pretty {
        output::json_pretty(&page.books)?;
    } else {
        for book in &page.books {
            println!(
                "{}  {} by {} ({}, stock {})",
                book.id.dimmed(),
                book.title,
                book.writer,
                output::rupiah(book.price),
                book.stock_quantity
            );
        }
    }

    if let Some(p) = &page.pagination {
        eprintln!();
        eprintln!(
            "{}",
            format!(
                "Page {}/{} ({} items)",
                p.current_page, p.total_pages, p.total_items
            )
            .dimmed()
        );
    }

    Ok(())
}
