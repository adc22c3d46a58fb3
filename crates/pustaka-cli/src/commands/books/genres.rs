//! List genres command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::context;

#[derive(Args, Debug)]
pub struct GenresArgs {}

pub async fn run(_args: GenresArgs, api: Option<&str>) -> Result<()> {
    let store = context::storefront(api)?;

    let genres = store
        .catalog()
        .genres()
        .await
        .context("Failed to list genres")?;

    if genres.is_empty() {
        eprintln!("{}", "No genres found.".dimmed());
        return Ok(());
    }

    for genre in &genres {
        match &genre.description {
            Some(description) => {
                println!("{}  {} ({})", genre.id.dimmed(), genre.name, description)
            }
            None => println!("{}  {}", genre.id.dimmed(), genre.name),
        }
    }

    Ok(())
}
