//! Books subcommand implementations.

mod add;
mod genres;
mod list;
mod remove;
mod show;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct BooksCommand {
    #[command(subcommand)]
    pub command: BooksSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BooksSubcommand {
    /// List books with optional search, filter and sort
    List(list::ListArgs),

    /// Show a single book
    Show(show::ShowArgs),

    /// Add a book listing (requires login)
    Add(add::AddArgs),

    /// Remove a book listing (requires login)
    Remove(remove::RemoveArgs),

    /// List genres
    Genres(genres::GenresArgs),
}

pub async fn handle(cmd: BooksCommand, api: Option<&str>) -> Result<()> {
    match cmd.command {
        BooksSubcommand::List(args) => list::run(args, api).await,
        BooksSubcommand::Show(args) => show::run(args, api).await,
        BooksSubcommand::Add(args) => add::run(args, api).await,
        BooksSubcommand::Remove(args) => remove::run(args, api).await,
        BooksSubcommand::Genres(args) => genres::run(args, api).await,
    }
}
