//! Remove book command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Book id
    pub id: String,
}

pub async fn run(args: RemoveArgs, api: Option<&str>) -> Result<()> {
    let store = context::storefront(api)?;
    context::require_login(&store)?;

    store
        .catalog()
        .remove(&args.id)
        .await
        .context("Failed to remove book")?;

    output::success(&format!("Removed book {}", args.id));
    Ok(())
}
