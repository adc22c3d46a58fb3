//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, api: Option<&str>) -> Result<()> {
    let store = context::storefront(api)?;

    store
        .session()
        .logout()
        .context("Failed to clear session")?;

    output::success("Logged out");
    Ok(())
}
