//! Whoami command implementation.

use anyhow::{Result, bail};
use clap::Args;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, api: Option<&str>) -> Result<()> {
    let store = context::storefront(api)?;

    let Some(user) = store.session().current_user() else {
        bail!("No active session. Run 'pustaka auth login' first.");
    };

    output::field("User", &user.username);
    output::field("Email", &user.email);
    output::field("ID", &user.id);

    Ok(())
}
