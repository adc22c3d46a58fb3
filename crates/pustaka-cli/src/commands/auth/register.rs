//! Register command implementation.

use anyhow::{Result, bail};
use clap::Args;

use pustaka::RegisterInput;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Email for the new account
    #[arg(long)]
    pub email: String,

    /// Password (at least 6 characters)
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: RegisterArgs, api: Option<&str>) -> Result<()> {
    let store = context::storefront(api)?;

    let input = RegisterInput::new(&args.username, &args.email, &args.password);
    match store.session().register(&input).await {
        Ok(registered) => {
            output::success("Account created. Log in with 'pustaka auth login'.");
            println!();
            output::field("User", &registered.username);
            output::field("Email", &registered.email);
            output::field("Created", &registered.created_at.to_rfc3339());
            Ok(())
        }
        Err(e) => {
            let message = store
                .session()
                .last_error()
                .unwrap_or_else(|| e.to_string());
            bail!("{}", message);
        }
    }
}
