//! Login command implementation.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use pustaka::LoginInput;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, api: Option<&str>) -> Result<()> {
    let store = context::storefront(api)?;

    eprintln!("{}", "Logging in...".dimmed());

    let input = LoginInput::new(&args.email, &args.password);
    match store.session().login(&input).await {
        Ok(user) => {
            output::success("Logged in successfully");
            println!();
            output::field("User", &user.username);
            output::field("Email", &user.email);
            Ok(())
        }
        Err(e) => {
            // The context records the server-supplied message
            let message = store
                .session()
                .last_error()
                .unwrap_or_else(|| e.to_string());
            bail!("{}", message);
        }
    }
}
