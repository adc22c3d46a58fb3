//! Storefront construction and the route guard check.

use anyhow::{Context, Result, bail};
use pustaka::{ApiBaseUrl, GuardDecision, Storefront};

const API_ENV: &str = "PUSTAKA_API";
const DEFAULT_API: &str = "http://localhost:8080/api";

/// Build a storefront from the `--api` flag, the environment, or the
/// localhost default, and settle the session state from the store.
pub fn storefront(api: Option<&str>) -> Result<Storefront> {
    let url = match api {
        Some(u) => u.to_string(),
        None => std::env::var(API_ENV).unwrap_or_else(|_| DEFAULT_API.to_string()),
    };

    let base = ApiBaseUrl::new(&url).context("Invalid API base URL")?;
    let store = Storefront::new(base).context("Failed to open session store")?;
    store.session().initialize();
    Ok(store)
}

/// Consult the route guard before a protected command.
pub fn require_login(store: &Storefront) -> Result<()> {
    match store.session().guard() {
        GuardDecision::Allow => Ok(()),
        GuardDecision::RedirectToLogin => {
            bail!("No active session. Run 'pustaka auth login' first.")
        }
        // Unreachable after initialize(), but never redirect while loading
        GuardDecision::Loading => bail!("Session state is still loading, try again."),
    }
}
