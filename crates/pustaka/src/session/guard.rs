//! Route guard decision.
//!
//! A pure function of the session state, consulted by the view layer
//! before committing to render a protected page.

use super::context::{SessionContext, SessionState};

/// The guard's verdict for a protected page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The store read has not settled; render a transient placeholder,
    /// never a redirect. Prevents redirect flicker during startup.
    Loading,
    /// No session; redirect to the login page, replacing history so
    /// back navigation cannot return to the guarded page.
    RedirectToLogin,
    /// A session is live; render the requested page unchanged.
    Allow,
}

/// Decide whether a protected page may render for the given state.
pub fn decide(state: &SessionState) -> GuardDecision {
    match state {
        SessionState::Unknown => GuardDecision::Loading,
        SessionState::Anonymous => GuardDecision::RedirectToLogin,
        SessionState::Authenticated { .. } => GuardDecision::Allow,
    }
}

impl SessionContext {
    /// Consult the route guard against the current state.
    pub fn guard(&self) -> GuardDecision {
        decide(&self.state_snapshot())
    }
}
