//! Shared session context.
//!
//! One process-wide state container for the current session. Every
//! consumer holds a clone of the same [`SessionContext`]; transitions
//! are observed by all of them simultaneously.

use std::sync::{Arc, Once, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::error::Error;
use crate::http::endpoints::{
    AUTH_LOGIN, AUTH_REGISTER, LoginData, LoginResponse, RegisterResponse,
    ensure_declared_success, require_data,
};
use crate::http::{ApiResponse, PublicClient, UnauthorizedHook};
use crate::types::User;

use super::credentials::{LoginInput, RegisterInput};
use super::store::SessionStore;
use super::token::AccessToken;

const LOGIN_FALLBACK: &str = "Login failed. Please try again.";
const REGISTER_FALLBACK: &str = "Registration failed. Please try again.";

/// The session state machine.
///
/// `Unknown` is the initial state before the one-time store read;
/// consumers must not act on authentication status while in it.
/// `Authenticated` always carries both the token and the user; the two
/// are written and cleared together, never one without the other.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// Initial state; the persistent store has not been read yet.
    Unknown,
    /// No session.
    Anonymous,
    /// A live session.
    Authenticated { token: AccessToken, user: User },
}

/// A user profile as returned by registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Process-wide session state and the login/register/logout operations.
///
/// Cheap to clone (internal `Arc`); all clones share one state. The
/// context exclusively owns the in-memory session and mirrors it into
/// the [`SessionStore`]; the only other writer of the store is the
/// 401 teardown hook, which the context itself provides via
/// [`SessionContext::invalidation_hook`].
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

struct Inner {
    client: PublicClient,
    store: SessionStore,
    state: RwLock<SessionState>,
    last_error: RwLock<Option<String>>,
    init: Once,
}

impl SessionContext {
    /// Create a new context. The state starts `Unknown` until
    /// [`SessionContext::initialize`] has run.
    pub fn new(client: PublicClient, store: SessionStore) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                store,
                state: RwLock::new(SessionState::Unknown),
                last_error: RwLock::new(None),
                init: Once::new(),
            }),
        }
    }

    /// Read the persistent store and settle the initial state.
    ///
    /// Runs exactly once per context regardless of how many clones
    /// call it; subsequent calls are no-ops. The read completes before
    /// this function returns, so `is_loading()` is false for every
    /// observation made afterwards.
    pub fn initialize(&self) {
        self.inner.init.call_once(|| {
            let next = match self.inner.store.load() {
                Some(stored) => {
                    debug!(user = %stored.user.username, "restored session from store");
                    SessionState::Authenticated {
                        token: AccessToken::new(stored.token),
                        user: stored.user,
                    }
                }
                None => {
                    debug!("no stored session");
                    SessionState::Anonymous
                }
            };
            *self.state_mut() = next;
        });
    }

    /// True while the initial store read has not settled.
    pub fn is_loading(&self) -> bool {
        matches!(*self.state(), SessionState::Unknown)
    }

    /// True when a session is live.
    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state(), SessionState::Authenticated { .. })
    }

    /// The current user, when authenticated.
    pub fn current_user(&self) -> Option<User> {
        match &*self.state() {
            SessionState::Authenticated { user, .. } => Some(user.clone()),
            _ => None,
        }
    }

    /// The current bearer token, when authenticated.
    pub fn token(&self) -> Option<AccessToken> {
        match &*self.state() {
            SessionState::Authenticated { token, .. } => Some(token.clone()),
            _ => None,
        }
    }

    /// The error message from the most recent failed operation, if any.
    /// Cleared at the start of every login/register call.
    pub fn last_error(&self) -> Option<String> {
        self.inner
            .last_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A snapshot of the current state.
    pub fn state_snapshot(&self) -> SessionState {
        self.state().clone()
    }

    /// Authenticate and transition to `Authenticated`.
    ///
    /// On success the token and user are written to the store and the
    /// in-memory state together. On any failure, including a failed
    /// store write, the server message (or a default) is recorded and
    /// both the in-memory state and the durable mirror settle
    /// `Anonymous` together; the error is returned so the caller can
    /// react as well.
    #[instrument(skip(self, input), fields(email = %input.email()))]
    pub async fn login(&self, input: &LoginInput) -> Result<User, Error> {
        self.set_error(None);

        // The durable mirror is written before the in-memory transition
        let result = self.submit_login(input).await.and_then(|data| {
            self.inner.store.save(&data.token, &data.user).map(|()| data)
        });

        match result {
            Ok(data) => {
                *self.state_mut() = SessionState::Authenticated {
                    token: AccessToken::new(data.token),
                    user: data.user.clone(),
                };
                info!(user = %data.user.username, "logged in");
                Ok(data.user)
            }
            Err(e) => {
                self.set_error(Some(failure_message(&e, LOGIN_FALLBACK)));
                self.force_logout();
                Err(e)
            }
        }
    }

    async fn submit_login(&self, input: &LoginInput) -> Result<LoginData, Error> {
        input.validate()?;
        let response: ApiResponse<LoginResponse> =
            self.inner.client.post(AUTH_LOGIN, input).await?;
        ensure_declared_success(response.status, response.body.success, response.body.message)?;
        require_data(response.body.data)
    }

    /// Create an account.
    ///
    /// Registration never changes the authentication state and never
    /// stores a token; the user must log in explicitly afterwards.
    #[instrument(skip(self, input), fields(username = %input.username()))]
    pub async fn register(&self, input: &RegisterInput) -> Result<RegisteredUser, Error> {
        self.set_error(None);

        match self.submit_register(input).await {
            Ok(registered) => {
                info!(user = %registered.username, "account created");
                Ok(registered)
            }
            Err(e) => {
                self.set_error(Some(failure_message(&e, REGISTER_FALLBACK)));
                Err(e)
            }
        }
    }

    async fn submit_register(&self, input: &RegisterInput) -> Result<RegisteredUser, Error> {
        input.validate()?;
        let response: ApiResponse<RegisterResponse> =
            self.inner.client.post(AUTH_REGISTER, input).await?;
        ensure_declared_success(response.status, response.body.success, response.body.message)?;
        require_data(response.body.data)
    }

    /// Clear the session.
    ///
    /// Idempotent: calling while already `Anonymous` is a no-op beyond
    /// re-clearing storage.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), Error> {
        *self.state_mut() = SessionState::Anonymous;
        self.set_error(None);
        self.inner.store.clear()?;
        info!("logged out");
        Ok(())
    }

    /// The teardown callback wired into the private HTTP client.
    ///
    /// Invoked on a 401 response: clears the store and drops the
    /// in-memory session so every consumer observes `Anonymous`. May
    /// race with [`SessionContext::logout`]; both converge on the same
    /// cleared state.
    pub fn invalidation_hook(&self) -> UnauthorizedHook {
        let ctx = self.clone();
        Arc::new(move || ctx.force_logout())
    }

    fn force_logout(&self) {
        *self.state_mut() = SessionState::Anonymous;
        if let Err(e) = self.inner.store.clear() {
            warn!(error = %e, "failed to clear session store during forced logout");
        }
    }

    fn set_error(&self, message: Option<String>) {
        *self
            .inner
            .last_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = message;
    }

    fn state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Derive the user-facing message for a failed auth operation.
///
/// Server-supplied messages and local validation messages are surfaced
/// verbatim; transport failures fall back to a generic message.
fn failure_message(error: &Error, fallback: &str) -> String {
    match error {
        Error::Api(api) => api.message_or(fallback),
        Error::InvalidInput(e) => e.to_string(),
        _ => fallback.to_string(),
    }
}

// Custom Debug impl that hides the token through SessionState's
// AccessToken redaction
impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("state", &*self.state())
            .finish_non_exhaustive()
    }
}
