//! Session lifecycle: persistent store, shared context, route guard.
//!
//! The context owns the in-memory session; the store is its durable
//! mirror, read once at startup and rewritten on every mutation.

mod context;
mod credentials;
mod guard;
mod store;
mod token;

pub use context::{RegisteredUser, SessionContext, SessionState};
pub use credentials::{LoginInput, RegisterInput};
pub use guard::{GuardDecision, decide};
pub use store::{SessionStore, StoredSession};
pub use token::AccessToken;
