//! pustaka - Bookstore Storefront Client
//!
//! This library is a typed client for the pustaka bookstore REST API
//! with a session-centric design: a persistent session store, a shared
//! session context (login, register, logout, 401-driven teardown), a
//! route guard decision, and catalog/transaction operations split
//! across public and private HTTP clients.
//!
//! # Example
//!
//! ```no_run
//! use pustaka::{ApiBaseUrl, BookQuery, LoginInput, Storefront};
//!
//! # async fn example() -> Result<(), pustaka::Error> {
//! let base = ApiBaseUrl::new("https://api.bookstore.example")?;
//! let store = Storefront::new(base)?;
//!
//! store.session().initialize();
//! store.session().login(&LoginInput::new("a@b.com", "secret1")).await?;
//!
//! let page = store.catalog().list(&BookQuery::default()).await?;
//! for book in page.books {
//!     println!("{}: {}", book.title, book.price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod http;
pub mod session;
pub mod transactions;
pub mod types;

mod storefront;

// Re-export primary types at crate root for convenience
pub use catalog::{Book, BookCondition, BookInput, BookPage, BookQuery, Genre};
pub use error::Error;
pub use session::{GuardDecision, LoginInput, RegisterInput, SessionContext, SessionStore};
pub use storefront::Storefront;
pub use transactions::{Cart, CheckoutSummary, OrderItem, Transaction};
pub use types::{ApiBaseUrl, User};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
