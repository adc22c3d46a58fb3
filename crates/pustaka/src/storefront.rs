//! Storefront facade.

use crate::catalog::Catalog;
use crate::error::Error;
use crate::http::{PrivateClient, PublicClient};
use crate::session::{SessionContext, SessionStore};
use crate::transactions::Transactions;
use crate::types::ApiBaseUrl;

/// Entry point wiring the session, catalog and transaction surfaces
/// over one shared session store.
///
/// The private client's 401 teardown is wired to the session context,
/// so an authorization failure anywhere is observed everywhere.
#[derive(Debug, Clone)]
pub struct Storefront {
    session: SessionContext,
    catalog: Catalog,
    transactions: Transactions,
}

impl Storefront {
    /// Open a storefront using the platform default session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store directory cannot be
    /// determined.
    pub fn new(base: ApiBaseUrl) -> Result<Self, Error> {
        Ok(Self::with_store(base, SessionStore::open_default()?))
    }

    /// Open a storefront over an explicit session store.
    pub fn with_store(base: ApiBaseUrl, store: SessionStore) -> Self {
        let public = PublicClient::new(base.clone());
        let session = SessionContext::new(public.clone(), store.clone());
        let private = PrivateClient::new(base, store, session.invalidation_hook());

        let catalog = Catalog::new(public, private.clone());
        let transactions = Transactions::new(private);

        Self {
            session,
            catalog,
            transactions,
        }
    }

    /// The shared session context.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Catalog operations.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Transaction operations.
    pub fn transactions(&self) -> &Transactions {
        &self.transactions
    }
}
