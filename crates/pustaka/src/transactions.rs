//! Checkout and transaction history.
//!
//! Every operation here requires a bearer token and goes through the
//! private client. The checkout cart math lives here too so its
//! clamping and totaling rules are testable away from any view code.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::catalog::Book;
use crate::error::{Error, InvalidInputError};
use crate::http::{ApiResponse, PrivateClient};
use crate::http::endpoints::{TRANSACTIONS, ensure_declared_success, require_data};
use crate::types::User;

/// One checkout line item in the wire shape the API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub book_id: String,
    pub quantity: u32,
}

/// The server's summary of a completed checkout, surfaced unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub transaction_id: String,
    pub total_quantity: u32,
    pub total_price: u64,
}

/// A line item within a recorded transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionItem {
    pub id: String,
    pub quantity: u32,
    pub book: TransactionBook,
}

/// The book snapshot embedded in a transaction line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionBook {
    pub title: String,
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

/// A recorded transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub order_items: Vec<TransactionItem>,
    pub user: User,
}

#[derive(Debug, Serialize)]
struct CheckoutRequest<'a> {
    items: &'a [OrderItem],
}

#[derive(Debug, Deserialize)]
struct CheckoutResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<CheckoutSummary>,
}

#[derive(Debug, Deserialize)]
struct TransactionListResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Vec<Transaction>>,
}

#[derive(Debug, Deserialize)]
struct TransactionDetailResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Transaction>,
}

/// Transaction operations.
#[derive(Debug, Clone)]
pub struct Transactions {
    private: PrivateClient,
}

impl Transactions {
    pub(crate) fn new(private: PrivateClient) -> Self {
        Self { private }
    }

    /// Submit a checkout with the given items.
    ///
    /// The body is `{"items": [...]}`; an empty item list is rejected
    /// locally before any network call.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn checkout(&self, items: &[OrderItem]) -> Result<CheckoutSummary, Error> {
        if items.is_empty() {
            return Err(InvalidInputError::Other {
                message: "cart is empty".to_string(),
            }
            .into());
        }

        debug!("submitting checkout");
        let request = CheckoutRequest { items };
        let response: ApiResponse<CheckoutResponse> =
            self.private.post(TRANSACTIONS, &request).await?;
        ensure_declared_success(response.status, response.body.success, response.body.message)?;

        require_data(response.body.data)
    }

    /// List the authenticated user's transactions.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Transaction>, Error> {
        debug!("listing transactions");

        let response: ApiResponse<TransactionListResponse> =
            self.private.get(TRANSACTIONS).await?;
        ensure_declared_success(response.status, response.body.success, response.body.message)?;

        require_data(response.body.data)
    }

    /// Fetch a single transaction by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Transaction, Error> {
        debug!("fetching transaction");

        let path = format!("{}/{}", TRANSACTIONS, id);
        let response: ApiResponse<TransactionDetailResponse> = self.private.get(&path).await?;
        ensure_declared_success(response.status, response.body.success, response.body.message)?;

        require_data(response.body.data)
    }
}

/// One cart line: a catalog book plus a chosen quantity.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub book_id: String,
    pub title: String,
    pub price: u64,
    pub stock: u32,
    pub quantity: u32,
}

/// A checkout cart.
///
/// Quantities are clamped to `[0, stock]`; only non-zero lines are
/// emitted as order items.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Build a cart over a book listing, all quantities zero.
    pub fn new(books: &[Book]) -> Self {
        let lines = books
            .iter()
            .map(|book| CartLine {
                book_id: book.id.clone(),
                title: book.title.clone(),
                price: book.price,
                stock: book.stock_quantity,
                quantity: 0,
            })
            .collect();
        Self { lines }
    }

    /// Set the quantity for a book, clamped to the available stock.
    /// Returns the effective quantity, or `None` for an unknown book.
    pub fn set_quantity(&mut self, book_id: &str, quantity: u32) -> Option<u32> {
        let line = self.lines.iter_mut().find(|l| l.book_id == book_id)?;
        line.quantity = quantity.min(line.stock);
        Some(line.quantity)
    }

    /// Sum of price times quantity over all lines.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .map(|l| l.price * u64::from(l.quantity))
            .sum()
    }

    /// Total quantity over all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// True when no line has a quantity.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.quantity == 0)
    }

    /// The cart lines for display.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The non-zero lines in the wire shape the checkout expects.
    pub fn items(&self) -> Vec<OrderItem> {
        self.lines
            .iter()
            .filter(|l| l.quantity > 0)
            .map(|l| OrderItem {
                book_id: l.book_id.clone(),
                quantity: l.quantity,
            })
            .collect()
    }

    /// Reset every quantity to zero.
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.quantity = 0;
        }
    }
}
