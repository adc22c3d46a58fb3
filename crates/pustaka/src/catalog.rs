//! Book catalog operations.
//!
//! Anonymous reads (listing, detail, genres) go through the public
//! client; create and delete require a bearer token and go through the
//! private client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::error::{Error, InvalidInputError};
use crate::http::endpoints::{BOOKS, GENRES, ensure_declared_success, require_data};
use crate::http::{ApiResponse, PrivateClient, PublicClient};

/// A book genre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Physical condition of a listed book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookCondition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl FromStr for BookCondition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "like_new" => Ok(Self::LikeNew),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            _ => Err(InvalidInputError::Other {
                message: format!(
                    "unknown condition '{}' (expected new, like_new, good, fair or poor)",
                    s
                ),
            }
            .into()),
        }
    }
}

impl fmt::Display for BookCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "new",
            Self::LikeNew => "like_new",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        };
        write!(f, "{}", s)
    }
}

/// A book in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub writer: String,
    pub publisher: String,
    /// Price in the store currency's smallest display unit.
    pub price: u64,
    pub stock_quantity: u32,
    pub genre_id: String,
    #[serde(default)]
    pub genre: Option<Genre>,
    pub publication_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<BookCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Input for creating a book listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub title: String,
    pub writer: String,
    pub publisher: String,
    pub price: u64,
    pub stock_quantity: u32,
    pub genre_id: String,
    pub publication_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<BookCondition>,
}

/// Sort field for book listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortField {
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "publicationYear")]
    PublicationYear,
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "year" | "publicationYear" => Ok(Self::PublicationYear),
            _ => Err(InvalidInputError::Other {
                message: format!("unknown sort field '{}' (expected title or year)", s),
            }
            .into()),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(InvalidInputError::Other {
                message: format!("unknown sort order '{}' (expected asc or desc)", s),
            }
            .into()),
        }
    }
}

/// Filter, sort and pagination parameters for book listings.
///
/// Unset fields are omitted from the query string.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<BookCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Pagination metadata from a book listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u32,
    pub items_per_page: u32,
}

/// One page of a book listing.
#[derive(Debug, Clone)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct BookListResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Vec<Book>>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct BookDetailResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Book>,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenreListResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Vec<Genre>>,
}

/// Catalog operations.
#[derive(Debug, Clone)]
pub struct Catalog {
    public: PublicClient,
    private: PrivateClient,
}

impl Catalog {
    pub(crate) fn new(public: PublicClient, private: PrivateClient) -> Self {
        Self { public, private }
    }

    /// List books with optional search, filter, sort and pagination.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &BookQuery) -> Result<BookPage, Error> {
        debug!("listing books");

        let response: ApiResponse<BookListResponse> =
            self.public.get_with_query(BOOKS, query).await?;
        ensure_declared_success(response.status, response.body.success, response.body.message)?;

        Ok(BookPage {
            books: require_data(response.body.data)?,
            pagination: response.body.pagination,
        })
    }

    /// Fetch a single book by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Book, Error> {
        debug!("fetching book");

        let path = format!("{}/{}", BOOKS, id);
        let response: ApiResponse<BookDetailResponse> = self.public.get(&path).await?;
        ensure_declared_success(response.status, response.body.success, response.body.message)?;

        require_data(response.body.data)
    }

    /// Create a book listing. Requires authentication.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: &BookInput) -> Result<Book, Error> {
        debug!("creating book");

        let response: ApiResponse<BookDetailResponse> = self.private.post(BOOKS, input).await?;
        ensure_declared_success(response.status, response.body.success, response.body.message)?;

        require_data(response.body.data)
    }

    /// Delete a book listing. Requires authentication.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), Error> {
        debug!("deleting book");

        let path = format!("{}/{}", BOOKS, id);
        let response: ApiResponse<DeleteResponse> = self.private.delete(&path).await?;
        ensure_declared_success(response.status, response.body.success, response.body.message)
    }

    /// List all genres.
    #[instrument(skip(self))]
    pub async fn genres(&self) -> Result<Vec<Genre>, Error> {
        debug!("listing genres");

        let response: ApiResponse<GenreListResponse> = self.public.get(GENRES).await?;
        ensure_declared_success(response.status, response.body.success, response.body.message)?;

        require_data(response.body.data)
    }
}
