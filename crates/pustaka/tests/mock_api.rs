//! Mock API tests for the pustaka library.
//!
//! These tests use wiremock to simulate the bookstore REST API and
//! exercise the session lifecycle, the public/private client split and
//! the catalog/transaction operations without network access.

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use pustaka::http::{ApiResponse, PrivateClient};
use pustaka::session::SessionStore;
use pustaka::{
    ApiBaseUrl, BookQuery, GuardDecision, LoginInput, OrderItem, RegisterInput, Storefront, User,
};

/// Helper to create a base URL from a mock server.
fn mock_base(server: &MockServer) -> ApiBaseUrl {
    // For tests, we need to allow HTTP localhost
    ApiBaseUrl::new(&format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn storefront(server: &MockServer, dir: &TempDir) -> Storefront {
    Storefront::with_store(mock_base(server), SessionStore::at(dir.path()))
}

fn test_user() -> User {
    User {
        id: "u1".to_string(),
        username: "a".to_string(),
        email: "a@b.com".to_string(),
    }
}

/// Matches requests that carry no authorization header.
struct NoAuthHeader;

impl wiremock::Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

async fn mount_login_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "a@b.com",
            "password": "secret1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Login successful",
            "data": {
                "token": "tok123",
                "user": {"id": "u1", "username": "a", "email": "a@b.com"}
            }
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Session Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;
    mount_login_success(&server).await;

    let dir = TempDir::new().unwrap();
    let store = storefront(&server, &dir);
    store.session().initialize();

    let user = store
        .session()
        .login(&LoginInput::new("a@b.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(user.id, "u1");
    assert!(store.session().is_authenticated());
    assert_eq!(store.session().token().unwrap().as_str(), "tok123");
    assert_eq!(store.session().guard(), GuardDecision::Allow);

    // The durable mirror holds the same token and user
    let stored = SessionStore::at(dir.path()).load().unwrap();
    assert_eq!(stored.token, "tok123");
    assert_eq!(stored.user.id, "u1");
}

#[tokio::test]
async fn test_login_invalid_credentials_surfaces_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = storefront(&server, &dir);
    store.session().initialize();

    let result = store
        .session()
        .login(&LoginInput::new("a@b.com", "wrongpass"))
        .await;

    assert!(result.is_err());
    assert_eq!(
        store.session().last_error().unwrap(),
        "Invalid email or password"
    );
    assert!(!store.session().is_authenticated());
    assert!(SessionStore::at(dir.path()).load().is_none());
}

#[tokio::test]
async fn test_login_non_json_error_uses_fallback_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Internal Server Error")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = storefront(&server, &dir);
    store.session().initialize();

    let result = store
        .session()
        .login(&LoginInput::new("a@b.com", "secret1"))
        .await;

    let err = result.unwrap_err().to_string();
    assert!(err.contains("500"));
    assert_eq!(
        store.session().last_error().unwrap(),
        "Login failed. Please try again."
    );
}

#[tokio::test]
async fn test_login_then_logout_leaves_no_trace() {
    let server = MockServer::start().await;
    mount_login_success(&server).await;

    let dir = TempDir::new().unwrap();
    let store = storefront(&server, &dir);
    store.session().initialize();

    store
        .session()
        .login(&LoginInput::new("a@b.com", "secret1"))
        .await
        .unwrap();
    store.session().logout().unwrap();

    assert!(!store.session().is_authenticated());
    assert!(store.session().current_user().is_none());
    assert!(SessionStore::at(dir.path()).load().is_none());
    assert_eq!(store.session().guard(), GuardDecision::RedirectToLogin);
}

#[tokio::test]
async fn test_failed_relogin_clears_previous_session() {
    let server = MockServer::start().await;
    mount_login_success(&server).await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "a@b.com",
            "password": "wrongpass"
        })))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = storefront(&server, &dir);
    store.session().initialize();

    store
        .session()
        .login(&LoginInput::new("a@b.com", "secret1"))
        .await
        .unwrap();
    assert!(store.session().is_authenticated());

    let result = store
        .session()
        .login(&LoginInput::new("a@b.com", "wrongpass"))
        .await;
    assert!(result.is_err());

    // The in-memory state and the durable mirror agree: a failed
    // login drops the previous session from both at once.
    assert!(!store.session().is_authenticated());
    assert!(SessionStore::at(dir.path()).load().is_none());
}

#[tokio::test]
async fn test_login_store_write_failure_surfaces_error() {
    let server = MockServer::start().await;
    mount_login_success(&server).await;

    // The store directory path collides with a regular file, so the
    // post-login save cannot create it.
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();

    let store = Storefront::with_store(mock_base(&server), SessionStore::at(&blocker));
    store.session().initialize();

    let result = store
        .session()
        .login(&LoginInput::new("a@b.com", "secret1"))
        .await;

    assert!(matches!(result, Err(pustaka::Error::Storage(_))));
    assert_eq!(
        store.session().last_error().unwrap(),
        "Login failed. Please try again."
    );
    assert!(!store.session().is_authenticated());
}

#[tokio::test]
async fn test_register_never_authenticates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "username": "a",
            "email": "a@b.com",
            "password": "secret1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "User registered",
            "data": {
                "id": "u1",
                "username": "a",
                "email": "a@b.com",
                "createdAt": "2024-06-01T10:00:00Z"
            }
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = storefront(&server, &dir);
    store.session().initialize();

    let registered = store
        .session()
        .register(&RegisterInput::new("a", "a@b.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(registered.id, "u1");
    // Registration intentionally requires a subsequent explicit login
    assert!(!store.session().is_authenticated());
    assert!(store.session().token().is_none());
    assert!(SessionStore::at(dir.path()).load().is_none());
}

#[tokio::test]
async fn test_register_failure_surfaces_message_and_keeps_state() {
    let server = MockServer::start().await;
    mount_login_success(&server).await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "message": "Email already registered"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = storefront(&server, &dir);
    store.session().initialize();
    store
        .session()
        .login(&LoginInput::new("a@b.com", "secret1"))
        .await
        .unwrap();

    let result = store
        .session()
        .register(&RegisterInput::new("b", "b@c.com", "secret1"))
        .await;

    assert!(result.is_err());
    assert_eq!(
        store.session().last_error().unwrap(),
        "Email already registered"
    );
    // A failed registration does not touch an existing session either
    assert!(store.session().is_authenticated());
}

// ============================================================================
// Private Client / 401 Teardown Tests
// ============================================================================

#[tokio::test]
async fn test_private_request_attaches_stored_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": []
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    SessionStore::at(dir.path())
        .save("tok123", &test_user())
        .unwrap();

    let store = storefront(&server, &dir);
    let transactions = store.transactions().list().await.unwrap();
    assert!(transactions.is_empty());
}

#[tokio::test]
async fn test_explicit_token_wins_over_stored_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(header("authorization", "Bearer explicit-tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": []
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SessionStore::at(dir.path());
    store.save("stored-tok", &test_user()).unwrap();

    let client = PrivateClient::new(mock_base(&server), store, Arc::new(|| {}));
    let response: ApiResponse<serde_json::Value> = client
        .get_with_token("/transactions", "explicit-tok")
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body["success"], true);
}

#[tokio::test]
async fn test_401_clears_store_and_session() {
    let server = MockServer::start().await;
    mount_login_success(&server).await;

    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Token expired"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = storefront(&server, &dir);
    store.session().initialize();
    store
        .session()
        .login(&LoginInput::new("a@b.com", "secret1"))
        .await
        .unwrap();

    let result = store.transactions().list().await;
    assert!(matches!(
        result,
        Err(pustaka::Error::Auth(
            pustaka::error::AuthError::SessionExpired
        ))
    ));

    // Global teardown: the store is cleared and every consumer of the
    // shared context observes Anonymous.
    assert!(SessionStore::at(dir.path()).load().is_none());
    assert!(!store.session().is_authenticated());
    assert_eq!(store.session().guard(), GuardDecision::RedirectToLogin);
}

#[tokio::test]
async fn test_concurrent_requests_fail_cleanly_after_401() {
    let server = MockServer::start().await;

    // Every private endpoint rejects the token
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Token expired"
        })))
        .mount(&server)
        .await;

    // After the teardown, requests carry no token at all
    Mock::given(method("GET"))
        .and(path("/transactions/t1"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Authentication required"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    SessionStore::at(dir.path())
        .save("tok123", &test_user())
        .unwrap();

    let store = storefront(&server, &dir);
    store.session().initialize();
    assert!(store.session().is_authenticated());

    // Two in-flight requests race against the teardown; both reject
    // safely and converge on the same cleared state.
    let (a, b) = tokio::join!(store.transactions().list(), store.transactions().list());
    assert!(a.is_err());
    assert!(b.is_err());
    assert!(SessionStore::at(dir.path()).load().is_none());

    // A subsequent call carries no token (matched by NoAuthHeader)
    let result = store.transactions().get("t1").await;
    assert!(result.is_err());
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[tokio::test]
async fn test_list_books_with_query_and_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .and(query_param("search", "rust"))
        .and(query_param("sortBy", "publicationYear"))
        .and(query_param("order", "desc"))
        .and(query_param("page", "1"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {
                    "id": "b1",
                    "title": "The Rust Programming Language",
                    "writer": "Klabnik",
                    "publisher": "No Starch",
                    "price": 50000,
                    "stockQuantity": 3,
                    "genreId": "g1",
                    "genre": {"id": "g1", "name": "Programming"},
                    "publicationYear": 2019
                }
            ],
            "pagination": {
                "currentPage": 1,
                "totalPages": 4,
                "totalItems": 37,
                "itemsPerPage": 10
            }
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = storefront(&server, &dir);

    let query = BookQuery {
        search: Some("rust".to_string()),
        sort_by: Some("year".parse().unwrap()),
        order: Some("desc".parse().unwrap()),
        page: Some(1),
        ..Default::default()
    };
    let page = store.catalog().list(&query).await.unwrap();

    assert_eq!(page.books.len(), 1);
    assert_eq!(page.books[0].price, 50000);
    assert_eq!(page.pagination.unwrap().total_items, 37);
}

#[tokio::test]
async fn test_book_detail_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "Book not found"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = storefront(&server, &dir);

    let err = store.catalog().get("nope").await.unwrap_err();
    assert!(err.to_string().contains("Book not found"));
}

#[tokio::test]
async fn test_create_book_requires_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/books"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Book created",
            "data": {
                "id": "b9",
                "title": "New Book",
                "writer": "W",
                "publisher": "P",
                "price": 75000,
                "stockQuantity": 1,
                "genreId": "g1",
                "publicationYear": 2024
            }
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    SessionStore::at(dir.path())
        .save("tok123", &test_user())
        .unwrap();

    let store = storefront(&server, &dir);
    let book = store
        .catalog()
        .create(&pustaka::BookInput {
            title: "New Book".to_string(),
            writer: "W".to_string(),
            publisher: "P".to_string(),
            price: 75000,
            stock_quantity: 1,
            genre_id: "g1".to_string(),
            publication_year: 2024,
            image: None,
            isbn: None,
            description: None,
            condition: None,
        })
        .await
        .unwrap();

    assert_eq!(book.id, "b9");
}

#[tokio::test]
async fn test_declared_failure_reports_envelope_status() {
    let server = MockServer::start().await;

    // A 201 envelope that still declares failure keeps its real status
    Mock::given(method("POST"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": false,
            "message": "Genre does not exist"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    SessionStore::at(dir.path())
        .save("tok123", &test_user())
        .unwrap();

    let store = storefront(&server, &dir);
    let err = store
        .catalog()
        .create(&pustaka::BookInput {
            title: "New Book".to_string(),
            writer: "W".to_string(),
            publisher: "P".to_string(),
            price: 75000,
            stock_quantity: 1,
            genre_id: "nope".to_string(),
            publication_year: 2024,
            image: None,
            isbn: None,
            description: None,
            condition: None,
        })
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("HTTP 201"));
    assert!(message.contains("Genre does not exist"));
}

#[tokio::test]
async fn test_list_genres() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/genre"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"id": "g1", "name": "Programming"},
                {"id": "g2", "name": "Fiction", "description": "Made-up stories"}
            ]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = storefront(&server, &dir);

    let genres = store.catalog().genres().await.unwrap();
    assert_eq!(genres.len(), 2);
    assert_eq!(genres[1].description.as_deref(), Some("Made-up stories"));
}

// ============================================================================
// Transaction Tests
// ============================================================================

#[tokio::test]
async fn test_checkout_sends_items_and_surfaces_summary() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactions"))
        .and(header("authorization", "Bearer tok123"))
        .and(body_json(json!({
            "items": [{"book_id": "b1", "quantity": 2}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {
                "transaction_id": "t1",
                "total_quantity": 2,
                "total_price": 100000
            }
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    SessionStore::at(dir.path())
        .save("tok123", &test_user())
        .unwrap();

    let store = storefront(&server, &dir);
    let summary = store
        .transactions()
        .checkout(&[OrderItem {
            book_id: "b1".to_string(),
            quantity: 2,
        }])
        .await
        .unwrap();

    // The server summary is surfaced unchanged
    assert_eq!(summary.transaction_id, "t1");
    assert_eq!(summary.total_quantity, 2);
    assert_eq!(summary.total_price, 100000);
}

#[tokio::test]
async fn test_checkout_empty_cart_never_hits_network() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would 404 and fail differently

    let dir = TempDir::new().unwrap();
    let store = storefront(&server, &dir);

    let result = store.transactions().checkout(&[]).await;
    assert!(matches!(result, Err(pustaka::Error::InvalidInput(_))));
}

#[tokio::test]
async fn test_checkout_declared_failure_carries_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Insufficient stock for book b1"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    SessionStore::at(dir.path())
        .save("tok123", &test_user())
        .unwrap();

    let store = storefront(&server, &dir);
    let err = store
        .transactions()
        .checkout(&[OrderItem {
            book_id: "b1".to_string(),
            quantity: 99,
        }])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Insufficient stock"));
}

#[tokio::test]
async fn test_transaction_history() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions/t1"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": "t1",
                "userId": "u1",
                "createdAt": "2024-06-01T10:00:00Z",
                "updatedAt": "2024-06-01T10:00:00Z",
                "orderItems": [
                    {
                        "id": "oi1",
                        "quantity": 2,
                        "book": {"title": "The Rust Programming Language", "price": 50000}
                    }
                ],
                "user": {"id": "u1", "username": "a", "email": "a@b.com"}
            }
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    SessionStore::at(dir.path())
        .save("tok123", &test_user())
        .unwrap();

    let store = storefront(&server, &dir);
    let tx = store.transactions().get("t1").await.unwrap();

    assert_eq!(tx.id, "t1");
    assert_eq!(tx.order_items.len(), 1);
    assert_eq!(tx.order_items[0].book.price, 50000);
    assert_eq!(tx.user.username, "a");
}
