//! HTTP clients for the bookstore API.
//!
//! Two request issuers, mirroring the public/private split of the
//! remote API: [`PublicClient`] sends no authorization header;
//! [`PrivateClient`] reads the current bearer token from the session
//! store before every request and reacts to authorization failures by
//! invoking a session-invalidation callback. The transport layer holds
//! no session-lifecycle knowledge of its own.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace, warn};

use crate::error::{ApiError, AuthError, Error};
use crate::session::SessionStore;
use crate::types::ApiBaseUrl;

use super::endpoints::ApiErrorBody;

/// Callback invoked when the API rejects the bearer token.
///
/// Wired up by the session context; clears the durable store and drops
/// the in-memory session so all consumers observe the teardown.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// A decoded 2xx response body together with the status it arrived
/// with, so envelope-level failures can report the real status.
#[derive(Debug)]
pub struct ApiResponse<R> {
    pub status: u16,
    pub body: R,
}

fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("pustaka/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client")
}

/// Client for unauthenticated requests (login, register, anonymous
/// catalog reads).
#[derive(Debug, Clone)]
pub struct PublicClient {
    client: reqwest::Client,
    base: ApiBaseUrl,
}

impl PublicClient {
    /// Create a new public client for the given API base URL.
    pub fn new(base: ApiBaseUrl) -> Self {
        Self {
            client: build_http_client(),
            base,
        }
    }

    /// Returns the API base URL this client is configured for.
    pub fn base(&self) -> &ApiBaseUrl {
        &self.base
    }

    /// GET without query parameters.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get<R>(&self, path: &str) -> Result<ApiResponse<R>, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "public GET");

        let response = self.client.get(&url).send().await?;
        handle_response(response).await
    }

    /// GET with query parameters.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get_with_query<Q, R>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<ApiResponse<R>, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "public GET");
        trace!(?query, "query parameters");

        let response = self.client.get(&url).query(query).send().await?;
        handle_response(response).await
    }

    /// POST a JSON body.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<ApiResponse<R>, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "public POST");

        let response = self.client.post(&url).json(body).send().await?;
        handle_response(response).await
    }
}

/// Client for authenticated requests.
///
/// Before every outgoing request the current token is read from the
/// session store and attached as a bearer credential, unless the
/// caller supplied one explicitly via a `*_with_token` method (the
/// explicit value always wins). A 401 response tears down the session
/// via the invalidation hook before the call rejects, so concurrent
/// in-flight requests also fail cleanly on their next token read.
#[derive(Clone)]
pub struct PrivateClient {
    client: reqwest::Client,
    base: ApiBaseUrl,
    store: SessionStore,
    on_unauthorized: UnauthorizedHook,
}

impl PrivateClient {
    /// Create a new private client.
    pub fn new(base: ApiBaseUrl, store: SessionStore, on_unauthorized: UnauthorizedHook) -> Self {
        Self {
            client: build_http_client(),
            base,
            store,
            on_unauthorized,
        }
    }

    /// Returns the API base URL this client is configured for.
    pub fn base(&self) -> &ApiBaseUrl {
        &self.base
    }

    /// Authenticated GET.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get<R>(&self, path: &str) -> Result<ApiResponse<R>, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "private GET");

        let request = self.client.get(&url).headers(self.auth_headers(None));
        self.send(request).await
    }

    /// Authenticated GET with an explicit token.
    #[instrument(skip(self, token), fields(base = %self.base))]
    pub async fn get_with_token<R>(&self, path: &str, token: &str) -> Result<ApiResponse<R>, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "private GET (explicit token)");

        let request = self
            .client
            .get(&url)
            .headers(self.auth_headers(Some(token)));
        self.send(request).await
    }

    /// Authenticated POST with a JSON body.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<ApiResponse<R>, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "private POST");

        let request = self
            .client
            .post(&url)
            .json(body)
            .headers(self.auth_headers(None));
        self.send(request).await
    }

    /// Authenticated POST with an explicit token.
    #[instrument(skip(self, body, token), fields(base = %self.base))]
    pub async fn post_with_token<B, R>(
        &self,
        path: &str,
        body: &B,
        token: &str,
    ) -> Result<ApiResponse<R>, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "private POST (explicit token)");

        let request = self
            .client
            .post(&url)
            .json(body)
            .headers(self.auth_headers(Some(token)));
        self.send(request).await
    }

    /// Authenticated DELETE.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn delete<R>(&self, path: &str) -> Result<ApiResponse<R>, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "private DELETE");

        let request = self.client.delete(&url).headers(self.auth_headers(None));
        self.send(request).await
    }

    /// Create authorization headers for an authenticated request.
    ///
    /// An explicit caller token always wins; otherwise the current
    /// token is read from the session store. When neither is present
    /// the request goes out without an authorization header and the
    /// server's 401 drives the teardown.
    fn auth_headers(&self, explicit: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let token = match explicit {
            Some(t) => Some(t.to_string()),
            None => self.store.load().map(|s| s.token),
        };

        if let Some(token) = token {
            let auth_value = format!("Bearer {}", token);
            if let Ok(value) = HeaderValue::from_str(&auth_value) {
                headers.insert(AUTHORIZATION, value);
            } else {
                warn!("stored token contains invalid header characters, sending without it");
            }
        }

        headers
    }

    /// Send a prepared request, intercepting authorization failures.
    async fn send<R>(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse<R>, Error>
    where
        R: DeserializeOwned,
    {
        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // The hook runs before the call rejects; teardown is
            // idempotent under concurrent 401s.
            warn!("API rejected bearer token, invalidating session");
            (self.on_unauthorized)();
            return Err(AuthError::SessionExpired.into());
        }

        handle_response(response).await
    }
}

// Manual Debug: the hook is an opaque closure
impl std::fmt::Debug for PrivateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateClient")
            .field("base", &self.base)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

/// Handle an API response, parsing the body or error.
async fn handle_response<R: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<ApiResponse<R>, Error> {
    let status = response.status();
    trace!(status = %status, "API response");

    if status.is_success() {
        let body = response.json::<R>().await?;
        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    } else {
        Err(Error::Api(parse_error_response(response).await))
    }
}

/// Parse an error response body, falling back to the bare status.
async fn parse_error_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();

    match response.json::<ApiErrorBody>().await {
        Ok(body) => ApiError::new(status, body.message),
        Err(_) => ApiError::new(status, None),
    }
}
